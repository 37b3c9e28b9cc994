use std::fmt;

use chrono::NaiveDateTime;

use crate::models::analysis::AnalysisResult;
use crate::models::common::RiskLevel;

const RULE: &str = "==================================================";

/// Whether the deal has to go to committee
pub fn requires_approval(result: &AnalysisResult) -> bool {
    result.risk_label == RiskLevel::High || result.has_level(RiskLevel::High)
}

/// Plain-text compliance report for one analysed deal
pub fn render_report(deal_ref: &str, result: &AnalysisResult, timestamp: NaiveDateTime) -> String {
    ComplianceReport { deal_ref, result, timestamp }.to_string()
}

/// Compliance report layout, written through `Display`
pub struct ComplianceReport<'a> {
    pub deal_ref: &'a str,
    pub result: &'a AnalysisResult,
    pub timestamp: NaiveDateTime,
}

impl fmt::Display for ComplianceReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;
        let approval = requires_approval(result);

        writeln!(f, "{}", RULE)?;
        writeln!(f, "LMA COMPLIANCE REPORT - DO NOT DISTRIBUTE")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Deal Ref: {}", self.deal_ref)?;
        writeln!(f, "Date: {}", self.timestamp.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "Status: {}", if approval { "REQUIRES APPROVAL" } else { "STANDARD REVIEW" })?;
        writeln!(f)?;

        section(f, "EXECUTIVE SUMMARY")?;
        if result.has_level(RiskLevel::High) || result.has_level(RiskLevel::Medium) {
            writeln!(f, "This facility agreement contains material deviations from the LMA standard.")?;
        } else {
            writeln!(f, "No material deviations from the LMA standard were identified.")?;
        }
        writeln!(
            f,
            "Risk Score: {:.1}/10 ({})",
            result.overall_score,
            result.risk_label.as_str().to_uppercase()
        )?;
        writeln!(f)?;

        section(f, "KEY RISKS IDENTIFIED")?;
        let key_risks: Vec<_> = result.deviations
            .iter()
            .filter(|d| d.risk_level != RiskLevel::Low)
            .collect();
        if key_risks.is_empty() {
            writeln!(f, "None.")?;
        }
        for (i, deviation) in key_risks.iter().enumerate() {
            writeln!(
                f,
                "{}. {}: {} [{}] {}",
                i + 1,
                deviation.clause,
                deviation.clause_type,
                deviation.risk_level,
                deviation.description
            )?;
        }
        writeln!(f)?;

        section(f, "RECOMMENDATION")?;
        if approval {
            writeln!(f, "Refer to Credit Committee for Level 2 Approval.")
        } else {
            writeln!(f, "Proceed with standard desk review.")
        }
    }
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", "-".repeat(title.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::implementations::risk_engine::RiskEngine;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap().and_hms_opt(9, 30, 0).unwrap()
    }

    #[tokio::test]
    async fn test_high_risk_deal_requires_approval() {
        let engine = RiskEngine::deterministic();
        let result = engine
            .analyze(
                "The Leverage Ratio shall not exceed 4.75:1. Payment is made within 3 Business Days.",
                ""
            ).await
            .unwrap();

        let report = render_report("Deal_Delta.txt", &result, timestamp());
        assert!(report.contains("Deal Ref: Deal_Delta.txt"));
        assert!(report.contains("Date: 2025-01-31 09:30:00"));
        assert!(report.contains("Status: REQUIRES APPROVAL"));
        assert!(report.contains("Risk Score: 7.0/10 (HIGH)"));
        assert!(report.contains("1. Financial Covenants: Leverage Ratio [High]"));
        // The Low grace-period finding is not a key risk
        assert!(!report.contains("2. "));
        assert!(report.contains("Refer to Credit Committee"));
    }

    #[tokio::test]
    async fn test_clean_deal_gets_standard_review() {
        let engine = RiskEngine::deterministic();
        let result = engine.analyze("Nothing of interest here.", "").await.unwrap();

        let report = render_report("Deal_Clean.txt", &result, timestamp());
        assert!(report.contains("Status: STANDARD REVIEW"));
        assert!(report.contains("No material deviations"));
        assert!(report.contains("Risk Score: 0.0/10 (LOW)"));
        assert!(report.contains("None."));
        assert!(report.contains("Proceed with standard desk review."));
    }

    #[tokio::test]
    async fn test_display_matches_rendered_report() {
        let engine = RiskEngine::deterministic();
        let result = engine.analyze("Payment is made within 10 Business Days.", "").await.unwrap();

        let report = ComplianceReport { deal_ref: "Deal_Grace.txt", result: &result, timestamp: timestamp() };
        let rendered = render_report("Deal_Grace.txt", &result, timestamp());
        assert_eq!(format!("{}", report), rendered);

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], RULE);
        assert_eq!(lines[1], "LMA COMPLIANCE REPORT - DO NOT DISTRIBUTE");
        assert!(lines.contains(&"EXECUTIVE SUMMARY"));
        assert!(lines.contains(&"-----------------"));
        assert_eq!(lines.last(), Some(&"Refer to Credit Committee for Level 2 Approval."));
        assert!(rendered.ends_with('\n'));
    }
}
