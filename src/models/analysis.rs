use serde::{ Deserialize, Serialize };

use crate::models::assessment::RiskAssessment;
use crate::models::common::{ ClauseCategory, ClauseType, RiskLevel };

/// Upper bound of the overall score scale
pub const MAX_OVERALL_SCORE: f64 = 10.0;

/// A single finding reported back to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deviation {
    pub clause: ClauseCategory,
    #[serde(rename = "type")]
    pub clause_type: ClauseType,
    pub risk_level: RiskLevel,
    pub description: String,
    pub recommendation: String,
    pub metadata: RiskAssessment,
}

/// Number of deviations per risk level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskCounts {
    #[serde(rename = "High")]
    pub high: usize,
    #[serde(rename = "Medium")]
    pub medium: usize,
    #[serde(rename = "Low")]
    pub low: usize,
}

impl RiskCounts {
    pub fn tally<'a, I>(deviations: I) -> Self where I: IntoIterator<Item = &'a Deviation> {
        let mut counts = RiskCounts::default();
        for deviation in deviations {
            counts.record(deviation.risk_level);
        }
        counts
    }

    pub fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::High => {
                self.high += 1;
            }
            RiskLevel::Medium => {
                self.medium += 1;
            }
            RiskLevel::Low => {
                self.low += 1;
            }
        }
    }

    pub fn get(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::High => self.high,
            RiskLevel::Medium => self.medium,
            RiskLevel::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Outcome of analysing one deal against the market standard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: f64,
    pub risk_label: RiskLevel,
    pub deviations: Vec<Deviation>,
    pub counts: RiskCounts,
    pub ai_enabled: bool,
}

impl AnalysisResult {
    /// Build a result from deviations, deriving score, label and counts.
    pub fn from_deviations(deviations: Vec<Deviation>, ai_enabled: bool) -> Self {
        let total: u32 = deviations
            .iter()
            .map(|d| d.metadata.risk_score)
            .sum();
        let overall_score = (total as f64).min(MAX_OVERALL_SCORE);
        let counts = RiskCounts::tally(&deviations);

        AnalysisResult {
            overall_score,
            risk_label: RiskLevel::from_score(overall_score),
            deviations,
            counts,
            ai_enabled,
        }
    }

    pub fn has_level(&self, level: RiskLevel) -> bool {
        self.counts.get(level) > 0
    }
}

/// Analysis of a named deal, as handed to the report and portfolio layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealReport {
    pub deal_name: String,
    pub template_name: String,
    #[serde(flatten)]
    pub analysis: AnalysisResult,
}

/// "Deal_Delta_Orig.txt" -> "Deal Delta Orig"
pub fn display_name(file_name: &str) -> String {
    file_name.trim_end_matches(".txt").replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::DeviationMetric;

    fn deviation(clause_type: ClauseType, level: RiskLevel, score: u32) -> Deviation {
        Deviation {
            clause: clause_type.category(),
            clause_type,
            risk_level: level,
            description: String::new(),
            recommendation: String::new(),
            metadata: RiskAssessment {
                clause_type,
                extracted_value: 0.0,
                standard_value: 0.0,
                risk_level: level,
                risk_score: score,
                severity: String::new(),
                deviation: DeviationMetric::NotApplicable,
            },
        }
    }

    #[test]
    fn test_score_is_capped_at_ten() {
        let result = AnalysisResult::from_deviations(
            vec![
                deviation(ClauseType::LeverageRatio, RiskLevel::High, 9),
                deviation(ClauseType::InterestCover, RiskLevel::High, 9),
                deviation(ClauseType::GracePeriod, RiskLevel::High, 6)
            ],
            false
        );
        assert_eq!(result.overall_score, 10.0);
        assert_eq!(result.risk_label, RiskLevel::High);
        assert_eq!(result.counts.high, 3);
    }

    #[test]
    fn test_serialized_shape() {
        let result = AnalysisResult::from_deviations(
            vec![deviation(ClauseType::CrossDefault, RiskLevel::Low, 1)],
            true
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["overall_score"], 1.0);
        assert_eq!(json["risk_label"], "Low");
        assert_eq!(json["counts"]["Low"], 1);
        assert_eq!(json["counts"]["High"], 0);
        assert_eq!(json["ai_enabled"], true);
        assert_eq!(json["deviations"][0]["clause"], "Events of Default");
        assert_eq!(json["deviations"][0]["type"], "Cross Default Threshold");
        assert_eq!(json["deviations"][0]["metadata"]["deviation"]["kind"], "not_applicable");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("Deal_Delta_Amend1.txt"), "Deal Delta Amend1");
        assert_eq!(display_name("LMA_Leveraged_2023.txt"), "LMA Leveraged 2023");
    }
}
