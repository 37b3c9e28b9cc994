use std::collections::BTreeMap;
use std::fs;
use std::path::{ Path, PathBuf };

use chrono::{ Datelike, Local, NaiveDate };
use log::{ debug, info };

use crate::errors::{ DocCompareError, DocCompareResult };
use crate::models::analysis::AnalysisResult;
use crate::models::common::RiskLevel;
use crate::models::portfolio::{ PortfolioItem, PortfolioStats };

/// Jurisdiction assigned to newly analysed deals
pub const DEFAULT_JURISDICTION: &str = "English Law";

/// Vintage before which documentation is counted as pre-2020
const MODERN_VINTAGE: i32 = 2020;

/// JSON-file store of analysed deals
#[derive(Debug, Clone)]
pub struct PortfolioStore {
    path: PathBuf,
}

impl PortfolioStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All tracked deals. Falls back to the reference baseline when no file
    /// has been written yet.
    pub fn load(&self) -> DocCompareResult<Vec<PortfolioItem>> {
        if !self.path.exists() {
            debug!("{} not found, using baseline portfolio", self.path.display());
            return Ok(baseline());
        }
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| {
            DocCompareError::PortfolioError(format!("{}: {}", self.path.display(), e))
        })
    }

    pub fn save(&self, items: &[PortfolioItem]) -> DocCompareResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(items)?)?;
        Ok(())
    }

    /// Record an analysed deal dated today
    pub fn add(&self, deal_name: &str, result: &AnalysisResult) -> DocCompareResult<PortfolioItem> {
        self.add_on(deal_name, result, Local::now().date_naive())
    }

    pub fn add_on(
        &self,
        deal_name: &str,
        result: &AnalysisResult,
        date: NaiveDate
    ) -> DocCompareResult<PortfolioItem> {
        let mut items = self.load()?;
        let item = PortfolioItem {
            id: next_id(&items).to_string(),
            deal_name: deal_name.to_string(),
            jurisdiction: DEFAULT_JURISDICTION.to_string(),
            vintage: date.year().to_string(),
            risk_score: result.overall_score,
            risk_label: result.risk_label,
            high_risk_count: result.counts.high,
            medium_risk_count: result.counts.medium,
            low_risk_count: result.counts.low,
            is_red_flag: is_red_flag(result),
            analyzed_at: date.format("%Y-%m-%d").to_string(),
        };

        items.push(item.clone());
        self.save(&items)?;
        info!("Added '{}' to portfolio as #{}", item.deal_name, item.id);
        Ok(item)
    }

    /// `None` when the portfolio holds no deals
    pub fn stats(&self) -> DocCompareResult<Option<PortfolioStats>> {
        Ok(compute_stats(&self.load()?))
    }
}

/// Score of 7 or more, or at least two High findings
pub fn is_red_flag(result: &AnalysisResult) -> bool {
    result.overall_score >= 7.0 || result.counts.high >= 2
}

fn next_id(items: &[PortfolioItem]) -> u64 {
    items
        .iter()
        .filter_map(|item| item.id.parse::<u64>().ok())
        .max()
        .unwrap_or(0) + 1
}

pub fn compute_stats(items: &[PortfolioItem]) -> Option<PortfolioStats> {
    if items.is_empty() {
        return None;
    }

    let total = items.len();
    let high = items
        .iter()
        .filter(|i| i.risk_label == RiskLevel::High)
        .count();
    let score_sum: f64 = items
        .iter()
        .map(|i| i.risk_score)
        .sum();

    let mut jurisdiction_breakdown = BTreeMap::new();
    for item in items {
        *jurisdiction_breakdown.entry(item.jurisdiction.clone()).or_insert(0) += 1;
    }

    let pre_2020 = items
        .iter()
        .filter(|i| i.vintage.trim().parse::<i32>().map_or(false, |v| v < MODERN_VINTAGE))
        .count();

    Some(PortfolioStats {
        total_deals: total,
        high_risk_count: high,
        high_risk_percentage: round_to(((high as f64) / (total as f64)) * 100.0, 1),
        average_risk_score: round_to(score_sum / (total as f64), 2),
        jurisdiction_breakdown,
        pre_2020_documentation: pre_2020,
        red_flags: items
            .iter()
            .filter(|i| i.is_red_flag)
            .count(),
    })
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = (10f64).powi(places);
    (value * factor).round() / factor
}

/// Reference deals shown before anything has been analysed
pub fn baseline() -> Vec<PortfolioItem> {
    const SEED: [(&str, &str, &str, f64, RiskLevel, [usize; 3], bool, &str); 5] = [
        ("Project Alpha Term Loan", "English Law", "2023", 2.0, RiskLevel::Low, [0, 2, 3], false, "2024-11-15"),
        ("Acme Corp RCF", "English Law", "2022", 4.0, RiskLevel::Medium, [1, 3, 2], false, "2024-10-20"),
        ("Zenith Acquisition Facility", "Irish Law", "2019", 8.0, RiskLevel::High, [3, 2, 1], true, "2024-09-12"),
        ("BlueSky Holdings Bridge", "Luxembourg", "2023", 1.0, RiskLevel::Low, [0, 0, 4], false, "2024-12-01"),
        ("Orion Energy Term Loan B", "UAE", "2020", 7.0, RiskLevel::High, [2, 4, 0], true, "2024-08-30"),
    ];

    SEED.iter()
        .enumerate()
        .map(|(i, (name, jurisdiction, vintage, score, label, counts, red_flag, date))| PortfolioItem {
            id: (i + 1).to_string(),
            deal_name: name.to_string(),
            jurisdiction: jurisdiction.to_string(),
            vintage: vintage.to_string(),
            risk_score: *score,
            risk_label: *label,
            high_risk_count: counts[0],
            medium_risk_count: counts[1],
            low_risk_count: counts[2],
            is_red_flag: *red_flag,
            analyzed_at: date.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::RiskCounts;

    fn result(score: f64, high: usize, medium: usize) -> AnalysisResult {
        AnalysisResult {
            overall_score: score,
            risk_label: RiskLevel::from_score(score),
            deviations: Vec::new(),
            counts: RiskCounts { high, medium, low: 0 },
            ai_enabled: false,
        }
    }

    #[test]
    fn test_missing_file_loads_baseline() {
        let dir = tempfile::tempdir().unwrap();
        let store = PortfolioStore::new(dir.path().join("portfolio.json"));
        let items = store.load().unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(items[2].deal_name, "Zenith Acquisition Facility");
        assert!(!store.path().exists());
    }

    #[test]
    fn test_baseline_stats() {
        let stats = compute_stats(&baseline()).unwrap();
        assert_eq!(stats.total_deals, 5);
        assert_eq!(stats.high_risk_count, 2);
        assert_eq!(stats.high_risk_percentage, 40.0);
        assert_eq!(stats.average_risk_score, 4.4);
        assert_eq!(stats.jurisdiction_breakdown["English Law"], 2);
        assert_eq!(stats.jurisdiction_breakdown.len(), 4);
        assert_eq!(stats.pre_2020_documentation, 1);
        assert_eq!(stats.red_flags, 2);
    }

    #[test]
    fn test_empty_portfolio_has_no_stats() {
        assert!(compute_stats(&[]).is_none());
    }

    #[test]
    fn test_add_persists_with_next_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = PortfolioStore::new(dir.path().join("data").join("portfolio.json"));
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();

        let item = store.add_on("Deal Delta", &result(7.0, 1, 0), date).unwrap();
        assert_eq!(item.id, "6");
        assert_eq!(item.vintage, "2025");
        assert_eq!(item.analyzed_at, "2025-03-04");
        assert_eq!(item.jurisdiction, DEFAULT_JURISDICTION);
        assert!(item.is_red_flag);

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.len(), 6);
        assert_eq!(reloaded[5], item);

        let second = store.add_on("Deal Gamma", &result(3.0, 0, 1), date).unwrap();
        assert_eq!(second.id, "7");
        assert!(!second.is_red_flag);
    }

    #[test]
    fn test_red_flag_rule() {
        assert!(is_red_flag(&result(7.0, 0, 0)));
        assert!(is_red_flag(&result(2.0, 2, 0)));
        assert!(!is_red_flag(&result(6.0, 1, 3)));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(PortfolioStore::new(path).load(), Err(DocCompareError::PortfolioError(_))));
    }
}
