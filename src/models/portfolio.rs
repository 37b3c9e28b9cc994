use serde::{ Deserialize, Serialize };
use std::collections::BTreeMap;

use crate::models::common::RiskLevel;

/// A deal tracked in the portfolio file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: String,
    pub deal_name: String,
    pub jurisdiction: String,
    pub vintage: String,
    pub risk_score: f64,
    pub risk_label: RiskLevel,
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    pub low_risk_count: usize,
    pub is_red_flag: bool,
    pub analyzed_at: String,
}

/// Aggregate view over the whole portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStats {
    pub total_deals: usize,
    pub high_risk_count: usize,
    pub high_risk_percentage: f64,
    pub average_risk_score: f64,
    pub jurisdiction_breakdown: BTreeMap<String, usize>,
    pub pre_2020_documentation: usize,
    pub red_flags: usize,
}
