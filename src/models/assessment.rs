use serde::{ Deserialize, Serialize };

use crate::models::common::{ ClauseType, RiskLevel };

/// How far a value sits from the market standard. The unit depends on the clause.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DeviationMetric {
    /// Signed percentage of the standard, `(value - standard) / standard * 100`
    Percentage(f64),
    /// Signed day delta, `value - standard`
    Days(i64),
    NotApplicable,
}

/// Scored view of one extracted clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub clause_type: ClauseType,
    pub extracted_value: f64,
    pub standard_value: f64,
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    pub severity: String,
    pub deviation: DeviationMetric,
}
