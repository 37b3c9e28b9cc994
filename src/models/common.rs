use serde::{ Deserialize, Serialize };
use std::fmt;

/// Risk tiers, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low];

    /// Label for an overall score: High at 7 and above, Medium at 3 and above.
    pub fn from_score(score: f64) -> Self {
        if score >= 7.0 {
            RiskLevel::High
        } else if score >= 3.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four quantitative clauses the scoring tables know about
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClauseType {
    #[serde(rename = "Leverage Ratio")]
    LeverageRatio,
    #[serde(rename = "Interest Cover")]
    InterestCover,
    #[serde(rename = "Non-payment Grace Period")]
    GracePeriod,
    #[serde(rename = "Cross Default Threshold")]
    CrossDefault,
}

impl ClauseType {
    /// Processing order used by the risk engine
    pub const ALL: [ClauseType; 4] = [
        ClauseType::LeverageRatio,
        ClauseType::InterestCover,
        ClauseType::GracePeriod,
        ClauseType::CrossDefault,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ClauseType::LeverageRatio => "Leverage Ratio",
            ClauseType::InterestCover => "Interest Cover",
            ClauseType::GracePeriod => "Non-payment Grace Period",
            ClauseType::CrossDefault => "Cross Default Threshold",
        }
    }

    pub fn category(&self) -> ClauseCategory {
        match self {
            ClauseType::LeverageRatio | ClauseType::InterestCover => {
                ClauseCategory::FinancialCovenants
            }
            ClauseType::GracePeriod | ClauseType::CrossDefault => ClauseCategory::EventsOfDefault,
        }
    }
}

impl fmt::Display for ClauseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Section of the facility agreement a clause belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClauseCategory {
    #[serde(rename = "Financial Covenants")]
    FinancialCovenants,
    #[serde(rename = "Events of Default")]
    EventsOfDefault,
}

impl fmt::Display for ClauseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClauseCategory::FinancialCovenants => f.write_str("Financial Covenants"),
            ClauseCategory::EventsOfDefault => f.write_str("Events of Default"),
        }
    }
}

/// Keys the document parser looks for. The first four carry a number and map
/// onto a `ClauseType`; the rest are captured as raw text only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseKey {
    LeverageRatio,
    InterestCover,
    GracePeriod,
    CrossDefault,
    NegativePledge,
    Disposals,
}

impl ClauseKey {
    pub const ALL: [ClauseKey; 6] = [
        ClauseKey::LeverageRatio,
        ClauseKey::InterestCover,
        ClauseKey::GracePeriod,
        ClauseKey::CrossDefault,
        ClauseKey::NegativePledge,
        ClauseKey::Disposals,
    ];

    pub fn clause_type(&self) -> Option<ClauseType> {
        match self {
            ClauseKey::LeverageRatio => Some(ClauseType::LeverageRatio),
            ClauseKey::InterestCover => Some(ClauseType::InterestCover),
            ClauseKey::GracePeriod => Some(ClauseType::GracePeriod),
            ClauseKey::CrossDefault => Some(ClauseType::CrossDefault),
            ClauseKey::NegativePledge | ClauseKey::Disposals => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClauseKey::NegativePledge => "Negative Pledge",
            ClauseKey::Disposals => "Disposals",
            other => other.clause_type().map(|c| c.name()).unwrap_or("Unknown"),
        }
    }
}

impl From<ClauseType> for ClauseKey {
    fn from(clause: ClauseType) -> Self {
        match clause {
            ClauseType::LeverageRatio => ClauseKey::LeverageRatio,
            ClauseType::InterestCover => ClauseKey::InterestCover,
            ClauseType::GracePeriod => ClauseKey::GracePeriod,
            ClauseType::CrossDefault => ClauseKey::CrossDefault,
        }
    }
}
