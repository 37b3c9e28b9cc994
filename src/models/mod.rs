pub mod common;
pub mod extraction;
pub mod assessment;
pub mod analysis;
pub mod diff;
pub mod portfolio;

// Re-export common model types
pub use common::{ ClauseCategory, ClauseKey, ClauseType, RiskLevel };
pub use extraction::{ CovenantExtraction, ParsedDocument };
pub use assessment::{ DeviationMetric, RiskAssessment };
pub use analysis::{ AnalysisResult, DealReport, Deviation, RiskCounts };
pub use diff::VersionDiff;
pub use portfolio::{ PortfolioItem, PortfolioStats };
