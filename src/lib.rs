pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod implementations;

// Re-export core components
pub use config::{ load_config, DEFAULT_CONFIG_FILE };
pub use errors::{ ClauseError, DocCompareError, DocCompareResult, ExplanationError };
pub use implementations::config::{ ConfigError, DocCompareConfig, ExplainerConfig };
pub use implementations::document_parser::DocumentParser;
pub use implementations::document_store::DocumentRoot;
pub use implementations::explanation::ExplanationEngine;
pub use implementations::llm_explainer::LlmExplanationStrategy;
pub use implementations::portfolio::PortfolioStore;
pub use implementations::report::render_report;
pub use implementations::risk_engine::{ DealSource, RiskEngine };
pub use implementations::version_comparator::{ diff, VersionComparator };
pub use models::{
    common::{ ClauseCategory, ClauseKey, ClauseType, RiskLevel },
    extraction::{ CovenantExtraction, ParsedDocument },
    assessment::{ DeviationMetric, RiskAssessment },
    analysis::{ AnalysisResult, DealReport, Deviation, RiskCounts },
    diff::VersionDiff,
    portfolio::{ PortfolioItem, PortfolioStats },
};
pub use traits::ExplanationStrategy;
