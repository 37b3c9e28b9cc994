pub mod config;
pub mod paths;
pub mod document_store;
pub mod document_parser;
pub mod scoring;
pub mod recommendations;
pub mod explanation;
pub mod llm_explainer;
pub mod risk_engine;
pub mod version_comparator;
pub mod portfolio;
pub mod report;
