pub mod explanation_strategy;

// Re-export traits
pub use explanation_strategy::ExplanationStrategy;
