use async_trait::async_trait;

use crate::errors::ExplanationError;
use crate::models::assessment::RiskAssessment;

/// An external source of prose explanations for scored clauses.
///
/// Implementations may fail in any way they like; the explanation engine
/// bounds every call with a timeout and replaces failures with the
/// deterministic explanation.
#[async_trait]
pub trait ExplanationStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Produce a short explanation of one assessment
    async fn explain(&self, assessment: &RiskAssessment) -> Result<String, ExplanationError>;
}
