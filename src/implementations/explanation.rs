use std::sync::Arc;
use std::time::Duration;

use log::{ debug, info, warn };

use crate::errors::ExplanationError;
use crate::implementations::config::DocCompareConfig;
use crate::implementations::llm_explainer::LlmExplanationStrategy;
use crate::models::assessment::RiskAssessment;
use crate::models::common::ClauseType;
use crate::traits::explanation_strategy::ExplanationStrategy;

/// Produces one prose explanation per assessment.
///
/// When a strategy is injected it is tried first, bounded by `timeout` and
/// never retried. Every failure resolves to [`fallback_explanation`], so
/// `explain` itself cannot fail.
#[derive(Clone)]
pub struct ExplanationEngine {
    strategy: Option<Arc<dyn ExplanationStrategy>>,
    timeout: Duration,
}

impl ExplanationEngine {
    /// Engine that only ever uses the template sentence
    pub fn deterministic() -> Self {
        Self {
            strategy: None,
            timeout: Duration::ZERO,
        }
    }

    pub fn with_strategy(strategy: Arc<dyn ExplanationStrategy>, timeout: Duration) -> Self {
        Self {
            strategy: Some(strategy),
            timeout,
        }
    }

    /// Build from configuration. The external path is enabled only when AI
    /// explanations are switched on and an API key resolves.
    pub fn from_config(config: &DocCompareConfig) -> Self {
        if !config.ai_explanations {
            info!("AI explanations disabled in configuration");
            return Self::deterministic();
        }

        match LlmExplanationStrategy::new(&config.explainer) {
            Ok(strategy) => {
                info!("AI explanations enabled via {}", strategy.name());
                Self::with_strategy(Arc::new(strategy), config.explainer.timeout())
            }
            Err(e) => {
                info!("AI explanations unavailable, using deterministic explanations: {}", e);
                Self::deterministic()
            }
        }
    }

    pub fn ai_enabled(&self) -> bool {
        self.strategy.is_some()
    }

    pub async fn explain(&self, assessment: &RiskAssessment) -> String {
        let Some(strategy) = &self.strategy else {
            return fallback_explanation(assessment);
        };

        let outcome = match tokio::time::timeout(self.timeout, strategy.explain(assessment)).await {
            Ok(result) => result,
            Err(_) => Err(ExplanationError::Timeout(self.timeout)),
        };

        match outcome {
            Ok(text) if !text.trim().is_empty() => {
                debug!("{} explained {}", strategy.name(), assessment.clause_type);
                text.trim().to_string()
            }
            Ok(_) => {
                warn!("{} returned an empty explanation for {}", strategy.name(), assessment.clause_type);
                fallback_explanation(assessment)
            }
            Err(e) => {
                warn!("{} failed for {}: {}", strategy.name(), assessment.clause_type, e);
                fallback_explanation(assessment)
            }
        }
    }
}

/// Template sentence built from the assessment alone
pub fn fallback_explanation(assessment: &RiskAssessment) -> String {
    format!(
        "{} is {} (Standard: {}), {}.",
        assessment.clause_type,
        format_clause_value(assessment.clause_type, assessment.extracted_value),
        format_clause_value(assessment.clause_type, assessment.standard_value),
        assessment.severity
    )
}

/// Render a value in the unit the agreement uses for that clause
pub fn format_clause_value(clause: ClauseType, value: f64) -> String {
    match clause {
        ClauseType::LeverageRatio | ClauseType::InterestCover => format!("{:.2}:1", value),
        ClauseType::GracePeriod => {
            let days = value.round() as i64;
            if days == 1 { "1 day".to_string() } else { format!("{} days", days) }
        }
        ClauseType::CrossDefault => format!("EUR {}", group_thousands(value.round().max(0.0) as u64)),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
