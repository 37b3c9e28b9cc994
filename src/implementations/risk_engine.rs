use log::{ debug, info, warn };

use crate::errors::{ ClauseError, DocCompareError, DocCompareResult };
use crate::implementations::config::DocCompareConfig;
use crate::implementations::document_parser::{ numeric_value, DocumentParser };
use crate::implementations::document_store::DocumentRoot;
use crate::implementations::explanation::ExplanationEngine;
use crate::implementations::recommendations::recommendation;
use crate::implementations::scoring;
use crate::models::analysis::{ display_name, AnalysisResult, DealReport, Deviation };
use crate::models::assessment::RiskAssessment;
use crate::models::common::{ ClauseKey, ClauseType };
use crate::models::extraction::ParsedDocument;

/// Name given to deals passed in as raw text
pub const UPLOADED_DEAL_NAME: &str = "Uploaded Document";

/// Where the deal text for an analysis comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealSource {
    /// A file under the sample-deal directory
    Sample(String),
    /// Text supplied directly by the caller
    Text(String),
}

/// Runs parser, scorer and explainer over each known clause and aggregates
/// the findings.
///
/// # Usage Example
/// ```rust,no_run
/// use doccompare::RiskEngine;
///
/// async fn analyze_example() -> Result<(), Box<dyn std::error::Error>> {
///     let engine = RiskEngine::deterministic();
///     let result = engine.analyze(
///         "The Leverage Ratio shall not exceed 4.75:1.",
///         ""
///     ).await?;
///
///     println!("{} ({})", result.overall_score, result.risk_label);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RiskEngine {
    parser: DocumentParser,
    explainer: ExplanationEngine,
}

impl RiskEngine {
    pub fn new(explainer: ExplanationEngine) -> Self {
        Self {
            parser: DocumentParser::new(),
            explainer,
        }
    }

    /// Engine with template-sentence explanations only
    pub fn deterministic() -> Self {
        Self::new(ExplanationEngine::deterministic())
    }

    pub fn from_config(config: &DocCompareConfig) -> Self {
        Self::new(ExplanationEngine::from_config(config))
    }

    pub fn ai_enabled(&self) -> bool {
        self.explainer.ai_enabled()
    }

    /// Score `deal_text` against the market standard.
    ///
    /// Missing clauses are left out of the result. A clause whose value cannot
    /// be read is logged and skipped; it never fails the whole analysis.
    /// `template_text` does not change the scoring.
    pub async fn analyze(&self, deal_text: &str, template_text: &str) -> DocCompareResult<AnalysisResult> {
        if deal_text.trim().is_empty() {
            return Err(DocCompareError::MissingInput("No deal text provided".to_string()));
        }
        debug!(
            "Analysing {} characters of deal text against a {} character template",
            deal_text.len(),
            template_text.len()
        );

        let parsed = self.parser.parse_document(deal_text);
        let mut deviations = Vec::new();

        for clause in ClauseType::ALL {
            let assessment = match assess_clause(&parsed, clause) {
                Ok(assessment) => assessment,
                Err(e @ ClauseError::NotFound { .. }) => {
                    debug!("Skipping: {}", e);
                    continue;
                }
                Err(e) => {
                    warn!("Skipping clause: {}", e);
                    continue;
                }
            };

            let description = self.explainer.explain(&assessment).await;
            deviations.push(Deviation {
                clause: clause.category(),
                clause_type: clause,
                risk_level: assessment.risk_level,
                description,
                recommendation: recommendation(assessment.risk_level, clause).to_string(),
                metadata: assessment,
            });
        }

        let result = AnalysisResult::from_deviations(deviations, self.ai_enabled());
        info!(
            "Analysis complete: score {} ({}), {} deviations",
            result.overall_score,
            result.risk_label,
            result.deviations.len()
        );
        Ok(result)
    }

    /// Load the deal and template, analyse, and attach display names
    pub async fn analyze_deal(
        &self,
        documents: &DocumentRoot,
        source: &DealSource,
        template_id: &str
    ) -> DocCompareResult<DealReport> {
        let template_text = documents.read_template(template_id)?;

        let (deal_name, deal_text) = match source {
            DealSource::Sample(id) => (display_name(id), documents.read_sample(id)?),
            DealSource::Text(text) => (UPLOADED_DEAL_NAME.to_string(), text.clone()),
        };

        let analysis = self.analyze(&deal_text, &template_text).await?;
        Ok(DealReport {
            deal_name,
            template_name: display_name(template_id),
            analysis,
        })
    }
}

/// Extract, convert and score one clause
fn assess_clause(parsed: &ParsedDocument, clause: ClauseType) -> Result<RiskAssessment, ClauseError> {
    let key = ClauseKey::from(clause);
    let extraction = parsed
        .get(&key)
        .and_then(Option::as_ref)
        .filter(|e| !e.raw_value.is_empty())
        .ok_or_else(|| ClauseError::NotFound { clause: clause.name().to_string() })?;

    let value = numeric_value(extraction)?;
    Ok(scoring::score(clause, value))
}
