use anyhow::{ anyhow, Result };
use std::fs;
use std::path::Path;

use doccompare::{ DealReport, DealSource, DocCompareConfig, DocumentRoot, RiskEngine, VersionComparator };
use doccompare::models::analysis::display_name;

use crate::cli::OutputFormat;

pub mod analyze;
pub mod compare;
pub mod portfolio;
pub mod report;
pub mod samples;
pub mod versions;

/// Settings shared by every command
pub struct Context {
    pub config: DocCompareConfig,
    pub format: OutputFormat,
}

impl Context {
    pub fn new(config: DocCompareConfig, format: OutputFormat) -> Self {
        Self { config, format }
    }

    pub fn documents(&self) -> DocumentRoot {
        DocumentRoot::from_config(&self.config)
    }

    /// Versions are stored alongside the sample deals
    pub fn comparator(&self) -> VersionComparator {
        VersionComparator::new(self.config.samples_path())
    }

    pub fn engine(&self) -> RiskEngine {
        RiskEngine::from_config(&self.config)
    }

    pub fn template_id(&self, template: Option<&str>) -> String {
        template.map(str::to_string).unwrap_or_else(|| self.config.default_template.clone())
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

/// Where the deal for `analyze`/`report` comes from, with the reference
/// shown to the user
pub fn deal_source(
    deal: Option<&Path>,
    sample: Option<&str>,
    text: Option<&str>
) -> Result<(DealSource, Option<String>)> {
    match (deal, sample, text) {
        (Some(path), None, None) => {
            let content = fs::read_to_string(path).map_err(|e| {
                anyhow!("Failed to read deal file {}: {}", path.display(), e)
            })?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            Ok((DealSource::Text(content), Some(name)))
        }
        (None, Some(id), None) => Ok((DealSource::Sample(id.to_string()), Some(id.to_string()))),
        (None, None, Some(text)) => Ok((DealSource::Text(text.to_string()), None)),
        (None, None, None) => Err(anyhow!("Provide one of --deal, --sample or --text")),
        _ => Err(anyhow!("Only one of --deal, --sample or --text may be given")),
    }
}

/// Run the engine and name the deal after the file it came from
pub async fn run_analysis(
    ctx: &Context,
    source: &DealSource,
    reference: Option<&str>,
    template: Option<&str>
) -> Result<DealReport> {
    let documents = ctx.documents();
    let template_id = ctx.template_id(template);
    let mut report = ctx.engine().analyze_deal(&documents, source, &template_id).await?;
    if let (DealSource::Text(_), Some(reference)) = (source, reference) {
        report.deal_name = display_name(reference);
    }
    Ok(report)
}
