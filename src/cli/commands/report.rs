use anyhow::Result;
use chrono::Local;
use std::path::Path;

use doccompare::render_report;

use crate::cli::commands::{ deal_source, run_analysis, Context };
use crate::cli::ui;

/// Compliance report command
pub async fn execute(
    ctx: &Context,
    sample: Option<&str>,
    deal: Option<&Path>,
    template: Option<&str>
) -> Result<()> {
    let (source, reference) = deal_source(deal, sample, None)?;
    let report = run_analysis(ctx, &source, reference.as_deref(), template).await?;

    let deal_ref = reference.unwrap_or_else(|| report.deal_name.clone());
    let text = render_report(&deal_ref, &report.analysis, Local::now().naive_local());

    if ctx.is_json() {
        return ui::print_json(&serde_json::json!({ "deal_ref": deal_ref, "report": text }));
    }

    ui::print_text(&text);
    Ok(())
}
