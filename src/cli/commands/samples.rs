use anyhow::Result;

use crate::cli::commands::Context;
use crate::cli::ui;

/// Sample listing command
pub fn execute(ctx: &Context) -> Result<()> {
    let documents = ctx.documents();
    let samples = documents.list_samples()?;

    if ctx.is_json() {
        return ui::print_json(&serde_json::json!({ "samples": samples }));
    }

    ui::print_header("Sample Deals");
    if samples.is_empty() {
        ui::print_warning(&format!("No sample deals in {}", documents.samples_dir().display()));
    }
    for sample in &samples {
        println!("  {}", sample);
    }
    Ok(())
}
