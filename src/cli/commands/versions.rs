use anyhow::Result;

use crate::cli::commands::Context;
use crate::cli::ui;

/// Version listing command
pub fn execute(ctx: &Context, base: &str) -> Result<()> {
    let versions = ctx.comparator().list_versions(base)?;

    if ctx.is_json() {
        return ui::print_json(&serde_json::json!({ "versions": versions }));
    }

    ui::print_header(&format!("Versions of {}", base));
    if versions.is_empty() {
        ui::print_warning(&format!("No versions found for '{}'", base));
    }
    for (i, version) in versions.iter().enumerate() {
        println!("  {}. {}", i + 1, version);
    }
    Ok(())
}
