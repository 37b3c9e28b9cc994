use anyhow::{ anyhow, Result };

use crate::cli::commands::Context;
use crate::cli::ui;

/// Version comparison command. Missing identifiers are picked
/// interactively from the versions of `base`.
pub fn execute(
    ctx: &Context,
    version_from: Option<&str>,
    version_to: Option<&str>,
    base: Option<&str>
) -> Result<()> {
    let comparator = ctx.comparator();

    let (from, to) = match (version_from, version_to) {
        (Some(from), Some(to)) => (from.to_string(), to.to_string()),
        _ => {
            let base = base.ok_or_else(||
                anyhow!("Give two version identifiers, or --base to choose interactively")
            )?;
            let versions = comparator.list_versions(base)?;
            if versions.len() < 2 {
                return Err(anyhow!("Need at least two versions of '{}' to compare", base));
            }
            let from = match version_from {
                Some(from) => from.to_string(),
                None => ui::select_item("Compare from", &versions, 0)?,
            };
            let to = ui::select_item("Compare to", &versions, versions.len() - 1)?;
            (from, to)
        }
    };

    let diff = comparator.compare(&from, &to)?;

    if ctx.is_json() {
        return ui::print_json(&diff);
    }

    ui::print_header("Amendment Comparison");
    ui::print_diff(&diff);
    if !diff.is_unchanged() {
        println!();
        ui::print_result(
            "Summary",
            &format!("{} lines removed, {} lines added", diff.removed().count(), diff.added().count())
        );
    }
    Ok(())
}
