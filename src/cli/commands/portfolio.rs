use anyhow::Result;

use doccompare::PortfolioStore;

use crate::cli::commands::Context;
use crate::cli::ui;
use crate::cli::PortfolioAction;

/// Portfolio inspection command
pub fn execute(ctx: &Context, action: &PortfolioAction) -> Result<()> {
    let store = PortfolioStore::new(ctx.config.portfolio_path());

    match action {
        PortfolioAction::List => {
            let items = store.load()?;
            if ctx.is_json() {
                return ui::print_json(&items);
            }
            ui::print_header("Portfolio");
            ui::print_portfolio(&items);
        }
        PortfolioAction::Stats => {
            let stats = store.stats()?;
            if ctx.is_json() {
                return match stats {
                    Some(stats) => ui::print_json(&stats),
                    None => ui::print_json(&serde_json::json!({ "error": "No portfolio data" })),
                };
            }
            ui::print_header("Portfolio Statistics");
            match stats {
                Some(stats) => ui::print_stats(&stats),
                None => ui::print_warning("No portfolio data"),
            }
        }
    }
    Ok(())
}
