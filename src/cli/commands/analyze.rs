use anyhow::Result;
use log::info;
use std::path::Path;

use doccompare::PortfolioStore;

use crate::cli::commands::{ deal_source, run_analysis, Context };
use crate::cli::ui;

/// Deal analysis command
pub async fn execute(
    ctx: &Context,
    deal: Option<&Path>,
    sample: Option<&str>,
    text: Option<&str>,
    template: Option<&str>,
    add_to_portfolio: bool
) -> Result<()> {
    let (source, reference) = deal_source(deal, sample, text)?;

    let spinner = (!ctx.is_json()).then(|| ui::spinner_with_message("Analysing covenants..."));
    let outcome = run_analysis(ctx, &source, reference.as_deref(), template).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let report = outcome?;

    let added = if add_to_portfolio {
        let store = PortfolioStore::new(ctx.config.portfolio_path());
        Some(store.add(&report.deal_name, &report.analysis)?)
    } else {
        None
    };

    if ctx.is_json() {
        return match added {
            Some(item) =>
                ui::print_json(&serde_json::json!({ "analysis": report, "portfolio_item": item })),
            None => ui::print_json(&report),
        };
    }

    ui::print_header("Deal Analysis");
    ui::print_result("Deal", &report.deal_name);
    ui::print_result("Template", &report.template_name);
    let analysis = &report.analysis;
    ui::print_result(
        "Overall score",
        &format!("{:.1}/10 ({})", analysis.overall_score, ui::colored_level(analysis.risk_label))
    );
    ui::print_result(
        "Findings",
        &format!(
            "{} high, {} medium, {} low",
            analysis.counts.high,
            analysis.counts.medium,
            analysis.counts.low
        )
    );
    ui::print_result("AI explanations", if analysis.ai_enabled { "enabled" } else { "disabled" });
    println!();

    if analysis.deviations.is_empty() {
        ui::print_success("No covenant deviations found");
    }
    for (i, deviation) in analysis.deviations.iter().enumerate() {
        ui::print_deviation(i + 1, deviation);
        println!();
    }

    if let Some(item) = added {
        info!("Portfolio entry {} written to {}", item.id, ctx.config.portfolio_path().display());
        ui::print_success(&format!("Added '{}' to the portfolio as #{}", item.deal_name, item.id));
        if item.is_red_flag {
            ui::print_warning("Deal is flagged for review");
        }
    }

    Ok(())
}
