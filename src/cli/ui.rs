use colored::*;
use console::Term;
use dialoguer::{ theme::ColorfulTheme, Select };
use indicatif::{ ProgressBar, ProgressStyle };
use serde::Serialize;
use std::time::Duration;
use textwrap::wrap;

use doccompare::{ Deviation, PortfolioItem, PortfolioStats, RiskLevel, VersionDiff };

/// UI theme for consistent appearance
pub fn get_theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

/// Print a section header
pub fn print_header(title: &str) {
    let title = format!(" {} ", title);
    println!("\n{}\n", title.bold().white().on_blue());
}

fn text_width() -> usize {
    let width = Term::stdout().size().1 as usize;
    width.saturating_sub(10).max(40)
}

/// Print text with proper wrapping
pub fn print_text(text: &str) {
    print_indented(text, "");
}

fn print_indented(text: &str, indent: &str) {
    let width = text_width().saturating_sub(indent.len());
    for line in text.lines() {
        for wrapped_line in wrap(line, width) {
            println!("{}{}", indent, wrapped_line);
        }
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "WARNING:".yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("{}: {}", label.bold(), value);
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn colored_level(level: RiskLevel) -> ColoredString {
    match level {
        RiskLevel::High => level.as_str().red().bold(),
        RiskLevel::Medium => level.as_str().yellow().bold(),
        RiskLevel::Low => level.as_str().green(),
    }
}

/// One finding with its explanation and recommendation
pub fn print_deviation(index: usize, deviation: &Deviation) {
    println!(
        "{}. [{}] {} ({}), score {}",
        index,
        colored_level(deviation.risk_level),
        deviation.clause_type.to_string().bold(),
        deviation.clause,
        deviation.metadata.risk_score
    );
    print_indented(&deviation.description, "   ");
    print_indented(&format!("Recommendation: {}", deviation.recommendation), "   ");
}

/// Changed lines in diff colours
pub fn print_diff(diff: &VersionDiff) {
    print_result("From", &diff.version_from);
    print_result("To", &diff.version_to);
    println!();

    if diff.is_unchanged() {
        print_info("No differences");
        return;
    }
    for change in &diff.changes {
        if change.starts_with('+') {
            println!("{}", change.green());
        } else {
            println!("{}", change.red());
        }
    }
}

pub fn print_portfolio(items: &[PortfolioItem]) {
    println!(
        "{:<4} {:<30} {:<14} {:<7} {:>6} {:<7} {}",
        "ID".bold(),
        "Deal".bold(),
        "Jurisdiction".bold(),
        "Vintage".bold(),
        "Score".bold(),
        "Risk".bold(),
        "Flag".bold()
    );
    for item in items {
        let flag = if item.is_red_flag { "RED FLAG".red().bold() } else { "".normal() };
        println!(
            "{:<4} {:<30} {:<14} {:<7} {:>6.1} {:<7} {}",
            item.id,
            item.deal_name,
            item.jurisdiction,
            item.vintage,
            item.risk_score,
            colored_level(item.risk_label),
            flag
        );
    }
}

pub fn print_stats(stats: &PortfolioStats) {
    print_result("Total deals", &stats.total_deals.to_string());
    print_result(
        "High risk",
        &format!("{} ({:.1}%)", stats.high_risk_count, stats.high_risk_percentage)
    );
    print_result("Average risk score", &format!("{:.2}", stats.average_risk_score));
    print_result("Red flags", &stats.red_flags.to_string());
    print_result("Pre-2020 documentation", &stats.pre_2020_documentation.to_string());

    println!("\n{}", "Jurisdictions".bold());
    for (jurisdiction, count) in &stats.jurisdiction_breakdown {
        println!("  {:<20} {}", jurisdiction, count);
    }
}

/// Interactive selection from a list of identifiers
pub fn select_item(prompt: &str, items: &[String], default: usize) -> std::io::Result<String> {
    let selection = Select::with_theme(&get_theme())
        .with_prompt(prompt)
        .items(items)
        .default(default.min(items.len().saturating_sub(1)))
        .interact()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    Ok(items[selection].clone())
}

/// Display a spinner while waiting for an operation to complete
pub fn spinner_with_message(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
