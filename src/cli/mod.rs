use anyhow::{ anyhow, Result };
use clap::{ Parser, Subcommand };
use std::path::PathBuf;

pub mod commands;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "doccompare",
    about = "Scores loan-agreement covenants against LMA standards and compares agreement versions",
    version,
    author,
    long_about = None
)]
pub struct DocCompareCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    pub output_format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyse a facility agreement against the LMA standard
    Analyze {
        /// Path to a deal document on disk
        #[arg(short, long, conflicts_with_all = ["sample", "text"])]
        deal: Option<PathBuf>,

        /// Sample deal identifier under the sample-deal directory
        #[arg(short, long, conflicts_with = "text")]
        sample: Option<String>,

        /// Deal text given inline
        #[arg(long)]
        text: Option<String>,

        /// Template identifier (defaults to the configured template)
        #[arg(short, long)]
        template: Option<String>,

        /// Record the result in the portfolio
        #[arg(long, default_value = "false")]
        add_to_portfolio: bool,
    },

    /// List the available sample deals
    Samples,

    /// List the stored versions of an agreement
    Versions {
        /// Base name shared by all versions, e.g. Deal_Delta
        base: String,
    },

    /// Compare two versions of an agreement
    Compare {
        /// Earlier version identifier
        version_from: Option<String>,

        /// Later version identifier
        version_to: Option<String>,

        /// Base name used to offer versions interactively
        #[arg(short, long)]
        base: Option<String>,
    },

    /// Inspect the deal portfolio
    Portfolio {
        #[command(subcommand)]
        action: PortfolioAction,
    },

    /// Print a compliance report for a deal
    Report {
        /// Sample deal identifier
        #[arg(short, long, conflicts_with = "deal")]
        sample: Option<String>,

        /// Path to a deal document on disk
        #[arg(short, long)]
        deal: Option<PathBuf>,

        /// Template identifier (defaults to the configured template)
        #[arg(short, long)]
        template: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PortfolioAction {
    /// List every tracked deal
    List,

    /// Aggregate statistics over the portfolio
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn parse_output_format(format: &str) -> Result<OutputFormat> {
    match format.to_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(anyhow!("Unsupported output format: {}", format)),
    }
}
