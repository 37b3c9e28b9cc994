use anyhow::Result;
use clap::Parser;
use log::{ debug, info };

use doccompare::load_config;

mod cli;
use cli::commands::{ self, Context };
use cli::{ parse_output_format, Commands, DocCompareCli };

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        cli::ui::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Parse the command line arguments
    let cli = DocCompareCli::parse();

    setup_logging(&cli.log_level);

    match dotenv::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(_) => debug!("No .env file found"),
    }

    let format = parse_output_format(&cli.output_format)?;
    let config = load_config(cli.config.as_deref())?;
    debug!("Data directory: {}", config.data_dir.display());
    let ctx = Context::new(config, format);

    match &cli.command {
        Commands::Analyze { deal, sample, text, template, add_to_portfolio } => {
            commands::analyze::execute(
                &ctx,
                deal.as_deref(),
                sample.as_deref(),
                text.as_deref(),
                template.as_deref(),
                *add_to_portfolio
            ).await?;
        }

        Commands::Samples => commands::samples::execute(&ctx)?,

        Commands::Versions { base } => commands::versions::execute(&ctx, base)?,

        Commands::Compare { version_from, version_to, base } => {
            commands::compare::execute(
                &ctx,
                version_from.as_deref(),
                version_to.as_deref(),
                base.as_deref()
            )?;
        }

        Commands::Portfolio { action } => commands::portfolio::execute(&ctx, action)?,

        Commands::Report { sample, deal, template } => {
            commands::report::execute(
                &ctx,
                sample.as_deref(),
                deal.as_deref(),
                template.as_deref()
            ).await?;
        }
    }

    Ok(())
}

fn setup_logging(log_level: &str) {
    // Set up the logger based on the log level
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Warn,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
