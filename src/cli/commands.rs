//! Command implementations for the status extractor CLI
//!
//! Both subcommands run the same pipeline: logging, configuration and
//! whitelist, input, one extraction, then the view-specific report.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::cli::args::{Args, Commands, ExtractArgs};
use crate::config::ExtractorConfig;
use crate::extractor::{StatusExtractor, build_preview};
use crate::input::InputSource;
use crate::report;
use crate::whitelist::StatusWhitelist;

/// Which view of the extraction a command prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Form,
    Preview,
}

/// Main command runner
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Process(extract_args)) => run_extract(&extract_args, View::Form),
        Some(Commands::Preview(extract_args)) => run_extract(&extract_args, View::Preview),
        None => Ok(()),
    }
}

/// Install the stderr subscriber; `RUST_LOG` wins over `-v`/`-q`
pub fn setup_logging(args: &ExtractArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("status_extractor={}", log_level)));

    let output = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let output = if args.quiet {
        output.compact().without_time().boxed()
    } else {
        output.with_timer(fmt::time::uptime()).boxed()
    };

    tracing_subscriber::registry()
        .with(output.with_filter(filter))
        .try_init()
        .context("Failed to initialize logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration: file layers first, then command-line overrides
pub fn load_configuration(args: &ExtractArgs) -> Result<ExtractorConfig> {
    let mut config = ExtractorConfig::load_layered(args.config_file.as_deref())
        .context("Failed to load configuration")?;

    args.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;

    Ok(config)
}

/// Build an extractor from the command-line arguments
pub fn build_extractor(args: &ExtractArgs) -> Result<StatusExtractor> {
    let config = load_configuration(args)?;

    let whitelist = StatusWhitelist::load(&args.statuses).with_context(|| {
        format!(
            "Failed to load status whitelist from {}",
            args.statuses.display()
        )
    })?;
    info!(
        "Loaded {} statuses from {}",
        whitelist.len(),
        args.statuses.display()
    );

    let mut extractor = StatusExtractor::new(whitelist, config);
    if let Some(today) = args.parse_today()? {
        extractor = extractor.with_today(today);
    }

    Ok(extractor)
}

/// Read the input and render the requested view
pub fn render(args: &ExtractArgs, extractor: &StatusExtractor, view: View) -> Result<String> {
    let text = InputSource::from_path(&args.input)
        .and_then(|source| source.read())
        .with_context(|| format!("Failed to read input {}", args.input.display()))?;

    let outcome = extractor.extract(&text);
    if outcome.is_empty() {
        warn!("No records found in pasted data");
    }

    let rendered = match view {
        View::Form => {
            let form = extractor.form_entries(&outcome);
            report::render_form(&form, extractor.whitelist(), &outcome.stats, args.format)?
        }
        View::Preview => {
            report::render_preview(&build_preview(&outcome.records), &outcome.stats, args.format)?
        }
    };

    Ok(rendered)
}

fn run_extract(args: &ExtractArgs, view: View) -> Result<()> {
    setup_logging(args)?;

    let extractor = build_extractor(args)?;
    let rendered = render(args, &extractor, view)?;

    match &args.output_file {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report written to: {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
