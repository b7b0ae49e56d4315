mod config;
mod overlay;

use clap::Parser;
use config::{Config, EXAMPLE_JSON, SCHEMA_JSON};
use overlay::TraceObserver;
use sentinel::{source, DetectorConfig, Detector, Reporter, Template};
use std::fs;
use std::io;
use tracing_subscriber::EnvFilter;

/// Path of a JSON config file; every field has a default.
const CONFIG_ENV: &str = "SENTINEL_CONFIG";
/// `schema` or `example`: print that document and exit.
const PRINT_ENV: &str = "SENTINEL_PRINT";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Watches a video stream for an aligned template pair",
    after_help = "Configuration is read from the JSON file named by $SENTINEL_CONFIG. \
                  Logs go to stderr and are filtered by $RUST_LOG; stdout carries only \
                  [sentinel] protocol lines."
)]
struct Cli {
    /// Video file, stream URL, image directory, or `-` for a PGM/PPM stream on stdin.
    source: String,
}

fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let text = fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(Config::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(what) = std::env::var_os(PRINT_ENV) {
        match what.to_str() {
            Some("schema") => println!("{SCHEMA_JSON}"),
            Some("example") => println!("{EXAMPLE_JSON}"),
            _ => return Err(format!("{PRINT_ENV} must be `schema` or `example`").into()),
        }
        return Ok(());
    }

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sentinel=info,sentinel_cli=info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    monitor(&cli).inspect_err(|err| tracing::error!(error = %err, "fatal"))
}

fn monitor(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let detector_cfg: DetectorConfig = config.detector.into();
    detector_cfg.validate()?;

    // All-zero templates are rejected here, before any frame is read.
    let template = Template::load(&config.template_path).map_err(|err| {
        format!(
            "template {} rejected at startup: {err}",
            config.template_path
        )
    })?;
    tracing::info!(
        path = %config.template_path,
        width = template.width(),
        height = template.height(),
        "template loaded"
    );

    let mut frames = source::open(&cli.source)?;
    tracing::info!(source = %cli.source, "source opened");

    let (tpl_width, tpl_height) = (template.width(), template.height());
    let mut detector = Detector::new(template, detector_cfg)?;
    if config.enable_overlay {
        detector = detector.with_observer(Box::new(TraceObserver::new(tpl_width, tpl_height)));
    }

    let mut reporter = Reporter::new(io::stdout().lock());
    let summary = sentinel::run(&mut frames, &mut detector, &mut reporter)?;
    tracing::info!(
        frames = summary.frames_read,
        processed = summary.frames_processed,
        triggers = summary.triggers,
        "done"
    );
    Ok(())
}
