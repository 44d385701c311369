use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod controller;
mod domain;
mod health;
mod inputter;
mod model;
mod records;
mod source;
mod ui;
mod view;

use controller::Controller;
use domain::{AppConfig, InvigilError};
use model::{Model, Status};
use source::DataSource;

/// Terminal admin console for university exam invigilation.
#[derive(Debug, Parser)]
#[command(name = "invigil", version, about)]
struct Cli {
    /// Directory with exams/venues/invigilators data files; demo data when omitted
    data: Option<String>,

    /// Print the data source health report as JSON and exit 0 (healthy) or 1
    #[arg(long)]
    check: bool,

    /// Append logs to this file; the terminal belongs to the UI
    #[arg(long)]
    log_file: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.check {
        // Health probes never take over the terminal.
        let source = DataSource::new(config.data_root.clone());
        return match health::run_check(&source, &mut std::io::stdout()) {
            Ok(report) if report.is_healthy() => ExitCode::SUCCESS,
            Ok(_) => ExitCode::FAILURE,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    if let Err(e) = init_tracing(&config) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    match run(config) {
        Err(e) => {
            ratatui::restore();
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => {
            ratatui::restore();
            ExitCode::SUCCESS
        }
    }
}

fn build_config(cli: &Cli) -> Result<AppConfig, InvigilError> {
    let mut config = AppConfig::default();
    if let Some(raw) = &cli.data {
        config = config.with_data_root(Some(expand_path(raw)?));
    }
    if let Some(raw) = &cli.log_file {
        config = config.with_log_file(Some(expand_path(raw)?));
    }
    Ok(config)
}

fn expand_path(raw: &str) -> Result<PathBuf, InvigilError> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| InvigilError::LoadingFailed(format!("cannot expand {raw}: {e}")))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

fn init_tracing(config: &AppConfig) -> Result<(), InvigilError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(ErrorLayer::default());
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            registry
                .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
                .init();
        }
        // Without a log file events are filtered but go nowhere; the UI owns
        // the terminal.
        None => registry.init(),
    }
    info!("Started invigil!");
    Ok(())
}

fn run(config: AppConfig) -> Result<(), InvigilError> {
    let controller = Controller::new(&config);
    let mut model = Model::init(&config);

    let mut terminal = ratatui::init();
    model.load();

    while model.status != Status::QUITTING {
        // Render the current view
        terminal.draw(|f| ui::draw(&model, f))?;

        // Handle events and map to a Message
        if let Some(message) = controller.handle_event(&model)? {
            model.update(message)?;
        }
    }

    Ok(())
}
