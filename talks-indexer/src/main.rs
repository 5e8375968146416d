use std::process::ExitCode;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use talks_indexer::{run, Command, Dependencies, IndexingError, Mode, Settings};

#[derive(Parser)]
#[command(name = "talks-indexer")]
#[command(about = "Reindex conference talks from moresleep into the search indexes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn init_tracing(mode: Mode) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(mode.default_log_level()));

    if mode.is_development() {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    }
}

async fn execute(command: Command, settings: Settings) -> Result<(), IndexingError> {
    let dependencies = Dependencies::new(&settings).await?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                warn!("Received Ctrl-C, cancelling reindex");
                on_signal.cancel();
            }
            Err(e) => error!(error = %e, "Failed to listen for Ctrl-C"),
        }
    });

    let summary = run(dependencies.reindexer.as_ref(), &command, &cancel).await?;

    println!(
        "indexed {} talks to {} and {} talks to {}",
        summary.private_count,
        settings.private_index,
        summary.public_count,
        settings.public_index
    );
    if summary.skipped_conferences > 0 {
        println!("skipped {} conferences", summary.skipped_conferences);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(settings.mode);
    info!(mode = %settings.mode, command = ?cli.command, "Starting talks indexer");

    match execute(cli.command, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Reindex failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
