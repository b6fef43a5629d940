//! Meal Max command-line entry point.
mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{Battle, Create, Delete, Get, Kitchen, Leaderboard, List};
use meal_core::{ErrorSeverity, ValidationError};
use meal_runtime::{KitchenConfig, KitchenError, StoreBackend};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Meal catalog and battle arena
#[derive(Parser)]
#[command(name = "meal-max")]
#[command(about = "Manage meals and let them battle", long_about = None)]
#[command(version)]
struct Cli {
    /// Store backend (overrides MEAL_STORE)
    #[arg(long, global = true)]
    store: Option<StoreBackend>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Add a meal
    Create(Create),

    /// Show one meal
    Get(Get),

    /// Soft-delete a meal
    Delete(Delete),

    /// List live meals
    List(List),

    /// Battle two meals
    Battle(Battle),

    /// Show the leaderboard
    Leaderboard(Leaderboard),

    /// Remove every meal
    Reset,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = setup_logging()?;

    let mut config = KitchenConfig::from_env();
    if let Some(store) = cli.store {
        config = config.with_store(store);
    }
    let kitchen = Kitchen::open(config)?;

    let result = match cli.command {
        Command::Create(cmd) => cmd.execute(&kitchen),
        Command::Get(cmd) => cmd.execute(&kitchen),
        Command::Delete(cmd) => cmd.execute(&kitchen),
        Command::List(cmd) => cmd.execute(&kitchen),
        Command::Battle(cmd) => cmd.execute(&kitchen),
        Command::Leaderboard(cmd) => cmd.execute(&kitchen),
        Command::Reset => commands::reset(&kitchen),
    };

    if let Err(err) = &result {
        tracing::warn!("Command failed ({} error): {}", error_kind(err), err);
    }
    result
}

/// Severity label for a failed command.
fn error_kind(err: &anyhow::Error) -> &'static str {
    if let Some(err) = err.downcast_ref::<KitchenError>() {
        err.severity().as_str()
    } else if let Some(err) = err.downcast_ref::<ValidationError>() {
        err.severity().as_str()
    } else {
        ErrorSeverity::Internal.as_str()
    }
}

/// Setup logging to both stderr and file
///
/// The returned guard flushes the file writer on drop.
fn setup_logging() -> Result<WorkerGuard> {
    let log_dir = dirs::log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "meal-max.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::debug!("Log file: {}/meal-max.log", log_dir.display());

    Ok(guard)
}
