//! Gearlog CLI - track PPE inventory and inspections from the terminal
//!
//! Inspections captured here go through the same offline queue the desktop
//! app uses: queued locally first, submitted when the backend is reachable.

mod cli;
mod commands;
mod error;

use clap::Parser;

use cli::{Cli, Commands, QueueAction};
use commands::common::resolve_db_path;
use error::CliError;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(error) = run(cli).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let db_path = resolve_db_path(cli.db_path);

    match cli.command {
        Commands::Add {
            serial,
            name,
            kind,
            interval_days,
        } => commands::add::run_add(&serial, &name, kind, interval_days, &db_path).await,
        Commands::List { limit, json } => commands::list::run_list(limit, json, &db_path).await,
        Commands::Show { equipment, json } => {
            commands::show::run_show(&equipment, json, &db_path).await
        }
        Commands::Inspect {
            equipment,
            checkpoints,
            notes,
            inspector,
            offline,
        } => {
            commands::inspect::run_inspect(
                &equipment,
                &checkpoints,
                notes,
                inspector,
                offline,
                &db_path,
            )
            .await
        }
        Commands::Queue { action, json } => match action {
            None | Some(QueueAction::List) => {
                commands::queue::run_queue_list(json, &db_path).await
            }
            Some(QueueAction::Clear { id }) => {
                commands::queue::run_queue_clear(&id, &db_path).await
            }
        },
        Commands::Sync => commands::sync::run_sync(&db_path).await,
        Commands::Refresh => commands::refresh::run_refresh(&db_path).await,
        Commands::Status { equipment, status } => {
            commands::status::run_status(&equipment, status, &db_path).await
        }
        Commands::Report { format, output } => {
            commands::export::run_report(format, output, &db_path).await
        }
        Commands::Completions { shell } => {
            commands::completions::run_completions(shell);
            Ok(())
        }
    }
}
