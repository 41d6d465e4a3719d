//! GoldenHour CLI - command-line interface
//!
//! This binary provides a command-line interface to the GoldenHour dispatch
//! client library: submit an emergency, watch its dispatch progress, and
//! notify the selected hospital.

use clap::{Parser, Subcommand};

use goldenhour::logging::{default_log_dir, default_log_file, init_logging};

mod commands;
mod error;

use error::CliError;

#[derive(Parser)]
#[command(name = "goldenhour")]
#[command(version = goldenhour::VERSION)]
#[command(about = "Emergency dispatch client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit an emergency to the triage endpoint and watch it
    Submit(commands::submit::SubmitArgs),
    /// Watch an emergency's dispatch progress
    Watch(commands::watch::WatchArgs),
    /// Notify a hospital about the active emergency
    Notify(commands::notify::NotifyArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _guard = match init_logging(default_log_dir(), default_log_file()) {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e.to_string()).exit(),
    };

    let result = match cli.command {
        Command::Submit(args) => commands::submit::run(args).await,
        Command::Watch(args) => commands::watch::run(args).await,
        Command::Notify(args) => commands::notify::run(args).await,
    };

    if let Err(e) = result {
        e.exit();
    }
}
