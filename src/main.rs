//! Pomodoro countdown timer CLI.
//!
//! A small daemon counts the sessions down; this binary starts it and
//! talks to it:
//! - 25-minute work sessions on cycle positions 1, 3, 5, 7
//! - 5-minute short breaks on positions 2, 4, 6
//! - a 20-minute long break on position 8

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use tomato::cli::{default_socket_path, Cli, Commands, Display, IpcClient};
use tomato::daemon;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = execute(cli).await {
        Display::show_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Resolves the socket path from the CLI override or the default.
fn socket_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.socket {
        Some(path) => Ok(path.clone()),
        None => default_socket_path(),
    }
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    let socket = socket_path(&cli)?;

    match cli.command {
        Some(Commands::Start) => {
            let client = IpcClient::with_socket_path(socket);
            let response = client.start().await?;
            Display::show_start_success(&response);
        }
        Some(Commands::Reset) => {
            let client = IpcClient::with_socket_path(socket);
            let response = client.reset().await?;
            Display::show_reset_success(&response);
        }
        Some(Commands::Status) => {
            let client = IpcClient::with_socket_path(socket);
            let response = client.status().await?;
            Display::show_status(&response);
        }
        Some(Commands::Daemon) => {
            daemon::run(&socket).await?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
