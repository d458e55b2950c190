//! Orgshift CLI - Move repositories between GitHub namespaces

mod commands;

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use orgshift_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{ListReposArgs, TransferArgs};

/// Orgshift: move repositories between GitHub users and organizations
#[derive(Parser, Debug)]
#[command(name = "orgshift")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// GitHub Personal Access Token
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Transfer repositories from one namespace to another
    #[command(visible_alias = "t")]
    Transfer(TransferArgs),

    /// List repositories in a namespace
    #[command(visible_alias = "ls")]
    ListRepos(ListReposArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?.with_env_overrides()?;
    config.validate()?;

    init_tracing(cli.verbose, log_file_for(cli.command.as_ref(), &config))?;

    if cli.verbose {
        tracing::info!(
            api_url = %config.github.api_url,
            poll_timeout = ?config.transfer.poll_timeout,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("orgshift {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Transfer(args)) => {
            args.execute(&config, cli.token.as_deref()).await?;
        }
        Some(Commands::ListRepos(args)) => {
            args.execute(&config, cli.token.as_deref()).await?;
        }
        Some(Commands::Config) => {
            println!("Orgshift Configuration");
            println!("======================");
            println!();
            println!("Transfer Settings:");
            println!("  poll_interval: {:?}", config.transfer.poll_interval);
            println!("  poll_timeout: {:?}", config.transfer.poll_timeout);
            println!("  throttle: {:?}", config.transfer.throttle);
            println!();
            println!("GitHub:");
            println!("  api_url: {}", config.github.api_url);
            println!();
            println!("Output:");
            println!("  report_dir: {}", config.output.report_dir.display());
            match &config.output.log_file {
                Some(path) => println!("  log_file: {}", path.display()),
                None => println!("  log_file: (disabled)"),
            }
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            println!("Orgshift - Move repositories between GitHub namespaces");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

/// Only commands that talk to GitHub mirror their logs to the log file
fn log_file_for<'a>(command: Option<&Commands>, config: &'a Config) -> Option<&'a Path> {
    match command {
        Some(Commands::Transfer(_) | Commands::ListRepos(_)) => config.output.log_file.as_deref(),
        Some(Commands::Version | Commands::Config) | None => None,
    }
}

/// Console logging plus an optional plain-text log file
fn init_tracing(verbose: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(args: &[&str]) -> Option<Commands> {
        Cli::parse_from(std::iter::once("orgshift").chain(args.iter().copied())).command
    }

    #[test]
    fn test_log_file_only_for_network_commands() {
        let config = Config::default();

        for args in [&["version"][..], &["config"][..], &[][..]] {
            assert_eq!(log_file_for(command(args).as_ref(), &config), None);
        }

        let transfer = command(&["transfer", "--source-org", "a", "--target-org", "b"]);
        assert_eq!(
            log_file_for(transfer.as_ref(), &config),
            Some(Path::new("transfer.log"))
        );
        let list = command(&["ls", "--org", "a"]);
        assert_eq!(log_file_for(list.as_ref(), &config), Some(Path::new("transfer.log")));
    }

    #[test]
    fn test_log_file_can_be_disabled() {
        let mut config = Config::default();
        config.output.log_file = None;

        let list = command(&["list-repos", "--org", "a"]);
        assert_eq!(log_file_for(list.as_ref(), &config), None);
    }
}
