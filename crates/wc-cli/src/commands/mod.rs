//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod comment;
pub mod config;
pub mod context;
pub mod init;
pub mod page;
pub mod user;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use context::AppContext;

/// wiki-comments - threaded comments on wiki pages
#[derive(Debug, Parser)]
#[command(name = "wiki-comments")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory holding the comment store
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Acting user id
    #[arg(long, global = true, env = "WIKI_COMMENTS_USER")]
    pub user: Option<String>,

    /// Acting workspace id
    #[arg(long, global = true, env = "WIKI_COMMENTS_WORKSPACE")]
    pub workspace: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize wiki-comments in current project
    Init(init::InitArgs),

    /// Manage pages
    #[command(subcommand)]
    Page(page::PageCommand),

    /// Manage user profiles shown as comment authors
    #[command(subcommand)]
    User(user::UserCommand),

    /// Create, read, edit and delete comments
    #[command(subcommand)]
    Comment(comment::CommentCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.global.verbose);

    if cli.global.no_color {
        colored::control::set_override(false);
    }

    // Init and config work before a project exists
    match cli.command {
        Commands::Init(args) => init::execute(args, &cli.global).await,
        Commands::Config(cmd) => config::execute(cmd, &cli.global),
        Commands::Page(cmd) => page::execute(cmd, &AppContext::load(&cli.global)?).await,
        Commands::User(cmd) => user::execute(cmd, &AppContext::load(&cli.global)?).await,
        Commands::Comment(cmd) => comment::execute(cmd, &AppContext::load(&cli.global)?).await,
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_text() {
        let cmd = Cli::command();
        assert!(cmd.get_about().is_some());
    }

    #[test]
    fn test_global_identity_flags() {
        let cli = Cli::try_parse_from([
            "wiki-comments",
            "comment",
            "show",
            "00000000-0000-0000-0000-000000000000",
            "--user",
            "alice",
            "--workspace",
            "acme",
        ])
        .unwrap();

        assert_eq!(cli.global.user.as_deref(), Some("alice"));
        assert_eq!(cli.global.workspace.as_deref(), Some("acme"));
    }
}
