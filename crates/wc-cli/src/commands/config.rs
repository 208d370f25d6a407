//! Config command
//!
//! Manage wiki-comments configuration.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::fs;
use std::path::{Path, PathBuf};
use wc_core::config::Config;

use super::GlobalArgs;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reset to default configuration
    Reset {
        /// Force reset without confirmation
        #[arg(long)]
        force: bool,
    },

    /// Validate configuration
    Validate,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, global: &GlobalArgs) -> Result<()> {
    let config_path = get_config_path(global)?;

    match cmd {
        ConfigCommand::Show { json } => show_config(&config_path, json),
        ConfigCommand::Reset { force } => reset_config(&config_path, force),
        ConfigCommand::Validate => validate_config(&config_path),
    }
}

fn get_config_path(global: &GlobalArgs) -> Result<PathBuf> {
    match &global.config {
        Some(path) => Ok(path.clone()),
        None => {
            let root = std::env::current_dir().context("Failed to read current directory")?;
            Ok(Config::project_path(&root))
        }
    }
}

fn show_config(config_path: &Path, as_json: bool) -> Result<()> {
    use colored::Colorize;

    if !config_path.exists() {
        eprintln!(
            "{} Configuration not found. Run '{}' to create.",
            "⚠".yellow(),
            "wiki-comments init".cyan()
        );
        return Ok(());
    }

    let config = Config::load(config_path)
        .context(format!("Failed to load {}", config_path.display()))?;

    if as_json {
        let json = serde_json::to_string_pretty(&config)?;
        println!("{}", json);
    } else {
        println!("{}", "Configuration:".bold().underline());
        println!("{}", config_path.display().to_string().dimmed());
        println!();
        println!("{}", config.to_toml()?);
    }

    Ok(())
}

fn reset_config(config_path: &Path, force: bool) -> Result<()> {
    use colored::Colorize;

    if !force {
        use dialoguer::Confirm;

        let confirmed = Confirm::new()
            .with_prompt("Reset configuration to defaults?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    // Backup existing
    if config_path.exists() {
        let backup_path = format!(
            "{}.backup-{}",
            config_path.display(),
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        );
        fs::copy(config_path, &backup_path)?;
        println!("{} Backed up to {}", "✓".green(), backup_path);
    }

    Config::default()
        .save(config_path)
        .context("Failed to write default configuration")?;

    println!("{} Configuration reset to defaults.", "✓".green());

    Ok(())
}

fn validate_config(config_path: &Path) -> Result<()> {
    use colored::Colorize;

    if !config_path.exists() {
        eprintln!(
            "{} Configuration not found at {}",
            "✗".red(),
            config_path.display()
        );
        return Ok(());
    }

    let content = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&content)
        .context(format!("Invalid TOML in {}", config_path.display()))?;
    println!("{} Configuration is valid TOML", "✓".green());

    config.validate()?;
    println!("{} All values in range", "✓".green());

    let mut warnings = Vec::new();
    if config.identity.user_id.is_none() {
        warnings.push("identity.user_id not set; writes need --user");
    }
    if config.identity.workspace_id.is_none() {
        warnings.push("identity.workspace_id not set; writes need --workspace");
    }
    for warning in warnings {
        println!("{} {}", "⚠".yellow(), warning);
    }

    Ok(())
}
