//! Init command
//!
//! Initialize wiki-comments in a project.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use wc_core::config::{Config, CONFIG_FILE, PROJECT_DIR};
use wc_storage::FileStore;

use super::context::DATA_SUBDIR;
use super::GlobalArgs;

/// Arguments for the init command
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(long)]
    pub force: bool,

    /// Directory to initialize (default: current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

/// Execute the init command
pub async fn execute(args: InitArgs, global: &GlobalArgs) -> Result<()> {
    use colored::Colorize;

    let project_dir = match args.path {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!("Initializing wiki-comments in {}...", project_dir.display());

    let wc_dir = project_dir.join(PROJECT_DIR);
    if wc_dir.exists() && !args.force {
        eprintln!(
            "{} wiki-comments already initialized. Use --force to reinitialize.",
            "⚠".yellow()
        );
        return Ok(());
    }

    fs::create_dir_all(&wc_dir).context("Failed to create .wiki-comments directory")?;
    println!("{} Created {}/ directory", "✓".green(), PROJECT_DIR);

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let config = initial_config(global, &cwd);
    let config_path = wc_dir.join(CONFIG_FILE);
    config
        .save(&config_path)
        .context("Failed to write config.toml")?;
    println!("{} Generated {}", "✓".green(), CONFIG_FILE);

    let data_dir = config
        .storage
        .data_dir
        .clone()
        .unwrap_or_else(|| wc_dir.join(DATA_SUBDIR));
    let store = FileStore::open(&data_dir)
        .with_context(|| format!("Failed to create store in {}", data_dir.display()))?;
    store.flush().await.context("Failed to write empty store")?;
    println!("{} Created store at {}", "✓".green(), store.store_path().display());

    if project_dir.join(".git").exists() {
        update_gitignore(&project_dir)?;
        println!("{} Updated .gitignore", "✓".green());
    }

    if config.identity.user_id.is_none() || config.identity.workspace_id.is_none() {
        println!(
            "\n{} No identity saved. Pass --user/--workspace or edit {}",
            "⚠".yellow(),
            config_path.display()
        );
    }

    println!("\n{}", "Next steps:".bold());
    println!("  1. Register a page:");
    println!("     {}", "wiki-comments page add <id> --title <title>".cyan());
    println!("  2. Comment on it:");
    println!(
        "     {}",
        "wiki-comments comment create --page <id> --content '{\"type\":\"doc\"}'".cyan()
    );

    Ok(())
}

/// Config seeded from global flags; a custom data dir is stored absolute
fn initial_config(global: &GlobalArgs, cwd: &Path) -> Config {
    let mut config = Config::default();
    config.identity.user_id = global.user.clone();
    config.identity.workspace_id = global.workspace.clone();
    config.storage.data_dir = global.data_dir.as_ref().map(|dir| {
        if dir.is_absolute() {
            dir.clone()
        } else {
            cwd.join(dir)
        }
    });
    config
}

fn update_gitignore(project_dir: &Path) -> Result<()> {
    let gitignore_path = project_dir.join(".gitignore");
    let entry = format!("{}/{}/", PROJECT_DIR, DATA_SUBDIR);

    let content = if gitignore_path.exists() {
        fs::read_to_string(&gitignore_path)?
    } else {
        String::new()
    };

    if content.lines().any(|line| line.trim() == entry) {
        return Ok(());
    }

    let mut new_content = content;
    if !new_content.is_empty() && !new_content.ends_with('\n') {
        new_content.push('\n');
    }
    new_content.push_str("\n# wiki-comments store\n");
    new_content.push_str(&entry);
    new_content.push('\n');

    fs::write(&gitignore_path, new_content)?;
    Ok(())
}
