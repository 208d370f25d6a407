//! Page command
//!
//! Register, list and remove the pages comments attach to.

use anyhow::{Context, Result};
use clap::Subcommand;
use wc_core::page::Page;
use wc_core::types::PageId;

use super::context::AppContext;

/// Page subcommands
#[derive(Debug, Subcommand)]
pub enum PageCommand {
    /// Register a page
    Add {
        /// Page ID
        id: String,

        /// Page title
        #[arg(long)]
        title: String,
    },

    /// List registered pages
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a page and all of its comments
    Remove {
        /// Page ID
        id: String,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

/// Execute the page command
pub async fn execute(cmd: PageCommand, ctx: &AppContext) -> Result<()> {
    match cmd {
        PageCommand::Add { id, title } => add_page(ctx, &id, &title).await,
        PageCommand::List { json } => list_pages(ctx, json).await,
        PageCommand::Remove { id, yes } => remove_page(ctx, &id, yes).await,
    }
}

async fn add_page(ctx: &AppContext, id: &str, title: &str) -> Result<()> {
    use colored::Colorize;

    let workspace_id = ctx.workspace_id()?;
    let store = ctx.open_store()?;

    let page = Page::new(PageId::from(id), title, workspace_id);
    store
        .insert_page(page)
        .await
        .context(format!("Failed to add page '{}'", id))?;

    println!("{} Added page {}", "✓".green(), id.cyan());
    Ok(())
}

async fn list_pages(ctx: &AppContext, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let store = ctx.open_store()?;
    let pages = store.list_pages().await;

    if as_json {
        let json = serde_json::to_string_pretty(&pages)?;
        println!("{}", json);
        return Ok(());
    }

    if pages.is_empty() {
        println!("No pages found.");
        return Ok(());
    }

    println!("{}", "Pages:".bold().underline());
    println!();

    for page in &pages {
        let count = store.page_comment_count(&page.id).await;
        println!(
            "  {} {} ({} comments, {})",
            page.id.to_string().green(),
            page.title,
            count.to_string().yellow(),
            page.workspace_id.to_string().dimmed()
        );
    }

    Ok(())
}

async fn remove_page(ctx: &AppContext, id: &str, skip_confirm: bool) -> Result<()> {
    use colored::Colorize;

    if !skip_confirm {
        use dialoguer::Confirm;

        let confirmed = Confirm::new()
            .with_prompt(format!("Remove page '{}' and all of its comments?", id))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Removal cancelled.");
            return Ok(());
        }
    }

    let store = ctx.open_store()?;
    let removed = store
        .delete_page(&PageId::from(id))
        .await
        .context(format!("Failed to remove page '{}'", id))?;

    println!(
        "{} Removed page {} ({} comments)",
        "✓".green(),
        id.cyan(),
        removed
    );
    Ok(())
}
