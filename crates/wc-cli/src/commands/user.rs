//! User command
//!
//! Profiles shown as comment authors.

use anyhow::Result;
use clap::Subcommand;
use wc_core::comment::Creator;
use wc_core::types::UserId;

use super::context::AppContext;

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create or replace a user profile
    Set {
        /// User ID
        id: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Avatar URL
        #[arg(long)]
        avatar_url: Option<String>,
    },

    /// Show a user profile
    Show {
        /// User ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Execute the user command
pub async fn execute(cmd: UserCommand, ctx: &AppContext) -> Result<()> {
    use colored::Colorize;

    let store = ctx.open_store()?;

    match cmd {
        UserCommand::Set {
            id,
            name,
            avatar_url,
        } => {
            let user = Creator {
                id: UserId::from(id.as_str()),
                name,
                avatar_url,
            };
            store.upsert_user(user).await?;
            println!("{} Saved user {}", "✓".green(), id.cyan());
        }
        UserCommand::Show { id, json } => {
            let user_id = UserId::from(id.as_str());
            let user = store
                .get_user(&user_id)
                .await
                .unwrap_or_else(|| Creator::anonymous(user_id));

            if json {
                println!("{}", serde_json::to_string_pretty(&user)?);
            } else {
                println!("  ID: {}", user.id.to_string().green());
                println!("  Name: {}", user.display_name());
                if let Some(url) = &user.avatar_url {
                    println!("  Avatar: {}", url);
                }
            }
        }
    }

    Ok(())
}
