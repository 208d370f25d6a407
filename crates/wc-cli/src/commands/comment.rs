//! Comment command
//!
//! Drives `CommentService` against the file store.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::collections::HashMap;
use wc_core::comment::{Comment, CreateCommentInput, Creator, UpdateCommentInput};
use wc_core::pagination::PaginationResult;
use wc_core::types::{CommentId, PageId};

use super::context::AppContext;

/// Comment subcommands
#[derive(Debug, Subcommand)]
pub enum CommentCommand {
    /// Create a comment or a reply
    Create {
        /// Page to comment on
        #[arg(long)]
        page: String,

        /// Comment body as a JSON document
        #[arg(long)]
        content: String,

        /// Highlighted text the comment refers to
        #[arg(long)]
        selection: Option<String>,

        /// Comment to reply to
        #[arg(long)]
        parent: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a comment
    Show {
        /// Comment ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List comments on a page
    List {
        /// Page ID
        #[arg(long)]
        page: String,

        /// Page of results, starting at 1
        #[arg(long, default_value = "1")]
        page_number: u32,

        /// Results per page (default from config)
        #[arg(long, short)]
        limit: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace a comment's content
    Edit {
        /// Comment ID
        id: String,

        /// New body as a JSON document
        #[arg(long)]
        content: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a comment and its replies
    Delete {
        /// Comment ID
        id: String,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Execute the comment command
pub async fn execute(cmd: CommentCommand, ctx: &AppContext) -> Result<()> {
    match cmd {
        CommentCommand::Create {
            page,
            content,
            selection,
            parent,
            json,
        } => create_comment(ctx, page, content, selection, parent, json).await,
        CommentCommand::Show { id, json } => show_comment(ctx, &id, json).await,
        CommentCommand::List {
            page,
            page_number,
            limit,
            json,
        } => list_comments(ctx, &page, page_number, limit, json).await,
        CommentCommand::Edit { id, content, json } => edit_comment(ctx, &id, content, json).await,
        CommentCommand::Delete { id, yes, json } => delete_comment(ctx, &id, yes, json).await,
    }
}

fn parse_comment_id(id: &str) -> Result<CommentId> {
    id.parse::<CommentId>()
        .context(format!("Invalid comment ID: {}", id))
}

async fn create_comment(
    ctx: &AppContext,
    page: String,
    content: String,
    selection: Option<String>,
    parent: Option<String>,
    as_json: bool,
) -> Result<()> {
    use colored::Colorize;

    let user_id = ctx.user_id()?;
    let workspace_id = ctx.workspace_id()?;

    let mut input = CreateCommentInput::new(PageId::from(page.as_str()), content);
    if let Some(selection) = selection {
        input = input.with_selection(selection);
    }
    if let Some(parent) = parent {
        input = input.reply_to(parse_comment_id(&parent)?);
    }

    let store = ctx.open_store()?;
    let comment = ctx
        .service(&store)
        .create(&user_id, &workspace_id, input)
        .await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&comment)?);
        return Ok(());
    }

    println!("{} Created comment {}", "✓".green(), comment.id.to_string().cyan());
    Ok(())
}

async fn show_comment(ctx: &AppContext, id: &str, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let comment_id = parse_comment_id(id)?;
    let store = ctx.open_store()?;
    let comment = ctx.service(&store).find_by_id(&comment_id).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&comment)?);
        return Ok(());
    }

    println!("{}", "Comment Details".bold().underline());
    println!();
    println!("  ID: {}", comment.id.to_string().green());
    println!("  Page: {}", comment.page_id.to_string().cyan());
    if let Some(parent) = &comment.parent_comment_id {
        println!("  Reply to: {}", parent);
    }
    println!("  Type: {}", comment.comment_type);
    println!("  Author: {}", author_name(&comment));
    println!(
        "  Created: {}",
        comment.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    if let Some(edited) = comment.edited_at {
        println!("  Edited: {}", edited.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(selection) = &comment.selection {
        println!("  Selection: {}", format!("\"{}\"", selection).italic());
    }
    println!();
    println!("  {}", comment.content.plain_text());

    Ok(())
}

async fn list_comments(
    ctx: &AppContext,
    page: &str,
    page_number: u32,
    limit: Option<u32>,
    as_json: bool,
) -> Result<()> {
    use colored::Colorize;

    let pagination = ctx.pagination(page_number, limit)?;
    let store = ctx.open_store()?;
    let result = ctx
        .service(&store)
        .find_by_page_id(&PageId::from(page), &pagination)
        .await?;

    let mut profiles: HashMap<_, Creator> = HashMap::new();
    for comment in &result.items {
        if !profiles.contains_key(&comment.creator_id) {
            let profile = store
                .get_user(&comment.creator_id)
                .await
                .unwrap_or_else(|| Creator::anonymous(comment.creator_id.clone()));
            profiles.insert(comment.creator_id.clone(), profile);
        }
    }
    let result: PaginationResult<Comment> = result.map(|mut comment| {
        comment.creator = profiles.get(&comment.creator_id).cloned();
        comment
    });

    if as_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.items.is_empty() {
        println!("No comments found.");
        return Ok(());
    }

    println!(
        "{}",
        format!("Comments on {} (page {}):", page, result.meta.page)
            .bold()
            .underline()
    );
    println!();

    for comment in &result.items {
        let indent = if comment.is_reply() { "    ↳ " } else { "  " };
        println!(
            "{}{} {} {}",
            indent,
            comment.id.to_string().green(),
            author_name(comment).cyan(),
            comment
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .dimmed()
        );
        if let Some(selection) = &comment.selection {
            println!("{}  > {}", indent, selection.italic());
        }
        println!("{}  {}", indent, comment.content.plain_text());
    }

    if result.meta.has_next_page {
        println!(
            "\n  {} More comments. Use --page-number {} to continue.",
            "ℹ".blue(),
            result.meta.page + 1
        );
    }

    Ok(())
}

async fn edit_comment(ctx: &AppContext, id: &str, content: String, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let comment_id = parse_comment_id(id)?;
    let store = ctx.open_store()?;
    let comment = ctx
        .service(&store)
        .update(&comment_id, UpdateCommentInput::new(content))
        .await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&comment)?);
        return Ok(());
    }

    println!("{} Updated comment {}", "✓".green(), comment.id.to_string().cyan());
    Ok(())
}

async fn delete_comment(ctx: &AppContext, id: &str, skip_confirm: bool, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let comment_id = parse_comment_id(id)?;
    let store = ctx.open_store()?;
    let service = ctx.service(&store);

    // Surface NotFound before prompting
    let comment = service.find_by_id(&comment_id).await?;

    if !skip_confirm {
        use dialoguer::Confirm;

        let prompt = if comment.is_reply() {
            format!("Delete reply {}?", id)
        } else {
            format!("Delete comment {} and its replies?", id)
        };
        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    service.remove(&comment_id).await?;

    if as_json {
        println!("{}", serde_json::json!({ "id": comment_id, "deleted": true }));
        return Ok(());
    }

    println!("{} Deleted comment {}", "✓".green(), id.cyan());
    Ok(())
}

fn author_name(comment: &Comment) -> &str {
    comment
        .creator
        .as_ref()
        .map(Creator::display_name)
        .unwrap_or(comment.creator_id.as_str())
}
