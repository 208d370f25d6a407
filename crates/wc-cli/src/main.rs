//! wiki-comments - threaded page comments from the terminal
//!
//! ## Quick Start
//!
//! ```bash
//! # Initialize in your project
//! wiki-comments init --user alice --workspace acme
//!
//! # Register a page and comment on it
//! wiki-comments page add getting-started --title "Getting started"
//! wiki-comments comment create --page getting-started \
//!     --content '{"type":"doc","content":[{"type":"text","text":"Typo in step 2"}]}' \
//!     --selection "teh"
//!
//! # Read the thread
//! wiki-comments comment list --page getting-started
//! ```

mod commands;

#[tokio::main]
async fn main() {
    if let Err(err) = commands::run().await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
