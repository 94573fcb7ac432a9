//! CLI definitions for Highlight Saver.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Highlight Saver CLI.
#[derive(Parser)]
#[command(name = "highlight-saver")]
#[command(about = "Save text highlights, review them and summarize them")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.highlight-saver/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Talk to a running service at this URL instead of opening the store directly
    #[arg(short, long, global = true, env = "HIGHLIGHT_SAVER_URL")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the service over HTTP in the foreground
    Serve {
        /// Server host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// List saved highlights, newest first
    List,

    /// Save a highlight
    Save {
        /// Highlighted text
        #[arg(short, long)]
        text: String,

        /// Page the text came from
        #[arg(short, long)]
        url: String,

        /// Page title
        #[arg(long)]
        title: Option<String>,
    },

    /// Delete one highlight
    Delete {
        /// Highlight ID
        id: String,
    },

    /// Delete all highlights
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the source url of a highlight
    Source {
        /// Highlight ID
        id: String,
    },

    /// Summarize all highlights
    Summarize,
}
