//! CLI 模块

pub mod init;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jotter")]
#[command(version)]
#[command(about = "Terminal todo list backed by a hosted record store")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the task list (default when no subcommand is given)
    Tui {
        /// Run against an in-memory store with sample data (no remote calls)
        #[arg(long)]
        mock: bool,
    },
    /// Write the config skeleton (~/.jotter/config.toml)
    Init {
        /// Record store base URL (e.g. https://abc.supabase.co)
        #[arg(long)]
        url: Option<String>,
        /// API key, sent as apikey header and Bearer token
        #[arg(long)]
        key: Option<String>,
        /// Table name
        #[arg(long, default_value = "todos")]
        table: String,
    },
}
