//! CLI module - Command-line interface for graylog-configurer
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// graylog-configurer - Graylog admin provisioning
/// Ensures the configured users exist and hold the Admin role
#[derive(Parser)]
#[command(name = "graylog-configurer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Graylog API base URL (overrides config and GRAYLOG_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Wait for the API, promote configured admins, then stay running
    Run,

    /// Check once whether the API is reachable
    Check,

    /// Promote the given users instead of the configured list, then exit
    Promote {
        /// User names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Delete a user
    #[command(alias = "rm")]
    Delete {
        /// User name
        name: String,
    },

    /// Create default config file
    Init,
}

pub use commands::*;
