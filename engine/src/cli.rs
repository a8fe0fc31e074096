//! CLI interface for addonctl
//!
//! This module provides the command-line interface using clap's derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Add-on policy and identity tool
///
/// Rates add-on security posture, resolves repository ids, and cleans up
/// add-on data directories.
#[derive(Parser, Debug)]
#[command(name = "addonctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log: Option<String>,

    /// Specify alternate configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rate an add-on's security posture (1 = not secure, 6 = highly secure)
    Rate {
        /// Add-on descriptor JSON file
        descriptor: PathBuf,

        /// Show every adjustment that contributed to the score
        #[arg(long)]
        explain: bool,
    },

    /// Show metadata for an installed add-on
    Info {
        /// Add-on descriptor JSON file
        descriptor: PathBuf,
    },

    /// Print the canonical id of a repository directory
    RepoId {
        /// Repository directory path
        path: PathBuf,
    },

    /// Hash a repository name into its id
    Hash {
        /// Repository name or URL
        name: String,
    },

    /// Remove an add-on's data directory (best effort)
    Purge {
        /// Add-on slug
        slug: String,
    },
}
