//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Step through a material taxonomy, collect leaf paths, and write selection reports
#[derive(Parser, Debug)]
#[command(name = "matnav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Project directory holding .matnav.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List top-level categories
    Top {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show direct subcategories of a category
    Children {
        /// Category name (case and surrounding whitespace ignored)
        name: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Navigate interactively and write a report at the end
    Navigate {
        /// Print the report instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Generate a report from explicit paths
    Report {
        /// Path as "A > B > C" (repeatable, numbered in given order)
        #[arg(short, long = "path")]
        paths: Vec<String>,
        /// Read {"paths": [[...], ...]} from a JSON file instead
        #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "paths")]
        json: Option<PathBuf>,
        /// Print the report instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Show the whole taxonomy as tree
    Tree,

    /// List every path from a top-level category to a leaf
    Leaves,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
