//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::application::format::InputFormat;

/// Render structured data (JSON, YAML, TOML) as Markdown
#[derive(Parser, Debug)]
#[command(name = "value2md")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Extra config file layered over global and local config
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a document to Markdown
    Convert(ConvertArgs),

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

#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Input document (default: stdin, also "-")
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Input format: json, yaml, toml (default: from extension)
    #[arg(short, long)]
    pub format: Option<InputFormat>,

    /// Tag mapping file (key = tag table)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub mapping: Option<PathBuf>,

    /// Tag for a key, e.g. -t title=h1 -t body=p (repeatable)
    #[arg(short, long = "tag", value_name = "KEY=TAG")]
    pub tags: Vec<String>,

    /// Nesting depth still rendered as heading in level mode
    #[arg(short = 'l', long)]
    pub title_level: Option<usize>,

    /// Deepest accepted nesting of mappings and lists
    #[arg(long)]
    pub max_depth: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print config template
    Template,

    /// Show config paths
    Path,
}
