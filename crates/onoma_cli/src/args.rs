//! Command-line argument definitions for the `onoma` binary.

use clap::{Args, Parser, Subcommand};
use onoma_core::{Component, Gender, NameId, SpellingField};
use std::path::PathBuf;

/// Culturally-tagged personal name lookup
#[derive(Debug, Parser)]
#[command(name = "onoma", version)]
pub struct Cli {
    /// SQLite database file; created when missing
    #[arg(long, global = true, env = "ONOMA_DB", default_value = "onoma.db3")]
    pub db: PathBuf,

    /// Log level: trace|debug|info|warn|error (defaults by build mode); requires --log-dir
    #[arg(long, global = true, requires = "log_dir")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "ONOMA_LOG_DIR")]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the culture codes present in the store
    Cultures,

    /// Print one record as JSON
    Get {
        /// Record id
        id: NameId,
    },

    /// Search alphabetic spellings by case-insensitive substring
    Search(SearchArgs),

    /// Print randomly chosen spellings
    Random(RandomArgs),

    /// Insert one record and print its id
    Add(AddArgs),

    /// Import a `culture;component;gender;alphabetic` file in one transaction
    Import {
        /// UTF-8 text file, one record per line
        file: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct TagFilters {
    /// F|M|U (feminine|masculine|unisex)
    #[arg(long)]
    pub gender: Option<Gender>,

    /// given|family
    #[arg(long)]
    pub component: Option<Component>,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Substring to look for; empty matches every record
    #[arg(default_value = "")]
    pub pattern: String,

    /// Exact culture code, e.g. PL or EN-US
    #[arg(long)]
    pub culture: Option<String>,

    #[command(flatten)]
    pub filters: TagFilters,

    /// Maximum number of records; 0 means no limit
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Debug, Args)]
pub struct RandomArgs {
    /// Number of spellings to draw
    pub count: u32,

    /// Culture to draw from; repeat for several, omit for all
    #[arg(long = "culture")]
    pub cultures: Vec<String>,

    #[command(flatten)]
    pub filters: TagFilters,

    /// alphabetic|ideographic|phonetic
    #[arg(long, default_value = "alphabetic")]
    pub field: SpellingField,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub culture: String,

    #[arg(long)]
    pub component: Component,

    #[arg(long)]
    pub gender: Gender,

    #[arg(long)]
    pub alphabetic: String,

    #[arg(long, default_value = "")]
    pub ideographic: String,

    #[arg(long, default_value = "")]
    pub phonetic: String,
}
