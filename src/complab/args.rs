use clap::{Parser, Subcommand};
use std::path::PathBuf;

const VERSION: &str = env!("COMPLAB_VERSION");

#[derive(Parser, Debug)]
#[command(name = "complab")]
#[command(version = VERSION)]
#[command(about = "Local library of reusable UI components", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Store root (overrides COMPLAB_ROOT and the config file)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Metadata flags shared by `save` and `import`.
#[derive(clap::Args, Debug, Default)]
pub struct MetaArgs {
    /// Component name (the id is derived from it)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Framework, e.g. React, Vue, HTML
    #[arg(short, long)]
    pub framework: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    /// Platform, e.g. Web, Mobile
    #[arg(short, long)]
    pub platform: Option<String>,

    /// Language, e.g. TSX, JavaScript
    #[arg(short, long)]
    pub language: Option<String>,

    /// Component version, e.g. 1.2.0
    #[arg(long = "component-version", value_name = "VERSION")]
    pub version: Option<String>,

    #[arg(long)]
    pub author: Option<String>,

    /// Entry file, must be one of the component's files
    #[arg(long)]
    pub main_file: Option<String>,

    /// Tag (repeatable)
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// External stylesheet URL (repeatable)
    #[arg(long = "style")]
    pub external_styles: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List components
    #[command(alias = "ls")]
    List {
        /// Search name, description and tags
        #[arg(short, long)]
        search: Option<String>,

        #[arg(short, long)]
        framework: Option<String>,

        #[arg(short, long)]
        platform: Option<String>,

        /// Only components carrying this tag (repeatable, all must match)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Show a component and its source files
    #[command(alias = "v")]
    Show {
        id: String,

        /// Print the component as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create or replace a component from files on disk
    Save {
        #[command(flatten)]
        meta: MetaArgs,

        /// Source files, stored under their base names
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,
    },

    /// Delete one or more components
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Import a folder, loose files or a snippet
    Import {
        /// folder, files or snippet
        kind: String,

        /// A directory (folder), files (files) or one file or `-` for stdin (snippet)
        #[arg(num_args = 0..)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        meta: MetaArgs,

        /// Overwrite a component with the same id
        #[arg(long)]
        replace: bool,
    },

    /// Write a component to a JSON bundle or a tar.gz archive
    Export {
        id: String,

        /// json or archive
        #[arg(long, default_value = "json")]
        format: String,

        /// Destination file (defaults to <id>.json or <id>.tar.gz)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Find and remove invalid component directories
    Doctor,

    /// Print the directory of one or more components
    Path {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., default-platform)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
