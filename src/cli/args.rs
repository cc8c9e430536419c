//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::BrickId;

/// Browse and edit threaded argumentation trees: theses with pro, contra, question and comment bricks
#[derive(Parser, Debug)]
#[command(name = "sober")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Fixture file with the bricks (overrides data_file from config)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all theses
    Index,

    /// Show a brick with its subtree
    Tree {
        /// Brick id
        id: BrickId,
        /// Print an indented list instead of a tree
        #[arg(long)]
        flat: bool,
        /// Deepest level shown below the brick (default: max_rlevel from config)
        #[arg(long)]
        max_rlevel: Option<usize>,
    },

    /// Show the computed attributes of a single brick
    Show {
        /// Brick id
        id: BrickId,
    },

    /// Create a brick
    New {
        /// Type code: th, pa, ca, qu or is
        #[arg(value_name = "TYPE")]
        type_code: String,
        /// Parent brick (required for everything but theses)
        #[arg(short, long)]
        parent: Option<BrickId>,
        /// Title
        #[arg(short, long)]
        title: String,
        /// Body text
        #[arg(long)]
        content: Option<String>,
    },

    /// Change title and/or content of a brick
    Edit {
        /// Brick id
        id: BrickId,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New body text
        #[arg(long)]
        content: Option<String>,
    },

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
    /// Show effective configuration
    Show,

    /// Show config file locations
    Path,

    /// Create a template config file
    Init {
        /// Create in the global config directory instead of the project
        #[arg(short, long)]
        global: bool,
    },
}
