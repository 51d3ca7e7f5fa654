//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use clap_complete::Shell;

/// Referral commission trees: build member hierarchies and compute kickback commissions
#[derive(Parser, Debug)]
#[command(name = "kicktree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug output (-d, -dd for more)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Generate shell completions
    #[arg(long = "generate", value_enum)]
    pub generator: Option<Shell>,

    /// Show author and version
    #[arg(long)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render every referral tree in the forest
    Tree {
        /// Member data file (default from config)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Commission breakdown per member, indented by depth
    Report {
        /// Member data file (default from config)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Total commission for one member
    Total {
        /// Member id
        id: String,
        /// Member data file (default from config)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Show member details and immediate children
    Info {
        /// Member id
        id: String,
        /// Member data file (default from config)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// List root members (never referred by anyone)
    Roots {
        /// Member data file (default from config)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// List leaf members (no downline)
    Leaves {
        /// Member data file (default from config)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Write a demo dataset
    Sample {
        /// Target file (stdout if omitted)
        #[arg(value_hint = ValueHint::FilePath)]
        path: Option<PathBuf>,
    },
}
