//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Convert a spreadsheet taxonomy (Area > Broad > Major > Detailed) into nested JSON
#[derive(Parser, Debug)]
#[command(name = "taxonomy-json")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log verbosity on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Config file (default: ./taxonomy-json.toml when present)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Directory with the taxonomy workbooks
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub data_dir: Option<PathBuf>,

    /// Directory receiving taxonomy_hierarchy.json
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,

    /// Keep the previous Broad/Major open when a new Area/Broad starts
    #[arg(long)]
    pub carry_stale_parents: bool,

    /// Do not echo the JSON to stdout
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub show_config: bool,

    /// Print a config file template and exit
    #[arg(long, conflicts_with = "show_config")]
    pub config_template: bool,

    /// Generate shell completions and exit
    #[arg(long, value_enum)]
    pub completions: Option<clap_complete::Shell>,
}
