//! Module describing all possible commands and sub-commands to the `find-dropouts` main driver
//!
//! - `scan` replays a day of readsb-hist snapshots and reports every coverage gap
//! - `completion` is here just to configure the various shells completion system.
//! - `version` displays the version of every module.
//!

use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser};
use clap_complete::shells::Shell;

/// CLI options
#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// Hierarchical logging.
    #[clap(long)]
    pub tree: bool,
    /// Also log into hourly files in this directory.
    #[clap(long)]
    pub log_dir: Option<String>,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `completion SHELL`
/// `scan [-t secs] [-d date] [-p pattern] [-k] [-o FILE] DIR`
/// `version`
///
#[derive(Debug, Parser)]
pub enum SubCommand {
    /// Generate Completion stuff
    Completion(ComplOpts),
    /// Find dropouts in a directory of snapshots
    Scan(ScanOpts),
    /// List all package versions
    Version,
}

// ------

/// Options for replaying snapshots
///
#[derive(Debug, Parser)]
pub struct ScanOpts {
    /// Dropout threshold in seconds.
    #[clap(short = 't', long)]
    pub threshold: Option<f64>,
    /// Day of the snapshots (YYYY-MM-DD), default is from the path.
    #[clap(short = 'd', long)]
    pub date: Option<String>,
    /// Time of day format of the file names.
    #[clap(short = 'p', long)]
    pub pattern: Option<String>,
    /// Skip records in error instead of stopping.
    #[clap(short = 'k', long)]
    pub keep_going: bool,
    /// CSV output file, default is stdout.
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
    /// Directory with the snapshots.
    pub dir: PathBuf,
}

// ------

/// Options to generate shell completion
///
#[derive(Debug, Parser)]
pub struct ComplOpts {
    #[clap(value_parser)]
    pub shell: Shell,
}
