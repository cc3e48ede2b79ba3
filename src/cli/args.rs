use crate::constants::{exit_codes, verbosity};
use crate::manifest::MergeConflictPolicy;
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use log::LevelFilter;
use std::fmt::Display;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// How conflicting manifest values from different plugins are handled.
#[derive(Debug, Clone, ValueEnum, Copy, PartialEq, Default)]
#[value(rename_all = "lowercase")]
pub enum MergeConflicts {
    /// The later plugin wins silently.
    #[default]
    Overwrite,
    /// The later plugin wins and a warning is logged.
    Warn,
    /// Generation is aborted.
    Error,
}

impl Display for MergeConflicts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MergeConflicts::Overwrite => "overwrite",
            MergeConflicts::Warn => "warn",
            MergeConflicts::Error => "error",
        };
        write!(f, "{s}")
    }
}

impl From<MergeConflicts> for MergeConflictPolicy {
    fn from(value: MergeConflicts) -> Self {
        match value {
            MergeConflicts::Overwrite => MergeConflictPolicy::Overwrite,
            MergeConflicts::Warn => MergeConflictPolicy::Warn,
            MergeConflicts::Error => MergeConflictPolicy::Error,
        }
    }
}

/// CLI arguments for next-cli.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Name of the project to create.
    #[arg(value_name = "PROJECT_NAME")]
    pub name: String,

    /// Preset file, or a directory containing `preset.json`/`preset.yaml`.
    #[arg(short, long, value_name = "PRESET")]
    pub preset: Option<PathBuf>,

    /// Destination directory. Defaults to `./<PROJECT_NAME>`.
    #[arg(short, long, value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Force overwrite of an existing output directory.
    #[arg(short, long)]
    pub force: bool,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Move tool configuration out of package.json into dedicated files.
    #[arg(long = "extract-config-files")]
    pub extract_config_files: bool,

    /// Keep package.json keys in insertion order.
    #[arg(long = "no-sort")]
    pub no_sort: bool,

    /// How conflicting package.json values are handled.
    #[arg(long = "merge-conflicts", value_enum, default_value_t = MergeConflicts::Overwrite)]
    pub merge_conflicts: MergeConflicts,

    /// Preview actions without touching the filesystem.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl Args {
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from(&self.name))
    }
}

/// Parse command line arguments with custom handling for missing required inputs.
pub fn get_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingRequiredArgument {
            let mut command = Args::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
