use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to walk template directory. Original error: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Failed to configure the template engine. Original error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    /// A template contains malformed interpolation or control flow.
    #[error("Failed to render template '{name}'. Original error: {source}")]
    TemplateRenderError {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// A config transform was asked to produce a file in a format it does not support.
    #[error("Unsupported config format '{format}' for '{key}'. Only js config files are supported.")]
    UnsupportedConfigFormat { key: String, format: String },

    /// Two manifest fragments set different values for the same leaf
    /// and the merge policy is `MergeConflictPolicy::Error`.
    #[error("Manifest merge conflict at '{path}'.")]
    ManifestMergeConflict { path: String },

    #[error("The root plugin '{expected}' must be the first plugin, found '{found}'.")]
    RootPluginNotFirst { expected: String, found: String },

    #[error("Failed to write '{}'. Original error: {source}", path.display())]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No preset file found in '{preset_dir}'. Tried: {preset_files}.")]
    PresetNotFound { preset_dir: String, preset_files: String },

    #[error("Failed to parse preset file '{path}'. Original error: {e}")]
    PresetParseError { path: String, e: String },

    #[error("Failed to serialize manifest. Original error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Cannot proceed: output directory '{output_dir}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExistsError { output_dir: String },

    #[error("Path '{0}' contains invalid Unicode characters.")]
    InvalidPath(PathBuf),

    /// Errors raised by plugin code.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results with the crate error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
