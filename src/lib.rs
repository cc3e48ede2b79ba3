/// Handles argument parsing.
pub mod cli;

/// Defines custom error types.
pub mod error;

/// Constants used throughout next-cli.
pub mod constants;

/// Extension traits for std types.
pub mod ext;

/// Template parsing and rendering functionality.
pub mod renderer;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// The package.json model: values, merging and key order.
pub mod manifest;

/// Turns manifest entries into dedicated config files.
pub mod transform;

/// Plugin contract, registry and the API plugins work through.
pub mod plugin;

/// Runs plugins and writes the resulting file tree.
pub mod generator;

/// Preset files.
pub mod preset;

/// Project creation on top of the generator.
pub mod creator;

/// Plugins shipped with next-cli.
pub mod builtin;
