#![allow(dead_code)]

use log::debug;
use next_cli::cli::{run, Args, MergeConflicts};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn relative_files(root: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect()
}

fn print_content(label: &str, content: &[u8]) {
    println!("  --- {label}:");
    match std::str::from_utf8(content) {
        Ok(s) => println!("{s}"),
        Err(_) => println!("  (binary content, {} bytes)", content.len()),
    }
}

/// Prints the files present in only one of two trees and the content of
/// files that differ.
///
/// # Arguments
/// * `actual` - The generated project.
/// * `expected` - The fixture it should match.
pub fn print_dir_diff(actual: &Path, expected: &Path) {
    let actual_files = relative_files(actual);
    let expected_files = relative_files(expected);

    println!("\n=== Directory Comparison ===");
    println!("Actual output:   {actual:?}");
    println!("Expected output: {expected:?}");

    for file in actual_files.difference(&expected_files) {
        println!("  + {file:?}");
    }
    for file in expected_files.difference(&actual_files) {
        println!("  - {file:?}");
    }

    for file in actual_files.intersection(&expected_files) {
        let actual_content = fs::read(actual.join(file)).unwrap();
        let expected_content = fs::read(expected.join(file)).unwrap();
        if actual_content != expected_content {
            println!("\n  File: {file:?}");
            print_content("Actual content", &actual_content);
            print_content("Expected content", &expected_content);
        }
    }
    println!("=== End of Comparison ===\n");
}

/// Asserts that two directory trees are identical, printing a diff first when they are not.
pub fn assert_dirs_equal(actual: &Path, expected: &Path) {
    match dir_diff::is_different(actual, expected) {
        Ok(true) => {
            print_dir_diff(actual, expected);
            panic!("Directories differ. See above for details.");
        }
        Ok(false) => {}
        Err(e) => {
            debug!("Error comparing directories: {e:?}");
            panic!("Failed to compare {actual:?} with {expected:?}");
        }
    }
}

/// CLI arguments for creating `name` into `output_dir`.
pub fn cli_args(name: &str, preset: Option<&str>, output_dir: &Path) -> Args {
    Args {
        name: name.to_string(),
        preset: preset.map(PathBuf::from),
        output_dir: Some(output_dir.to_path_buf()),
        force: true,
        verbose: 2,
        extract_config_files: false,
        no_sort: false,
        merge_conflicts: MergeConflicts::Overwrite,
        dry_run: false,
    }
}

/// Runs the CLI and compares the created project with `expected_dir`.
pub fn run_and_assert(name: &str, preset: Option<&str>, expected_dir: &str) {
    let tmp_dir = tempfile::tempdir().unwrap();
    run(cli_args(name, preset, tmp_dir.path())).unwrap();
    assert_dirs_equal(tmp_dir.path(), Path::new(expected_dir));
}
