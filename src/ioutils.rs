use indexmap::IndexMap;
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Content of one generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Binary(Vec<u8>),
}

impl FileContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FileContent::Text(text) => text.as_bytes(),
            FileContent::Binary(bytes) => bytes,
        }
    }
}

impl From<String> for FileContent {
    fn from(text: String) -> Self {
        FileContent::Text(text)
    }
}

impl From<&str> for FileContent {
    fn from(text: &str) -> Self {
        FileContent::Text(text.to_string())
    }
}

/// Output-relative path (always `/` separated) to file content.
pub type FileMap = IndexMap<String, FileContent>;

/// Appends a newline unless `content` already ends with one.
pub fn ensure_eol(mut content: String) -> String {
    if !content.ends_with('\n') {
        content.push('\n');
    }
    content
}

/// Ensures the output directory exists and is safe to write to.
pub fn get_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() && !force {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(output_dir.to_path_buf())
}

/// Persists a complete file map. Called exactly once per generation run.
pub trait FileTreeWriter {
    fn write(&self, target_dir: &Path, files: &FileMap) -> Result<()>;
}

impl<W: FileTreeWriter + ?Sized> FileTreeWriter for Box<W> {
    fn write(&self, target_dir: &Path, files: &FileMap) -> Result<()> {
        (**self).write(target_dir, files)
    }
}

/// Writes the file map to disk, creating directories and overwriting existing files.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsWriter;

impl FileTreeWriter for FsWriter {
    fn write(&self, target_dir: &Path, files: &FileMap) -> Result<()> {
        for (name, content) in files {
            let dest_path = target_dir.join(name);
            if let Some(parent) = dest_path.parent() {
                std::fs::create_dir_all(parent).map_err(|source| Error::FileWriteError {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            debug!("Writing '{}'", dest_path.display());
            std::fs::write(&dest_path, content.as_bytes())
                .map_err(|source| Error::FileWriteError { path: dest_path, source })?;
        }
        Ok(())
    }
}

/// Logs what would be written without touching the filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunWriter;

impl FileTreeWriter for DryRunWriter {
    fn write(&self, target_dir: &Path, files: &FileMap) -> Result<()> {
        for (name, content) in files {
            info!(
                "[DRY RUN] Writing '{}' ({} bytes)",
                target_dir.join(name).display(),
                content.as_bytes().len()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn ensure_eol_adds_single_newline() {
        assert_eq!(ensure_eol("a".to_string()), "a\n");
        assert_eq!(ensure_eol("a\n".to_string()), "a\n");
    }

    #[test]
    fn fs_writer_creates_directories_and_writes_bytes() {
        let tmp = TempDir::new().unwrap();
        let mut files = FileMap::new();
        files.insert("src/main.js".into(), "console.log(1)\n".into());
        files.insert("public/favicon.ico".into(), FileContent::Binary(vec![0, 159, 146, 150]));

        FsWriter.write(tmp.path(), &files).unwrap();

        let main = std::fs::read_to_string(tmp.path().join("src/main.js")).unwrap();
        assert_eq!(main, "console.log(1)\n");
        let icon = std::fs::read(tmp.path().join("public/favicon.ico")).unwrap();
        assert_eq!(icon, vec![0, 159, 146, 150]);
    }

    #[test]
    fn fs_writer_overwrites_existing_files() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(".env"), "OLD=1").unwrap();
        let mut files = FileMap::new();
        files.insert(".env".into(), "NEW=1".into());

        FsWriter.write(tmp.path(), &files).unwrap();

        assert_eq!(std::fs::read_to_string(tmp.path().join(".env")).unwrap(), "NEW=1");
    }

    #[test]
    fn dry_run_writer_leaves_disk_untouched() {
        let tmp = TempDir::new().unwrap();
        let mut files = FileMap::new();
        files.insert("a.txt".into(), "a".into());

        DryRunWriter.write(tmp.path(), &files).unwrap();

        assert!(!tmp.path().join("a.txt").exists());
    }

    #[test]
    fn get_output_dir_refuses_existing_without_force() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            get_output_dir(tmp.path(), false),
            Err(Error::OutputDirectoryExistsError { .. })
        ));
        assert_eq!(get_output_dir(tmp.path(), true).unwrap(), tmp.path());
    }
}
