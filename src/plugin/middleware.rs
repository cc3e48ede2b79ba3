use log::debug;
use std::borrow::Cow;
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::error::Result;
use crate::ext::PathExt;
use crate::ioutils::{FileContent, FileMap};
use crate::renderer::TemplateRenderer;

/// Leading character that stands for a dot in template file names.
const DOT_MARKER: char = '_';

/// Callback that produces files directly instead of from a template directory.
pub type FileCallback = Box<dyn Fn(&mut FileMap, &serde_json::Value) -> Result<()>>;

/// A template file compiled into the binary, keyed by its path below the template root.
pub type EmbeddedFile = (String, Cow<'static, [u8]>);

/// Deferred file-producing work queued by a plugin.
///
/// Middlewares run after every plugin has been applied, strictly in the
/// order they were queued, so a later middleware overwrites the files of an
/// earlier one on path collisions.
pub enum FileMiddleware {
    /// Render every file under `source` with `data`.
    Directory { plugin_id: String, source: PathBuf, data: serde_json::Value },
    /// Render template files that were compiled into the binary.
    Embedded { plugin_id: String, files: Vec<EmbeddedFile>, data: serde_json::Value },
    /// Hand the file map to a plugin callback.
    Callback { plugin_id: String, data: serde_json::Value, callback: FileCallback },
}

impl FileMiddleware {
    pub fn plugin_id(&self) -> &str {
        match self {
            FileMiddleware::Directory { plugin_id, .. } => plugin_id,
            FileMiddleware::Embedded { plugin_id, .. } => plugin_id,
            FileMiddleware::Callback { plugin_id, .. } => plugin_id,
        }
    }

    pub fn run(&self, renderer: &dyn TemplateRenderer, files: &mut FileMap) -> Result<()> {
        match self {
            FileMiddleware::Directory { source, data, .. } => {
                debug!("Rendering templates from '{}'", source.display());
                render_directory(renderer, source, data, files)
            }
            FileMiddleware::Embedded { files: sources, data, .. } => {
                for (raw_path, bytes) in sources {
                    render_file(renderer, raw_path, bytes.to_vec(), data, files)?;
                }
                Ok(())
            }
            FileMiddleware::Callback { data, callback, .. } => callback(files, data),
        }
    }
}

fn render_directory(
    renderer: &dyn TemplateRenderer,
    source: &PathBuf,
    data: &serde_json::Value,
    files: &mut FileMap,
) -> Result<()> {
    for dir_entry in WalkDir::new(source).sort_by_file_name() {
        let dir_entry = dir_entry?;
        if !dir_entry.file_type().is_file() {
            continue;
        }

        let raw_path = dir_entry
            .path()
            .strip_prefix(source)
            .unwrap_or(dir_entry.path())
            .to_slash_string()?;

        let bytes = std::fs::read(dir_entry.path())?;
        render_file(renderer, &raw_path, bytes, data, files)?;
    }
    Ok(())
}

/// Renders one template and stores it under its output path.
///
/// Text that renders to whitespace only is dropped.
fn render_file(
    renderer: &dyn TemplateRenderer,
    raw_path: &str,
    bytes: Vec<u8>,
    data: &serde_json::Value,
    files: &mut FileMap,
) -> Result<()> {
    let target_path = transform_path(raw_path);
    let content = renderer.render_bytes(bytes, data, raw_path)?;

    let keep = match &content {
        FileContent::Text(text) => text.chars().any(|c| !c.is_whitespace()),
        FileContent::Binary(_) => true,
    };
    if keep {
        debug!("'{raw_path}' -> '{target_path}'");
        files.insert(target_path, content);
    } else {
        debug!("Skipping '{raw_path}', it rendered to whitespace only");
    }
    Ok(())
}

/// Maps a template path to its output path, segment by segment.
///
/// `_gitignore` becomes `.gitignore`, `__keep` becomes `_keep`; any other
/// segment is left alone.
pub fn transform_path(raw_path: &str) -> String {
    raw_path.split('/').map(transform_segment).collect::<Vec<_>>().join("/")
}

fn transform_segment(segment: &str) -> String {
    let mut chars = segment.chars();
    match (chars.next(), chars.next()) {
        (Some(DOT_MARKER), Some(DOT_MARKER)) => segment[DOT_MARKER.len_utf8()..].to_string(),
        (Some(DOT_MARKER), Some(_)) => format!(".{}", &segment[DOT_MARKER.len_utf8()..]),
        _ => segment.to_string(),
    }
}
