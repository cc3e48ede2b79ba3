use log::{warn, Level};
use serde_json::json;
use std::path::{Path, PathBuf};

use super::id::matches_plugin_id;
use super::middleware::{EmbeddedFile, FileCallback, FileMiddleware};
use super::Plugin;
use crate::error::Result;
use crate::ioutils::FileMap;
use crate::manifest::{extend_manifest, ExtendOptions, ManifestMap, ManifestValue, MergeConflictPolicy};

/// Callback run over the complete file map once every middleware has finished.
pub type PostProcessor = Box<dyn Fn(&mut FileMap) -> Result<()>>;

/// A message a plugin wants shown after the files are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitLog {
    pub plugin_id: String,
    pub message: String,
    pub level: Level,
}

/// Mutable state of one generation run that plugins may touch.
#[derive(Default)]
pub struct GeneratorState {
    pub pkg: ManifestMap,
    pub middlewares: Vec<FileMiddleware>,
    pub post_processors: Vec<PostProcessor>,
    pub exit_logs: Vec<ExitLog>,
}

impl GeneratorState {
    pub fn new(pkg: ManifestMap) -> Self {
        Self { pkg, ..Default::default() }
    }
}

/// The facade a plugin works through while its entry point runs.
///
/// File work is only queued here; it runs after every plugin has been applied.
pub struct GeneratorApi<'a> {
    plugin: &'a Plugin,
    plugins: &'a [Plugin],
    root_options: &'a serde_json::Value,
    plugins_data: &'a serde_json::Value,
    state: &'a mut GeneratorState,
    conflict_policy: MergeConflictPolicy,
}

impl<'a> GeneratorApi<'a> {
    pub fn new(
        plugin: &'a Plugin,
        plugins: &'a [Plugin],
        root_options: &'a serde_json::Value,
        plugins_data: &'a serde_json::Value,
        state: &'a mut GeneratorState,
        conflict_policy: MergeConflictPolicy,
    ) -> Self {
        Self { plugin, plugins, root_options, plugins_data, state, conflict_policy }
    }

    pub fn id(&self) -> &str {
        &self.plugin.id
    }

    pub fn options(&self) -> &serde_json::Value {
        &self.plugin.options
    }

    pub fn root_options(&self) -> &serde_json::Value {
        self.root_options
    }

    /// `[{name, link}]` for every non-root plugin.
    pub fn plugins_data(&self) -> &serde_json::Value {
        self.plugins_data
    }

    /// The manifest draft as merged so far.
    pub fn pkg(&self) -> &ManifestMap {
        &self.state.pkg
    }

    /// Resolves a path against the plugin's base directory.
    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.plugin.base_dir.join(path)
    }

    /// Queues rendering of every file under `source`.
    ///
    /// Relative sources are resolved against the plugin's base directory.
    /// `extra_data` entries are added to the template context and win over
    /// `options`, `rootOptions` and `plugins`.
    pub fn render<P: AsRef<Path>>(&mut self, source: P, extra_data: serde_json::Value) {
        let source = self.resolve(source);
        let data = self.resolve_data(extra_data);
        self.state.middlewares.push(FileMiddleware::Directory {
            plugin_id: self.plugin.id.clone(),
            source,
            data,
        });
    }

    /// Queues rendering of template files compiled into the binary.
    ///
    /// Paths are relative to the template root and follow the same naming
    /// rules as files rendered from a directory.
    pub fn render_embedded(&mut self, files: Vec<EmbeddedFile>, extra_data: serde_json::Value) {
        let data = self.resolve_data(extra_data);
        self.state.middlewares.push(FileMiddleware::Embedded {
            plugin_id: self.plugin.id.clone(),
            files,
            data,
        });
    }

    /// Queues a callback that edits the file map directly.
    pub fn render_fn<F>(&mut self, callback: F)
    where
        F: Fn(&mut FileMap, &serde_json::Value) -> Result<()> + 'static,
    {
        let callback: FileCallback = Box::new(callback);
        let data = self.resolve_data(serde_json::Value::Null);
        self.state.middlewares.push(FileMiddleware::Callback {
            plugin_id: self.plugin.id.clone(),
            data,
            callback,
        });
    }

    /// Registers a callback that runs after all files have been resolved.
    pub fn post_process_files<F>(&mut self, callback: F)
    where
        F: Fn(&mut FileMap) -> Result<()> + 'static,
    {
        self.state.post_processors.push(Box::new(callback));
    }

    /// Merges a manifest fragment into the draft.
    ///
    /// A fragment that is not an object is ignored.
    pub fn extend_package(
        &mut self,
        fields: impl Into<ManifestValue>,
        options: ExtendOptions,
    ) -> Result<()> {
        match fields.into() {
            ManifestValue::Object(fields) => {
                extend_manifest(&mut self.state.pkg, fields, options, self.conflict_policy)
            }
            other => {
                warn!(
                    "Plugin '{}' tried to extend the manifest with a non-object value: {other:?}",
                    self.plugin.id
                );
                Ok(())
            }
        }
    }

    /// Whether a plugin matching `id` (full id or short name) is part of this run.
    pub fn has_plugin(&self, id: &str) -> bool {
        self.plugins.iter().any(|plugin| matches_plugin_id(id, &plugin.id))
    }

    /// Queues a message printed once generation is complete.
    pub fn exit_log(&mut self, message: impl Into<String>, level: Level) {
        self.state.exit_logs.push(ExitLog {
            plugin_id: self.plugin.id.clone(),
            message: message.into(),
            level,
        });
    }

    fn resolve_data(&self, extra_data: serde_json::Value) -> serde_json::Value {
        let mut data = json!({
            "options": self.plugin.options,
            "rootOptions": self.root_options,
            "plugins": self.plugins_data,
        });
        if let (Some(data), serde_json::Value::Object(extra)) = (data.as_object_mut(), extra_data)
        {
            data.extend(extra);
        }
        data
    }
}
