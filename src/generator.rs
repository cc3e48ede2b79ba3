use indexmap::IndexMap;
use log::{debug, info, log, warn};
use std::path::{Path, PathBuf};

use crate::constants::{MANIFEST_FILENAME, ROOT_PLUGIN_ID};
use crate::error::{Error, Result};
use crate::ioutils::{ensure_eol, FileContent, FileMap, FileTreeWriter, FsWriter};
use crate::manifest::{canonicalize, to_manifest_json, ManifestMap, MergeConflictPolicy};
use crate::plugin::id::{plugin_link, to_short_plugin_id};
use crate::plugin::{GeneratorApi, GeneratorState, Plugin};
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};
use crate::transform::{default_config_transforms, ConfigTransform, ExtractedConfig};

/// Switches for a single `Generator::generate` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Move recognized manifest entries (`babel`, `vue`, ...) into their own config files.
    pub extract_config_files: bool,
    /// Canonicalize manifest key order before writing.
    pub sort_manifest: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self { extract_config_files: false, sort_manifest: true }
    }
}

/// Runs plugins and turns their contributions into one file tree.
///
/// The generator exclusively owns the manifest draft and the file map.
/// Plugins only reach them through the `GeneratorApi` handed to their entry
/// point, one plugin at a time.
pub struct Generator {
    context: PathBuf,
    plugins: Vec<Plugin>,
    root_options: serde_json::Value,
    plugins_data: serde_json::Value,
    state: GeneratorState,
    files: FileMap,
    config_transforms: IndexMap<String, ConfigTransform>,
    conflict_policy: MergeConflictPolicy,
    renderer: Box<dyn TemplateRenderer>,
    writer: Box<dyn FileTreeWriter>,
}

impl Generator {
    /// Creates a generator writing into `context`.
    ///
    /// The first plugin must be the root plugin; its options become the root
    /// options shared with every other plugin.
    pub fn new(context: impl Into<PathBuf>, pkg: ManifestMap, plugins: Vec<Plugin>) -> Result<Self> {
        let root_options = match plugins.first() {
            Some(root) if root.id == ROOT_PLUGIN_ID => root.options.clone(),
            first => {
                return Err(Error::RootPluginNotFirst {
                    expected: ROOT_PLUGIN_ID.to_string(),
                    found: first.map(|p| p.id.clone()).unwrap_or_else(|| "<none>".to_string()),
                })
            }
        };

        let plugins_data = serde_json::Value::Array(
            plugins
                .iter()
                .filter(|plugin| plugin.id != ROOT_PLUGIN_ID)
                .map(|plugin| {
                    serde_json::json!({
                        "name": to_short_plugin_id(&plugin.id),
                        "link": plugin_link(&plugin.id, plugin.link.as_deref()),
                    })
                })
                .collect(),
        );

        Ok(Self {
            context: context.into(),
            plugins,
            root_options,
            plugins_data,
            state: GeneratorState::new(pkg),
            files: FileMap::new(),
            config_transforms: default_config_transforms(),
            conflict_policy: MergeConflictPolicy::default(),
            renderer: Box::new(MiniJinjaRenderer::new()?),
            writer: Box::new(FsWriter),
        })
    }

    /// Seeds the file map, e.g. with files that already exist in the project.
    pub fn with_files(mut self, files: FileMap) -> Self {
        self.files = files;
        self
    }

    pub fn with_writer(mut self, writer: impl FileTreeWriter + 'static) -> Self {
        self.writer = Box::new(writer);
        self
    }

    pub fn with_renderer(mut self, renderer: impl TemplateRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Adds or replaces the transform used to extract manifest key `key`.
    pub fn with_config_transform(mut self, key: impl Into<String>, transform: ConfigTransform) -> Self {
        self.config_transforms.insert(key.into(), transform);
        self
    }

    pub fn with_conflict_policy(mut self, policy: MergeConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    pub fn context(&self) -> &Path {
        &self.context
    }

    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    pub fn root_options(&self) -> &serde_json::Value {
        &self.root_options
    }

    pub fn pkg(&self) -> &ManifestMap {
        &self.state.pkg
    }

    pub fn files(&self) -> &FileMap {
        &self.files
    }

    /// Runs every plugin and writes the resulting file tree.
    ///
    /// Nothing reaches the writer unless every step before it succeeded.
    pub fn generate(&mut self, options: GenerateOptions) -> Result<()> {
        self.init_plugins()?;

        if options.extract_config_files {
            self.extract_config_files()?;
        }

        self.resolve_files()?;

        if options.sort_manifest {
            canonicalize(&mut self.state.pkg);
        }

        if self.state.pkg.values().any(|value| value.contains_expression()) {
            warn!("{MANIFEST_FILENAME} contains source expressions; they are written as strings");
        }
        let manifest = to_manifest_json(&self.state.pkg)?;
        self.files.insert(MANIFEST_FILENAME.to_string(), FileContent::Text(manifest));

        info!("Writing {} files to '{}'", self.files.len(), self.context.display());
        self.writer.write(&self.context, &self.files)?;

        for exit_log in self.state.exit_logs.drain(..) {
            log!(exit_log.level, "{}: {}", to_short_plugin_id(&exit_log.plugin_id), exit_log.message);
        }
        Ok(())
    }

    fn init_plugins(&mut self) -> Result<()> {
        for plugin in &self.plugins {
            debug!("Applying plugin '{}'", plugin.id);
            let mut api = GeneratorApi::new(
                plugin,
                &self.plugins,
                &self.root_options,
                &self.plugins_data,
                &mut self.state,
                self.conflict_policy,
            );
            plugin.apply(&mut api, &self.root_options)?;
        }
        Ok(())
    }

    /// Moves recognized manifest entries into dedicated config files.
    ///
    /// Extracted keys are removed from the manifest so each setting lives in
    /// exactly one place.
    fn extract_config_files(&mut self) -> Result<()> {
        let mut extracted = Vec::new();
        for (key, transform) in &self.config_transforms {
            let Some(value) = self.state.pkg.get(key) else {
                continue;
            };
            let ExtractedConfig { filename, content } = transform.transform(key, value)?;
            debug!("Extracted manifest key '{key}' into '{filename}'");
            self.files.insert(filename, FileContent::Text(ensure_eol(content)));
            extracted.push(key.clone());
        }
        for key in extracted {
            self.state.pkg.shift_remove(&key);
        }
        Ok(())
    }

    fn resolve_files(&mut self) -> Result<()> {
        let middlewares = std::mem::take(&mut self.state.middlewares);
        for middleware in &middlewares {
            debug!("Running file middleware of '{}'", middleware.plugin_id());
            middleware.run(self.renderer.as_ref(), &mut self.files)?;
        }

        let post_processors = std::mem::take(&mut self.state.post_processors);
        for post_process in &post_processors {
            post_process(&mut self.files)?;
        }
        Ok(())
    }
}
