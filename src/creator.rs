//! Creates a new project from a preset.
//!
//! The creator builds the initial manifest, resolves the preset's plugins
//! against a registry, runs the generator and finally writes a README
//! describing the generated scripts.

use log::info;
use serde_json::json;
use std::path::PathBuf;

use crate::constants::{DEFAULT_PLUGIN_VERSION, DEFAULT_PROJECT_VERSION, ROOT_PLUGIN_ID};
use crate::error::Result;
use crate::generator::{GenerateOptions, Generator};
use crate::ioutils::{DryRunWriter, FileContent, FileMap, FileTreeWriter, FsWriter};
use crate::manifest::{manifest_from_json, ManifestMap, MergeConflictPolicy};
use crate::plugin::PluginRegistry;
use crate::preset::Preset;

pub const README_FILENAME: &str = "README.md";

/// Options of a single `Creator::create` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateOptions {
    /// Extract config files even when the preset does not ask for it.
    pub extract_config_files: bool,
    pub sort_manifest: bool,
    pub conflict_policy: MergeConflictPolicy,
    /// Log the files instead of writing them.
    pub dry_run: bool,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            extract_config_files: false,
            sort_manifest: true,
            conflict_policy: MergeConflictPolicy::default(),
            dry_run: false,
        }
    }
}

pub struct Creator {
    name: String,
    context: PathBuf,
}

impl Creator {
    pub fn new(name: impl Into<String>, context: impl Into<PathBuf>) -> Self {
        Self { name: name.into(), context: context.into() }
    }

    /// Generates the project and returns the finished generator.
    pub fn create(
        &self,
        preset: &Preset,
        registry: &PluginRegistry,
        options: CreateOptions,
    ) -> Result<Generator> {
        info!("Creating project '{}' in '{}'", self.name, self.context.display());

        let raw_plugins = self.resolve_raw_plugins(preset);
        let pkg = self.initial_manifest(preset, &raw_plugins);
        let plugins = registry.resolve_all(raw_plugins);

        let mut generator = Generator::new(&self.context, pkg, plugins)?
            .with_conflict_policy(options.conflict_policy)
            .with_writer(self.writer(options.dry_run));

        info!("Generating project files");
        generator.generate(GenerateOptions {
            extract_config_files: preset.use_config_files || options.extract_config_files,
            sort_manifest: options.sort_manifest,
        })?;

        if !generator.files().contains_key(README_FILENAME) {
            info!("Generating {README_FILENAME}");
            let mut readme = FileMap::new();
            readme.insert(
                README_FILENAME.to_string(),
                FileContent::Text(generate_readme(generator.pkg())),
            );
            self.writer(options.dry_run).write(generator.context(), &readme)?;
        }

        info!("Successfully created project '{}'", self.name);
        info!("Get started with: cd {} && npm install && npm run serve", self.name);
        Ok(generator)
    }

    /// Preset plugins as `(id, options)` with the root plugin always present.
    ///
    /// The root plugin's options carry the project name and the config file
    /// choice so every plugin can read them as root options.
    fn resolve_raw_plugins(&self, preset: &Preset) -> Vec<(String, serde_json::Value)> {
        let mut raw_plugins: Vec<(String, serde_json::Value)> = preset
            .plugins
            .iter()
            .map(|(id, plugin)| (id.clone(), normalize_options(plugin.options.clone())))
            .collect();

        let root_options = json!({
            "projectName": self.name,
            "useConfigFiles": preset.use_config_files,
        });
        match raw_plugins.iter_mut().find(|(id, _)| id == ROOT_PLUGIN_ID) {
            Some((_, options)) => {
                if let (Some(options), serde_json::Value::Object(root)) =
                    (options.as_object_mut(), root_options)
                {
                    for (key, value) in root {
                        options.entry(key).or_insert(value);
                    }
                }
            }
            None => raw_plugins.push((ROOT_PLUGIN_ID.to_string(), root_options)),
        }
        raw_plugins
    }

    fn initial_manifest(
        &self,
        preset: &Preset,
        raw_plugins: &[(String, serde_json::Value)],
    ) -> ManifestMap {
        let dev_dependencies: serde_json::Map<String, serde_json::Value> = raw_plugins
            .iter()
            .map(|(id, _)| {
                let version = preset
                    .plugins
                    .get(id)
                    .and_then(|plugin| plugin.version.clone())
                    .unwrap_or_else(|| DEFAULT_PLUGIN_VERSION.to_string());
                (id.clone(), serde_json::Value::String(version))
            })
            .collect();

        manifest_from_json(json!({
            "name": self.name,
            "version": DEFAULT_PROJECT_VERSION,
            "private": true,
            "devDependencies": dev_dependencies,
        }))
    }

    fn writer(&self, dry_run: bool) -> Box<dyn FileTreeWriter> {
        if dry_run {
            Box::new(DryRunWriter)
        } else {
            Box::new(FsWriter)
        }
    }
}

fn normalize_options(options: serde_json::Value) -> serde_json::Value {
    match options {
        serde_json::Value::Null => json!({}),
        other => other,
    }
}

fn script_description(script: &str) -> Option<&'static str> {
    match script {
        "serve" => Some("Compiles and hot-reloads for development"),
        "build" => Some("Compiles and minifies for production"),
        "lint" => Some("Lints and fixes files"),
        "test:unit" => Some("Run your unit tests"),
        "test:e2e" => Some("Run your end-to-end tests"),
        _ => None,
    }
}

/// Renders the README of a generated project from its manifest.
///
/// Only well known scripts get a section.
pub fn generate_readme(pkg: &ManifestMap) -> String {
    let name = pkg.get("name").and_then(|name| name.as_str()).unwrap_or_default();
    let mut readme = format!("# {name}\n\n## Project setup\n```\nnpm install\n```\n");

    let scripts = pkg.get("scripts").and_then(|scripts| scripts.as_object());
    for script in scripts.into_iter().flat_map(|scripts| scripts.keys()) {
        if let Some(description) = script_description(script) {
            readme.push_str(&format!("\n### {description}\n```\nnpm run {script}\n```\n"));
        }
    }

    readme.push_str(
        "\n### Customize configuration\nSee [Configuration Reference](https://cli.vuejs.org/config/).\n",
    );
    readme
}
