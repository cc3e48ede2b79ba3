//! Preset loading.
//!
//! A preset names the plugins of a new project and how they are configured.
//! Plugins may also be declared inline with a template directory and a
//! manifest fragment; those run without any registered code.

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use serde_json::json;
use std::path::{Path, PathBuf};

use crate::constants::PRESET_FILENAMES;
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::manifest::{ExtendOptions, ManifestValue};
use crate::plugin::{GeneratorApi, PluginGenerator, PluginRegistry};

/// A parsed preset file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    /// Extract tool configuration into dedicated files instead of the manifest.
    #[serde(default)]
    pub use_config_files: bool,
    #[serde(default)]
    pub plugins: IndexMap<String, PluginPreset>,
    /// Directory relative `templates` entries are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// One plugin entry of a preset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginPreset {
    /// Version written to `devDependencies`; `latest` when unset.
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub options: serde_json::Value,
    /// Template directory rendered by the declarative entry point.
    #[serde(default)]
    pub templates: Option<PathBuf>,
    /// Manifest fragment merged by the declarative entry point.
    #[serde(default)]
    pub package: Option<ManifestValue>,
    #[serde(default)]
    pub link: Option<String>,
}

impl PluginPreset {
    fn is_declarative(&self) -> bool {
        self.templates.is_some() || self.package.is_some()
    }
}

impl Preset {
    /// The preset used when none is given: babel and eslint with the base config.
    pub fn builtin_default() -> Self {
        let plugins = [
            ("@vue/cli-plugin-babel", json!({})),
            ("@vue/cli-plugin-eslint", json!({"config": "base", "lintOn": ["save"]})),
        ]
        .into_iter()
        .map(|(id, options)| (id.to_string(), PluginPreset { options, ..Default::default() }))
        .collect();

        Self { use_config_files: false, plugins, base_dir: PathBuf::from(".") }
    }

    /// Loads a preset from a file, or from the first known preset file inside a directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let preset_file = if path.is_dir() {
            PRESET_FILENAMES
                .iter()
                .map(|file_name| path.join(file_name))
                .find(|candidate| candidate.exists())
                .ok_or_else(|| not_found(path))?
        } else if path.exists() {
            path.to_path_buf()
        } else {
            return Err(not_found(path));
        };

        debug!("Loading preset from '{}'", preset_file.display());
        let content = std::fs::read_to_string(&preset_file)?;
        let parse_error = |e: String| Error::PresetParseError {
            path: preset_file.display().to_string(),
            e,
        };
        let mut preset: Preset = match preset_file.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?
            }
            _ => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        };

        preset.base_dir = preset_file.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(preset)
    }

    /// Registers a declarative entry point for every plugin that declares
    /// `templates` or `package`. Other plugins keep whatever is registered.
    pub fn register_declarative(&self, registry: &mut PluginRegistry) {
        for (id, plugin) in &self.plugins {
            if !plugin.is_declarative() {
                continue;
            }
            debug!("Registering declarative plugin '{id}'");
            registry.register(
                id.clone(),
                self.base_dir.clone(),
                DeclarativePlugin {
                    templates: plugin.templates.clone(),
                    package: plugin.package.clone(),
                },
            );
            if let Some(link) = &plugin.link {
                registry.set_link(id, link.clone());
            }
        }
    }
}

fn not_found(path: &Path) -> Error {
    Error::PresetNotFound {
        preset_dir: path
            .to_str_checked()
            .map(str::to_string)
            .unwrap_or_else(|_| path.display().to_string()),
        preset_files: PRESET_FILENAMES.join(", "),
    }
}

/// Entry point for plugins described entirely by their preset entry.
pub struct DeclarativePlugin {
    templates: Option<PathBuf>,
    package: Option<ManifestValue>,
}

impl PluginGenerator for DeclarativePlugin {
    fn apply(
        &self,
        api: &mut GeneratorApi<'_>,
        _options: &serde_json::Value,
        _root_options: &serde_json::Value,
    ) -> Result<()> {
        if let Some(package) = &self.package {
            api.extend_package(package.clone(), ExtendOptions::default())?;
        }
        if let Some(templates) = &self.templates {
            api.render(templates, serde_json::Value::Null);
        }
        Ok(())
    }
}
