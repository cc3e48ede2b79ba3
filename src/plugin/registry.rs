use indexmap::IndexMap;
use log::debug;
use std::path::PathBuf;
use std::rc::Rc;

use super::{GeneratorApi, Plugin, PluginGenerator};
use crate::constants::ROOT_PLUGIN_ID;
use crate::error::Result;

struct RegisteredPlugin {
    generator: Rc<dyn PluginGenerator>,
    base_dir: PathBuf,
    link: Option<String>,
}

/// Maps plugin ids to their generator entry points, resolved ahead of a run.
#[derive(Default)]
pub struct PluginRegistry {
    entries: IndexMap<String, RegisteredPlugin>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a generator whose relative template sources live under `base_dir`.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        base_dir: impl Into<PathBuf>,
        generator: impl PluginGenerator + 'static,
    ) -> &mut Self {
        self.entries.insert(
            id.into(),
            RegisteredPlugin {
                generator: Rc::new(generator),
                base_dir: base_dir.into(),
                link: None,
            },
        );
        self
    }

    /// Registers a closure entry point.
    pub fn register_fn<F>(
        &mut self,
        id: impl Into<String>,
        base_dir: impl Into<PathBuf>,
        generator: F,
    ) -> &mut Self
    where
        F: Fn(&mut GeneratorApi<'_>, &serde_json::Value, &serde_json::Value) -> Result<()>
            + 'static,
    {
        self.register(id, base_dir, generator)
    }

    /// Sets the documentation link of an already registered plugin.
    pub fn set_link(&mut self, id: &str, link: impl Into<String>) -> &mut Self {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.link = Some(link.into());
        }
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Builds the plugin for `id`. Ids without a registered generator get a
    /// no-op entry point.
    pub fn resolve(&self, id: &str, options: serde_json::Value) -> Plugin {
        match self.entries.get(id) {
            Some(entry) => {
                let mut plugin = Plugin::new(id, Rc::clone(&entry.generator), options)
                    .with_base_dir(entry.base_dir.clone());
                plugin.link = entry.link.clone();
                plugin
            }
            None => {
                debug!("No generator registered for plugin '{id}', it will contribute nothing");
                Plugin::noop(id, options)
            }
        }
    }

    /// Resolves every `(id, options)` pair, moving the root plugin to the front.
    pub fn resolve_all(
        &self,
        raw_plugins: impl IntoIterator<Item = (String, serde_json::Value)>,
    ) -> Vec<Plugin> {
        let mut plugins: Vec<Plugin> = raw_plugins
            .into_iter()
            .map(|(id, options)| self.resolve(&id, options))
            .collect();
        // stable: non-root plugins keep their declared order
        plugins.sort_by_key(|plugin| plugin.id != ROOT_PLUGIN_ID);
        plugins
    }
}
