//! Plugins: the unit of extension that contributes templates and manifest fragments.
//!
//! - `api`: the facade handed to a plugin while it runs
//! - `middleware`: deferred file-producing work queued through the facade
//! - `registry`: explicit id to generator mapping
//! - `id`: plugin id helpers (short names, links)

pub mod api;
pub mod id;
pub mod middleware;
pub mod registry;

pub use api::{ExitLog, GeneratorApi, GeneratorState, PostProcessor};
pub use middleware::{transform_path, EmbeddedFile, FileCallback, FileMiddleware};
pub use registry::PluginRegistry;

use crate::error::Result;
use std::path::PathBuf;
use std::rc::Rc;

/// The entry point of a plugin.
///
/// `apply` runs once per generation, in plugin order, and registers its work
/// through `api`. Closures with the same signature implement this trait.
pub trait PluginGenerator {
    fn apply(
        &self,
        api: &mut GeneratorApi<'_>,
        options: &serde_json::Value,
        root_options: &serde_json::Value,
    ) -> Result<()>;
}

impl<F> PluginGenerator for F
where
    F: Fn(&mut GeneratorApi<'_>, &serde_json::Value, &serde_json::Value) -> Result<()>,
{
    fn apply(
        &self,
        api: &mut GeneratorApi<'_>,
        options: &serde_json::Value,
        root_options: &serde_json::Value,
    ) -> Result<()> {
        self(api, options, root_options)
    }
}

/// Generator used for plugins that have no registered entry point.
pub struct NoopGenerator;

impl PluginGenerator for NoopGenerator {
    fn apply(
        &self,
        _api: &mut GeneratorApi<'_>,
        _options: &serde_json::Value,
        _root_options: &serde_json::Value,
    ) -> Result<()> {
        Ok(())
    }
}

/// A plugin resolved for one generation run.
#[derive(Clone)]
pub struct Plugin {
    pub id: String,
    pub options: serde_json::Value,
    /// Directory relative template sources are resolved against.
    pub base_dir: PathBuf,
    /// Documentation link shown to templates; derived from the id when unset.
    pub link: Option<String>,
    entry: Rc<dyn PluginGenerator>,
}

impl Plugin {
    pub fn new(
        id: impl Into<String>,
        entry: Rc<dyn PluginGenerator>,
        options: serde_json::Value,
    ) -> Self {
        Self { id: id.into(), options, base_dir: PathBuf::from("."), link: None, entry }
    }

    /// Builds a plugin from a closure entry point.
    pub fn from_fn<F>(id: impl Into<String>, options: serde_json::Value, entry: F) -> Self
    where
        F: Fn(&mut GeneratorApi<'_>, &serde_json::Value, &serde_json::Value) -> Result<()>
            + 'static,
    {
        Self::new(id, Rc::new(entry), options)
    }

    pub fn noop(id: impl Into<String>, options: serde_json::Value) -> Self {
        Self::new(id, Rc::new(NoopGenerator), options)
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn apply(
        &self,
        api: &mut GeneratorApi<'_>,
        root_options: &serde_json::Value,
    ) -> Result<()> {
        self.entry.apply(api, &self.options, root_options)
    }
}

impl std::fmt::Debug for Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugin")
            .field("id", &self.id)
            .field("options", &self.options)
            .field("base_dir", &self.base_dir)
            .field("link", &self.link)
            .finish_non_exhaustive()
    }
}
