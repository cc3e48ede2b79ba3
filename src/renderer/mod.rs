//! Template rendering for plugin template files.
//!
//! - `interface`: the `TemplateRenderer` trait
//! - `minijinja`: the MiniJinja implementation with ERB-style delimiters
//! - `filters`: custom filters available inside templates
//! - `binary`: content sniffing that decides whether a file is rendered at all

pub mod binary;
pub mod filters;
pub mod interface;
pub mod minijinja;

pub use binary::is_binary;
pub use interface::TemplateRenderer;
pub use minijinja::MiniJinjaRenderer;
