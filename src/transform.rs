//! Turns manifest entries into dedicated configuration files.
//!
//! Each recognized manifest key (`babel`, `vue`, ...) owns one target file.
//! Values are written as JavaScript modules so that raw source expressions
//! stored in the manifest survive verbatim.

use indexmap::IndexMap;
use std::fmt::{Display, Write};

use crate::error::{Error, Result};
use crate::manifest::{ManifestMap, ManifestValue};

/// Config file that is wrapped in the service's `defineConfig` factory.
pub const ROOT_CONFIG_FILENAME: &str = "vue.config.js";

const INDENT: &str = "  ";

/// File format a config transform emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Js,
    Json,
    Yaml,
}

impl Display for ConfigFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConfigFormat::Js => "js",
            ConfigFormat::Json => "json",
            ConfigFormat::Yaml => "yaml",
        };
        write!(f, "{s}")
    }
}

/// The file produced from one manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedConfig {
    pub filename: String,
    pub content: String,
}

/// Target file declaration for one manifest key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigTransform {
    format: ConfigFormat,
    filename: String,
}

impl ConfigTransform {
    pub fn new(format: ConfigFormat, filename: impl Into<String>) -> Self {
        Self { format, filename: filename.into() }
    }

    pub fn js(filename: impl Into<String>) -> Self {
        Self::new(ConfigFormat::Js, filename)
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Produces the filename and module source for `value`.
    ///
    /// Only js modules can be produced; any other declared format is an error.
    pub fn transform(&self, key: &str, value: &ManifestValue) -> Result<ExtractedConfig> {
        if self.format != ConfigFormat::Js {
            return Err(Error::UnsupportedConfigFormat {
                key: key.to_string(),
                format: self.format.to_string(),
            });
        }

        let content = if self.filename == ROOT_CONFIG_FILENAME {
            format!(
                "const {{ defineConfig }} = require('@vue/cli-service')\nmodule.exports = defineConfig({})",
                stringify_js(value)
            )
        } else {
            format!("module.exports = {}", stringify_js(value))
        };

        Ok(ExtractedConfig { filename: self.filename.clone(), content })
    }
}

/// The built-in transforms, in extraction order.
pub fn default_config_transforms() -> IndexMap<String, ConfigTransform> {
    [
        ("vue", "vue.config.js"),
        ("babel", "babel.config.js"),
        ("postcss", "postcss.config.js"),
        ("eslintConfig", ".eslintrc.js"),
        ("jest", "jest.config.js"),
        ("lint-staged", "lint-staged.config.js"),
    ]
    .into_iter()
    .map(|(key, filename)| (key.to_string(), ConfigTransform::js(filename)))
    .collect()
}

/// Serializes a manifest value as a JavaScript literal with 2-space indentation.
/// `Expression` leaves are emitted as-is.
pub fn stringify_js(value: &ManifestValue) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &ManifestValue, depth: usize) {
    match value {
        ManifestValue::Null => out.push_str("null"),
        ManifestValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        ManifestValue::Number(n) => out.push_str(&n.to_string()),
        ManifestValue::String(s) => write_string(out, s),
        ManifestValue::Expression(source) => out.push_str(source),
        ManifestValue::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                push_indent(out, depth + 1);
                write_value(out, item, depth + 1);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push(']');
        }
        ManifestValue::Object(map) => write_object(out, map, depth),
    }
}

fn write_object(out: &mut String, map: &ManifestMap, depth: usize) {
    if map.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{\n");
    for (i, (key, value)) in map.iter().enumerate() {
        push_indent(out, depth + 1);
        if is_identifier(key) {
            out.push_str(key);
        } else {
            write_string(out, key);
        }
        out.push_str(": ");
        write_value(out, value, depth + 1);
        if i + 1 < map.len() {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, depth);
    out.push('}');
}

fn write_string(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('\'');
}

fn is_identifier(key: &str) -> bool {
    let is_start = |c: char| c.is_ascii_alphabetic() || c == '_' || c == '$';
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if is_start(first) => chars.all(|c| is_start(c) || c.is_ascii_digit()),
        _ => false,
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
