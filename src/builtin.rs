//! Plugins shipped with the binary.
//!
//! Their templates live under `templates/` in the crate root and are compiled
//! into the binary.

use log::Level;
use rust_embed::RustEmbed;
use serde_json::json;
use std::path::PathBuf;

use crate::constants::ROOT_PLUGIN_ID;
use crate::error::Result;
use crate::ioutils::FileContent;
use crate::manifest::ExtendOptions;
use crate::plugin::{EmbeddedFile, GeneratorApi, PluginRegistry};

pub const BABEL_PLUGIN_ID: &str = "@vue/cli-plugin-babel";
pub const ESLINT_PLUGIN_ID: &str = "@vue/cli-plugin-eslint";
pub const ROUTER_PLUGIN_ID: &str = "@vue/cli-plugin-router";

const MAIN_ENTRY: &str = "src/main.js";

#[derive(RustEmbed)]
#[folder = "templates/"]
struct BuiltinTemplates;

/// Template files of the built-in plugin `name`, relative to its template root.
pub fn embedded_templates(name: &str) -> Vec<EmbeddedFile> {
    let prefix = format!("{name}/template/");
    let mut files: Vec<EmbeddedFile> = BuiltinTemplates::iter()
        .filter_map(|path| {
            let relative = path.strip_prefix(prefix.as_str())?.to_string();
            BuiltinTemplates::get(&path).map(|file| (relative, file.data))
        })
        .collect();
    files.sort_by(|a, b| a.0.cmp(&b.0));
    files
}

/// A registry with every built-in plugin.
///
/// Built-in plugins render embedded templates, so they have no base directory.
pub fn builtin_registry() -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    registry
        .register_fn(ROOT_PLUGIN_ID, PathBuf::new(), service_generator)
        .register_fn(BABEL_PLUGIN_ID, PathBuf::new(), babel_generator)
        .register_fn(ESLINT_PLUGIN_ID, PathBuf::new(), eslint_generator)
        .register_fn(ROUTER_PLUGIN_ID, PathBuf::new(), router_generator);
    registry
}

fn service_generator(
    api: &mut GeneratorApi<'_>,
    _options: &serde_json::Value,
    _root_options: &serde_json::Value,
) -> Result<()> {
    let has_router = api.has_plugin("router");
    api.render_embedded(embedded_templates("cli-service"), json!({"hasRouter": has_router}));

    api.extend_package(
        json!({
            "dependencies": {"vue": "^2.6.14"},
            "devDependencies": {"vue-template-compiler": "^2.6.14"},
            "scripts": {
                "serve": "vue-cli-service serve",
                "build": "vue-cli-service build"
            },
            "browserslist": ["> 1%", "last 2 versions", "not dead"]
        }),
        ExtendOptions::default(),
    )?;

    if api.has_plugin("babel") {
        api.extend_package(json!({"vue": {"transpileDependencies": true}}), ExtendOptions::default())?;
    }
    Ok(())
}

fn babel_generator(
    api: &mut GeneratorApi<'_>,
    _options: &serde_json::Value,
    _root_options: &serde_json::Value,
) -> Result<()> {
    api.extend_package(
        json!({
            "babel": {"presets": ["@vue/cli-plugin-babel/preset"]},
            "dependencies": {"core-js": "^3.8.3"}
        }),
        ExtendOptions::default(),
    )
}

fn eslint_extends(config: &str) -> Vec<&'static str> {
    let mut extends = vec!["plugin:vue/essential", "eslint:recommended"];
    match config {
        "airbnb" => extends.push("@vue/airbnb"),
        "standard" => extends.push("@vue/standard"),
        "prettier" => extends.push("plugin:prettier/recommended"),
        _ => {}
    }
    extends
}

fn eslint_generator(
    api: &mut GeneratorApi<'_>,
    options: &serde_json::Value,
    _root_options: &serde_json::Value,
) -> Result<()> {
    let config = options["config"].as_str().unwrap_or("base");
    let mut eslint_config = json!({
        "root": true,
        "env": {"node": true},
        "extends": eslint_extends(config),
        "rules": {}
    });
    let mut dev_dependencies = json!({
        "eslint": "^7.32.0",
        "eslint-plugin-vue": "^8.0.3"
    });
    if api.has_plugin("babel") {
        eslint_config["parserOptions"] = json!({"parser": "@babel/eslint-parser"});
        dev_dependencies["@babel/eslint-parser"] = json!("^7.12.16");
    }

    api.extend_package(
        json!({
            "scripts": {"lint": "vue-cli-service lint"},
            "eslintConfig": eslint_config,
            "devDependencies": dev_dependencies
        }),
        ExtendOptions::default(),
    )?;

    let lint_on_commit = options["lintOn"]
        .as_array()
        .is_some_and(|lint_on| lint_on.iter().any(|on| on == "commit"));
    if lint_on_commit {
        api.extend_package(
            json!({
                "gitHooks": {"pre-commit": "lint-staged"},
                "lint-staged": {"*.{js,jsx,vue}": "vue-cli-service lint"},
                "devDependencies": {"lint-staged": "^11.1.2"}
            }),
            ExtendOptions::default(),
        )?;
    }

    api.render_embedded(embedded_templates("eslint"), json!({"config": config}));
    Ok(())
}

fn router_generator(
    api: &mut GeneratorApi<'_>,
    options: &serde_json::Value,
    _root_options: &serde_json::Value,
) -> Result<()> {
    let history_mode = options["historyMode"].as_bool().unwrap_or(false);
    api.render_embedded(embedded_templates("router"), json!({"historyMode": history_mode}));
    api.extend_package(json!({"dependencies": {"vue-router": "^3.5.1"}}), ExtendOptions::default())?;

    api.post_process_files(|files| {
        if let Some(FileContent::Text(main)) = files.get_mut(MAIN_ENTRY) {
            if !main.contains("import router from './router'") {
                *main = inject_router(main);
            }
        }
        Ok(())
    });

    if history_mode {
        api.exit_log(
            "History mode requires the server to fall back to index.html",
            Level::Warn,
        );
    }
    Ok(())
}

/// Imports the router in the app entry and hands it to the root instance.
fn inject_router(main: &str) -> String {
    let mut out = String::with_capacity(main.len() + 48);
    for line in main.split_inclusive('\n') {
        out.push_str(line);
        if line.starts_with("import App from") {
            out.push_str("import router from './router'\n");
        } else if line.trim_end() == "new Vue({" {
            out.push_str("  router,\n");
        }
    }
    out
}
