use next_cli::cli::run;
use next_cli::error::Error;
use std::fs;
use test_log::test;
mod utils;
use utils::{cli_args, run_and_assert};

#[test]
fn test_default_preset() {
    run_and_assert("demo", None, "tests/expected/default_preset");
}

#[test]
fn test_existing_output_dir_requires_force() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let mut args = cli_args("demo", None, tmp_dir.path());
    args.force = false;

    let result = run(args);

    assert!(matches!(result, Err(Error::OutputDirectoryExistsError { .. })));
    assert!(!tmp_dir.path().join("package.json").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let output_dir = tmp_dir.path().join("demo");
    let mut args = cli_args("demo", None, &output_dir);
    args.dry_run = true;

    run(args).unwrap();

    assert!(!output_dir.exists());
}

#[test]
fn test_extract_config_files() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let mut args = cli_args("demo", None, tmp_dir.path());
    args.extract_config_files = true;

    run(args).unwrap();

    let vue_config = fs::read_to_string(tmp_dir.path().join("vue.config.js")).unwrap();
    assert_eq!(
        vue_config,
        "const { defineConfig } = require('@vue/cli-service')\nmodule.exports = defineConfig({\n  transpileDependencies: true\n})\n"
    );
    assert!(tmp_dir.path().join("babel.config.js").exists());
    let eslintrc = fs::read_to_string(tmp_dir.path().join(".eslintrc.js")).unwrap();
    assert!(eslintrc.starts_with("module.exports = {\n  root: true,\n"));
    let manifest = fs::read_to_string(tmp_dir.path().join("package.json")).unwrap();
    assert!(!manifest.contains("eslintConfig"));
    assert!(!manifest.contains("\"babel\""));
}

#[test]
fn test_router_preset() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let preset_file = tmp_dir.path().join("router.yaml");
    fs::write(
        &preset_file,
        "plugins:\n  \"@vue/cli-plugin-babel\": {}\n  \"@vue/cli-plugin-router\":\n    options:\n      historyMode: true\n",
    )
    .unwrap();
    let output_dir = tmp_dir.path().join("demo");

    run(cli_args("demo", preset_file.to_str(), &output_dir)).unwrap();

    let main = fs::read_to_string(output_dir.join("src/main.js")).unwrap();
    assert!(main.contains("import App from './App.vue'\nimport router from './router'\n"));
    assert!(main.contains("new Vue({\n  router,\n"));
    let router = fs::read_to_string(output_dir.join("src/router/index.js")).unwrap();
    assert!(router.contains("  mode: 'history',\n"));
    let app = fs::read_to_string(output_dir.join("src/App.vue")).unwrap();
    assert!(app.contains("<router-view/>"));
    assert!(!app.contains("HelloWorld"));
    let manifest = fs::read_to_string(output_dir.join("package.json")).unwrap();
    assert!(manifest.contains("\"vue-router\": \"^3.5.1\""));
}

#[test]
fn test_missing_preset() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let result = run(cli_args(
        "demo",
        Some("tests/presets/does-not-exist"),
        &tmp_dir.path().join("demo"),
    ));
    assert!(matches!(result, Err(Error::PresetNotFound { .. })));
}
