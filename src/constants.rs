//! Constants used throughout next-cli

/// Id of the root plugin. Its options are shared with every other plugin.
pub const ROOT_PLUGIN_ID: &str = "@vue/cli-service";

/// Manifest file written at the root of the generated project
pub const MANIFEST_FILENAME: &str = "package.json";

/// Preset file names in order of preference
pub const PRESET_FILENAMES: &[&str] = &["preset.json", "preset.yaml", "preset.yml"];

/// Version used for plugins whose preset entry does not pin one
pub const DEFAULT_PLUGIN_VERSION: &str = "latest";

/// Version of a freshly created project
pub const DEFAULT_PROJECT_VERSION: &str = "0.1.0";

/// Number of leading bytes inspected when sniffing binary content
pub const BINARY_SNIFF_LEN: usize = 8000;

/// Template delimiters
pub mod syntax {
    pub const BLOCK_START: &str = "<%";
    pub const BLOCK_END: &str = "%>";
    pub const VARIABLE_START: &str = "<%=";
    pub const VARIABLE_END: &str = "%>";
    pub const COMMENT_START: &str = "<%#";
    pub const COMMENT_END: &str = "%>";
}

/// Manifest canonicalization orders
pub mod manifest {
    /// Maps sorted alphabetically
    pub const DEPENDENCY_KEYS: &[&str] =
        &["dependencies", "devDependencies", "peerDependencies"];

    pub const SCRIPTS_KEY: &str = "scripts";

    pub const SCRIPTS_ORDER: &[&str] =
        &["serve", "build", "test:unit", "test:e2e", "lint", "deploy"];

    pub const TOP_LEVEL_ORDER: &[&str] = &[
        "name",
        "version",
        "private",
        "description",
        "author",
        "scripts",
        "main",
        "module",
        "browser",
        "jsDelivr",
        "unpkg",
        "files",
        "dependencies",
        "devDependencies",
        "peerDependencies",
        "vue",
        "babel",
        "eslintConfig",
        "prettier",
        "postcss",
        "browserslist",
        "jest",
    ];
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
