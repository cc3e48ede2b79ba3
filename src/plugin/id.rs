use regex::Regex;
use std::sync::LazyLock;

static PLUGIN_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(@vue/|vue-|@[\w-]+(\.)?[\w-]+/vue-)cli-plugin-")
        .expect("plugin prefix pattern is valid")
});

static SCOPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@[\w-]+(\.)?[\w-]+/").expect("scope pattern is valid"));

const OFFICIAL_SCOPE: &str = "@vue/";

/// `@vue/cli-plugin-babel` -> `babel`. Ids without a plugin prefix are returned unchanged.
pub fn to_short_plugin_id(id: &str) -> String {
    PLUGIN_PREFIX_RE.replace(id, "").into_owned()
}

/// Whether `input` refers to the plugin `full`.
///
/// `input` may be the full id, the short name, or the short name behind a
/// scope (`@vue/eslint`). Other prefixed forms do not match.
pub fn matches_plugin_id(input: &str, full: &str) -> bool {
    let short = to_short_plugin_id(full);
    full == input || short == input || short == SCOPE_RE.replace(input, "")
}

/// Documentation link for a plugin id.
pub fn plugin_link(id: &str, homepage: Option<&str>) -> String {
    if id.starts_with(OFFICIAL_SCOPE) {
        return format!(
            "https://github.com/vuejs/vue-cli/tree/dev/packages/%40vue/cli-plugin-{}",
            to_short_plugin_id(id)
        );
    }
    match homepage {
        Some(link) => link.to_string(),
        None => format!("https://www.npmjs.com/package/{}", id.replacen('/', "%2F", 1)),
    }
}
