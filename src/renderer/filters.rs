use log::warn;
use regex::Regex;

use crate::plugin::id::to_short_plugin_id;

pub use cruet::{
    case::{
        camel::to_camel_case, kebab::to_kebab_case, pascal::to_pascal_case,
        screaming_snake::to_screaming_snake_case, snake::to_snake_case,
        train::to_train_case,
    },
    string::{pluralize::to_plural, singularize::to_singular},
};

/// Tests if a string matches a given regular expression pattern.
///
/// An invalid pattern never matches and is reported as a warning.
pub fn regex_filter(val: &str, re: &str) -> bool {
    match Regex::new(re) {
        Ok(re) => re.is_match(val),
        Err(err) => {
            warn!("Invalid regex '{re}': {err}");
            false
        }
    }
}

/// `{{ id | short_id }}`: a plugin id without its `cli-plugin-` prefix.
pub fn short_id_filter(val: &str) -> String {
    to_short_plugin_id(val)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_filter_matches() {
        assert!(regex_filter("vue-router", r"^vue-"));
    }

    #[test]
    fn test_regex_filter_invalid_regex() {
        assert!(!regex_filter("anything", r"([unclosed"));
    }

    #[test]
    fn test_short_id_filter() {
        assert_eq!(short_id_filter("@vue/cli-plugin-babel"), "babel");
        assert_eq!(short_id_filter("my-tool"), "my-tool");
    }
}
