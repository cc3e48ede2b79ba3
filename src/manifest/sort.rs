use super::value::{ManifestMap, ManifestValue};
use crate::constants::manifest::{DEPENDENCY_KEYS, SCRIPTS_KEY, SCRIPTS_ORDER, TOP_LEVEL_ORDER};

/// Moves the keys named in `order` to the front, in that order. Other keys
/// follow in their current relative order.
pub fn sort_by_priority(map: &mut ManifestMap, order: &[&str]) {
    let rank = |key: &str| order.iter().position(|o| *o == key).unwrap_or(order.len());
    // IndexMap::sort_by is stable
    map.sort_by(|k1, _, k2, _| rank(k1).cmp(&rank(k2)));
}

/// Orders manifest keys the way people expect to read them. Values are never changed.
pub fn canonicalize(pkg: &mut ManifestMap) {
    for key in DEPENDENCY_KEYS {
        if let Some(ManifestValue::Object(deps)) = pkg.get_mut(*key) {
            deps.sort_keys();
        }
    }

    if let Some(ManifestValue::Object(scripts)) = pkg.get_mut(SCRIPTS_KEY) {
        sort_by_priority(scripts, SCRIPTS_ORDER);
    }

    sort_by_priority(pkg, TOP_LEVEL_ORDER);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{manifest_from_json, to_manifest_json};
    use serde_json::json;

    fn keys(map: &ManifestMap) -> Vec<&str> {
        map.keys().map(String::as_str).collect()
    }

    fn sample() -> ManifestMap {
        manifest_from_json(json!({
            "browserslist": ["> 1%"],
            "devDependencies": {"sass": "^1.32.7", "@vue/cli-service": "~5.0.0", "eslint": "^7.32.0"},
            "custom": true,
            "scripts": {"lint": "vue-cli-service lint", "prepare": "husky install", "build": "vue-cli-service build", "serve": "vue-cli-service serve"},
            "private": true,
            "dependencies": {"vue": "^2.6.14", "core-js": "^3.8.3"},
            "name": "demo",
            "another": 1,
            "version": "0.1.0"
        }))
    }

    #[test]
    fn orders_top_level_keys() {
        let mut pkg = sample();
        canonicalize(&mut pkg);
        assert_eq!(
            keys(&pkg),
            vec![
                "name",
                "version",
                "private",
                "scripts",
                "dependencies",
                "devDependencies",
                "browserslist",
                "custom",
                "another"
            ]
        );
    }

    #[test]
    fn orders_scripts_by_priority_then_stable() {
        let mut pkg = sample();
        canonicalize(&mut pkg);
        let scripts = pkg["scripts"].as_object().unwrap();
        assert_eq!(keys(scripts), vec!["serve", "build", "lint", "prepare"]);
    }

    #[test]
    fn sorts_dependencies_alphabetically() {
        let mut pkg = sample();
        canonicalize(&mut pkg);
        assert_eq!(keys(pkg["dependencies"].as_object().unwrap()), vec!["core-js", "vue"]);
        assert_eq!(
            keys(pkg["devDependencies"].as_object().unwrap()),
            vec!["@vue/cli-service", "eslint", "sass"]
        );
    }

    #[test]
    fn does_not_change_values() {
        let original = sample();
        let mut pkg = original.clone();
        canonicalize(&mut pkg);
        for (key, value) in &original {
            assert_eq!(&pkg[key.as_str()], value);
        }
        assert_eq!(pkg.len(), original.len());
    }

    #[test]
    fn is_idempotent() {
        let mut once = sample();
        canonicalize(&mut once);
        let mut twice = once.clone();
        canonicalize(&mut twice);
        assert_eq!(to_manifest_json(&once).unwrap(), to_manifest_json(&twice).unwrap());
    }

    #[test]
    fn missing_maps_are_not_created() {
        let mut pkg = manifest_from_json(json!({"name": "demo"}));
        canonicalize(&mut pkg);
        assert_eq!(keys(&pkg), vec!["name"]);
    }
}
