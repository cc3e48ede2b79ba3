use log::warn;

use super::value::{ManifestMap, ManifestValue};
use crate::error::{Error, Result};

/// What happens when a fragment overwrites a leaf that already holds a different value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeConflictPolicy {
    /// Last writer wins silently.
    #[default]
    Overwrite,
    /// Last writer wins and the collision is logged.
    Warn,
    /// The collision aborts generation.
    Error,
}

/// Options accepted by `GeneratorApi::extend_package`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendOptions {
    /// Deep merge object values. When false every incoming key replaces the existing value.
    pub merge: bool,
    /// Remove keys whose value ends up `null` after the merge.
    pub prune: bool,
}

impl Default for ExtendOptions {
    fn default() -> Self {
        Self { merge: true, prune: false }
    }
}

/// Applies a manifest fragment to the draft.
///
/// Objects on both sides merge recursively with incoming leaves winning;
/// anything else, arrays included, replaces the existing value.
pub fn extend_manifest(
    pkg: &mut ManifestMap,
    fields: ManifestMap,
    options: ExtendOptions,
    policy: MergeConflictPolicy,
) -> Result<()> {
    for (key, value) in fields {
        let touched = key.clone();
        match pkg.get_mut(&key) {
            Some(existing) if options.merge && existing.is_object() && value.is_object() => {
                if let (ManifestValue::Object(target), ManifestValue::Object(incoming)) =
                    (existing, value)
                {
                    deep_merge(target, incoming, &key, policy)?;
                }
            }
            Some(existing) => {
                if *existing != value {
                    report_conflict(&key, policy)?;
                }
                *existing = value;
            }
            None => {
                pkg.insert(key, value);
            }
        }

        if options.prune {
            prune_key(pkg, &touched);
        }
    }
    Ok(())
}

fn deep_merge(
    target: &mut ManifestMap,
    incoming: ManifestMap,
    prefix: &str,
    policy: MergeConflictPolicy,
) -> Result<()> {
    for (key, value) in incoming {
        let path = format!("{prefix}.{key}");
        match target.get_mut(&key) {
            Some(ManifestValue::Object(nested)) if value.is_object() => {
                if let ManifestValue::Object(incoming) = value {
                    deep_merge(nested, incoming, &path, policy)?;
                }
            }
            Some(existing) => {
                if *existing != value {
                    report_conflict(&path, policy)?;
                }
                *existing = value;
            }
            None => {
                target.insert(key, value);
            }
        }
    }
    Ok(())
}

fn report_conflict(path: &str, policy: MergeConflictPolicy) -> Result<()> {
    match policy {
        MergeConflictPolicy::Overwrite => Ok(()),
        MergeConflictPolicy::Warn => {
            warn!("Manifest value at '{path}' was overwritten by a later fragment");
            Ok(())
        }
        MergeConflictPolicy::Error => {
            Err(Error::ManifestMergeConflict { path: path.to_string() })
        }
    }
}

fn prune_key(pkg: &mut ManifestMap, key: &str) {
    match pkg.get_mut(key) {
        Some(ManifestValue::Null) => {
            pkg.shift_remove(key);
        }
        Some(ManifestValue::Object(nested)) => prune_nulls(nested),
        _ => {}
    }
}

fn prune_nulls(map: &mut ManifestMap) {
    map.retain(|_, value| !matches!(value, ManifestValue::Null));
    for value in map.values_mut() {
        if let ManifestValue::Object(nested) = value {
            prune_nulls(nested);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::value::manifest_from_json;
    use serde_json::json;

    fn extend(pkg: &mut ManifestMap, fields: serde_json::Value) {
        extend_manifest(
            pkg,
            manifest_from_json(fields),
            ExtendOptions::default(),
            MergeConflictPolicy::Overwrite,
        )
        .unwrap();
    }

    fn as_json(pkg: &ManifestMap) -> serde_json::Value {
        serde_json::to_value(pkg).unwrap()
    }

    #[test]
    fn last_fragment_wins_on_overlapping_leaf() {
        let mut pkg = ManifestMap::new();
        extend(&mut pkg, json!({"scripts": {"lint": "a"}}));
        extend(&mut pkg, json!({"scripts": {"lint": "b"}}));
        assert_eq!(as_json(&pkg), json!({"scripts": {"lint": "b"}}));
    }

    #[test]
    fn disjoint_leaves_merge_in_any_order() {
        let a = json!({"scripts": {"serve": "vue-cli-service serve"}, "dependencies": {"vue": "^2.6.14"}});
        let b = json!({"scripts": {"lint": "vue-cli-service lint"}, "devDependencies": {"eslint": "^7.32.0"}});

        let mut first = ManifestMap::new();
        extend(&mut first, a.clone());
        extend(&mut first, b.clone());
        let mut second = ManifestMap::new();
        extend(&mut second, b);
        extend(&mut second, a);

        assert_eq!(first["scripts"], second["scripts"]);
        assert_eq!(first["dependencies"], second["dependencies"]);
        assert_eq!(first["devDependencies"], second["devDependencies"]);
    }

    #[test]
    fn nested_objects_merge_instead_of_replace() {
        let mut pkg = manifest_from_json(json!({"eslintConfig": {"env": {"node": true}, "root": true}}));
        extend(&mut pkg, json!({"eslintConfig": {"env": {"browser": true}}}));
        assert_eq!(
            as_json(&pkg),
            json!({"eslintConfig": {"env": {"node": true, "browser": true}, "root": true}})
        );
    }

    #[test]
    fn arrays_replace_entirely() {
        let mut pkg = manifest_from_json(json!({"browserslist": ["> 1%", "last 2 versions"]}));
        extend(&mut pkg, json!({"browserslist": ["not dead"]}));
        assert_eq!(as_json(&pkg), json!({"browserslist": ["not dead"]}));
    }

    #[test]
    fn scalar_replaces_object() {
        let mut pkg = manifest_from_json(json!({"babel": {"presets": []}}));
        extend(&mut pkg, json!({"babel": "inline"}));
        assert_eq!(as_json(&pkg), json!({"babel": "inline"}));
    }

    #[test]
    fn merge_disabled_replaces_objects() {
        let mut pkg = manifest_from_json(json!({"scripts": {"serve": "a", "build": "b"}}));
        extend_manifest(
            &mut pkg,
            manifest_from_json(json!({"scripts": {"lint": "c"}})),
            ExtendOptions { merge: false, prune: false },
            MergeConflictPolicy::Overwrite,
        )
        .unwrap();
        assert_eq!(as_json(&pkg), json!({"scripts": {"lint": "c"}}));
    }

    #[test]
    fn prune_removes_null_values() {
        let mut pkg = manifest_from_json(json!({"dependencies": {"vue": "^2.6.14", "core-js": "^3.8.3"}, "main": "a.js"}));
        extend_manifest(
            &mut pkg,
            manifest_from_json(json!({"dependencies": {"core-js": null}, "main": null})),
            ExtendOptions { merge: true, prune: true },
            MergeConflictPolicy::Overwrite,
        )
        .unwrap();
        assert_eq!(as_json(&pkg), json!({"dependencies": {"vue": "^2.6.14"}}));
    }

    #[test]
    fn error_policy_reports_conflict_path() {
        let mut pkg = manifest_from_json(json!({"devDependencies": {"x": "1.0.0"}}));
        let result = extend_manifest(
            &mut pkg,
            manifest_from_json(json!({"devDependencies": {"x": "2.0.0"}})),
            ExtendOptions::default(),
            MergeConflictPolicy::Error,
        );
        match result {
            Err(Error::ManifestMergeConflict { path }) => assert_eq!(path, "devDependencies.x"),
            other => panic!("Expected ManifestMergeConflict, got {other:?}"),
        }
    }

    #[test_log::test]
    fn warn_policy_keeps_later_value() {
        let mut pkg = manifest_from_json(json!({"scripts": {"lint": "eslint ."}}));
        let result = extend_manifest(
            &mut pkg,
            manifest_from_json(json!({"scripts": {"lint": "vue-cli-service lint"}})),
            ExtendOptions::default(),
            MergeConflictPolicy::Warn,
        );
        assert!(result.is_ok());
        assert_eq!(as_json(&pkg), json!({"scripts": {"lint": "vue-cli-service lint"}}));
    }

    #[test]
    fn equal_values_are_not_conflicts() {
        let mut pkg = manifest_from_json(json!({"devDependencies": {"x": "1.0.0"}}));
        let result = extend_manifest(
            &mut pkg,
            manifest_from_json(json!({"devDependencies": {"x": "1.0.0"}})),
            ExtendOptions::default(),
            MergeConflictPolicy::Error,
        );
        assert!(result.is_ok());
    }
}
