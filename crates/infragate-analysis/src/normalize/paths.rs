//! Field paths, tried in the listed order. The first present path wins.
//!
//! A path is present when every key resolves through nested objects and the
//! final value is not `null`.

use serde_json::Value;

pub type FieldPath = &'static [&'static str];

/// Location of the failed-checks sequence in a security report.
pub const FAILED_CHECKS_PATH: FieldPath = &["results", "failed_checks"];

/// Severity field names on a failed check, highest priority first.
pub const SEVERITY_FIELDS: &[&str] = &["check_severity", "severity"];

/// Tool-reported monthly delta on a whole document.
pub const REPORTED_DELTA_PATHS: &[FieldPath] = &[
    &["diffTotalMonthlyCost"],
    &["summary", "diffTotalMonthlyCost"],
    &["totalMonthlyCostDiff"],
    &["summary", "totalMonthlyCostDiff"],
    &["monthlyCostChange"],
    &["summary", "monthlyCostChange"],
];

/// Monthly delta on a single entry of `projects`.
pub const PROJECT_DELTA_PATHS: &[FieldPath] = &[
    &["diffTotalMonthlyCost"],
    &["summary", "diffTotalMonthlyCost"],
    &["diff", "totalMonthlyCost"],
];

/// Absolute monthly total on a whole snapshot document.
pub const SNAPSHOT_TOTAL_PATHS: &[FieldPath] = &[
    &["totalMonthlyCost"],
    &["summary", "totalMonthlyCost"],
    &["breakdown", "totalMonthlyCost"],
];

/// Absolute monthly total on a single entry of `projects`.
pub const PROJECT_TOTAL_PATHS: &[FieldPath] = &[
    &["summary", "totalMonthlyCost"],
    &["breakdown", "totalMonthlyCost"],
    &["totalMonthlyCost"],
];

/// Baseline total carried by a diff document.
pub const PAST_TOTAL_PATHS: &[FieldPath] = &[
    &["pastTotalMonthlyCost"],
    &["summary", "pastTotalMonthlyCost"],
];

/// Proposed total carried by a diff document.
pub const DIFF_PROPOSED_TOTAL_PATHS: &[FieldPath] = &[
    &["totalMonthlyCost"],
    &["summary", "totalMonthlyCost"],
];

/// Walk object keys. Returns `None` when a level is missing or not an object.
pub fn lookup<'a>(tree: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(tree, |node, key| node.as_object()?.get(*key))
}

/// `lookup`, treating an explicit `null` as absent.
pub fn present<'a>(tree: &'a Value, path: &[&str]) -> Option<&'a Value> {
    lookup(tree, path).filter(|v| !v.is_null())
}

/// First present path from `paths`, with the path that matched.
pub fn first_present<'a>(tree: &'a Value, paths: &[FieldPath]) -> Option<(FieldPath, &'a Value)> {
    paths
        .iter()
        .find_map(|path| present(tree, path).map(|v| (*path, v)))
}

/// The `projects` sequence of a cost document. A document that is itself an
/// array is treated as the project list.
pub fn projects(tree: &Value) -> Option<&Vec<Value>> {
    match tree {
        Value::Array(items) => Some(items),
        _ => lookup(tree, &["projects"])?.as_array(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_walks_nested_objects() {
        let tree = json!({"results": {"failed_checks": [1, 2]}});
        assert_eq!(lookup(&tree, FAILED_CHECKS_PATH), Some(&json!([1, 2])));
    }

    #[test]
    fn lookup_stops_at_non_objects() {
        let tree = json!({"results": [{"failed_checks": []}]});
        assert_eq!(lookup(&tree, FAILED_CHECKS_PATH), None);
        assert_eq!(lookup(&json!("text"), &["a"]), None);
    }

    #[test]
    fn null_is_not_present() {
        let tree = json!({"diffTotalMonthlyCost": null, "summary": {"diffTotalMonthlyCost": "5"}});
        assert!(lookup(&tree, &["diffTotalMonthlyCost"]).is_some());
        let (path, value) = first_present(&tree, REPORTED_DELTA_PATHS).unwrap();
        assert_eq!(path, &["summary", "diffTotalMonthlyCost"]);
        assert_eq!(value, &json!("5"));
    }

    #[test]
    fn reported_delta_paths_in_priority_order() {
        let tree = json!({
            "monthlyCostChange": 3,
            "totalMonthlyCostDiff": 2,
            "summary": {"diffTotalMonthlyCost": 1}
        });
        let (path, _) = first_present(&tree, REPORTED_DELTA_PATHS).unwrap();
        assert_eq!(path, &["summary", "diffTotalMonthlyCost"]);

        let tree = json!({"monthlyCostChange": 3, "totalMonthlyCostDiff": 2});
        let (path, _) = first_present(&tree, REPORTED_DELTA_PATHS).unwrap();
        assert_eq!(path, &["totalMonthlyCostDiff"]);

        let tree = json!({"summary": {"monthlyCostChange": 4}});
        let (path, _) = first_present(&tree, REPORTED_DELTA_PATHS).unwrap();
        assert_eq!(path, &["summary", "monthlyCostChange"]);
    }

    #[test]
    fn project_total_paths_prefer_summary_then_breakdown_then_flat() {
        let p = json!({
            "totalMonthlyCost": 3,
            "breakdown": {"totalMonthlyCost": 2},
            "summary": {"totalMonthlyCost": 1}
        });
        assert_eq!(first_present(&p, PROJECT_TOTAL_PATHS).unwrap().1, &json!(1));

        let p = json!({"totalMonthlyCost": 3, "breakdown": {"totalMonthlyCost": 2}});
        assert_eq!(first_present(&p, PROJECT_TOTAL_PATHS).unwrap().1, &json!(2));

        let p = json!({"totalMonthlyCost": 3});
        assert_eq!(first_present(&p, PROJECT_TOTAL_PATHS).unwrap().1, &json!(3));
    }

    #[test]
    fn snapshot_total_paths_ignore_unrelated_nested_fields() {
        // A same-named field deep inside a resource is never picked up.
        let tree = json!({
            "projects": [{"breakdown": {"resources": [{"totalMonthlyCost": "999"}]}}]
        });
        assert!(first_present(&tree, SNAPSHOT_TOTAL_PATHS).is_none());
    }

    #[test]
    fn reported_delta_summary_diff_field() {
        let tree = json!({
            "summary": {"totalMonthlyCostDiff": 7, "monthlyCostChange": 8},
            "monthlyCostChange": 9
        });
        let (path, value) = first_present(&tree, REPORTED_DELTA_PATHS).unwrap();
        assert_eq!(path, &["summary", "totalMonthlyCostDiff"]);
        assert_eq!(value, &json!(7));

        let tree = json!({"totalMonthlyCostDiff": 6, "summary": {"totalMonthlyCostDiff": 7}});
        assert_eq!(first_present(&tree, REPORTED_DELTA_PATHS).unwrap().1, &json!(6));
    }

    #[test]
    fn snapshot_total_paths_in_priority_order() {
        let tree = json!({"breakdown": {"totalMonthlyCost": "12.50"}});
        let (path, value) = first_present(&tree, SNAPSHOT_TOTAL_PATHS).unwrap();
        assert_eq!(path, &["breakdown", "totalMonthlyCost"]);
        assert_eq!(value, &json!("12.50"));

        let tree = json!({
            "summary": {"totalMonthlyCost": 2},
            "breakdown": {"totalMonthlyCost": 3}
        });
        assert_eq!(first_present(&tree, SNAPSHOT_TOTAL_PATHS).unwrap().1, &json!(2));

        let tree = json!({"totalMonthlyCost": 1, "summary": {"totalMonthlyCost": 2}});
        assert_eq!(first_present(&tree, SNAPSHOT_TOTAL_PATHS).unwrap().1, &json!(1));
    }

    #[test]
    fn past_total_paths_in_priority_order() {
        let tree = json!({"summary": {"pastTotalMonthlyCost": "900"}});
        let (path, value) = first_present(&tree, PAST_TOTAL_PATHS).unwrap();
        assert_eq!(path, &["summary", "pastTotalMonthlyCost"]);
        assert_eq!(value, &json!("900"));

        let tree = json!({"pastTotalMonthlyCost": 800, "summary": {"pastTotalMonthlyCost": 900}});
        let (path, _) = first_present(&tree, PAST_TOTAL_PATHS).unwrap();
        assert_eq!(path, &["pastTotalMonthlyCost"]);
    }

    #[test]
    fn diff_proposed_total_paths_in_priority_order() {
        let tree = json!({"summary": {"totalMonthlyCost": "1100"}, "diffTotalMonthlyCost": 100});
        let (path, value) = first_present(&tree, DIFF_PROPOSED_TOTAL_PATHS).unwrap();
        assert_eq!(path, &["summary", "totalMonthlyCost"]);
        assert_eq!(value, &json!("1100"));

        let tree = json!({"totalMonthlyCost": 1000, "summary": {"totalMonthlyCost": 1100}});
        let (path, _) = first_present(&tree, DIFF_PROPOSED_TOTAL_PATHS).unwrap();
        assert_eq!(path, &["totalMonthlyCost"]);

        // A breakdown total is a snapshot field, not a diff one.
        let tree = json!({"breakdown": {"totalMonthlyCost": 1}});
        assert!(first_present(&tree, DIFF_PROPOSED_TOTAL_PATHS).is_none());
    }

    #[test]
    fn projects_accepts_bare_array() {
        let tree = json!([{"totalMonthlyCost": 1}]);
        assert_eq!(projects(&tree).map(Vec::len), Some(1));
        assert!(projects(&json!({"projects": {}})).is_none());
    }
}
