//! Integration tests for the registry public API.

use std::collections::HashMap;

use toolreq::check::{check_default_required, check_tool, VersionCheck};
use toolreq::registry::{RequirementRegistry, RequirementSpec, ToolRequirement};
use toolreq::version::VersionCmp;
use toolreq::ToolreqError;

#[test]
fn public_api_accessible() {
    let registry = RequirementRegistry::builtin();
    let _entries: Vec<&ToolRequirement> = registry.iter().collect();
}

#[test]
fn builtin_lookup_round_trips_every_name() {
    let registry = RequirementRegistry::builtin();
    for entry in registry.iter() {
        assert_eq!(registry.get(&entry.name).unwrap().name, entry.name);
    }
}

#[test]
fn default_checklist_matches_builtin_table() {
    let registry = RequirementRegistry::builtin();
    let required: Vec<&str> = registry
        .all_default_required()
        .map(|r| r.name.as_str())
        .collect();

    assert_eq!(required, vec!["python", "edalize"]);
    for excluded in [
        "ninja",
        "verilator",
        "hugo_extended",
        "verible",
        "vcs",
        "vivado",
    ] {
        assert!(!required.contains(&excluded));
    }
}

#[test]
fn unknown_tool_fails_with_tool_not_found() {
    let registry = RequirementRegistry::builtin();
    assert!(matches!(
        registry.get("nonexistent-tool"),
        Err(ToolreqError::ToolNotFound { .. })
    ));
}

#[test]
fn version_comparison_covers_all_shapes() {
    let registry = RequirementRegistry::builtin();

    assert_eq!(
        registry.compare_versions("4.211", "4.210").unwrap(),
        VersionCmp::Greater
    );
    assert_eq!(
        registry.compare_versions("4.210", "4.210").unwrap(),
        VersionCmp::Equal
    );
    assert_eq!(
        registry.compare_versions("4.209", "4.210").unwrap(),
        VersionCmp::Less
    );
    assert_eq!(
        registry
            .compare_versions("2022.06-SP2", "2022.06-SP1")
            .unwrap(),
        VersionCmp::Greater
    );
    assert_eq!(
        registry
            .compare_versions("v0.0-3622-g07b310a3", "v0.0-3622-g07b310a3")
            .unwrap(),
        VersionCmp::Equal
    );
    assert_eq!(
        registry
            .compare_versions("v0.0-3622-g07b310a3", "v0.0-9999-gabc1234")
            .unwrap(),
        VersionCmp::Incomparable
    );
    assert!(matches!(
        registry.compare_versions("not-a-version!!", "4.210"),
        Err(ToolreqError::MalformedVersion { .. })
    ));
}

#[test]
fn full_validation_workflow() {
    // A consumer loads a project-specific table, extends it, then runs the
    // default checklist against versions it gathered itself.
    let yaml = r#"
python: "3.10"
clang-format:
  min_version: "16.0"
verilator:
  min_version: "4.210"
  as_needed: true
"#;
    let registry: RequirementRegistry = serde_yaml::from_str(yaml).unwrap();
    let registry = registry
        .with_requirement("make", RequirementSpec::Version("4.3".to_string()))
        .unwrap();

    let versions = HashMap::from([
        ("python".to_string(), "3.11.4".to_string()),
        ("clang-format".to_string(), "15.0".to_string()),
        ("make".to_string(), "4.4".to_string()),
    ]);

    let results = check_default_required(&registry, &versions).unwrap();
    let names: Vec<&str> = results.iter().map(|r| r.tool.as_str()).collect();
    assert_eq!(names, vec!["python", "clang-format", "make"]);

    assert!(results[0].check.is_satisfied());
    assert_eq!(
        results[1].check,
        VersionCheck::TooOld {
            actual: "15.0".to_string(),
            required: "16.0".to_string(),
        }
    );
    assert!(results[2].check.is_satisfied());

    // The as-needed tool stays out of the sweep but is checkable on demand.
    let verilator = check_tool(&registry, "verilator", "4.212").unwrap();
    assert!(verilator.is_satisfied());
}

#[test]
fn documentation_rendering_serializes_entries() {
    let registry = RequirementRegistry::builtin();
    let entries: Vec<&ToolRequirement> = registry.iter().collect();
    let json = serde_json::to_value(&entries).unwrap();

    assert_eq!(json[0]["name"], "python");
    assert_eq!(json[0]["min_version"], "3.10");
    assert_eq!(json[2]["name"], "ninja");
    assert_eq!(json[2]["as_needed"], true);
}

#[test]
fn registry_is_shared_across_threads_without_locking() {
    let registry = RequirementRegistry::builtin();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for entry in registry.all_default_required() {
                    assert!(registry.is_default_required(&entry.name).unwrap());
                }
                assert_eq!(
                    registry.compare_versions("4.211", "4.210").unwrap(),
                    VersionCmp::Greater
                );
            });
        }
    });
}

#[test]
fn repeated_queries_return_identical_results() {
    let registry = RequirementRegistry::builtin();

    let first: Vec<String> = registry
        .all_default_required()
        .map(|r| r.name.clone())
        .collect();
    let second: Vec<String> = registry
        .all_default_required()
        .map(|r| r.name.clone())
        .collect();
    assert_eq!(first, second);

    assert_eq!(
        registry.compare_versions("2022.06-SP2", "2022.06-SP2").unwrap(),
        registry.compare_versions("2022.06-SP2", "2022.06-SP2").unwrap()
    );
}
