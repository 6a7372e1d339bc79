//! Requirement validation against caller-supplied tool versions.
//!
//! The registry never invokes tools. Consumers obtain actual version
//! strings themselves (typically by running a tool and parsing its
//! `--version` output) and pass them here for comparison against the
//! declared minimums.

use std::collections::HashMap;

use crate::error::Result;
use crate::registry::RequirementRegistry;
use crate::version::VersionCmp;

/// The result of checking one tool's actual version against its minimum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionCheck {
    /// Actual version meets or exceeds the minimum.
    Satisfied {
        /// The version that was checked
        actual: String,
    },

    /// Actual version is older than the minimum.
    TooOld {
        /// The version that was checked
        actual: String,
        /// The declared minimum
        required: String,
    },

    /// Actual and required have no defined order (e.g., differing
    /// VCS-describe strings). The caller decides whether to trust the tool.
    Incomparable {
        /// The version that was checked
        actual: String,
        /// The declared minimum
        required: String,
    },

    /// No actual version was supplied for a tool on the default checklist.
    Missing,
}

impl VersionCheck {
    /// Whether the requirement is met outright.
    pub fn is_satisfied(&self) -> bool {
        matches!(self, VersionCheck::Satisfied { .. })
    }
}

/// The outcome of checking one tool on the default checklist.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// The tool name that was checked
    pub tool: String,
    /// The outcome of the version comparison
    pub check: VersionCheck,
}

/// Check a single tool's actual version against the registry.
///
/// Fails with [`ToolNotFound`](crate::ToolreqError::ToolNotFound) when no
/// requirement is declared for `name`, and with
/// [`MalformedVersion`](crate::ToolreqError::MalformedVersion) when
/// `actual` matches no accepted version shape.
pub fn check_tool(
    registry: &RequirementRegistry,
    name: &str,
    actual: &str,
) -> Result<VersionCheck> {
    let requirement = registry.get(name)?;
    let outcome = registry.compare_versions(actual, &requirement.min_version)?;

    Ok(match outcome {
        VersionCmp::Equal | VersionCmp::Greater => VersionCheck::Satisfied {
            actual: actual.to_string(),
        },
        VersionCmp::Less => VersionCheck::TooOld {
            actual: actual.to_string(),
            required: requirement.min_version.clone(),
        },
        VersionCmp::Incomparable => {
            tracing::warn!(
                "version '{}' for tool '{}' has no defined order against required '{}'",
                actual,
                name,
                requirement.min_version
            );
            VersionCheck::Incomparable {
                actual: actual.to_string(),
                required: requirement.min_version.clone(),
            }
        }
    })
}

/// Run the default checklist against a map of tool name to actual version.
///
/// Every entry the registry marks as default-required is checked, in
/// registry order. A tool absent from `versions` yields
/// [`VersionCheck::Missing`] rather than an error, so one sweep reports
/// every gap at once.
pub fn check_default_required(
    registry: &RequirementRegistry,
    versions: &HashMap<String, String>,
) -> Result<Vec<CheckResult>> {
    let mut results = Vec::new();
    for requirement in registry.all_default_required() {
        let check = match versions.get(&requirement.name) {
            Some(actual) => check_tool(registry, &requirement.name, actual)?,
            None => VersionCheck::Missing,
        };
        results.push(CheckResult {
            tool: requirement.name.clone(),
            check,
        });
    }
    Ok(results)
}
