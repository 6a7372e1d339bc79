//! Tool-version requirement registry and definitions.
//!
//! Holds, per tool name, the minimum version build tooling must find and
//! whether the tool is checked on every build or only when explicitly asked
//! for. [`RequirementRegistry::builtin`] carries the standard table;
//! alternate registries can be assembled from deserialized
//! [`RequirementSpec`] tables (e.g., via [`serde_yaml`]) or built up with
//! [`RequirementRegistry::with_requirement`].
//!
//! A registry is constructed once and never mutated, so it can be shared
//! across threads without locking.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, ToolreqError};
use crate::version::{self, Version, VersionCmp};

/// A minimum-version requirement for a named tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRequirement {
    /// Tool name (case-sensitive, unique within a registry).
    pub name: String,

    /// Minimum version string. One of the shapes accepted by
    /// [`Version::parse`].
    pub min_version: String,

    /// If true, the tool is only checked when a consumer explicitly asks
    /// for it. If false, it is part of the default checklist.
    #[serde(default, skip_serializing_if = "is_false")]
    pub as_needed: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// One entry in an external requirement table.
///
/// Tables allow two shapes per entry: a bare minimum-version string, or a
/// structured record with `min_version` and an optional `as_needed` flag.
/// Both normalize to [`ToolRequirement`] at registry construction, so
/// consumers never inspect the shape per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequirementSpec {
    /// Bare minimum version; `as_needed` defaults to false.
    Version(String),

    /// Structured entry.
    Detailed {
        /// Minimum version string.
        min_version: String,
        /// Only enforced when the tool is explicitly requested.
        #[serde(default)]
        as_needed: bool,
    },
}

impl RequirementSpec {
    fn into_requirement(self, name: String) -> ToolRequirement {
        match self {
            RequirementSpec::Version(min_version) => ToolRequirement {
                name,
                min_version,
                as_needed: false,
            },
            RequirementSpec::Detailed {
                min_version,
                as_needed,
            } => ToolRequirement {
                name,
                min_version,
                as_needed,
            },
        }
    }
}

/// Registry of all known tool-version requirements.
///
/// Insertion-ordered; names are unique. All operations are pure reads.
#[derive(Debug, Clone)]
pub struct RequirementRegistry {
    entries: Vec<ToolRequirement>,
    index: HashMap<String, usize>,
}

impl RequirementRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create a registry with the built-in requirement table.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();

        registry.push(ToolRequirement {
            name: "python".to_string(),
            min_version: "3.10".to_string(),
            as_needed: false,
        });
        registry.push(ToolRequirement {
            name: "edalize".to_string(),
            min_version: "0.2.0".to_string(),
            as_needed: false,
        });
        registry.push(ToolRequirement {
            name: "ninja".to_string(),
            min_version: "1.8.2".to_string(),
            as_needed: true,
        });
        registry.push(ToolRequirement {
            name: "verilator".to_string(),
            min_version: "4.210".to_string(),
            as_needed: true,
        });
        registry.push(ToolRequirement {
            name: "hugo_extended".to_string(),
            min_version: "0.82.0".to_string(),
            as_needed: true,
        });
        registry.push(ToolRequirement {
            name: "verible".to_string(),
            min_version: "v0.0-3622-g07b310a3".to_string(),
            as_needed: true,
        });
        registry.push(ToolRequirement {
            name: "vcs".to_string(),
            min_version: "2022.06-SP2".to_string(),
            as_needed: true,
        });
        registry.push(ToolRequirement {
            name: "vivado".to_string(),
            min_version: "2021.1".to_string(),
            as_needed: true,
        });

        registry
    }

    /// Build a registry from table entries, normalizing each spec and
    /// validating every minimum version string.
    ///
    /// Entries keep their order; a repeated name replaces the earlier entry
    /// in place.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, RequirementSpec)>,
    {
        let mut registry = Self::empty();
        for (name, spec) in entries {
            let requirement = spec.into_requirement(name);
            Version::parse(&requirement.min_version)?;
            registry.push(requirement);
        }
        tracing::debug!("constructed requirement registry with {} entries", registry.len());
        Ok(registry)
    }

    /// Add one requirement, validating its minimum version string.
    pub fn with_requirement(mut self, name: &str, spec: RequirementSpec) -> Result<Self> {
        let requirement = spec.into_requirement(name.to_string());
        Version::parse(&requirement.min_version)?;
        self.push(requirement);
        Ok(self)
    }

    fn push(&mut self, requirement: ToolRequirement) {
        match self.index.get(&requirement.name) {
            Some(&i) => {
                tracing::debug!("replacing requirement entry for '{}'", requirement.name);
                self.entries[i] = requirement;
            }
            None => {
                self.index
                    .insert(requirement.name.clone(), self.entries.len());
                self.entries.push(requirement);
            }
        }
    }

    /// Look up a requirement by tool name.
    pub fn get(&self, name: &str) -> Result<&ToolRequirement> {
        self.index
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| ToolreqError::ToolNotFound {
                name: name.to_string(),
            })
    }

    /// Whether the named tool is checked on every build (exists and is not
    /// marked `as_needed`).
    pub fn is_default_required(&self, name: &str) -> Result<bool> {
        Ok(!self.get(name)?.as_needed)
    }

    /// Every entry that is checked on every build, in insertion order.
    ///
    /// This is the default checklist a build validates before proceeding.
    pub fn all_default_required(&self) -> impl Iterator<Item = &ToolRequirement> {
        self.entries.iter().filter(|r| !r.as_needed)
    }

    /// All entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolRequirement> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse two version strings and compare them.
    ///
    /// See [`crate::version::compare_versions`] for the accepted shapes and
    /// the comparison policy.
    pub fn compare_versions(&self, actual: &str, required: &str) -> Result<VersionCmp> {
        version::compare_versions(actual, required)
    }
}

impl Default for RequirementRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

// A requirement table document is a mapping from tool name to entry spec,
// e.g. in YAML:
//
//     python: "3.10"
//     ninja:
//       min_version: "1.8.2"
//       as_needed: true
//
// Deserialized in document order so the registry preserves it.
impl<'de> Deserialize<'de> for RequirementRegistry {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = RequirementRegistry;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of tool name to version requirement")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry::<String, RequirementSpec>()? {
                    entries.push(entry);
                }
                RequirementRegistry::from_entries(entries).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}
