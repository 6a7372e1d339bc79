//! Version string parsing and comparison.
//!
//! Version tokens come in three accepted shapes:
//!
//! - pure dotted-numeric: `"4.210"`, `"1.8.2"`
//! - dotted-numeric with a trailing non-numeric suffix: `"2022.06-SP2"`,
//!   compared lexicographically once the numeric prefixes match
//! - VCS-describe strings (tag + commit count + abbreviated hash):
//!   `"v0.0-3622-g07b310a3"`, compared for exact equality only
//!
//! Strings matching none of these shapes are rejected with
//! [`MalformedVersion`](crate::ToolreqError::MalformedVersion); comparisons
//! that have no defined order report [`VersionCmp::Incomparable`] rather
//! than guessing.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

use crate::error::{Result, ToolreqError};

macro_rules! lazy_regex {
    ($name:ident, $pattern:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($pattern).unwrap());
    };
}

lazy_regex!(RE_DESCRIBE, r"^v\d+(?:\.\d+)+-\d+-g[0-9a-f]+$");
lazy_regex!(RE_DOTTED, r"^(\d+(?:\.\d+)*)([^\d.].*)?$");

/// Outcome of comparing two version strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCmp {
    Less,
    Equal,
    Greater,
    /// Both strings are individually well-formed but have no defined order
    /// (differing VCS-describe strings, or mixed shapes).
    Incomparable,
}

/// A version string parsed into comparable form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Version {
    /// Dotted-numeric components with an optional trailing suffix.
    Dotted {
        components: Vec<u64>,
        suffix: Option<String>,
    },
    /// Opaque VCS-describe string; only exact equality is meaningful.
    Describe(String),
}

impl Version {
    /// Parse a version string into one of the accepted shapes.
    pub fn parse(raw: &str) -> Result<Self> {
        if RE_DESCRIBE.is_match(raw) {
            return Ok(Version::Describe(raw.to_string()));
        }

        if let Some(caps) = RE_DOTTED.captures(raw) {
            let mut components = Vec::new();
            for part in caps[1].split('.') {
                let n = part
                    .parse::<u64>()
                    .map_err(|_| ToolreqError::MalformedVersion {
                        version: raw.to_string(),
                    })?;
                components.push(n);
            }
            let suffix = caps.get(2).map(|m| m.as_str().to_string());
            return Ok(Version::Dotted { components, suffix });
        }

        Err(ToolreqError::MalformedVersion {
            version: raw.to_string(),
        })
    }

    /// Compare against another parsed version.
    pub fn compare(&self, other: &Version) -> VersionCmp {
        match (self, other) {
            (
                Version::Dotted {
                    components: ours,
                    suffix: our_suffix,
                },
                Version::Dotted {
                    components: theirs,
                    suffix: their_suffix,
                },
            ) => {
                // Absent components compare as zero: "4.2" == "4.2.0".
                for i in 0..ours.len().max(theirs.len()) {
                    let a = ours.get(i).copied().unwrap_or(0);
                    let b = theirs.get(i).copied().unwrap_or(0);
                    match a.cmp(&b) {
                        Ordering::Less => return VersionCmp::Less,
                        Ordering::Greater => return VersionCmp::Greater,
                        Ordering::Equal => {}
                    }
                }
                // Numeric prefixes equal: the suffix decides. A bare release
                // precedes any suffixed one ("2022.06" < "2022.06-SP2").
                match (our_suffix, their_suffix) {
                    (None, None) => VersionCmp::Equal,
                    (None, Some(_)) => VersionCmp::Less,
                    (Some(_), None) => VersionCmp::Greater,
                    (Some(a), Some(b)) => match a.cmp(b) {
                        Ordering::Less => VersionCmp::Less,
                        Ordering::Equal => VersionCmp::Equal,
                        Ordering::Greater => VersionCmp::Greater,
                    },
                }
            }
            (Version::Describe(a), Version::Describe(b)) => {
                if a == b {
                    VersionCmp::Equal
                } else {
                    VersionCmp::Incomparable
                }
            }
            _ => VersionCmp::Incomparable,
        }
    }
}

/// Parse two version strings and compare them.
pub fn compare_versions(actual: &str, required: &str) -> Result<VersionCmp> {
    let actual = Version::parse(actual)?;
    let required = Version::parse(required)?;
    Ok(actual.compare(&required))
}
