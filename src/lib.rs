//! Toolreq - minimum tool-version requirements for build tooling.
//!
//! Toolreq holds, per tool name, the minimum version a build expects and
//! whether the tool is checked on every build or only when explicitly
//! requested. Build orchestration queries it before invoking toolchain
//! binaries; documentation generators query it to render the requirements
//! table. The registry itself never runs tools and touches no I/O.
//!
//! # Modules
//!
//! - [`check`] - Validation of caller-supplied versions against the registry
//! - [`error`] - Error types and result aliases
//! - [`registry`] - Tool requirement definitions and the builtin table
//! - [`version`] - Version string parsing and comparison
//!
//! # Example
//!
//! ```
//! use toolreq::registry::RequirementRegistry;
//! use toolreq::version::VersionCmp;
//!
//! let registry = RequirementRegistry::builtin();
//!
//! let verilator = registry.get("verilator").unwrap();
//! assert_eq!(verilator.min_version, "4.210");
//! assert!(!registry.is_default_required("verilator").unwrap());
//!
//! let outcome = registry.compare_versions("4.211", "4.210").unwrap();
//! assert_eq!(outcome, VersionCmp::Greater);
//! ```

pub mod check;
pub mod error;
pub mod registry;
pub mod version;

pub use error::{Result, ToolreqError};
