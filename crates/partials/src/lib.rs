//! Partials dependency engine for promptkit.
//!
//! This crate discovers how templates use partials (`{{> name}}`) and
//! reports two kinds of problems:
//! - references to partials that have no file under the partials root
//! - partials that depend on themselves, directly or transitively
//!
//! Graphs are built fresh for every template and never shared.

pub mod cycles;
pub mod extract;
pub mod graph;
pub mod listing;
pub mod resolve;
pub mod usage;

// Re-export main API
pub use cycles::detect_cycles;
pub use extract::extract_partials;
pub use graph::{build_partial_graph, DependencyGraph, FileGraph, PartialGraph};
pub use listing::list_partials;
pub use resolve::{partial_name_from_path, resolve_partial_path, PARTIAL_EXTENSION};
pub use usage::{validate_partials_usage, PartialIssue};
