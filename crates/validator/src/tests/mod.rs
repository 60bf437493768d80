//! Scenario tests against prompt repositories built on disk.

mod fixtures;
