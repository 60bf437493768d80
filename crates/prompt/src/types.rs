//! Prompt types for promptkit.
//!
//! This module defines the prompt definition entities and the structured
//! errors produced when a file does not match the expected schema.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A prompt definition loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique prompt identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// Longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Arguments the template accepts, by name
    #[serde(default)]
    pub args: BTreeMap<String, PromptArg>,

    /// Template string with Handlebars syntax
    pub template: String,
}

/// A single template argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptArg {
    #[serde(rename = "type")]
    pub arg_type: ArgType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_yaml::Value>,
}

/// Value types an argument may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

/// One schema problem, located by its field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Path to the offending field (`["groups", "common", "prompts"]`); empty for the whole file
    pub path: Vec<String>,

    pub message: String,

    /// Stable machine-readable code (e.g., "required", "invalid_yaml")
    pub code: String,
}

impl FieldError {
    pub fn new(path: &[&str], message: impl Into<String>, code: &str) -> Self {
        Self {
            path: path.iter().map(|s| s.to_string()).collect(),
            message: message.into(),
            code: code.to_string(),
        }
    }

    /// Dotted form of `path`, or `<root>` for whole-file errors.
    pub fn display_path(&self) -> String {
        if self.path.is_empty() {
            "<root>".to_string()
        } else {
            self.path.join(".")
        }
    }
}

/// A file failed schema validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} schema error(s)", .errors.len())]
pub struct SchemaViolation {
    pub errors: Vec<FieldError>,
}

impl SchemaViolation {
    pub fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}
