//! Repository fixtures shared by the scenario tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const VALID_REGISTRY: &str = r#"
version: 1
globals:
  api_version: v1
partials:
  enabled: true
  path: partials
groups:
  common:
    path: common
    enabled: true
    prompts:
      - api-design.yaml
      - code-review.yaml
  laravel:
    path: laravel
    enabled: true
    prompts:
      - laravel-api-implementation.yaml
"#;

pub const VALID_PROMPT: &str = r#"
id: test-prompt
title: Test Prompt
description: This is a test prompt
args:
  name:
    type: string
    description: The name parameter
    required: true
  count:
    type: number
    required: false
    default: 10
template: |
  Hello {{name}}, count is {{count}}
"#;

pub const PROMPT_MISSING_ID: &str = r#"
title: Test Prompt
description: This is a test prompt
args:
  name:
    type: string
template: Hello {{name}}
"#;

pub const PROMPT_WITH_PARTIALS: &str = r#"
id: test-prompt-with-partials
title: Test Prompt with Partials
args:
  name:
    type: string
template: |
  {{> role-expert}}
  Hello {{name}}
  {{> role-helper}}
"#;

/// A prompt whose template is exactly `template`.
pub fn prompt_with_template(template: &str) -> String {
    let indented: Vec<String> = template.lines().map(|l| format!("  {}", l)).collect();
    format!(
        "id: generated\ntitle: Generated\ntemplate: |\n{}\n",
        indented.join("\n")
    )
}

/// Temporary prompt repository.
pub struct TestRepo {
    temp: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    /// Repository with the standard registry and three valid prompts.
    pub fn standard() -> Self {
        Self::new()
            .file("registry.yaml", VALID_REGISTRY)
            .file("common/api-design.yaml", VALID_PROMPT)
            .file("common/code-review.yaml", VALID_PROMPT)
            .file("laravel/laravel-api-implementation.yaml", VALID_PROMPT)
    }

    pub fn file(self, relative: &str, content: &str) -> Self {
        let path = self.temp.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    /// Write raw bytes, for files that are not valid UTF-8.
    pub fn bytes(self, relative: &str, content: &[u8]) -> Self {
        let path = self.temp.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    pub fn dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.temp.path().join(relative)).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn join(&self, relative: &str) -> PathBuf {
        self.temp.path().join(relative)
    }
}
