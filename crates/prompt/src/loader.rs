//! Prompt file schema validation.

use crate::types::{FieldError, PromptDefinition, SchemaViolation};
use handlebars::Handlebars;
use std::path::Path;

/// Load and validate a prompt definition file.
///
/// Every semantic problem found in a parsable file is reported together;
/// unreadable files and YAML that does not match the prompt shape yield a
/// single whole-file error.
///
/// # Example
/// ```no_run
/// use promptkit_prompt::validate_prompt_file;
/// use std::path::Path;
///
/// match validate_prompt_file(Path::new("common/api-design.yaml")) {
///     Ok(prompt) => println!("Loaded prompt: {}", prompt.title),
///     Err(violation) => {
///         for error in &violation.errors {
///             eprintln!("{}: {}", error.display_path(), error.message);
///         }
///     }
/// }
/// ```
pub fn validate_prompt_file(prompt_file: &Path) -> Result<PromptDefinition, SchemaViolation> {
    tracing::debug!("Validating prompt file: {:?}", prompt_file);

    let contents = std::fs::read_to_string(prompt_file).map_err(|e| {
        SchemaViolation::single(FieldError::new(
            &[],
            format!("Failed to read prompt file {:?}: {}", prompt_file, e),
            "file_unreadable",
        ))
    })?;

    let definition: PromptDefinition = serde_yaml::from_str(&contents).map_err(|e| {
        SchemaViolation::single(FieldError::new(
            &[],
            format!("Failed to parse prompt YAML: {}", e),
            "invalid_yaml",
        ))
    })?;

    let errors = check_prompt(&definition);
    if !errors.is_empty() {
        return Err(SchemaViolation { errors });
    }

    tracing::debug!("Loaded prompt: {} ({})", definition.id, definition.title);
    Ok(definition)
}

/// Semantic checks the YAML shape alone cannot express.
fn check_prompt(def: &PromptDefinition) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if def.id.is_empty() {
        errors.push(FieldError::new(&["id"], "Prompt id cannot be empty", "required"));
    } else if !def
        .id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        errors.push(FieldError::new(
            &["id"],
            format!(
                "Invalid prompt id '{}'. Use letters, digits, '.', '_' or '-'",
                def.id
            ),
            "invalid_format",
        ));
    }

    if def.title.trim().is_empty() {
        errors.push(FieldError::new(&["title"], "Prompt title cannot be empty", "required"));
    }

    if def.template.trim().is_empty() {
        errors.push(FieldError::new(
            &["template"],
            "Prompt template cannot be empty",
            "required",
        ));
    } else if let Err(e) = check_template_syntax(&def.template) {
        errors.push(FieldError::new(&["template"], e, "invalid_template"));
    }

    errors
}

/// Compile the template to catch syntax errors; nothing is rendered.
fn check_template_syntax(template: &str) -> Result<(), String> {
    let mut handlebars = Handlebars::new();
    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| format!("Template does not compile: {}", e))
}
