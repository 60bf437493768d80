//! Prompt repository schema for promptkit.
//!
//! This crate knows the on-disk shape of a prompt repository:
//! - YAML prompt definitions (`validate_prompt_file`)
//! - the `registry.yaml` manifest (`validate_registry`)
//!
//! Both validators return structured `FieldError`s instead of failing on the
//! first problem.

pub mod loader;
pub mod registry;
pub mod types;

// Re-export main types
pub use loader::validate_prompt_file;
pub use registry::{
    validate_registry, Group, PartialsConfig, Registry, RegistryError, REGISTRY_FILE_NAME,
};
pub use types::{ArgType, FieldError, PromptArg, PromptDefinition, SchemaViolation};
