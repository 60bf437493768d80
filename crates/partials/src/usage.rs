//! Partials usage validation for a single template.

use crate::cycles::detect_cycles;
use crate::extract::extract_partials;
use crate::graph::{build_partial_graph, FileGraph, PartialGraph};
use crate::resolve::{partial_name_from_path, resolve_partial_path};
use promptkit_core::AppResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A problem with how a template uses partials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PartialIssue {
    /// The template references a partial that has no file.
    #[serde(rename = "missing-partial")]
    MissingPartial { partial: String },

    /// A partial depends on itself, directly or transitively.
    #[serde(rename = "circular-partial")]
    CircularPartial { chain: Vec<String> },
}

/// Check every partial referenced by `template` against `partial_root`.
///
/// Missing partials come first, in the order the template references them,
/// followed by one circular-partial issue per cycle found in the dependency
/// graph reachable from the template.
///
/// # Example
/// ```no_run
/// use promptkit_partials::validate_partials_usage;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let issues = validate_partials_usage("{{> role-expert}}", Path::new("partials"))?;
/// for issue in &issues {
///     println!("{:?}", issue);
/// }
/// # Ok(())
/// # }
/// ```
pub fn validate_partials_usage(template: &str, partial_root: &Path) -> AppResult<Vec<PartialIssue>> {
    let used = extract_partials(template);
    let mut issues = Vec::new();
    let mut graph = PartialGraph::new();

    for name in &used {
        match resolve_partial_path(partial_root, name) {
            Some(_) => discover(name, partial_root, &mut graph)?,
            None => {
                tracing::debug!("Missing partial '{}'", name);
                issues.push(PartialIssue::MissingPartial {
                    partial: name.clone(),
                });
            }
        }
    }

    let file_graph = canonicalize(&graph, partial_root);

    for cycle in detect_cycles(&file_graph) {
        let chain: Vec<String> = cycle
            .iter()
            .map(|path| partial_name_from_path(partial_root, path))
            .collect();
        tracing::debug!("Circular partial chain: {}", chain.join(" -> "));
        issues.push(PartialIssue::CircularPartial { chain });
    }

    Ok(issues)
}

/// Add `name` and everything it transitively references to `graph`.
fn discover(name: &str, partial_root: &Path, graph: &mut PartialGraph) -> AppResult<()> {
    let Some(file) = resolve_partial_path(partial_root, name) else {
        return Ok(());
    };

    if graph.contains(&file) {
        return Ok(());
    }

    build_partial_graph(&file, graph)?;

    let deps = graph.get(&file).map(<[String]>::to_vec).unwrap_or_default();
    for dep in &deps {
        discover(dep, partial_root, graph)?;
    }

    Ok(())
}

/// Re-key dependency names as resolved files, dropping names that do not resolve.
fn canonicalize(graph: &PartialGraph, partial_root: &Path) -> FileGraph {
    let mut file_graph = FileGraph::new();

    for (file, dep_names) in graph.iter() {
        let deps = dep_names
            .iter()
            .filter_map(|name| resolve_partial_path(partial_root, name))
            .collect();
        file_graph.insert(file.clone(), deps);
    }

    file_graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct Partials {
        temp: TempDir,
    }

    impl Partials {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            fs::create_dir_all(temp.path().join("partials")).unwrap();
            Self { temp }
        }

        fn add(self, name: &str, content: &str) -> Self {
            let path = self.root().join(format!("{}.hbs", name));
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
            self
        }

        fn root(&self) -> std::path::PathBuf {
            self.temp.path().join("partials")
        }

        fn check(&self, template: &str) -> Vec<PartialIssue> {
            validate_partials_usage(template, &self.root()).unwrap()
        }
    }

    fn missing(name: &str) -> PartialIssue {
        PartialIssue::MissingPartial {
            partial: name.to_string(),
        }
    }

    fn circular(chain: &[&str]) -> PartialIssue {
        PartialIssue::CircularPartial {
            chain: chain.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_valid_usage() {
        let p = Partials::new()
            .add("role-expert", "Expert content")
            .add("role-helper", "Helper content");

        assert!(p.check("{{> role-expert}} Some content {{> role-helper}}").is_empty());
    }

    #[test]
    fn test_template_without_partials() {
        let p = Partials::new();
        assert!(p.check("Simple template without partials").is_empty());
        assert!(p.check("").is_empty());
    }

    #[test]
    fn test_single_missing_partial() {
        let p = Partials::new().add("role-expert", "Expert content");
        assert_eq!(
            p.check("{{> role-expert}}{{> missing-partial}}"),
            vec![missing("missing-partial")]
        );
    }

    #[test]
    fn test_missing_partials_keep_reference_order() {
        let p = Partials::new();
        assert_eq!(
            p.check("{{> missing1}}{{> missing2}}{{> missing3}}{{> missing1}}"),
            vec![missing("missing1"), missing("missing2"), missing("missing3")]
        );
    }

    #[test]
    fn test_missing_partial_without_root_dir() {
        let temp = TempDir::new().unwrap();
        let issues = validate_partials_usage("{{> a}}", &temp.path().join("nowhere")).unwrap();
        assert_eq!(issues, vec![missing("a")]);
    }

    #[test]
    fn test_leading_slash_resolves_under_root() {
        let p = Partials::new().add("role", "{{> /role}}");
        assert_eq!(p.check("{{> /role}}"), vec![circular(&["role", "role"])]);
        assert_eq!(p.check("{{> /ghost}}"), vec![missing("/ghost")]);
    }

    #[test]
    fn test_two_partial_cycle() {
        let p = Partials::new().add("A", "{{> B}}").add("B", "{{> A}}");
        assert_eq!(p.check("{{> A}}"), vec![circular(&["A", "B", "A"])]);
    }

    #[test]
    fn test_three_partial_cycle() {
        let p = Partials::new()
            .add("A", "{{> B}}")
            .add("B", "{{> C}}")
            .add("C", "{{> A}}");
        assert_eq!(p.check("{{> A}}"), vec![circular(&["A", "B", "C", "A"])]);
    }

    #[test]
    fn test_self_reference() {
        let p = Partials::new().add("self", "before {{> self}} after");
        let issues = p.check("{{> self}}");

        assert_eq!(issues, vec![circular(&["self", "self"])]);
    }

    #[test]
    fn test_missing_and_circular_together() {
        let p = Partials::new().add("A", "{{> B}}").add("B", "{{> A}}");
        let issues = p.check("{{> A}}{{> missing}}");

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0], missing("missing"));
        assert!(matches!(issues[1], PartialIssue::CircularPartial { .. }));
    }

    #[test]
    fn test_nested_acyclic() {
        let p = Partials::new()
            .add("parent", "{{> child}}")
            .add("child", "{{> grandchild}}")
            .add("grandchild", "Content");
        assert!(p.check("{{> parent}}").is_empty());
    }

    #[test]
    fn test_nested_cycle() {
        let p = Partials::new()
            .add("parent", "{{> child}}")
            .add("child", "{{> parent}}");
        assert_eq!(
            p.check("{{> parent}}"),
            vec![circular(&["parent", "child", "parent"])]
        );
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let p = Partials::new()
            .add("top", "{{> left}} {{> right}}")
            .add("left", "{{> shared}}")
            .add("right", "{{> shared}}")
            .add("shared", "Shared");
        assert!(p.check("{{> top}}").is_empty());
    }

    #[test]
    fn test_missing_nested_partial_is_not_reported() {
        // Only direct template references are reported as missing
        let p = Partials::new().add("outer", "{{> inner-missing}}");
        assert!(p.check("{{> outer}}").is_empty());
    }

    #[test]
    fn test_nested_directories() {
        let p = Partials::new()
            .add("common/header", "{{> common/footer}}")
            .add("common/footer", "{{> common/header}}");
        assert_eq!(
            p.check("{{> common/header}}"),
            vec![circular(&["common/header", "common/footer", "common/header"])]
        );
    }

    #[test]
    fn test_aliased_names_are_one_node() {
        // `a//b` and `a/b` name the same file
        let p = Partials::new().add("a/b", "{{> a//b}}");
        assert_eq!(p.check("{{> a/b}}"), vec![circular(&["a/b", "a/b"])]);
    }

    #[test]
    fn test_deterministic() {
        let p = Partials::new()
            .add("A", "{{> B}} {{> C}}")
            .add("B", "{{> C}} {{> A}}")
            .add("C", "{{> A}}");
        let template = "{{> C}} {{> missing}} {{> A}}";

        let first = p.check(template);
        for _ in 0..5 {
            assert_eq!(p.check(template), first);
        }
    }

    #[test]
    fn test_issue_serialization() {
        let json = serde_json::to_value(missing("x")).unwrap();
        assert_eq!(json["type"], "missing-partial");
        assert_eq!(json["partial"], "x");

        let json = serde_json::to_value(circular(&["a", "a"])).unwrap();
        assert_eq!(json["type"], "circular-partial");
        assert_eq!(json["chain"][1], "a");
    }
}
