//! Format registry for derivation trees
//!
//! Renderers are looked up by name at run time (the CLI's `--format` flag). A renderer
//! implements [`Formatter`]; [`FormatRegistry::with_defaults`] holds all the built-in ones.

use crate::svo::tree::DerivationNode;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Failure to render a tree
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No formatter is registered under this name
    FormatNotFound(String),
    /// The formatter itself failed (only serde-backed formats can)
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// A named tree renderer
///
/// Parameters are free-form key/value pairs; each formatter documents the ones it reads and
/// ignores the rest.
pub trait Formatter: Send + Sync {
    fn name(&self) -> &str;

    fn serialize_with_params(
        &self,
        tree: &DerivationNode,
        params: &HashMap<String, String>,
    ) -> Result<String, FormatError>;

    fn serialize(&self, tree: &DerivationNode) -> Result<String, FormatError> {
        self.serialize_with_params(tree, &HashMap::new())
    }

    /// One-line summary for help output
    fn description(&self) -> &str {
        ""
    }
}

/// Formatters by name, kept in name order
#[derive(Default)]
pub struct FormatRegistry {
    formatters: BTreeMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a formatter, replacing any registered under the same name
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        let name = formatter.name().to_string();
        self.formatters.insert(name, Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(Box::as_ref)
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, tree: &DerivationNode, format: &str) -> Result<String, FormatError> {
        self.serialize_with_params(tree, format, &HashMap::new())
    }

    pub fn serialize_with_params(
        &self,
        tree: &DerivationNode,
        format: &str,
        params: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        match self.get(format) {
            Some(formatter) => formatter.serialize_with_params(tree, params),
            None => Err(FormatError::FormatNotFound(format.to_string())),
        }
    }

    /// Registered names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        self.formatters.keys().cloned().collect()
    }

    /// `(name, description)` of every formatter, sorted by name
    pub fn descriptions(&self) -> Vec<(&str, &str)> {
        self.formatters
            .iter()
            .map(|(name, formatter)| (name.as_str(), formatter.description()))
            .collect()
    }

    /// Every built-in tree format
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::IndentedFormatter);
        registry.register(super::TreevizFormatter);
        registry.register(super::BracketFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::SvgFormatter);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svo::lexicon::Category;

    struct TestFormatter;
    impl Formatter for TestFormatter {
        fn name(&self) -> &str {
            "test"
        }
        fn serialize_with_params(
            &self,
            tree: &DerivationNode,
            params: &HashMap<String, String>,
        ) -> Result<String, FormatError> {
            let suffix = params.get("suffix").map(String::as_str).unwrap_or("");
            Ok(format!("{}{}", tree.label(), suffix))
        }
        fn description(&self) -> &str {
            "Test formatter"
        }
    }

    fn leaf() -> DerivationNode {
        DerivationNode::leaf(Category::Noun, "perro")
    }

    #[test]
    fn test_empty_registry() {
        let registry = FormatRegistry::new();
        assert!(registry.list_formats().is_empty());
        assert!(registry.get("indented").is_none());
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);

        assert!(registry.has("test"));
        assert!(!registry.has("nonexistent"));
        assert_eq!(registry.list_formats(), vec!["test"]);
        assert_eq!(registry.get("test").unwrap().description(), "Test formatter");
    }

    #[test]
    fn test_registry_serialize_with_params() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);

        assert_eq!(registry.serialize(&leaf(), "test").unwrap(), "N");

        let params = HashMap::from([("suffix".to_string(), "!".to_string())]);
        assert_eq!(
            registry
                .serialize_with_params(&leaf(), "test", &params)
                .unwrap(),
            "N!"
        );
    }

    #[test]
    fn test_registry_serialize_not_found() {
        let registry = FormatRegistry::new();
        match registry.serialize(&leaf(), "nonexistent").unwrap_err() {
            FormatError::FormatNotFound(name) => assert_eq!(name, "nonexistent"),
            _ => panic!("Expected FormatNotFound error"),
        }
    }

    #[test]
    fn test_registry_defaults() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(
            registry.list_formats(),
            vec!["bracket", "indented", "json", "svg", "treeviz"]
        );
        assert!(registry
            .descriptions()
            .iter()
            .all(|(_, description)| !description.is_empty()));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            FormatError::FormatNotFound("xml".into()).to_string(),
            "Format 'xml' not found"
        );
    }
}
