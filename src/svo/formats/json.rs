//! JSON format
//!
//! Serializes the tree with serde. Leaves become `{"type": "leaf", "category", "text"}`,
//! internal nodes `{"type": "node", "rule", "children"}`.
//!
//! Parameters:
//!     pretty: "true" (default) for indented output, "false" for a single line

use super::registry::{FormatError, Formatter};
use crate::svo::tree::DerivationNode;
use std::collections::HashMap;

pub fn to_json_str(tree: &DerivationNode, pretty: bool) -> Result<String, FormatError> {
    let result = if pretty {
        serde_json::to_string_pretty(tree)
    } else {
        serde_json::to_string(tree)
    };
    result.map_err(|e| FormatError::SerializationError(e.to_string()))
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize_with_params(
        &self,
        tree: &DerivationNode,
        params: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let pretty = params.get("pretty").map(|v| v != "false").unwrap_or(true);
        to_json_str(tree, pretty)
    }

    fn description(&self) -> &str {
        "JSON serialization of the tree"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svo::lexicon::Category;
    use crate::svo::tree::Rule;

    #[test]
    fn test_compact_json() {
        let tree = DerivationNode::node(
            Rule::VerbPhrase,
            vec![DerivationNode::leaf(Category::Verb, "corre")],
        );
        let params = HashMap::from([("pretty".to_string(), "false".to_string())]);
        assert_eq!(
            JsonFormatter.serialize_with_params(&tree, &params).unwrap(),
            r#"{"type":"node","rule":"VP","children":[{"type":"leaf","category":"verb","text":"corre"}]}"#
        );
    }

    #[test]
    fn test_pretty_json_parses_back() {
        let tree = DerivationNode::leaf(Category::Noun, "casa");
        let output = JsonFormatter.serialize(&tree).unwrap();
        assert!(output.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["text"], "casa");
    }
}
