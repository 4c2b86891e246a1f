//! Indented tree format
//!
//! One line per node, two spaces of indentation per level. Internal nodes print a header
//! line followed by their children; leaves print `Label: word`.
//!
//!     S (Oración)
//!       NP (Sintagma nominal)
//!         Name (Nombre propio): ana
//!       VP (Sintagma verbal)
//!         V (Verbo): duerme

use super::registry::{FormatError, Formatter};
use super::{friendly_labels, node_title};
use crate::svo::tree::DerivationNode;
use std::collections::HashMap;

/// Render a tree with friendly labels
pub fn format_tree(tree: &DerivationNode) -> String {
    format_tree_with_params(tree, &HashMap::new())
}

pub fn format_tree_with_params(tree: &DerivationNode, params: &HashMap<String, String>) -> String {
    let mut output = String::new();
    write_node(&mut output, tree, 0, friendly_labels(params));
    output
}

fn write_node(output: &mut String, node: &DerivationNode, depth: usize, friendly: bool) {
    output.push_str(&"  ".repeat(depth));
    output.push_str(&node_title(node, friendly));
    output.push('\n');
    for child in node.children() {
        write_node(output, child, depth + 1, friendly);
    }
}

/// Formatter implementation for the indented format
pub struct IndentedFormatter;

impl Formatter for IndentedFormatter {
    fn name(&self) -> &str {
        "indented"
    }

    fn serialize_with_params(
        &self,
        tree: &DerivationNode,
        params: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        Ok(format_tree_with_params(tree, params))
    }

    fn description(&self) -> &str {
        "One node per line, two spaces of indentation per level"
    }
}
