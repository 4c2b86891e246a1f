//! Treeviz formatter for derivation trees
//!
//! An ASCII-art drawing of the tree with box-drawing connectors. The root label goes on
//! the first line, every other node on its own line below its parent:
//!
//!     S (Oración)
//!     ├─ NP (Sintagma nominal)
//!     │  └─ Name (Nombre propio): ana
//!     └─ VP (Sintagma verbal)
//!        └─ V (Verbo): duerme
//!
//! Parameters:
//!     friendly-labels: see [formats](super)
//!     max-label: truncate node titles to this many characters (no limit by default)

use super::registry::{FormatError, Formatter};
use super::{friendly_labels, node_title};
use crate::svo::tree::DerivationNode;
use std::collections::HashMap;

fn truncate(s: &str, max_chars: Option<usize>) -> String {
    match max_chars {
        Some(max) if s.chars().count() > max => {
            let mut truncated = s.chars().take(max).collect::<String>();
            truncated.push('…');
            truncated
        }
        _ => s.to_string(),
    }
}

struct Style {
    friendly: bool,
    max_label: Option<usize>,
}

fn format_node(node: &DerivationNode, prefix: &str, is_last: bool, style: &Style) -> String {
    let connector = if is_last { "└─ " } else { "├─ " };
    let title = truncate(&node_title(node, style.friendly), style.max_label);
    let mut output = format!("{}{}{}\n", prefix, connector, title);

    let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
    let child_count = node.children().len();
    for (i, child) in node.children().iter().enumerate() {
        output.push_str(&format_node(child, &child_prefix, i == child_count - 1, style));
    }

    output
}

pub fn to_treeviz_str(tree: &DerivationNode) -> String {
    to_treeviz_str_with_params(tree, &HashMap::new())
}

pub fn to_treeviz_str_with_params(tree: &DerivationNode, params: &HashMap<String, String>) -> String {
    let style = Style {
        friendly: friendly_labels(params),
        max_label: params.get("max-label").and_then(|v| v.parse().ok()),
    };

    let mut output = format!("{}\n", truncate(&node_title(tree, style.friendly), style.max_label));
    let child_count = tree.children().len();
    for (i, child) in tree.children().iter().enumerate() {
        output.push_str(&format_node(child, "", i == child_count - 1, &style));
    }

    output
}

/// Formatter implementation for treeviz format
pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize_with_params(
        &self,
        tree: &DerivationNode,
        params: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with_params(tree, params))
    }

    fn description(&self) -> &str {
        "ASCII-art tree with box-drawing connectors"
    }
}
