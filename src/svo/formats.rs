//! Output formats for derivation trees and traces
//!
//! This module contains the renderers that turn parse results into text:
//! - Derivation trees to several formats (indented, treeviz, bracket, json, svg), all
//!   registered in a [`FormatRegistry`]
//! - Traces to a fixed-width table (trace_table)
//!
//! Tree formatters only walk the tree through [`DerivationNode::label`] and
//! [`DerivationNode::children`], plus the leaf text.
//!
//! Common parameter, read by the human-facing formats (indented, treeviz, svg):
//!     friendly-labels: "true" (default) prints `NP (Sintagma nominal)`, "false" prints `NP`

pub mod bracket;
pub mod indented;
pub mod json;
pub mod registry;
pub mod svg;
pub mod trace_table;
pub mod treeviz;

pub use bracket::{to_bracket_str, BracketFormatter};
pub use indented::{format_tree, format_tree_with_params, IndentedFormatter};
pub use json::{to_json_str, JsonFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use svg::{to_svg_str, SvgFormatter};
pub use trace_table::format_trace;
pub use treeviz::{to_treeviz_str, to_treeviz_str_with_params, TreevizFormatter};

use crate::svo::tree::DerivationNode;
use std::collections::HashMap;

/// Whether `friendly-labels` is on (it is unless set to "false")
pub(crate) fn friendly_labels(params: &HashMap<String, String>) -> bool {
    params
        .get("friendly-labels")
        .map(|v| v != "false")
        .unwrap_or(true)
}

/// Node title: the label, optionally with its display name, and the word for leaves
pub(crate) fn node_title(node: &DerivationNode, friendly: bool) -> String {
    let label = if friendly {
        node.display_label()
    } else {
        node.label().to_string()
    };
    match node.text() {
        Some(text) => format!("{}: {}", label, text),
        None => label,
    }
}
