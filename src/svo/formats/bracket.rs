//! Bracket notation
//!
//! A compact one-line form, handy in test expectations and logs:
//! `S(NP(Det:la, N:nina), VP(V:mira, NP(Det:el, N:perro)))`.
//! Labels are always the short tags.

use super::registry::{FormatError, Formatter};
use crate::svo::tree::DerivationNode;
use std::collections::HashMap;

pub fn to_bracket_str(tree: &DerivationNode) -> String {
    match tree {
        DerivationNode::Leaf { text, .. } => format!("{}:{}", tree.label(), text),
        DerivationNode::Node { children, .. } => {
            let inner: Vec<String> = children.iter().map(to_bracket_str).collect();
            format!("{}({})", tree.label(), inner.join(", "))
        }
    }
}

pub struct BracketFormatter;

impl Formatter for BracketFormatter {
    fn name(&self) -> &str {
        "bracket"
    }

    fn serialize_with_params(
        &self,
        tree: &DerivationNode,
        _params: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        Ok(to_bracket_str(tree))
    }

    fn description(&self) -> &str {
        "One-line bracketed notation with short labels"
    }
}
