//! Derivation tree model
//!
//!     A successful parse produces a [`DerivationNode`]: a tagged tree whose leaves are the
//!     matched words (one token each) and whose internal nodes are grammar rule applications.
//!
//!     Shape produced by the grammar:
//!
//!         S
//!         ├─ NP                one noun phrase atom, or a coordination
//!         └─ VP
//!            ├─ V
//!            └─ NP?            the object, when present
//!
//!     A noun phrase atom is always an `NP` node over its words (`Name`, `Pron`, or
//!     `Det? Adj* N`). A coordination is an `NP` node whose children interleave atoms and
//!     `Conj` leaves in encounter order.
//!
//!     Renderers only rely on [`DerivationNode::label`] and [`DerivationNode::children`], so
//!     the tree can be walked without matching on the variants.

use crate::svo::lexicon::Category;
use serde::Serialize;
use std::fmt;

/// A grammar rule that produces an internal node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rule {
    #[serde(rename = "S")]
    Sentence,
    #[serde(rename = "NP")]
    NounPhrase,
    #[serde(rename = "VP")]
    VerbPhrase,
}

impl Rule {
    /// Short rule name used in trees and traces
    pub fn name(self) -> &'static str {
        match self {
            Rule::Sentence => "S",
            Rule::NounPhrase => "NP",
            Rule::VerbPhrase => "VP",
        }
    }

    /// Spanish grammatical term for the rule
    pub fn display_name(self) -> &'static str {
        match self {
            Rule::Sentence => "Oración",
            Rule::NounPhrase => "Sintagma nominal",
            Rule::VerbPhrase => "Sintagma verbal",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of a derivation tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DerivationNode {
    /// A matched word
    Leaf { category: Category, text: String },
    /// A rule application over its constituents
    Node {
        rule: Rule,
        children: Vec<DerivationNode>,
    },
}

impl DerivationNode {
    pub fn leaf(category: Category, text: impl Into<String>) -> Self {
        DerivationNode::Leaf {
            category,
            text: text.into(),
        }
    }

    pub fn node(rule: Rule, children: Vec<DerivationNode>) -> Self {
        DerivationNode::Node { rule, children }
    }

    /// Short label: the rule name or the category tag
    pub fn label(&self) -> &'static str {
        match self {
            DerivationNode::Leaf { category, .. } => category.tag(),
            DerivationNode::Node { rule, .. } => rule.name(),
        }
    }

    /// Label with its Spanish display name, e.g. `NP (Sintagma nominal)`
    pub fn display_label(&self) -> String {
        let friendly = match self {
            DerivationNode::Leaf { category, .. } => category.display_name(),
            DerivationNode::Node { rule, .. } => rule.display_name(),
        };
        format!("{} ({})", self.label(), friendly)
    }

    /// Ordered children (empty for leaves)
    pub fn children(&self) -> &[DerivationNode] {
        match self {
            DerivationNode::Leaf { .. } => &[],
            DerivationNode::Node { children, .. } => children,
        }
    }

    /// Surface text of a leaf
    pub fn text(&self) -> Option<&str> {
        match self {
            DerivationNode::Leaf { text, .. } => Some(text),
            DerivationNode::Node { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, DerivationNode::Leaf { .. })
    }

    /// Leaves in left-to-right order
    pub fn leaves(&self) -> Vec<&DerivationNode> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a DerivationNode>) {
        match self {
            DerivationNode::Leaf { .. } => out.push(self),
            DerivationNode::Node { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Number of tokens this subtree covers
    pub fn token_count(&self) -> usize {
        self.leaves().len()
    }

    /// The words this subtree covers, in order
    pub fn words(&self) -> Vec<&str> {
        self.leaves().into_iter().filter_map(|l| l.text()).collect()
    }

    /// Nesting depth (a leaf has depth 1)
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(|c| c.depth()).max().unwrap_or(0)
    }
}
