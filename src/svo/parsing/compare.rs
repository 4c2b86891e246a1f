//! Engine/reference comparison
//!
//! Runs a sentence through both the engine and the reference grammar and reports whether
//! they agree on acceptance and on the derivation tree. For the reference side it also
//! extracts the grammatical roles (subject, verb, object) from its tree, which is what the
//! comparison report prints.

use super::{reference, ParseResult, Parser};
use crate::svo::lexicon::Category;
use crate::svo::tree::DerivationNode;
use serde::Serialize;

/// Subject, verb and object words of an accepted sentence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Roles {
    pub subjects: Vec<String>,
    pub verbs: Vec<String>,
    pub objects: Vec<String>,
}

impl Roles {
    /// Read the roles off a sentence tree
    pub fn of(tree: &DerivationNode) -> Roles {
        let mut roles = Roles::default();
        let [subject, predicate] = tree.children() else {
            return roles;
        };
        roles.subjects = nominal_words(subject);
        for child in predicate.children() {
            match child {
                DerivationNode::Leaf { text, .. } => roles.verbs.push(text.clone()),
                DerivationNode::Node { .. } => roles.objects = nominal_words(child),
            }
        }
        roles
    }
}

/// Nouns, names and pronouns of a noun phrase, skipping determiners, adjectives and
/// conjunctions
fn nominal_words(phrase: &DerivationNode) -> Vec<String> {
    phrase
        .leaves()
        .into_iter()
        .filter_map(|leaf| match leaf {
            DerivationNode::Leaf { category, text } => match category {
                Category::Noun | Category::ProperName | Category::Pronoun => Some(text.clone()),
                _ => None,
            },
            DerivationNode::Node { .. } => None,
        })
        .collect()
}

/// Both parsers' verdicts on one sentence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub sentence: String,
    pub engine: ParseResult,
    pub reference: Option<DerivationNode>,
    /// Reference parser error messages, empty when it accepted
    pub reference_errors: Vec<String>,
}

impl Comparison {
    pub fn engine_accepted(&self) -> bool {
        self.engine.accepted
    }

    pub fn reference_accepted(&self) -> bool {
        self.reference.is_some()
    }

    pub fn acceptance_agrees(&self) -> bool {
        self.engine_accepted() == self.reference_accepted()
    }

    /// Trees agree when both are absent or both are equal
    pub fn tree_agrees(&self) -> bool {
        self.engine.tree == self.reference
    }

    pub fn agrees(&self) -> bool {
        self.acceptance_agrees() && self.tree_agrees()
    }

    pub fn reference_roles(&self) -> Option<Roles> {
        self.reference.as_ref().map(Roles::of)
    }
}

/// Parse `sentence` with both the engine and the reference grammar
pub fn compare(parser: &Parser, sentence: &str) -> Comparison {
    let engine = parser.parse(sentence);
    let lexicon = parser.shared_lexicon();
    let (reference, reference_errors) = match reference::parse(&lexicon, engine.tokens.clone()) {
        Ok(tree) => (Some(tree), Vec::new()),
        Err(errors) => (None, errors.iter().map(reference::describe).collect()),
    };

    let comparison = Comparison {
        sentence: sentence.to_string(),
        engine,
        reference,
        reference_errors,
    };
    if !comparison.agrees() {
        log::warn!("engine and reference disagree on {:?}", sentence);
    }
    comparison
}
