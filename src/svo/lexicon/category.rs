//! Lexical categories
//!
//!     Every surface form in the lexicon belongs to one or more of these categories. The
//!     short tag (`Det`, `N`, ...) is what trees and traces print; the display name is the
//!     Spanish grammatical term shown by the human-facing renderers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A lexical category recognized by the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Determiner,
    Adjective,
    Noun,
    Verb,
    ProperName,
    Pronoun,
    Conjunction,
}

impl Category {
    /// All categories, in lexicon file order
    pub const ALL: [Category; 7] = [
        Category::Determiner,
        Category::Adjective,
        Category::Noun,
        Category::Verb,
        Category::ProperName,
        Category::Pronoun,
        Category::Conjunction,
    ];

    /// Short tag used in trees and traces
    pub fn tag(self) -> &'static str {
        match self {
            Category::Determiner => "Det",
            Category::Adjective => "Adj",
            Category::Noun => "N",
            Category::Verb => "V",
            Category::ProperName => "Name",
            Category::Pronoun => "Pron",
            Category::Conjunction => "Conj",
        }
    }

    /// Spanish grammatical term for the category
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Determiner => "Determinante",
            Category::Adjective => "Adjetivo",
            Category::Noun => "Sustantivo",
            Category::Verb => "Verbo",
            Category::ProperName => "Nombre propio",
            Category::Pronoun => "Pronombre",
            Category::Conjunction => "Conjunción",
        }
    }

    /// Look a category up by its short tag
    pub fn from_tag(tag: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.tag() == tag)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
