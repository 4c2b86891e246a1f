//! Lexicon
//!
//!     The lexicon is the closed vocabulary the grammar matches against: a mapping from
//!     lexical category to the set of recognized surface forms. It is built once and never
//!     mutated afterwards, so a single instance can be shared (through an `Arc`) by any number
//!     of parsers on any number of threads.
//!
//! Forms and Normalization
//!
//!     Every form is stored in its canonical spelling, the same one the tokenizer produces for
//!     sentence words (see [normalize_word](crate::svo::lexing::normalize_word)). Lexicon files
//!     can therefore spell "niña" or "nina"; both match the token `nina`.
//!
//! Overlapping Categories
//!
//!     Categories are not required to be disjoint. "el" is both a determiner and a pronoun,
//!     "tu" likewise. The lexicon answers membership questions only; which category wins for
//!     a given position is decided by the grammar's fixed alternative order.
//!
//! Configuration
//!
//!     The default Spanish lexicon lives in `defaults/lexicon.es.yaml` and is embedded into the
//!     binary. User lexicons use the same YAML shape. A file declaring `extends: default` is
//!     layered over the built-in lexicon instead of replacing it.

pub mod category;

pub use category::Category;

use crate::svo::lexing::{normalize, normalize_word};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

const DEFAULT_LEXICON_YAML: &str = include_str!("../../defaults/lexicon.es.yaml");

static DEFAULT_LEXICON: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    let lexicon = Lexicon::from_yaml_str(DEFAULT_LEXICON_YAML)
        .expect("embedded default lexicon must be valid");
    Arc::new(lexicon)
});

/// Language tag carried by a lexicon
///
/// Only Spanish is supported. The tag exists so lexicon files can declare what they contain;
/// it does not select a grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "es")]
    Spanish,
}

impl Language {
    /// ISO 639-1 code
    pub fn code(self) -> &'static str {
        match self {
            Language::Spanish => "es",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Guess the language of a sentence.
///
/// Always returns [`Language::Spanish`]: there is a single lexicon and a single grammar.
pub fn detect_language(_sentence: &str) -> Language {
    Language::Spanish
}

/// Errors that can occur while loading a lexicon
#[derive(Debug, Clone, PartialEq)]
pub enum LexiconError {
    /// The lexicon file could not be read
    Io(String),
    /// The lexicon file is not valid YAML for a lexicon
    Yaml(String),
    /// An entry normalizes to the empty string
    EmptyForm(Category),
    /// An entry normalizes to more than one token and could never match
    MultiWordForm(Category, String),
    /// `extends` names a base lexicon that does not exist
    UnknownBase(String),
}

impl fmt::Display for LexiconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexiconError::Io(msg) => write!(f, "Failed to read lexicon: {}", msg),
            LexiconError::Yaml(msg) => write!(f, "Invalid lexicon: {}", msg),
            LexiconError::EmptyForm(category) => {
                write!(f, "Empty form under category '{}'", category.tag())
            }
            LexiconError::MultiWordForm(category, form) => write!(
                f,
                "Form '{}' under category '{}' is more than one word",
                form,
                category.tag()
            ),
            LexiconError::UnknownBase(name) => write!(f, "Unknown base lexicon '{}'", name),
        }
    }
}

impl std::error::Error for LexiconError {}

/// On-disk shape of a lexicon
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconFile {
    #[serde(default)]
    pub language: Language,
    /// Name of a lexicon to layer this one over (only `default` exists)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default)]
    pub categories: BTreeMap<Category, Vec<String>>,
}

/// Immutable mapping from category to recognized forms
#[derive(Debug, Clone, PartialEq)]
pub struct Lexicon {
    language: Language,
    forms: HashMap<Category, HashSet<String>>,
}

impl Lexicon {
    /// Build a lexicon from a category-to-forms mapping.
    ///
    /// Forms are normalized on the way in. Entries that do not normalize to exactly one token
    /// are dropped.
    pub fn build<I, F, S>(category_to_forms: I) -> Self
    where
        I: IntoIterator<Item = (Category, F)>,
        F: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut forms: HashMap<Category, HashSet<String>> = HashMap::new();
        for (category, entries) in category_to_forms {
            let set = forms.entry(category).or_default();
            for entry in entries {
                let raw = entry.as_ref();
                match canonical_form(raw) {
                    Ok(form) => {
                        set.insert(form);
                    }
                    Err(_) => log::warn!("dropping {} form {:?}", category.tag(), raw),
                }
            }
        }
        Lexicon {
            language: Language::default(),
            forms,
        }
    }

    /// The built-in Spanish lexicon
    pub fn spanish() -> Arc<Lexicon> {
        Arc::clone(&DEFAULT_LEXICON)
    }

    /// Build a lexicon from a deserialized lexicon file
    pub fn from_file(file: LexiconFile) -> Result<Self, LexiconError> {
        for (category, entries) in &file.categories {
            for entry in entries {
                let form = canonical_form(entry).map_err(|count| match count {
                    0 => LexiconError::EmptyForm(*category),
                    _ => LexiconError::MultiWordForm(*category, entry.clone()),
                })?;
                if form != entry.as_str() {
                    log::debug!("lexicon form {:?} is stored as {:?}", entry, form);
                }
            }
        }

        let mut lexicon = match file.extends.as_deref() {
            None => Lexicon::build(std::iter::empty::<(Category, Vec<String>)>()),
            Some("default") => (*Lexicon::spanish()).clone(),
            Some(other) => return Err(LexiconError::UnknownBase(other.to_string())),
        };
        lexicon.extend(file.categories);
        lexicon.language = file.language;
        Ok(lexicon)
    }

    /// Parse a lexicon from YAML source
    pub fn from_yaml_str(source: &str) -> Result<Self, LexiconError> {
        let file: LexiconFile =
            serde_yaml::from_str(source).map_err(|e| LexiconError::Yaml(e.to_string()))?;
        Lexicon::from_file(file)
    }

    /// Read and parse a lexicon file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .map_err(|e| LexiconError::Io(format!("{}: {}", path.display(), e)))?;
        Lexicon::from_yaml_str(&source)
    }

    fn extend(&mut self, categories: BTreeMap<Category, Vec<String>>) {
        let added = Lexicon::build(categories);
        for (category, forms) in added.forms {
            self.forms.entry(category).or_default().extend(forms);
        }
    }

    /// Whether `token` is a form of `category`
    ///
    /// `token` must already be normalized; sentence tokens always are.
    pub fn classify(&self, token: &str, category: Category) -> bool {
        self.forms
            .get(&category)
            .is_some_and(|set| set.contains(token))
    }

    /// All categories a word belongs to, in [`Category::ALL`] order.
    ///
    /// Unlike [`classify`](Self::classify), the word is normalized first.
    pub fn categories_of(&self, word: &str) -> Vec<Category> {
        let form = normalize_word(word.trim());
        Category::ALL
            .into_iter()
            .filter(|c| self.classify(&form, *c))
            .collect()
    }

    /// Forms of a category, sorted
    pub fn forms(&self, category: Category) -> Vec<&str> {
        let mut forms: Vec<&str> = self
            .forms
            .get(&category)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default();
        forms.sort_unstable();
        forms
    }

    /// Number of forms registered under a category
    pub fn size(&self, category: Category) -> usize {
        self.forms.get(&category).map_or(0, HashSet::len)
    }

    /// Every form across all categories
    pub fn vocabulary(&self) -> BTreeSet<&str> {
        self.forms
            .values()
            .flat_map(|set| set.iter().map(String::as_str))
            .collect()
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

/// The single token an entry normalizes to, or the number of tokens it produced instead
fn canonical_form(entry: &str) -> Result<String, usize> {
    let mut tokens = normalize(entry);
    match tokens.len() {
        1 => Ok(tokens.remove(0).into_string()),
        count => Err(count),
    }
}
