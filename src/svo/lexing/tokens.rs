//! Token definitions
//!
//! Scanning is done by a logos lexer that knows only one thing: a maximal run of word
//! characters is a word, everything else separates words. Normalization (case folding and
//! diacritic removal) happens afterwards, on the text of each word. See
//! [normalization](super::normalization).

use logos::Logos;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Raw scanner output
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[^\w]+")]
pub enum WordToken {
    #[regex(r"\w+")]
    Word,
}

/// A normalized sentence token
///
/// Tokens are immutable and hold the canonical spelling that the lexicon stores, e.g. `nina`
/// for the input "Niña".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Token(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for Token {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Scan a string into word spans, discarding separators
pub fn scan_words(source: &str) -> Vec<(WordToken, logos::Span)> {
    let mut lexer = WordToken::lexer(source);
    let mut words = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            words.push((token, lexer.span()));
        }
    }

    words
}
