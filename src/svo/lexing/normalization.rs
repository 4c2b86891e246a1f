//! Sentence normalization
//!
//! `normalize` is a pure function from a raw sentence to the token sequence the grammar
//! sees. The steps are:
//!     1. Trim surrounding whitespace and lowercase.
//!     2. Strip a trailing run of sentence-final punctuation (`. , ? ! ; :`).
//!     3. Scan maximal runs of word characters, dropping every other character.
//!     4. Remove diacritics from each word: canonical decomposition (NFD), then deletion of
//!        every character with a non-zero canonical combining class.
//!
//! A word made only of combining marks vanishes in step 4 and yields no token.

use super::tokens::{scan_words, Token};
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

static TRAILING_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.?,!;: ]+$").expect("trailing punctuation pattern"));

/// Turn a raw sentence into normalized tokens
pub fn normalize(sentence: &str) -> Vec<Token> {
    let lowered = sentence.trim().to_lowercase();
    let stripped = TRAILING_PUNCTUATION.replace(&lowered, "");

    scan_words(&stripped)
        .into_iter()
        .map(|(_, span)| strip_diacritics(&stripped[span]))
        .filter(|word| !word.is_empty())
        .map(Token::new)
        .collect()
}

/// Canonical spelling of a single word: lowercase, no diacritics
pub fn normalize_word(word: &str) -> String {
    strip_diacritics(&word.to_lowercase())
}

/// Decompose and drop combining marks ("niña" becomes "nina")
pub fn strip_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .collect()
}
