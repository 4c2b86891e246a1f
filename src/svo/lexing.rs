//! Lexing
//!
//!     This module turns a raw sentence into the token sequence the grammar engine matches.
//!     It is a pure function of its input: no lexicon lookup happens here, and identical
//!     sentences always produce identical tokens.
//!
//! The Lexing Pipeline
//!
//!     1. Word scanning with a logos lexer. See [tokens](tokens). Any run of word
//!        characters is a word; punctuation and whitespace only separate words.
//!
//!     2. Normalization. See [normalization](normalization). Words are lowercased and
//!        stripped of diacritics so that "Niña", "niña" and "nina" become the same token.
//!
//!     The lexicon stores its forms in the same canonical spelling (via [normalize_word]),
//!     which is what makes plain string membership enough for classification.
//!
//! Empty input, or input made only of punctuation, yields no tokens. The grammar rejects
//! an empty token sequence because a noun phrase needs at least one word.

pub mod normalization;
pub mod tokens;

pub use normalization::{normalize, normalize_word, strip_diacritics};
pub use tokens::{scan_words, Token, WordToken};
