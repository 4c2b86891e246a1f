//! Parsing module for SVO sentences
//!
//! This module turns a raw sentence into an accept/reject decision and, on acceptance, a
//! derivation tree:
//! 1. **Lexing**: normalization of the sentence into tokens (see [lexing](crate::svo::lexing))
//! 2. **Matching**: the recursive grammar engine over those tokens ([engine])
//! 3. **Acceptance**: a sentence is accepted only if `S` matched *and* consumed every token
//!
//! ## Independent Implementations
//!
//! - **Engine**: hand-written backtracking matcher with tracing (engine.rs)
//! - **Reference**: chumsky combinator grammar (reference.rs), used to cross-check the engine
//!
//! No code is shared between the two besides the lexicon and the tree model.
//!
//! ## Concurrency
//!
//! A [`Parser`] holds nothing but a shared, immutable lexicon. All per-call state lives in an
//! [`engine::Context`] created for the call, so one parser can serve any number of threads.

pub mod compare;
pub mod engine;
pub mod reference;

pub use compare::{compare, Comparison};

use crate::svo::lexicon::Lexicon;
use crate::svo::lexing::{normalize, Token};
use crate::svo::trace::{NoTrace, TraceEvent, TraceSink};
use crate::svo::tree::DerivationNode;
use serde::Serialize;
use std::sync::Arc;

/// Outcome of parsing one sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub accepted: bool,
    /// The derivation tree; present only when the sentence is accepted
    pub tree: Option<DerivationNode>,
    /// Tokens covered by the sentence rule (0 when it did not match at all)
    pub consumed: usize,
    pub tokens: Vec<Token>,
}

impl ParseResult {
    /// Number of tokens in the normalized sentence
    pub fn total(&self) -> usize {
        self.tokens.len()
    }
}

/// A parse together with its recorded trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TracedParse {
    pub result: ParseResult,
    pub trace: Vec<TraceEvent>,
}

impl TracedParse {
    pub fn accepted(&self) -> bool {
        self.result.accepted
    }

    pub fn tree(&self) -> Option<&DerivationNode> {
        self.result.tree.as_ref()
    }
}

/// Sentence recognizer bound to a lexicon
#[derive(Debug, Clone)]
pub struct Parser {
    lexicon: Arc<Lexicon>,
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new(Lexicon::spanish())
    }
}

impl Parser {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Parser { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn shared_lexicon(&self) -> Arc<Lexicon> {
        Arc::clone(&self.lexicon)
    }

    /// Accept or reject a sentence
    pub fn parse(&self, sentence: &str) -> ParseResult {
        self.parse_with_sink(sentence, &mut NoTrace)
    }

    /// Accept or reject a sentence, recording every step of the engine
    pub fn parse_with_trace(&self, sentence: &str) -> TracedParse {
        let mut trace = Vec::new();
        let result = self.parse_with_sink(sentence, &mut trace);
        TracedParse { result, trace }
    }

    /// Accept or reject a sentence, reporting steps to `sink`
    pub fn parse_with_sink(&self, sentence: &str, sink: &mut dyn TraceSink) -> ParseResult {
        self.parse_tokens(normalize(sentence), sink)
    }

    /// Run the grammar over already normalized tokens
    pub fn parse_tokens(&self, tokens: Vec<Token>, sink: &mut dyn TraceSink) -> ParseResult {
        if sink.enabled() {
            sink.record(TraceEvent::Start {
                index: 0,
                tokens: tokens.clone(),
            });
        }

        let matched = {
            let mut ctx = engine::Context::new(&self.lexicon, &tokens, sink);
            engine::sentence(&mut ctx, 0)
        };
        let consumed = matched.as_ref().map_or(0, |(_, end)| *end);
        let accepted = matched.is_some() && consumed == tokens.len();

        if sink.enabled() {
            sink.record(TraceEvent::End {
                index: consumed,
                accepted,
                consumed,
                total: tokens.len(),
            });
        }
        log::debug!(
            "parsed {} tokens: accepted={} consumed={}",
            tokens.len(),
            accepted,
            consumed
        );

        ParseResult {
            accepted,
            tree: matched.filter(|_| accepted).map(|(tree, _)| tree),
            consumed,
            tokens,
        }
    }
}

/// Parse with the built-in Spanish lexicon
pub fn parse(sentence: &str) -> ParseResult {
    Parser::default().parse(sentence)
}

/// Parse with the built-in Spanish lexicon, recording a trace
pub fn parse_with_trace(sentence: &str) -> TracedParse {
    Parser::default().parse_with_trace(sentence)
}
