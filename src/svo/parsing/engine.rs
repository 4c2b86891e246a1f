//! Grammar engine
//!
//!     A recursive matcher for the fixed grammar
//!
//!         S      := NP VP
//!         NP     := NPAtom (Conj NPAtom)*
//!         NPAtom := Name | Det? Adj* N | Pron
//!         VP     := V NP?
//!
//!     Each rule is a plain function `rule(ctx, start) -> Option<(node, end)>`. A rule never
//!     moves a shared cursor: it receives the position to start at and, on success, returns
//!     the position after its last token. Backtracking is therefore just the caller keeping
//!     its own `start`; a failed branch leaves nothing behind but trace events.
//!
//!     Every rule consumes at least one token before recursing, so matching terminates
//!     without a depth bound and runs in time linear in the number of tokens.
//!
//! Alternative Order
//!
//!     NPAtom tries its alternatives in a fixed order and the first full match wins:
//!         1. a proper name;
//!         2. an optional determiner, any number of adjectives, then a required noun;
//!         3. a pronoun.
//!     Forms listed under several categories ("el" is a determiner and a pronoun) are
//!     resolved by this order alone, so it must not change.

use crate::svo::lexicon::{Category, Lexicon};
use crate::svo::lexing::Token;
use crate::svo::trace::{TraceEvent, TraceSink};
use crate::svo::tree::{DerivationNode, Rule};

/// A matched subtree and the cursor just past it
pub type Matched = (DerivationNode, usize);

const EXPECTED_SUBJECT: &str = "NP (subject)";
const EXPECTED_PREDICATE: &str = "VP (verb + optional object)";
const EXPECTED_ATOM: &str = "Det/Adj/N, Name or Pron";
const EXPECTED_AFTER_CONJUNCTION: &str = "NP after conjunction";
const EXPECTED_VERB: &str = "Verb";

/// Per-call matching state
///
/// Holds everything a parse needs besides the cursor: the lexicon, the token sequence and
/// the trace sink. A context lives for exactly one parse.
pub struct Context<'a> {
    lexicon: &'a Lexicon,
    tokens: &'a [Token],
    sink: &'a mut dyn TraceSink,
}

impl<'a> Context<'a> {
    pub fn new(lexicon: &'a Lexicon, tokens: &'a [Token], sink: &'a mut dyn TraceSink) -> Self {
        Context {
            lexicon,
            tokens,
            sink,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        self.tokens
    }

    fn peek(&self, at: usize) -> Option<&'a Token> {
        self.tokens.get(at)
    }

    fn emit(&mut self, event: impl FnOnce() -> TraceEvent) {
        if self.sink.enabled() {
            self.sink.record(event());
        }
    }

    /// Match a single word of `category` at `at`
    fn accept(&mut self, at: usize, category: Category) -> Option<DerivationNode> {
        let token = self.peek(at)?;
        if !self.lexicon.classify(token, category) {
            return None;
        }
        self.emit(|| TraceEvent::Consume {
            index: at,
            category,
            token: token.clone(),
        });
        Some(DerivationNode::leaf(category, token.as_str()))
    }

    fn enter(&mut self, rule: Rule, at: usize) {
        self.emit(|| TraceEvent::Enter { index: at, rule });
    }

    fn exit(&mut self, rule: Rule, at: usize) {
        self.emit(|| TraceEvent::Exit { index: at, rule });
    }

    fn fail(&mut self, rule: Rule, at: usize, expected: &'static str) {
        let token = self.peek(at);
        log::trace!(
            "{} failed at {}: expected {}, found {:?}",
            rule,
            at,
            expected,
            token.map(Token::as_str)
        );
        self.emit(|| TraceEvent::Fail {
            index: at,
            rule,
            expected,
            token: token.cloned(),
        });
    }
}

/// `S := NP VP`
pub fn sentence(ctx: &mut Context, start: usize) -> Option<Matched> {
    ctx.enter(Rule::Sentence, start);

    let Some((subject, cursor)) = noun_phrase(ctx, start) else {
        ctx.fail(Rule::Sentence, start, EXPECTED_SUBJECT);
        return None;
    };
    let Some((predicate, end)) = verb_phrase(ctx, cursor) else {
        ctx.fail(Rule::Sentence, start, EXPECTED_PREDICATE);
        return None;
    };

    ctx.exit(Rule::Sentence, end);
    Some((
        DerivationNode::node(Rule::Sentence, vec![subject, predicate]),
        end,
    ))
}

/// `NP := NPAtom (Conj NPAtom)*`
///
/// A single atom is returned as is. Two or more atoms are wrapped in one `NP` whose children
/// alternate atom, conjunction, atom. A conjunction without a following atom fails the
/// whole phrase.
pub fn noun_phrase(ctx: &mut Context, start: usize) -> Option<Matched> {
    ctx.enter(Rule::NounPhrase, start);

    let Some((first, mut cursor)) = noun_phrase_atom(ctx, start) else {
        ctx.fail(Rule::NounPhrase, start, EXPECTED_ATOM);
        return None;
    };

    let mut parts = vec![first];
    while let Some(conjunction) = ctx.accept(cursor, Category::Conjunction) {
        match noun_phrase_atom(ctx, cursor + 1) {
            Some((atom, end)) => {
                parts.push(conjunction);
                parts.push(atom);
                cursor = end;
            }
            None => {
                ctx.fail(Rule::NounPhrase, start, EXPECTED_AFTER_CONJUNCTION);
                return None;
            }
        }
    }

    ctx.exit(Rule::NounPhrase, cursor);
    let phrase = if parts.len() == 1 {
        parts.remove(0)
    } else {
        DerivationNode::node(Rule::NounPhrase, parts)
    };
    Some((phrase, cursor))
}

/// `NPAtom := Name | Det? Adj* N | Pron`
pub fn noun_phrase_atom(ctx: &mut Context, start: usize) -> Option<Matched> {
    if let Some(name) = ctx.accept(start, Category::ProperName) {
        return Some((
            DerivationNode::node(Rule::NounPhrase, vec![name]),
            start + 1,
        ));
    }

    let mut cursor = start;
    let mut words = Vec::new();
    if let Some(determiner) = ctx.accept(cursor, Category::Determiner) {
        words.push(determiner);
        cursor += 1;
    }
    while let Some(adjective) = ctx.accept(cursor, Category::Adjective) {
        words.push(adjective);
        cursor += 1;
    }
    if let Some(noun) = ctx.accept(cursor, Category::Noun) {
        words.push(noun);
        return Some((DerivationNode::node(Rule::NounPhrase, words), cursor + 1));
    }

    // No noun: drop the determiner and adjectives and retry from `start`
    ctx.accept(start, Category::Pronoun)
        .map(|pronoun| (DerivationNode::node(Rule::NounPhrase, vec![pronoun]), start + 1))
}

/// `VP := V NP?`
pub fn verb_phrase(ctx: &mut Context, start: usize) -> Option<Matched> {
    ctx.enter(Rule::VerbPhrase, start);

    let Some(verb) = ctx.accept(start, Category::Verb) else {
        ctx.fail(Rule::VerbPhrase, start, EXPECTED_VERB);
        return None;
    };

    let (children, end) = match noun_phrase(ctx, start + 1) {
        Some((object, end)) => (vec![verb, object], end),
        None => (vec![verb], start + 1),
    };

    ctx.exit(Rule::VerbPhrase, end);
    Some((DerivationNode::node(Rule::VerbPhrase, children), end))
}
