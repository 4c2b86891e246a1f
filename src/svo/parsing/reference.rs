//! Reference combinator grammar
//!
//! A second, independent implementation of the sentence grammar built from chumsky
//! combinators. It shares the lexicon and the tree model with the engine and nothing else:
//! no tracing, no cursor bookkeeping. Its only job is to give the engine something to be
//! checked against (see [compare](super::compare)).
//!
//! The combinators are ordered choice with no backtracking into a branch that already
//! succeeded, which is the same discipline the engine follows. The one place where plain
//! combinators differ is a conjunction with no noun phrase after it: `repeated()` would
//! quietly stop before the conjunction, while the grammar fails the whole phrase. The noun
//! phrase parser therefore looks for a dangling conjunction and fails explicitly.

use chumsky::error::SimpleReason;
use chumsky::prelude::*;
use chumsky::primitive::filter;
use std::sync::Arc;

use crate::svo::lexicon::{Category, Lexicon};
use crate::svo::lexing::Token;
use crate::svo::tree::{DerivationNode, Rule};

/// Type alias for parser error
pub type ParserError = Simple<Token>;

/// Match one word of `category`, producing its leaf
fn word(
    lexicon: &Arc<Lexicon>,
    category: Category,
) -> impl Parser<Token, DerivationNode, Error = ParserError> + Clone {
    let lexicon = Arc::clone(lexicon);
    filter(move |token: &Token| lexicon.classify(token, category))
        .map(move |token: Token| DerivationNode::leaf(category, token.into_string()))
}

/// `Name | Det? Adj* N | Pron`, each wrapped in an `NP` node
fn noun_phrase_atom(
    lexicon: &Arc<Lexicon>,
) -> impl Parser<Token, DerivationNode, Error = ParserError> + Clone {
    let name = word(lexicon, Category::ProperName)
        .map(|leaf| DerivationNode::node(Rule::NounPhrase, vec![leaf]));

    let nominal = word(lexicon, Category::Determiner)
        .or_not()
        .then(word(lexicon, Category::Adjective).repeated())
        .then(word(lexicon, Category::Noun))
        .map(|((determiner, adjectives), noun)| {
            let mut children: Vec<DerivationNode> = determiner.into_iter().collect();
            children.extend(adjectives);
            children.push(noun);
            DerivationNode::node(Rule::NounPhrase, children)
        });

    let pronoun = word(lexicon, Category::Pronoun)
        .map(|leaf| DerivationNode::node(Rule::NounPhrase, vec![leaf]));

    name.or(nominal).or(pronoun)
}

/// `NPAtom (Conj NPAtom)*`
fn noun_phrase(
    lexicon: &Arc<Lexicon>,
) -> impl Parser<Token, DerivationNode, Error = ParserError> + Clone {
    let atom = noun_phrase_atom(lexicon).boxed();
    let conjunction = word(lexicon, Category::Conjunction);

    atom.clone()
        .then(conjunction.clone().then(atom).repeated())
        .then(conjunction.or_not())
        .try_map(|((first, rest), dangling), span| {
            if dangling.is_some() {
                return Err(Simple::custom(
                    span,
                    "conjunction without a following noun phrase",
                ));
            }
            if rest.is_empty() {
                return Ok(first);
            }
            let mut children = vec![first];
            for (conjunction, atom) in rest {
                children.push(conjunction);
                children.push(atom);
            }
            Ok(DerivationNode::node(Rule::NounPhrase, children))
        })
}

/// `V NP?`
fn verb_phrase(
    lexicon: &Arc<Lexicon>,
) -> impl Parser<Token, DerivationNode, Error = ParserError> + Clone {
    word(lexicon, Category::Verb)
        .then(noun_phrase(lexicon).or_not())
        .map(|(verb, object)| {
            let mut children = vec![verb];
            children.extend(object);
            DerivationNode::node(Rule::VerbPhrase, children)
        })
}

/// `NP VP`, anchored at the end of input
pub fn sentence(
    lexicon: &Arc<Lexicon>,
) -> impl Parser<Token, DerivationNode, Error = ParserError> + Clone {
    noun_phrase(lexicon)
        .then(verb_phrase(lexicon))
        .then_ignore(end())
        .map(|(subject, predicate)| DerivationNode::node(Rule::Sentence, vec![subject, predicate]))
}

/// Parse normalized tokens with the reference grammar
pub fn parse(lexicon: &Arc<Lexicon>, tokens: Vec<Token>) -> Result<DerivationNode, Vec<ParserError>> {
    sentence(lexicon).parse(tokens)
}

/// One-line description of a reference parser error
pub fn describe(error: &ParserError) -> String {
    let at = error.span().start;
    match error.reason() {
        SimpleReason::Custom(message) => format!("{} at token {}", message, at),
        _ => {
            let found = error.found().map_or("end of input", Token::as_str);
            format!("unexpected {} at token {}", found, at)
        }
    }
}
