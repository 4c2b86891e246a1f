//! Property-based tests for normalization and the grammar engine
//!
//! Sentences are drawn from the built-in vocabulary so that a useful share of them parses,
//! plus arbitrary strings for the tokenizer.

use proptest::prelude::*;
use std::sync::Arc;
use svo::svo::lexicon::{Category, Lexicon};
use svo::svo::lexing::{normalize, Token};
use svo::svo::parsing::{compare, Parser};
use svo::svo::trace::NoTrace;
use svo::svo::tree::DerivationNode;

fn vocabulary() -> Vec<String> {
    let mut words: Vec<String> = Lexicon::spanish()
        .vocabulary()
        .into_iter()
        .map(str::to_string)
        .collect();
    // Something outside the lexicon
    words.push("ayer".to_string());
    words
}

/// Sentences of up to eight vocabulary words
fn vocabulary_sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vocabulary()), 0..8).prop_map(|w| w.join(" "))
}

/// Sentences following the `NP VP` shape, which are accepted far more often
fn shaped_sentence() -> impl Strategy<Value = String> {
    let pick = |category: Category| {
        let forms: Vec<String> = Lexicon::spanish()
            .forms(category)
            .into_iter()
            .map(str::to_string)
            .collect();
        prop::sample::select(forms)
    };
    let atom = prop_oneof![
        pick(Category::ProperName),
        (pick(Category::Determiner), pick(Category::Noun)).prop_map(|(d, n)| format!("{} {}", d, n)),
        (pick(Category::Adjective), pick(Category::Noun)).prop_map(|(a, n)| format!("{} {}", a, n)),
        pick(Category::Pronoun),
    ];
    (
        prop::collection::vec(atom.clone(), 1..3),
        pick(Category::Verb),
        prop::collection::vec(atom, 0..3),
    )
        .prop_map(|(subject, verb, object)| {
            let mut sentence = subject.join(" y ");
            sentence.push(' ');
            sentence.push_str(&verb);
            if !object.is_empty() {
                sentence.push(' ');
                sentence.push_str(&object.join(" y "));
            }
            sentence.push('.');
            sentence
        })
}

proptest! {
    #[test]
    fn normalize_is_pure(s in ".{0,60}") {
        prop_assert_eq!(normalize(&s), normalize(&s));
    }

    #[test]
    fn normalized_tokens_are_canonical(s in "[a-zA-Z0-9áéíóúüñÁÉÍÓÚÑ¿¡?!.,;: ]{0,60}") {
        for token in normalize(&s) {
            prop_assert!(!token.is_empty());
            prop_assert_eq!(token.to_lowercase(), token.as_str());
            prop_assert!(!token.chars().any(char::is_whitespace));
            prop_assert_eq!(normalize(&token), vec![token.clone()]);
        }
    }

    #[test]
    fn parse_is_idempotent(sentence in vocabulary_sentence()) {
        let parser = Parser::default();
        prop_assert_eq!(parser.parse(&sentence), parser.parse(&sentence));
    }

    #[test]
    fn accepted_sentences_consume_every_token(sentence in vocabulary_sentence()) {
        let result = Parser::default().parse(&sentence);
        if result.accepted {
            prop_assert_eq!(result.consumed, result.total());
            let tree = result.tree.as_ref().unwrap();
            prop_assert_eq!(tree.token_count(), result.total());
        } else {
            prop_assert!(result.tree.is_none());
        }
    }

    #[test]
    fn shaped_sentences_are_accepted(sentence in shaped_sentence()) {
        let result = Parser::default().parse(&sentence);
        prop_assert!(result.accepted, "rejected {:?}", sentence);
        let words: Vec<String> = result
            .tree
            .as_ref()
            .unwrap()
            .words()
            .into_iter()
            .map(str::to_string)
            .collect();
        let tokens: Vec<String> = result.tokens.iter().map(|t| t.to_string()).collect();
        prop_assert_eq!(words, tokens);
    }

    #[test]
    fn engine_agrees_with_reference(sentence in vocabulary_sentence()) {
        let comparison = compare(&Parser::default(), &sentence);
        prop_assert!(comparison.agrees(), "disagreement on {:?}", sentence);
    }

    #[test]
    fn engine_agrees_with_reference_on_shaped(sentence in shaped_sentence()) {
        let comparison = compare(&Parser::default(), &sentence);
        prop_assert!(comparison.agrees(), "disagreement on {:?}", sentence);
    }

    /// A form listed as a proper name and under any other category resolves as a name
    #[test]
    fn proper_name_has_priority(
        other in prop::sample::select(vec![
            Category::Determiner,
            Category::Adjective,
            Category::Noun,
            Category::Pronoun,
        ]),
    ) {
        let lexicon = Lexicon::build([
            (Category::ProperName, vec!["sol"]),
            (other, vec!["sol"]),
            (Category::Noun, vec!["casa"]),
            (Category::Verb, vec!["brilla"]),
        ]);
        let parser = Parser::new(Arc::new(lexicon));
        let result = parser.parse_tokens(vec![Token::new("sol"), Token::new("brilla")], &mut NoTrace);
        prop_assert!(result.accepted);
        let tree = result.tree.unwrap();
        let subject = &tree.children()[0];
        let leaf = &subject.children()[0];
        let is_name = matches!(
            leaf,
            DerivationNode::Leaf { category: Category::ProperName, .. }
        );
        prop_assert!(is_name, "expected a proper name leaf, found {:?}", leaf);
    }
}
