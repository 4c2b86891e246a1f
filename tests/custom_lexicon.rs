//! Parsing with user-supplied lexicons

use std::sync::Arc;
use svo::svo::lexicon::{Category, Lexicon, LexiconError};
use svo::svo::parsing::{compare, Parser};
use svo::svo::testing::assert_parse;

const EXTENSION: &str = r#"
language: es
extends: default
categories:
  noun: [pájaro, árbol]
  verb: [canta]
"#;

#[test]
fn test_extended_lexicon_from_file() {
    let path = std::env::temp_dir().join(format!("svo-lexicon-{}.yaml", std::process::id()));
    std::fs::write(&path, EXTENSION).unwrap();
    let lexicon = Lexicon::load(&path);
    std::fs::remove_file(&path).unwrap();

    let parser = Parser::new(Arc::new(lexicon.unwrap()));
    assert_parse(&parser.parse("El pájaro canta."))
        .accepted()
        .tree(|s| {
            s.bracket("S(NP(Det:el, N:pajaro), VP(V:canta))");
        });
    // Built-in entries are still there
    assert_parse(&parser.parse("La niña mira el árbol.")).accepted();
    assert!(compare(&parser, "El pájaro canta el árbol.").agrees());
}

#[test]
fn test_replacing_lexicon_drops_defaults() {
    let lexicon = Lexicon::from_yaml_str(
        "categories:\n  proper_name: [Zoe]\n  verb: [baila]\n",
    )
    .unwrap();
    assert_eq!(lexicon.size(Category::Determiner), 0);

    let parser = Parser::new(Arc::new(lexicon));
    assert_parse(&parser.parse("Zoe baila.")).accepted();
    assert_parse(&parser.parse("Ana duerme.")).rejected();
}

#[test]
fn test_multi_word_entry_is_an_error() {
    let error = Lexicon::from_yaml_str("categories:\n  noun: [perro grande]\n").unwrap_err();
    assert_eq!(
        error,
        LexiconError::MultiWordForm(Category::Noun, "perro grande".to_string())
    );
}
