//! End-to-end sentence scenarios
//!
//! Each case goes through the full pipeline (normalization, engine, tree) and checks the
//! tokens, the verdict and the derivation in bracket notation.

use rstest::rstest;
use svo::svo::lexicon::Category;
use svo::svo::parsing::{parse, Parser};
use svo::svo::testing::{assert_parse, assert_tree};

#[rstest]
#[case::det_noun_object(
    "La niña mira el perro.",
    &["la", "nina", "mira", "el", "perro"],
    "S(NP(Det:la, N:nina), VP(V:mira, NP(Det:el, N:perro)))"
)]
#[case::proper_names(
    "Juan ama Maria.",
    &["juan", "ama", "maria"],
    "S(NP(Name:juan), VP(V:ama, NP(Name:maria)))"
)]
#[case::intransitive("Ana duerme.", &["ana", "duerme"], "S(NP(Name:ana), VP(V:duerme))")]
#[case::coordinated_subject(
    "El perro y Juan corren.",
    &["el", "perro", "y", "juan", "corren"],
    "S(NP(NP(Det:el, N:perro), Conj:y, NP(Name:juan)), VP(V:corren))"
)]
#[case::pronoun_object(
    "Juan ve el.",
    &["juan", "ve", "el"],
    "S(NP(Name:juan), VP(V:ve, NP(Pron:el)))"
)]
#[case::adjectives(
    "La pequeña feliz niña mira el gato.",
    &["la", "pequena", "feliz", "nina", "mira", "el", "gato"],
    "S(NP(Det:la, Adj:pequena, Adj:feliz, N:nina), VP(V:mira, NP(Det:el, N:gato)))"
)]
fn test_accepted(#[case] sentence: &str, #[case] tokens: &[&str], #[case] bracket: &str) {
    let result = parse(sentence);
    assert_parse(&result)
        .accepted()
        .tokens(tokens)
        .consumed(tokens.len())
        .tree(|s| {
            s.bracket(bracket);
        });
}

#[rstest]
#[case::verb_first("Corre la niña el perro.", 0)]
#[case::empty("", 0)]
#[case::punctuation_only("¿?", 0)]
#[case::dangling_conjunction("El perro y corren.", 0)]
#[case::trailing_unknown("Juan ama Maria ayer.", 3)]
#[case::missing_verb("La niña perro.", 0)]
fn test_rejected(#[case] sentence: &str, #[case] consumed: usize) {
    let result = parse(sentence);
    assert_parse(&result).rejected().consumed(consumed);
}

#[test]
fn test_empty_sentence_has_no_tokens() {
    let result = parse("");
    assert_parse(&result).rejected().tokens(&[]);
}

#[test]
fn test_coordinated_subject_structure() {
    let result = parse("El perro y Juan corren.");
    assert_parse(&result).accepted().tree(|s| {
        s.label("S")
            .child_count(2)
            .child(0, |np| {
                np.label("NP")
                    .child_labels(&["NP", "Conj", "NP"])
                    .words(&["el", "perro", "y", "juan"])
                    .child(1, |conj| {
                        conj.leaf(Category::Conjunction, "y");
                    })
                    .child(2, |juan| {
                        juan.child_count(1).child(0, |name| {
                            name.leaf(Category::ProperName, "juan");
                        });
                    });
            })
            .child(1, |vp| {
                vp.label("VP").child_count(1);
            });
    });
}

#[test]
fn test_three_way_coordination_stays_flat() {
    let result = parse("Sofía y Pedro y Carmen hablan.");
    let tree = result.tree.as_ref().expect("accepted");
    assert_tree(tree).child(0, |np| {
        np.child_labels(&["NP", "Conj", "NP", "Conj", "NP"]);
    });
}

#[test]
fn test_object_coordination() {
    let result = parse("Los estudiantes escriben los libros y las casas.");
    assert_parse(&result).accepted().tree(|s| {
        s.child(1, |vp| {
            vp.child_labels(&["V", "NP"]).child(1, |object| {
                object.bracket("NP(NP(Det:los, N:libros), Conj:y, NP(Det:las, N:casas))");
            });
        });
    });
}

#[test]
fn test_parse_is_idempotent() {
    let parser = Parser::default();
    for sentence in ["La niña mira el perro.", "Corre la niña el perro.", ""] {
        assert_eq!(parser.parse(sentence), parser.parse(sentence));
    }
}
