//! Recorded trace sequences
//!
//! The trace lists rule entries, exits, failures and word matches in visitation order,
//! including the steps of branches that were rolled back.

use svo::svo::lexicon::Category;
use svo::svo::lexing::Token;
use svo::svo::parsing::{parse_with_trace, Parser};
use svo::svo::trace::{NoTrace, TraceEvent, TraceSink};
use svo::svo::tree::Rule;

/// Compact one-line rendering of an event: `kind:cursor[:detail]`
fn step(event: &TraceEvent) -> String {
    match event {
        TraceEvent::Start { index, tokens } => format!("start:{}:{}", index, tokens.len()),
        TraceEvent::Enter { index, rule } => format!("enter:{}:{}", index, rule),
        TraceEvent::Exit { index, rule } => format!("exit:{}:{}", index, rule),
        TraceEvent::Fail { index, rule, .. } => format!("fail:{}:{}", index, rule),
        TraceEvent::Consume {
            index,
            category,
            token,
        } => format!("consume:{}:{}:{}", index, category.tag(), token),
        TraceEvent::End {
            index, accepted, ..
        } => format!("end:{}:{}", index, accepted),
    }
}

fn steps(sentence: &str) -> Vec<String> {
    parse_with_trace(sentence).trace.iter().map(step).collect()
}

#[test]
fn test_intransitive_sequence() {
    assert_eq!(
        steps("Ana duerme."),
        vec![
            "start:0:2",
            "enter:0:S",
            "enter:0:NP",
            "consume:0:Name:ana",
            "exit:1:NP",
            "enter:1:VP",
            "consume:1:V:duerme",
            "enter:2:NP",
            "fail:2:NP",
            "exit:2:VP",
            "exit:2:S",
            "end:2:true",
        ]
    );
}

#[test]
fn test_dangling_conjunction_rolls_back_to_phrase_entry() {
    let traced = parse_with_trace("El perro y corren.");
    assert!(!traced.accepted());
    assert_eq!(
        traced.trace.iter().map(step).collect::<Vec<_>>(),
        vec![
            "start:0:4",
            "enter:0:S",
            "enter:0:NP",
            "consume:0:Det:el",
            "consume:1:N:perro",
            "consume:2:Conj:y",
            "fail:0:NP",
            "fail:0:S",
            "end:0:false",
        ]
    );

    let phrase_failure = traced
        .trace
        .iter()
        .find(|event| event.kind() == "fail" && event.rule() == Some(Rule::NounPhrase))
        .unwrap();
    assert_eq!(phrase_failure.expected(), Some("NP after conjunction"));
    assert_eq!(phrase_failure.token().map(Token::as_str), Some("el"));
}

#[test]
fn test_rolled_back_determiner_stays_in_trace() {
    // "el" first matches as a determiner, finds no noun and is retried as a pronoun
    let consumes: Vec<String> = steps("Juan ve el.")
        .into_iter()
        .filter(|s| s.starts_with("consume"))
        .collect();
    assert_eq!(
        consumes,
        vec![
            "consume:0:Name:juan",
            "consume:1:V:ve",
            "consume:2:Det:el",
            "consume:2:Pron:el",
        ]
    );
}

#[test]
fn test_failure_at_end_of_input_has_no_token() {
    let traced = parse_with_trace("Ana duerme.");
    let failure = traced
        .trace
        .iter()
        .find(|event| event.kind() == "fail")
        .unwrap();
    assert_eq!(failure.cursor(), 2);
    assert_eq!(failure.token(), None);
    assert_eq!(failure.expected(), Some("Det/Adj/N, Name or Pron"));
}

#[test]
fn test_verb_first_failure_reports_found_token() {
    let traced = parse_with_trace("Corre la niña el perro.");
    let failures: Vec<&TraceEvent> = traced
        .trace
        .iter()
        .filter(|event| event.kind() == "fail")
        .collect();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[1].rule(), Some(Rule::Sentence));
    assert_eq!(failures[1].expected(), Some("NP (subject)"));
    assert_eq!(failures[1].token().map(Token::as_str), Some("corre"));
}

#[test]
fn test_trace_has_no_effect_on_outcome() {
    let parser = Parser::default();
    for sentence in [
        "La niña mira el perro.",
        "El perro y corren.",
        "Juan ama Maria ayer.",
        "",
    ] {
        let traced = parser.parse_with_trace(sentence);
        assert_eq!(traced.result, parser.parse(sentence));
        assert_eq!(traced.trace.first().map(TraceEvent::kind), Some("start"));
        assert_eq!(traced.trace.last().map(TraceEvent::kind), Some("end"));
    }
}

#[test]
fn test_consume_events_carry_categories() {
    let traced = parse_with_trace("La niña mira el perro.");
    let categories: Vec<Category> = traced
        .trace
        .iter()
        .filter_map(TraceEvent::category)
        .collect();
    assert_eq!(
        categories,
        vec![
            Category::Determiner,
            Category::Noun,
            Category::Verb,
            Category::Determiner,
            Category::Noun,
        ]
    );
}

/// A sink that counts events without keeping them
struct Counter(usize);

impl TraceSink for Counter {
    fn record(&mut self, _event: TraceEvent) {
        self.0 += 1;
    }
}

#[test]
fn test_custom_sink() {
    let parser = Parser::default();
    let mut counter = Counter(0);
    let result = parser.parse_with_sink("Ana duerme.", &mut counter);
    assert!(result.accepted);
    assert_eq!(counter.0, 12);

    let mut disabled = NoTrace;
    assert!(!disabled.enabled());
    assert_eq!(parser.parse_with_sink("Ana duerme.", &mut disabled), result);
}
