//! Grammar trace
//!
//!     The trace is an append-only record of what the engine did while matching a sentence:
//!     which rules it entered, left or abandoned, and which tokens it consumed. Events from
//!     branches that were later rolled back stay in the record, in visitation order, which is
//!     what makes the trace useful for explaining a rejection.
//!
//!     Recording is strictly observational. The engine writes into a [`TraceSink`] that it
//!     never reads back, so the outcome of a parse is the same with or without a sink.
//!
//! Event Sequence
//!
//!     Every traced parse starts with [`TraceEvent::Start`] and ends with [`TraceEvent::End`].
//!     In between:
//!         - `S`, `NP` and `VP` emit `Enter`, then either `Exit` or `Fail`.
//!         - Each matched word emits `Consume` with the cursor it was found at.
//!         - `Fail` carries the cursor the rule restored, a description of what was expected,
//!           and the token found at that cursor (none at end of input).
//!
//!     Noun phrase atoms do not emit enter/exit events of their own; their word matches show
//!     up as `Consume` events inside the enclosing `NP`.

use crate::svo::lexicon::Category;
use crate::svo::lexing::Token;
use crate::svo::tree::Rule;
use serde::Serialize;

/// A single recorded step of a parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum TraceEvent {
    Start {
        index: usize,
        tokens: Vec<Token>,
    },
    Enter {
        index: usize,
        rule: Rule,
    },
    Exit {
        index: usize,
        rule: Rule,
    },
    Fail {
        index: usize,
        rule: Rule,
        expected: &'static str,
        token: Option<Token>,
    },
    Consume {
        index: usize,
        category: Category,
        token: Token,
    },
    End {
        index: usize,
        accepted: bool,
        consumed: usize,
        total: usize,
    },
}

impl TraceEvent {
    /// Lowercase event name: `start`, `enter`, `exit`, `fail`, `consume`, `end`
    pub fn kind(&self) -> &'static str {
        match self {
            TraceEvent::Start { .. } => "start",
            TraceEvent::Enter { .. } => "enter",
            TraceEvent::Exit { .. } => "exit",
            TraceEvent::Fail { .. } => "fail",
            TraceEvent::Consume { .. } => "consume",
            TraceEvent::End { .. } => "end",
        }
    }

    /// Cursor position the event was recorded at
    pub fn cursor(&self) -> usize {
        match self {
            TraceEvent::Start { index, .. }
            | TraceEvent::Enter { index, .. }
            | TraceEvent::Exit { index, .. }
            | TraceEvent::Fail { index, .. }
            | TraceEvent::Consume { index, .. }
            | TraceEvent::End { index, .. } => *index,
        }
    }

    pub fn rule(&self) -> Option<Rule> {
        match self {
            TraceEvent::Enter { rule, .. }
            | TraceEvent::Exit { rule, .. }
            | TraceEvent::Fail { rule, .. } => Some(*rule),
            _ => None,
        }
    }

    /// The consumed token, or the lookahead token of a failure
    pub fn token(&self) -> Option<&Token> {
        match self {
            TraceEvent::Consume { token, .. } => Some(token),
            TraceEvent::Fail { token, .. } => token.as_ref(),
            _ => None,
        }
    }

    pub fn expected(&self) -> Option<&'static str> {
        match self {
            TraceEvent::Fail { expected, .. } => Some(expected),
            _ => None,
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            TraceEvent::Consume { category, .. } => Some(*category),
            _ => None,
        }
    }
}

/// Destination for trace events
///
/// The engine checks [`enabled`](TraceSink::enabled) before building an event, so a disabled
/// sink costs nothing beyond the check.
pub trait TraceSink {
    fn enabled(&self) -> bool {
        true
    }

    fn record(&mut self, event: TraceEvent);
}

/// A sink that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl TraceSink for NoTrace {
    fn enabled(&self) -> bool {
        false
    }

    fn record(&mut self, _event: TraceEvent) {}
}

impl TraceSink for Vec<TraceEvent> {
    fn record(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let event = TraceEvent::Fail {
            index: 2,
            rule: Rule::VerbPhrase,
            expected: "Verb",
            token: Some(Token::new("perro")),
        };
        assert_eq!(event.kind(), "fail");
        assert_eq!(event.cursor(), 2);
        assert_eq!(event.rule(), Some(Rule::VerbPhrase));
        assert_eq!(event.token().map(Token::as_str), Some("perro"));
        assert_eq!(event.expected(), Some("Verb"));
        assert_eq!(event.category(), None);
    }

    #[test]
    fn test_vec_sink_records_in_order() {
        let mut sink: Vec<TraceEvent> = Vec::new();
        assert!(sink.enabled());
        sink.record(TraceEvent::Enter {
            index: 0,
            rule: Rule::Sentence,
        });
        sink.record(TraceEvent::Exit {
            index: 3,
            rule: Rule::Sentence,
        });
        let kinds: Vec<&str> = sink.iter().map(TraceEvent::kind).collect();
        assert_eq!(kinds, vec!["enter", "exit"]);
    }

    #[test]
    fn test_no_trace_is_disabled() {
        let mut sink = NoTrace;
        assert!(!sink.enabled());
        sink.record(TraceEvent::End {
            index: 0,
            accepted: false,
            consumed: 0,
            total: 0,
        });
    }

    #[test]
    fn test_serialize_tagged() {
        let event = TraceEvent::Consume {
            index: 1,
            category: Category::Noun,
            token: Token::new("nina"),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"event": "consume", "index": 1, "category": "noun", "token": "nina"})
        );
    }
}
