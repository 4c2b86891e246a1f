//! Trace table
//!
//! Renders a recorded trace as a fixed-width table, one row per event:
//!
//!     Remaining                       Pos   Action            Detail
//!     la nina mira el perro           0     START             5 tokens
//!     la nina mira el perro           0     ENTER S
//!     ...
//!
//! The remaining column shows the tokens from the event's cursor on, or `<eof>` once the
//! cursor is past the last token. Cells that do not fit are clipped with `…`.

use crate::svo::lexing::Token;
use crate::svo::trace::TraceEvent;

const WIDTHS: [usize; 4] = [32, 5, 16, 40];

/// Pad or clip `text` to exactly `width` characters
fn clip(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return format!("{}{}", text, " ".repeat(width - count));
    }
    if width <= 1 {
        return text.chars().take(width).collect();
    }
    let mut clipped: String = text.chars().take(width - 1).collect();
    clipped.push('…');
    clipped
}

fn row(cells: [&str; 4]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(WIDTHS)
        .map(|(cell, width)| clip(cell, width))
        .collect();
    padded.join("  ").trim_end().to_string()
}

fn remaining(tokens: &[Token], at: usize) -> String {
    if at < tokens.len() {
        tokens[at..]
            .iter()
            .map(Token::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        "<eof>".to_string()
    }
}

/// Action and detail cells for an event
pub fn describe_event(event: &TraceEvent) -> (String, String) {
    match event {
        TraceEvent::Start { tokens, .. } => ("START".into(), format!("{} tokens", tokens.len())),
        TraceEvent::Enter { rule, .. } => (format!("ENTER {}", rule), String::new()),
        TraceEvent::Exit { rule, .. } => (format!("EXIT {}", rule), String::new()),
        TraceEvent::Fail {
            rule,
            expected,
            token,
            ..
        } => {
            let found = token.as_ref().map_or("<eof>", Token::as_str);
            (
                format!("FAIL {}", rule),
                format!("expected {}, found {}", expected, found),
            )
        }
        TraceEvent::Consume {
            category, token, ..
        } => (format!("match {}", category), format!("'{}'", token)),
        TraceEvent::End {
            accepted,
            consumed,
            total,
            ..
        } => (
            format!("END {}", if *accepted { "OK" } else { "FAIL" }),
            format!("consumed {}/{}", consumed, total),
        ),
    }
}

/// Render a trace as a table
///
/// `tokens` is the normalized sentence; when empty, the tokens of the trace's start event
/// are used instead.
pub fn format_trace(trace: &[TraceEvent], tokens: &[Token]) -> String {
    if trace.is_empty() {
        return "(no trace recorded)\n".to_string();
    }

    let tokens = match (tokens.is_empty(), trace.first()) {
        (true, Some(TraceEvent::Start { tokens, .. })) => tokens.as_slice(),
        _ => tokens,
    };

    let mut lines = vec![
        row(["Remaining", "Pos", "Action", "Detail"]),
        row(["---------", "---", "------", "------"]),
    ];
    for event in trace {
        let at = event.cursor();
        let (action, detail) = describe_event(event);
        lines.push(row([&remaining(tokens, at), &at.to_string(), &action, &detail]));
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svo::tree::Rule;

    #[test]
    fn test_clip() {
        assert_eq!(clip("abc", 5), "abc  ");
        assert_eq!(clip("abcdef", 4), "abc…");
        assert_eq!(clip("abc", 1), "a");
        assert_eq!(clip("abc", 0), "");
    }

    #[test]
    fn test_describe_event() {
        let fail = TraceEvent::Fail {
            index: 3,
            rule: Rule::VerbPhrase,
            expected: "Verb",
            token: None,
        };
        assert_eq!(
            describe_event(&fail),
            ("FAIL VP".to_string(), "expected Verb, found <eof>".to_string())
        );
    }

    #[test]
    fn test_empty_trace() {
        assert_eq!(format_trace(&[], &[]), "(no trace recorded)\n");
    }

    #[test]
    fn test_table_rows() {
        let tokens = vec![Token::new("ana"), Token::new("duerme")];
        let trace = vec![
            TraceEvent::Start {
                index: 0,
                tokens: tokens.clone(),
            },
            TraceEvent::End {
                index: 2,
                accepted: true,
                consumed: 2,
                total: 2,
            },
        ];
        let table = format_trace(&trace, &[]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Remaining"));
        assert!(lines[2].starts_with("ana duerme"));
        assert!(lines[2].ends_with("START             2 tokens"));
        assert!(lines[3].starts_with("<eof>"));
        assert!(lines[3].ends_with("END OK            consumed 2/2"));
    }
}
