//! Viewer state
//!
//! The model owns the traced parse of every sentence given on the command line plus the
//! current selection: which sentence is shown and which of its trace events is selected.
//! Everything the UI draws is derived from it.

use svo::svo::formats::to_treeviz_str;
use svo::svo::parsing::{Parser, TracedParse};
use svo::svo::trace::TraceEvent;

/// A sentence and its traced parse
pub struct SentenceView {
    pub sentence: String,
    pub traced: TracedParse,
}

pub struct Model {
    sentences: Vec<SentenceView>,
    current: usize,
    selected_event: usize,
}

impl Model {
    /// Parse every sentence with tracing; `None` when there is nothing to show
    pub fn new(parser: &Parser, sentences: &[String]) -> Option<Self> {
        if sentences.is_empty() {
            return None;
        }
        let sentences = sentences
            .iter()
            .map(|sentence| SentenceView {
                sentence: sentence.clone(),
                traced: parser.parse_with_trace(sentence),
            })
            .collect();
        Some(Model {
            sentences,
            current: 0,
            selected_event: 0,
        })
    }

    pub fn current(&self) -> &SentenceView {
        &self.sentences[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.current().traced.trace
    }

    pub fn selected_event_index(&self) -> usize {
        self.selected_event
    }

    pub fn selected_event(&self) -> Option<&TraceEvent> {
        self.events().get(self.selected_event)
    }

    /// Cursor position of the selected event
    pub fn cursor(&self) -> usize {
        self.selected_event().map_or(0, TraceEvent::cursor)
    }

    /// Select an event, clamped to the trace
    pub fn select_event(&mut self, index: usize) {
        let last = self.events().len().saturating_sub(1);
        self.selected_event = index.min(last);
    }

    pub fn next_event(&mut self) {
        self.select_event(self.selected_event + 1);
    }

    pub fn previous_event(&mut self) {
        self.select_event(self.selected_event.saturating_sub(1));
    }

    pub fn first_event(&mut self) {
        self.select_event(0);
    }

    pub fn last_event(&mut self) {
        self.select_event(usize::MAX);
    }

    /// Show the next sentence, wrapping around
    pub fn next_sentence(&mut self) {
        self.current = (self.current + 1) % self.sentences.len();
        self.selected_event = 0;
    }

    /// Show the previous sentence, wrapping around
    pub fn previous_sentence(&mut self) {
        self.current = (self.current + self.sentences.len() - 1) % self.sentences.len();
        self.selected_event = 0;
    }

    /// Tree drawing of the current sentence
    pub fn tree_lines(&self) -> Vec<String> {
        match self.current().traced.tree() {
            Some(tree) => to_treeviz_str(tree).lines().map(str::to_string).collect(),
            None => vec!["(no derivation tree: sentence rejected)".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> Model {
        let sentences = vec!["Ana duerme.".to_string(), "Corre Ana.".to_string()];
        Model::new(&Parser::default(), &sentences).unwrap()
    }

    #[test]
    fn test_empty_input_has_no_model() {
        assert!(Model::new(&Parser::default(), &[]).is_none());
    }

    #[test]
    fn test_event_navigation_is_clamped() {
        let mut model = model();
        assert_eq!(model.selected_event_index(), 0);
        model.previous_event();
        assert_eq!(model.selected_event_index(), 0);
        model.last_event();
        assert_eq!(model.selected_event_index(), model.events().len() - 1);
        assert_eq!(model.selected_event().unwrap().kind(), "end");
        assert_eq!(model.cursor(), 2);
        model.next_event();
        assert_eq!(model.selected_event_index(), model.events().len() - 1);
        model.first_event();
        assert_eq!(model.selected_event().unwrap().kind(), "start");
    }

    #[test]
    fn test_sentence_navigation_wraps() {
        let mut model = model();
        model.last_event();
        model.next_sentence();
        assert_eq!(model.current_index(), 1);
        assert_eq!(model.selected_event_index(), 0);
        assert!(!model.current().traced.accepted());
        assert_eq!(
            model.tree_lines(),
            vec!["(no derivation tree: sentence rejected)"]
        );
        model.next_sentence();
        assert_eq!(model.current_index(), 0);
        model.previous_sentence();
        assert_eq!(model.current_index(), 1);
    }

    #[test]
    fn test_tree_lines_for_accepted() {
        let model = model();
        let lines = model.tree_lines();
        assert_eq!(lines[0], "S (Oración)");
        assert_eq!(lines.len(), 5);
    }
}
