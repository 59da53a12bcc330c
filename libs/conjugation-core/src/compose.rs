//! Render compositor: decorates the typed text without changing it.

use std::collections::BTreeSet;
use std::ops::Range;

use serde::Serialize;

use crate::locator::SegmentSpan;
use crate::types::SegmentLabel;

/// A run of characters sharing one style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledRun {
    pub text: String,
    pub label: SegmentLabel,
    /// Underlined as a word that cannot be part of the answer.
    pub error: bool,
}

/// The typed text split into styled runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StyledText {
    pub runs: Vec<StyledRun>,
}

impl StyledText {
    /// The undecorated text; always equal to the composed input.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.runs.iter().map(|run| run.text.chars().count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Compose segment labels and error ranges over `input`.
///
/// Pure and deterministic, so equal inputs produce equal output and callers
/// can skip a write when nothing changed.
pub fn compose(input: &str, spans: &[SegmentSpan], errors: &[Range<usize>]) -> StyledText {
    let mut cuts: BTreeSet<usize> = BTreeSet::from([0, input.len()]);
    let ranges = spans
        .iter()
        .map(|span| &span.range)
        .chain(errors.iter());
    for range in ranges {
        for offset in [range.start, range.end] {
            if offset <= input.len() && input.is_char_boundary(offset) {
                cuts.insert(offset);
            }
        }
    }

    let cuts: Vec<usize> = cuts.into_iter().collect();
    let mut runs: Vec<StyledRun> = Vec::new();
    for window in cuts.windows(2) {
        let (start, end) = (window[0], window[1]);
        if start == end {
            continue;
        }
        let label = spans
            .iter()
            .find(|span| span.range.start <= start && start < span.range.end)
            .map_or(SegmentLabel::Plain, |span| span.label);
        let error = errors
            .iter()
            .any(|range| range.start <= start && start < range.end);
        let text = &input[start..end];

        match runs.last_mut() {
            Some(last) if last.label == label && last.error == error => last.text.push_str(text),
            _ => runs.push(StyledRun {
                text: text.to_string(),
                label,
                error,
            }),
        }
    }

    StyledText { runs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use crate::locator::locate;
    use crate::types::Decomposition;
    use pretty_assertions::assert_eq;

    fn run(text: &str, label: SegmentLabel, error: bool) -> StyledRun {
        StyledRun {
            text: text.to_string(),
            label,
            error,
        }
    }

    fn render(input: &str) -> StyledText {
        let decomposition = Decomposition::new("gel", "geldim", "Ben parka geldim.")
            .with_tense("di")
            .with_personal("m");
        let spans = locate(input, &decomposition);
        let errors = classify(input, &spans, &decomposition.target_sentence, None, false);
        compose(input, &spans, &errors)
    }

    #[test]
    fn styles_segments_and_errors() {
        assert_eq!(
            render("Ben xyz geldim"),
            StyledText {
                runs: vec![
                    run("Ben ", SegmentLabel::Plain, false),
                    run("xyz", SegmentLabel::Plain, true),
                    run(" ", SegmentLabel::Plain, false),
                    run("gel", SegmentLabel::Root, false),
                    run("di", SegmentLabel::Tense, false),
                    run("m", SegmentLabel::Personal, false),
                ]
            }
        );
    }

    #[test]
    fn composing_preserves_content() {
        let inputs = [
            "",
            " ",
            "Ben parka geldim",
            "BEN   PARKA GELDİM!!",
            "xyz geldi qq.",
            "çğışöü ÇĞİŞÖÜ geldimgeldim",
        ];
        for input in inputs {
            let styled = render(input);
            assert_eq!(styled.plain_text(), input);
            assert_eq!(styled.char_len(), input.chars().count());
        }
    }

    #[test]
    fn composing_is_idempotent() {
        let input = "Ben xyz geld";
        assert_eq!(render(input), render(input));
    }

    #[test]
    fn empty_input_composes_to_nothing() {
        assert!(render("").is_empty());
    }

    #[test]
    fn error_range_splits_a_plain_span() {
        let input = "abc def";
        let spans = vec![SegmentSpan {
            range: 0..7,
            label: SegmentLabel::Plain,
        }];
        let styled = compose(input, &spans, &[4..7]);
        assert_eq!(
            styled.runs,
            vec![
                run("abc ", SegmentLabel::Plain, false),
                run("def", SegmentLabel::Plain, true),
            ]
        );
    }
}
