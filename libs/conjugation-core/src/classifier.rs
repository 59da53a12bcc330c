//! Word error classifier.
//!
//! Flags typed words that cannot belong to the target sentence. Words the
//! learner may still be typing (the one under the caret, or the last token)
//! only need to be a prefix of some target word.

use std::ops::Range;

use crate::locator::SegmentSpan;
use crate::text::{fold, strip_trailing_periods};
use crate::types::SegmentLabel;

/// A whitespace-delimited token of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub range: Range<usize>,
    pub is_whitespace: bool,
}

/// Split `input` into alternating word and whitespace tokens.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    for (idx, c) in input.char_indices() {
        let end = idx + c.len_utf8();
        let is_whitespace = c.is_whitespace();
        match tokens.last_mut() {
            Some(last) if last.is_whitespace == is_whitespace => last.range.end = end,
            _ => tokens.push(Token {
                range: idx..end,
                is_whitespace,
            }),
        }
    }
    tokens
}

/// Folded words of the target sentence with trailing periods removed.
fn target_words(target_sentence: &str) -> Vec<String> {
    target_sentence
        .split_whitespace()
        .map(|word| fold(strip_trailing_periods(word)))
        .filter(|word| !word.is_empty())
        .collect()
}

/// Byte ranges of words flagged as incorrect.
///
/// Every word with plain text in it is judged as a whole. When a word that is
/// all plain cannot belong to the target it is flagged entirely; when the word
/// also holds located verb segments only its plain parts are flagged, so the
/// segment colors stay. `cursor` is a byte offset into `input`. With `revealed`
/// set nothing is flagged.
pub fn classify(
    input: &str,
    spans: &[SegmentSpan],
    target_sentence: &str,
    cursor: Option<usize>,
    revealed: bool,
) -> Vec<Range<usize>> {
    if revealed {
        return Vec::new();
    }

    let targets = target_words(target_sentence);
    let tokens = tokenize(input);
    let last = tokens.len().saturating_sub(1);
    let mut flagged = Vec::new();

    for (idx, token) in tokens.iter().enumerate() {
        if token.is_whitespace {
            continue;
        }
        let word = strip_trailing_periods(&input[token.range.clone()]);
        let word_end = token.range.start + word.len();
        let parts: Vec<Range<usize>> = plain_parts(spans, &token.range)
            .map(|part| part.start..part.end.min(word_end))
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            continue;
        }

        let folded = fold(word);
        let in_progress =
            idx == last || cursor.is_some_and(|c| token.range.start <= c && c <= token.range.end);
        let acceptable = if in_progress {
            targets.iter().any(|target| target.starts_with(&folded))
        } else {
            targets.iter().any(|target| *target == folded)
        };
        if !acceptable {
            flagged.extend(parts);
        }
    }
    flagged
}

/// Plain sub-ranges of `range`.
fn plain_parts<'a>(
    spans: &'a [SegmentSpan],
    range: &'a Range<usize>,
) -> impl Iterator<Item = Range<usize>> + 'a {
    spans
        .iter()
        .filter(|span| span.label == SegmentLabel::Plain)
        .map(move |span| span.range.start.max(range.start)..span.range.end.min(range.end))
        .filter(|part| part.start < part.end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::locate;
    use crate::types::Decomposition;
    use pretty_assertions::assert_eq;

    fn okuyorum() -> Decomposition {
        Decomposition::new("oku", "okuyorum", "Ben kitabı okuyorum")
            .with_tense("uyor")
            .with_personal("um")
    }

    fn flagged<'a>(input: &'a str, cursor: Option<usize>) -> Vec<&'a str> {
        let decomposition = okuyorum();
        let spans = locate(input, &decomposition);
        classify(input, &spans, &decomposition.target_sentence, cursor, false)
            .into_iter()
            .map(|range| &input[range])
            .collect()
    }

    #[test]
    fn tokenizer_keeps_whitespace_runs() {
        let input = "Ben  kita";
        let tokens: Vec<_> = tokenize(input).into_iter().map(|t| &input[t.range]).collect();
        assert_eq!(tokens, vec!["Ben", "  ", "kita"]);
    }

    #[test]
    fn last_word_prefix_is_tolerated() {
        let input = "Ben kita";
        assert!(flagged(input, Some(input.len())).is_empty());
    }

    #[test]
    fn interior_unknown_word_is_flagged() {
        let input = "Ben xyz okuyorum";
        assert_eq!(flagged(input, Some(input.len())), vec!["xyz"]);
    }

    #[test]
    fn interior_prefix_is_flagged_when_cursor_elsewhere() {
        let input = "Ben kita okuyorum";
        assert_eq!(flagged(input, Some(input.len())), vec!["kita"]);
    }

    #[test]
    fn word_under_cursor_is_tolerated() {
        let input = "Ben kita okuyorum";
        assert!(flagged(input, Some(6)).is_empty());
        assert!(flagged(input, Some(8)).is_empty());
    }

    #[test]
    fn finished_word_followed_by_space_is_strict() {
        let input = "Ben kita ";
        assert_eq!(flagged(input, Some(input.len())), vec!["kita"]);
    }

    #[test]
    fn last_word_that_is_no_prefix_is_flagged() {
        assert_eq!(flagged("Ben kitq", None), vec!["kitq"]);
    }

    #[test]
    fn case_and_trailing_periods_are_ignored() {
        assert!(flagged("BEN kitabı... okuyorum.", None).is_empty());
        assert_eq!(flagged("Bem. kitabı", None), vec!["Bem"]);
    }

    #[test]
    fn complete_verb_word_is_not_flagged() {
        assert!(flagged("Ben kitabı okuyorum", None).is_empty());
    }

    #[test]
    fn verb_word_being_typed_is_tolerated() {
        let input = "Ben kitabı okuyo";
        assert!(flagged(input, Some(input.len())).is_empty());
    }

    #[test]
    fn junk_after_verb_root_flags_only_the_plain_part() {
        let input = "Ben kitabı okuxx";
        assert_eq!(flagged(input, Some(3)), vec!["xx"]);
    }

    #[test]
    fn junk_after_full_form_is_flagged() {
        let input = "Ben kitabı okuyorumxyz ben";
        assert_eq!(flagged(input, Some(input.len())), vec!["xyz"]);
    }

    #[test]
    fn junk_after_root_in_fallback_is_flagged() {
        let input = "Ben okuxyz kitabı";
        assert_eq!(flagged(input, Some(input.len())), vec!["xyz"]);
    }

    #[test]
    fn junk_in_last_verb_word_waits_for_no_prefix() {
        let input = "Ben kitabı okuyorumx";
        assert_eq!(flagged(input, Some(input.len())), vec!["x"]);
        let input = "Ben kitabı okuyorum.";
        assert!(flagged(input, Some(input.len())).is_empty());
    }

    #[test]
    fn reveal_suppresses_flags() {
        let decomposition = okuyorum();
        let input = "xyz abc";
        let spans = locate(input, &decomposition);
        assert!(classify(input, &spans, &decomposition.target_sentence, None, true).is_empty());
    }
}
