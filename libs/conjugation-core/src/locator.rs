//! Segment locator: finds the verb's root and affixes inside typed text.
//!
//! Two strategies share one alignment routine:
//! 1. If the full surface form occurs in the input, segments are aligned
//!    inside that occurrence. Unlisted characters between segments (buffer
//!    vowels) are absorbed into the preceding segment and the last segment
//!    takes the remainder.
//! 2. Otherwise each occurrence of the root is extended affix by affix,
//!    allowing at most one buffer vowel before an affix, and the occurrence
//!    that gets furthest wins.
//!
//! Affixes whose first vowel (or, for an affix followed by a vowel-initial
//! one, last vowel) was dropped at a morpheme boundary are matched in their
//! shortened form in both strategies.

use std::ops::Range;

use serde::Serialize;
use tracing::debug;

use crate::text::{folded_chars, is_vowel, FoldedText};
use crate::types::{Decomposition, SegmentLabel};

/// A labeled byte range of the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentSpan {
    pub range: Range<usize>,
    pub label: SegmentLabel,
}

impl SegmentSpan {
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.range.clone()]
    }
}

/// Which strategy produced the labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPath {
    FullForm,
    Sequential,
    Unmatched,
}

/// Spans covering the whole input plus the strategy that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub spans: Vec<SegmentSpan>,
    pub path: MatchPath,
}

/// Label `input` against the decomposition.
///
/// The returned spans are contiguous, never overlap and concatenate back to
/// `input` exactly.
pub fn locate(input: &str, decomposition: &Decomposition) -> Vec<SegmentSpan> {
    locate_with_path(input, decomposition).spans
}

/// Like [`locate`], also reporting which strategy matched.
pub fn locate_with_path(input: &str, decomposition: &Decomposition) -> Located {
    let text = FoldedText::new(input);

    let (marks, path) = if let Some(alignment) = align_full_form(&text, decomposition) {
        (alignment.marks, MatchPath::FullForm)
    } else if let Some(alignment) = align_sequential(&text, decomposition) {
        (alignment.marks, MatchPath::Sequential)
    } else {
        (Vec::new(), MatchPath::Unmatched)
    };

    debug!(?path, segments = marks.len(), "located verb segments");

    Located {
        spans: to_spans(&text, &marks),
        path,
    }
}

type Mark = (Range<usize>, SegmentLabel);

/// Alignment state over char indices of the folded input.
struct Alignment<'t> {
    text: &'t FoldedText,
    end: usize,
    pos: usize,
    previous: SegmentLabel,
    marks: Vec<Mark>,
    matched: usize,
}

impl<'t> Alignment<'t> {
    fn new(text: &'t FoldedText, start: usize, end: usize) -> Self {
        Self {
            text,
            end,
            pos: start,
            previous: SegmentLabel::Plain,
            marks: Vec::new(),
            matched: 0,
        }
    }

    fn mark(&mut self, range: Range<usize>, label: SegmentLabel) {
        if range.is_empty() || label == SegmentLabel::Plain {
            return;
        }
        if let Some(last) = self.marks.last_mut() {
            if last.1 == label && last.0.end == range.start {
                last.0.end = range.end;
                return;
            }
        }
        self.marks.push((range, label));
    }

    fn take_root(&mut self, len: usize) {
        let end = (self.pos + len).min(self.end);
        self.mark(self.pos..end, SegmentLabel::Root);
        self.pos = end;
        self.previous = SegmentLabel::Root;
        self.matched += 1;
    }

    /// Label `at..at + len`, giving any skipped characters to the previous segment.
    fn place(&mut self, at: usize, len: usize, label: SegmentLabel) {
        self.mark(self.pos..at, self.previous);
        self.mark(at..at + len, label);
        self.pos = at + len;
        self.previous = label;
        self.matched += 1;
    }

    /// Find the affix anywhere in the rest of the aligned range.
    fn search(&mut self, label: SegmentLabel, affix: &[char]) -> bool {
        for candidate in variants(affix) {
            if let Some(at) = self.text.find_within(candidate, self.pos, self.end) {
                self.place(at, candidate.len(), label);
                return true;
            }
        }
        false
    }

    /// Match the affix right at the current position, or after one buffer vowel.
    fn extend(&mut self, label: SegmentLabel, affix: &[char]) -> bool {
        let mut starts = vec![self.pos];
        if self.pos < self.end && is_vowel(self.text.chars()[self.pos]) {
            starts.push(self.pos + 1);
        }
        for at in starts {
            for candidate in variants(affix) {
                if self.text.matches_at(candidate, at, self.end) {
                    self.place(at, candidate.len(), label);
                    return true;
                }
            }
        }
        false
    }

    fn take_rest(&mut self, label: SegmentLabel) {
        self.mark(self.pos..self.end, label);
        self.pos = self.end;
    }
}

/// The affix as written, then with a dropped leading or trailing vowel.
fn variants(affix: &[char]) -> Vec<&[char]> {
    let mut out = vec![affix];
    if affix.len() > 1 {
        if is_vowel(affix[0]) {
            out.push(&affix[1..]);
        }
        if is_vowel(affix[affix.len() - 1]) {
            out.push(&affix[..affix.len() - 1]);
        }
    }
    out
}

fn align_full_form<'t>(text: &'t FoldedText, decomposition: &Decomposition) -> Option<Alignment<'t>> {
    let full = folded_chars(&decomposition.full_surface_form);
    let start = text.find(&full, 0)?;
    let mut alignment = Alignment::new(text, start, start + full.len());

    alignment.take_root(decomposition.root.chars().count());
    for label in [SegmentLabel::Negative, SegmentLabel::Tense] {
        if let Some(affix) = decomposition.segment(label) {
            alignment.search(label, &folded_chars(affix));
        }
    }

    let rest = if decomposition.segment(SegmentLabel::Personal).is_some() {
        SegmentLabel::Personal
    } else {
        alignment.previous
    };
    alignment.take_rest(rest);
    Some(alignment)
}

fn align_sequential<'t>(text: &'t FoldedText, decomposition: &Decomposition) -> Option<Alignment<'t>> {
    let root = folded_chars(&decomposition.root);
    let affixes: Vec<(SegmentLabel, Vec<char>)> = [
        SegmentLabel::Negative,
        SegmentLabel::Tense,
        SegmentLabel::Personal,
    ]
    .into_iter()
    .filter_map(|label| decomposition.segment(label).map(|s| (label, folded_chars(s))))
    .collect();

    let mut best: Option<Alignment<'t>> = None;
    let mut from = 0;
    while let Some(start) = text.find(&root, from) {
        let mut alignment = Alignment::new(text, start, text.word_end(start));
        alignment.take_root(root.len());
        for (label, affix) in &affixes {
            if !alignment.extend(*label, affix) {
                break;
            }
        }
        if best.as_ref().map_or(true, |b| alignment.matched > b.matched) {
            best = Some(alignment);
        }
        from = start + 1;
    }
    best
}

/// Fill unlabeled gaps with plain spans and convert char ranges to byte ranges.
fn to_spans(text: &FoldedText, marks: &[Mark]) -> Vec<SegmentSpan> {
    let mut spans: Vec<SegmentSpan> = Vec::new();
    let mut push = |range: Range<usize>, label: SegmentLabel| {
        if range.is_empty() {
            return;
        }
        let range = text.byte_offset(range.start)..text.byte_offset(range.end);
        match spans.last_mut() {
            Some(last) if last.label == label && last.range.end == range.start => {
                last.range.end = range.end;
            }
            _ => spans.push(SegmentSpan { range, label }),
        }
    };

    let mut cursor = 0;
    for (range, label) in marks {
        push(cursor..range.start, SegmentLabel::Plain);
        push(range.clone(), *label);
        cursor = range.end;
    }
    push(cursor..text.len(), SegmentLabel::Plain);
    spans
}
