//! Progress state machine.
//!
//! Five independent flags, each of which can be set and cleared again by
//! editing. Text edits and checkbox toggles both go through [`reduce`], which
//! returns the new state and, for toggles, the text the field must now show.

use serde::{Deserialize, Serialize};

use crate::text::{contains_folded, normalize_sentence};
use crate::types::{Decomposition, SegmentLabel};

/// Which parts of the answer are present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    pub verb_root: bool,
    pub negative_affix: bool,
    pub tense_affix: bool,
    pub personal_affix: bool,
    /// Set exactly when the field equals the target sentence (ignoring case
    /// and trailing periods). Also the "reveal" flag.
    pub full_sentence: bool,
}

/// One checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressFlag {
    VerbRoot,
    NegativeAffix,
    TenseAffix,
    PersonalAffix,
    FullSentence,
}

impl ProgressFlag {
    pub const ALL: [ProgressFlag; 5] = [
        ProgressFlag::VerbRoot,
        ProgressFlag::NegativeAffix,
        ProgressFlag::TenseAffix,
        ProgressFlag::PersonalAffix,
        ProgressFlag::FullSentence,
    ];

    /// The verb segment this flag tracks.
    pub fn segment(self) -> Option<SegmentLabel> {
        match self {
            Self::VerbRoot => Some(SegmentLabel::Root),
            Self::NegativeAffix => Some(SegmentLabel::Negative),
            Self::TenseAffix => Some(SegmentLabel::Tense),
            Self::PersonalAffix => Some(SegmentLabel::Personal),
            Self::FullSentence => None,
        }
    }

    /// Whether the flag has a checkbox for this decomposition.
    pub fn applies_to(self, decomposition: &Decomposition) -> bool {
        match self.segment() {
            Some(label) => decomposition.segment(label).is_some(),
            None => true,
        }
    }
}

impl ProgressState {
    pub fn get(&self, flag: ProgressFlag) -> bool {
        match flag {
            ProgressFlag::VerbRoot => self.verb_root,
            ProgressFlag::NegativeAffix => self.negative_affix,
            ProgressFlag::TenseAffix => self.tense_affix,
            ProgressFlag::PersonalAffix => self.personal_affix,
            ProgressFlag::FullSentence => self.full_sentence,
        }
    }

    pub fn set(&mut self, flag: ProgressFlag, value: bool) {
        match flag {
            ProgressFlag::VerbRoot => self.verb_root = value,
            ProgressFlag::NegativeAffix => self.negative_affix = value,
            ProgressFlag::TenseAffix => self.tense_affix = value,
            ProgressFlag::PersonalAffix => self.personal_affix = value,
            ProgressFlag::FullSentence => self.full_sentence = value,
        }
    }

    /// Every applicable flag set, as after revealing the answer.
    pub fn revealed(decomposition: &Decomposition) -> Self {
        let mut state = Self::default();
        for flag in ProgressFlag::ALL {
            if flag.applies_to(decomposition) {
                state.set(flag, true);
            }
        }
        state
    }
}

/// Whether `text` counts as the target sentence.
pub fn sentence_matches(text: &str, target_sentence: &str) -> bool {
    normalize_sentence(text) == normalize_sentence(target_sentence)
}

/// Derive all flags from typed text.
pub fn evaluate_text(text: &str, decomposition: &Decomposition) -> ProgressState {
    let mut state = ProgressState::default();
    for flag in ProgressFlag::ALL {
        let value = match flag.segment() {
            Some(label) => decomposition
                .segment(label)
                .is_some_and(|segment| contains_folded(text, segment)),
            None => sentence_matches(text, &decomposition.target_sentence),
        };
        state.set(flag, value);
    }
    state
}

/// Text implied by the checked segment boxes, in surface order.
pub fn reconstruct_text(state: &ProgressState, decomposition: &Decomposition) -> String {
    ProgressFlag::ALL
        .into_iter()
        .filter(|flag| state.get(*flag))
        .filter_map(|flag| flag.segment())
        .filter_map(|label| decomposition.segment(label))
        .collect()
}

/// Input to the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent<'a> {
    /// The learner edited the field.
    TextChanged(&'a str),
    /// A checkbox was toggled.
    Toggled { flag: ProgressFlag, checked: bool },
    /// The decomposition's target changed (direction switch) while the
    /// field still shows `text`.
    Retargeted { text: &'a str },
}

/// Reducer output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: ProgressState,
    /// Replacement text for the field; `None` leaves it as is.
    pub text: Option<String>,
    /// The learner typed the full sentence (as opposed to revealing it).
    pub text_completion: bool,
}

impl Transition {
    fn keep_text(state: ProgressState) -> Self {
        Self {
            state,
            text: None,
            text_completion: false,
        }
    }
}

/// `(state, event) -> (state, derived text)`.
pub fn reduce(
    state: ProgressState,
    event: ProgressEvent<'_>,
    decomposition: &Decomposition,
) -> Transition {
    match event {
        ProgressEvent::TextChanged(text) => {
            let next = evaluate_text(text, decomposition);
            Transition {
                state: next,
                text: None,
                text_completion: next.full_sentence && !state.full_sentence,
            }
        }
        ProgressEvent::Toggled {
            flag: ProgressFlag::FullSentence,
            checked: true,
        } => Transition {
            state: ProgressState::revealed(decomposition),
            text: Some(decomposition.target_sentence.clone()),
            text_completion: false,
        },
        ProgressEvent::Toggled {
            flag: ProgressFlag::FullSentence,
            checked: false,
        } => Transition {
            state: ProgressState::default(),
            text: Some(String::new()),
            text_completion: false,
        },
        ProgressEvent::Toggled { flag, checked } => {
            if !flag.applies_to(decomposition) {
                return Transition::keep_text(state);
            }
            let mut next = state;
            next.set(flag, checked);
            let text = reconstruct_text(&next, decomposition);
            next.full_sentence = sentence_matches(&text, &decomposition.target_sentence);
            Transition {
                state: next,
                text: Some(text),
                text_completion: false,
            }
        }
        ProgressEvent::Retargeted { text } => {
            if state.full_sentence {
                Transition {
                    state: ProgressState::revealed(decomposition),
                    text: Some(decomposition.target_sentence.clone()),
                    text_completion: false,
                }
            } else {
                // the text was typed, so matching the new target completes it
                let next = evaluate_text(text, decomposition);
                Transition {
                    state: next,
                    text: None,
                    text_completion: next.full_sentence,
                }
            }
        }
    }
}
