//! Core types for the conjugation trainer.

use serde::{Deserialize, Serialize};

use crate::error::{CardError, Result};
use crate::level::LanguageLevel;

/// Grammatical polarity of the target verb form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Default for Polarity {
    fn default() -> Self {
        Self::Positive
    }
}

/// Which way the learner translates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Source sentence shown, learner types Turkish.
    ToTurkish,
    /// Turkish sentence shown, learner types the source language.
    FromTurkish,
}

impl Default for Direction {
    fn default() -> Self {
        Self::ToTurkish
    }
}

/// Language the Turkish sentence is paired with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceLanguage {
    English,
    Russian,
}

impl Default for SourceLanguage {
    fn default() -> Self {
        Self::English
    }
}

impl SourceLanguage {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "english" | "en" => Some(Self::English),
            "russian" | "ru" => Some(Self::Russian),
            _ => None,
        }
    }
}

/// Explicit view state passed into the engine instead of ambient UI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewMode {
    pub direction: Direction,
    pub source_language: SourceLanguage,
}

/// Which morphological piece a character range belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentLabel {
    Root,
    Negative,
    Tense,
    Personal,
    Plain,
}

impl SegmentLabel {
    /// Verb segments in surface order.
    pub const VERB_ORDER: [SegmentLabel; 4] = [
        SegmentLabel::Root,
        SegmentLabel::Negative,
        SegmentLabel::Tense,
        SegmentLabel::Personal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Negative => "negative",
            Self::Tense => "tense",
            Self::Personal => "personal",
            Self::Plain => "plain",
        }
    }
}

/// Nested verb breakdown as stored in a card record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurkishVerb {
    pub verb_full: String,
    pub root: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_affix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tense_affix: Option<String>,
    pub verb_tense: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_pronoun: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_affix: Option<String>,
    #[serde(default)]
    pub polarity: Polarity,
}

/// One training card as produced by the data pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingExample {
    #[serde(default)]
    pub verb_rank: Option<u32>,
    pub verb_english: String,
    #[serde(default)]
    pub verb_russian: String,
    pub verb_infinitive: String,
    pub turkish_verb: TurkishVerb,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_level: Option<LanguageLevel>,
    pub english_example_sentence: String,
    #[serde(default)]
    pub russian_example_sentence: String,
    pub turkish_example_sentence: String,
}

impl TrainingExample {
    /// Parse and sanity-check a card record.
    pub fn from_json(json: &str) -> Result<Self> {
        let example: Self = serde_json::from_str(json)?;
        example.check_required()?;
        Ok(example)
    }

    fn check_required(&self) -> Result<()> {
        let required = [
            ("root", &self.turkish_verb.root),
            ("verb_full", &self.turkish_verb.verb_full),
            ("turkish_example_sentence", &self.turkish_example_sentence),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CardError::MissingField { field });
            }
        }
        Ok(())
    }

    /// Sentence shown to the learner for the given view.
    pub fn prompt_sentence(&self, view: ViewMode) -> &str {
        match view.direction {
            Direction::ToTurkish => self.source_sentence(view.source_language),
            Direction::FromTurkish => &self.turkish_example_sentence,
        }
    }

    /// Sentence the learner is expected to type for the given view.
    pub fn target_sentence(&self, view: ViewMode) -> &str {
        match view.direction {
            Direction::ToTurkish => &self.turkish_example_sentence,
            Direction::FromTurkish => self.source_sentence(view.source_language),
        }
    }

    fn source_sentence(&self, language: SourceLanguage) -> &str {
        match language {
            SourceLanguage::Russian if !self.russian_example_sentence.is_empty() => {
                &self.russian_example_sentence
            }
            _ => &self.english_example_sentence,
        }
    }

    /// Build the decomposition the engine matches against.
    pub fn decomposition(&self, view: ViewMode) -> Decomposition {
        let verb = &self.turkish_verb;
        Decomposition {
            root: verb.root.clone(),
            negative_affix: present(verb.negative_affix.as_deref()),
            tense_affix: present(verb.tense_affix.as_deref()),
            personal_affix: present(verb.personal_affix.as_deref()),
            full_surface_form: verb.verb_full.clone(),
            target_sentence: self.target_sentence(view).to_string(),
            polarity: verb.polarity,
        }
    }
}

fn present(segment: Option<&str>) -> Option<String> {
    segment
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Immutable known-correct breakdown of one card's verb.
///
/// `full_surface_form` is expected to equal the concatenated segments but may
/// not (buffer vowels are not recorded as segments); matching tolerates that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
    pub root: String,
    pub negative_affix: Option<String>,
    pub tense_affix: Option<String>,
    pub personal_affix: Option<String>,
    pub full_surface_form: String,
    pub target_sentence: String,
    pub polarity: Polarity,
}

impl Decomposition {
    /// Positive decomposition with only a root.
    pub fn new(
        root: impl Into<String>,
        full_surface_form: impl Into<String>,
        target_sentence: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            negative_affix: None,
            tense_affix: None,
            personal_affix: None,
            full_surface_form: full_surface_form.into(),
            target_sentence: target_sentence.into(),
            polarity: Polarity::Positive,
        }
    }

    /// Add a negative affix; this also makes the polarity negative.
    pub fn with_negative(mut self, affix: &str) -> Self {
        self.negative_affix = present(Some(affix));
        self.polarity = Polarity::Negative;
        self
    }

    pub fn with_tense(mut self, affix: &str) -> Self {
        self.tense_affix = present(Some(affix));
        self
    }

    pub fn with_personal(mut self, affix: &str) -> Self {
        self.personal_affix = present(Some(affix));
        self
    }

    /// Text of a verb segment, or `None` when the segment does not apply.
    ///
    /// The negative affix only applies to negative polarity.
    pub fn segment(&self, label: SegmentLabel) -> Option<&str> {
        let value = match label {
            SegmentLabel::Root => Some(self.root.as_str()),
            SegmentLabel::Negative if self.polarity == Polarity::Negative => {
                self.negative_affix.as_deref()
            }
            SegmentLabel::Negative => None,
            SegmentLabel::Tense => self.tense_affix.as_deref(),
            SegmentLabel::Personal => self.personal_affix.as_deref(),
            SegmentLabel::Plain => None,
        };
        value.filter(|s| !s.is_empty())
    }

    /// Present verb segments in surface order.
    pub fn segments(&self) -> impl Iterator<Item = (SegmentLabel, &str)> + '_ {
        SegmentLabel::VERB_ORDER
            .into_iter()
            .filter_map(move |label| self.segment(label).map(|text| (label, text)))
    }
}
