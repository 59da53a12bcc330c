//! Consistency checks for card records.
//!
//! Generated records are not always self-consistent. None of these issues stop
//! the engine from running; they are reported so the loader can log them.

use serde::Serialize;

use crate::text::{contains_folded, fold};
use crate::types::{Polarity, TrainingExample};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// Neither the full form nor the root occurs in the Turkish sentence.
    VerbNotInSentence { root: String, sentence: String },
    /// A segment is missing from the full form, or out of order.
    ConstructionMismatch { part: String, verb_full: String },
    /// Negative affix presence disagrees with polarity.
    PolarityMismatch { polarity: Polarity },
    /// The tense affix repeats the personal affix at its end.
    TenseAffixOverlap { tense_affix: String, personal_affix: String },
}

impl ValidationIssue {
    pub fn severity(&self) -> Severity {
        match self {
            Self::VerbNotInSentence { .. } | Self::PolarityMismatch { .. } => Severity::Error,
            Self::ConstructionMismatch { .. } | Self::TenseAffixOverlap { .. } => {
                Severity::Warning
            }
        }
    }
}

impl TrainingExample {
    /// Run every consistency check on this record.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let verb = &self.turkish_verb;

        if !contains_folded(&self.turkish_example_sentence, &verb.verb_full)
            && !contains_folded(&self.turkish_example_sentence, &verb.root)
        {
            issues.push(ValidationIssue::VerbNotInSentence {
                root: verb.root.clone(),
                sentence: self.turkish_example_sentence.clone(),
            });
        }

        if let Some(part) = first_unordered_part(self) {
            issues.push(ValidationIssue::ConstructionMismatch {
                part,
                verb_full: verb.verb_full.clone(),
            });
        }

        let has_negative = verb
            .negative_affix
            .as_deref()
            .is_some_and(|affix| !affix.trim().is_empty());
        let polarity_ok = match verb.polarity {
            Polarity::Negative => has_negative,
            Polarity::Positive => !has_negative,
        };
        if !polarity_ok {
            issues.push(ValidationIssue::PolarityMismatch {
                polarity: verb.polarity,
            });
        }

        if let (Some(tense), Some(personal)) = (
            verb.tense_affix.as_deref().filter(|s| !s.is_empty()),
            verb.personal_affix.as_deref().filter(|s| !s.is_empty()),
        ) {
            if tense.len() > personal.len() && fold(tense).ends_with(&fold(personal)) {
                issues.push(ValidationIssue::TenseAffixOverlap {
                    tense_affix: tense.to_string(),
                    personal_affix: personal.to_string(),
                });
            }
        }

        issues
    }
}

/// First segment that cannot be found, in order, inside `verb_full`.
fn first_unordered_part(example: &TrainingExample) -> Option<String> {
    let verb = &example.turkish_verb;
    let full = fold(&verb.verb_full);
    let parts = [
        Some(verb.root.as_str()),
        verb.negative_affix.as_deref(),
        verb.tense_affix.as_deref(),
        verb.personal_affix.as_deref(),
    ];

    let mut pos = 0;
    for part in parts.into_iter().flatten().filter(|p| !p.is_empty()) {
        let folded = fold(part);
        match full[pos..].find(&folded) {
            Some(idx) => pos += idx + folded.len(),
            None => return Some(part.to_string()),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TurkishVerb;

    fn example(verb: TurkishVerb, sentence: &str) -> TrainingExample {
        TrainingExample {
            verb_rank: None,
            verb_english: "to come".to_string(),
            verb_russian: String::new(),
            verb_infinitive: "gelmek".to_string(),
            turkish_verb: verb,
            language_level: None,
            english_example_sentence: "I came to the park.".to_string(),
            russian_example_sentence: String::new(),
            turkish_example_sentence: sentence.to_string(),
        }
    }

    fn verb(full: &str, negative: Option<&str>, tense: &str, personal: &str) -> TurkishVerb {
        TurkishVerb {
            verb_full: full.to_string(),
            root: "gel".to_string(),
            negative_affix: negative.map(str::to_string),
            tense_affix: Some(tense.to_string()),
            verb_tense: "geçmiş_zaman".to_string(),
            personal_pronoun: Some("ben".to_string()),
            personal_affix: Some(personal.to_string()),
            polarity: if negative.is_some() {
                Polarity::Negative
            } else {
                Polarity::Positive
            },
        }
    }

    #[test]
    fn consistent_record_has_no_issues() {
        let ex = example(verb("geldim", None, "di", "m"), "Ben parka geldim.");
        assert!(ex.validate().is_empty());
    }

    #[test]
    fn buffer_vowel_is_not_a_construction_mismatch() {
        let mut v = verb("geliyorum", None, "iyor", "um");
        v.tense_affix = Some("yor".to_string());
        let ex = example(v, "Ben eve geliyorum.");
        assert!(ex.validate().is_empty());
    }

    #[test]
    fn detects_missing_verb() {
        let ex = example(verb("geldim", None, "di", "m"), "Ben parka gittim.");
        let issues = ex.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity(), Severity::Error);
        assert!(matches!(issues[0], ValidationIssue::VerbNotInSentence { .. }));
    }

    #[test]
    fn detects_out_of_order_parts() {
        let ex = example(verb("geldim", None, "ma", "m"), "Ben parka geldim.");
        assert_eq!(
            ex.validate(),
            vec![ValidationIssue::ConstructionMismatch {
                part: "ma".to_string(),
                verb_full: "geldim".to_string(),
            }]
        );
    }

    #[test]
    fn detects_polarity_mismatch() {
        let mut v = verb("gelmedim", Some("me"), "di", "m");
        v.polarity = Polarity::Positive;
        let ex = example(v, "Ben parka gelmedim.");
        assert_eq!(
            ex.validate(),
            vec![ValidationIssue::PolarityMismatch {
                polarity: Polarity::Positive
            }]
        );
    }

    #[test]
    fn detects_tense_affix_overlap() {
        let ex = example(verb("geleceğiz", None, "eceğiz", "iz"), "Biz yarın geleceğiz.");
        let issues = ex.validate();
        assert!(issues.contains(&ValidationIssue::TenseAffixOverlap {
            tense_affix: "eceğiz".to_string(),
            personal_affix: "iz".to_string(),
        }));
        assert!(issues.iter().all(|i| i.severity() == Severity::Warning));
    }
}
