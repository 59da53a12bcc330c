//! Test fixtures and factory functions for creating test data.

use serde_json::json;

use conjugation_core::{LanguageLevel, LevelTable, TrainingExample};

/// Card record JSON for "Ben parka geldim."
pub fn geldim_json() -> serde_json::Value {
    json!({
        "verb_rank": 12,
        "verb_english": "to come",
        "verb_russian": "приходить",
        "verb_infinitive": "gelmek",
        "turkish_verb": {
            "verb_full": "geldim",
            "root": "gel",
            "tense_affix": "di",
            "verb_tense": "geçmiş_zaman",
            "personal_pronoun": "ben",
            "personal_affix": "m"
        },
        "english_example_sentence": "I came to the park.",
        "russian_example_sentence": "Я пришёл в парк.",
        "turkish_example_sentence": "Ben parka geldim."
    })
}

/// Negative counterpart of [`geldim_json`].
pub fn gelmedim_json() -> serde_json::Value {
    json!({
        "verb_rank": 12,
        "verb_english": "to come",
        "verb_infinitive": "gelmek",
        "turkish_verb": {
            "verb_full": "gelmedim",
            "root": "gel",
            "negative_affix": "me",
            "tense_affix": "di",
            "verb_tense": "geçmiş_zaman",
            "personal_pronoun": "ben",
            "personal_affix": "m",
            "polarity": "negative"
        },
        "english_example_sentence": "I did not come to the park.",
        "turkish_example_sentence": "Ben parka gelmedim."
    })
}

/// Card record JSON for "Ben kitap okuyorum."
pub fn okuyorum_json() -> serde_json::Value {
    json!({
        "verb_rank": 40,
        "verb_english": "to read",
        "verb_infinitive": "okumak",
        "turkish_verb": {
            "verb_full": "okuyorum",
            "root": "oku",
            "tense_affix": "yor",
            "verb_tense": "şimdiki_zaman",
            "personal_pronoun": "ben",
            "personal_affix": "um"
        },
        "english_example_sentence": "I am reading a book.",
        "turkish_example_sentence": "Ben kitap okuyorum."
    })
}

pub fn example(value: serde_json::Value) -> TrainingExample {
    serde_json::from_value(value).expect("fixture card is valid")
}

/// The cards every test context starts with, keyed by id.
pub fn sample_cards() -> Vec<(String, TrainingExample)> {
    vec![
        ("gelmek_1".to_string(), example(geldim_json())),
        ("gelmek_2".to_string(), example(gelmedim_json())),
        ("okumak_1".to_string(), example(okuyorum_json())),
    ]
}

/// Level table with the past tense only.
pub fn sample_levels() -> LevelTable {
    [("geçmiş_zaman".to_string(), LanguageLevel::A1)]
        .into_iter()
        .collect()
}

/// Create a session request body.
pub fn create_session_request(card_id: &str) -> serde_json::Value {
    json!({ "card_id": card_id })
}

/// Create an input request body.
pub fn input_request(text: &str, caret: Option<usize>) -> serde_json::Value {
    match caret {
        Some(caret) => json!({ "text": text, "caret": caret }),
        None => json!({ "text": text }),
    }
}

/// Create a toggle request body.
pub fn toggle_request(flag: &str, checked: bool) -> serde_json::Value {
    json!({ "flag": flag, "checked": checked })
}
