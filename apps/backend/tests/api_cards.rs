//! Card catalog API tests.

mod common;

use std::fs;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use common::fixtures;
use common::TestContext;
use verb_trainer_backend::services::catalog::Catalog;
use verb_trainer_backend::services::levels::LevelStore;

/// Test health check.
#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("OK");
}

/// Test list cards returns summaries in id order.
#[tokio::test]
async fn test_list_cards() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/cards").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let cards = body["cards"].as_array().unwrap();
    let ids: Vec<&str> = cards.iter().map(|c| c["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["gelmek_1", "gelmek_2", "okumak_1"]);

    assert_eq!(cards[0]["verb_infinitive"], "gelmek");
    assert_eq!(cards[0]["verb_tense"], "geçmiş_zaman");
    assert_eq!(cards[0]["personal_pronoun"], "ben");
    assert_eq!(cards[0]["polarity"], "positive");
    assert_eq!(cards[0]["level"], "A1");
    assert_eq!(cards[1]["polarity"], "negative");
    assert!(cards[2]["level"].is_null());
}

/// Test list cards before the level table arrives.
#[tokio::test]
async fn test_list_cards_without_levels() {
    let ctx = TestContext::without_levels();
    let server = ctx.server();

    let response = server.get("/api/cards").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let cards = body["cards"].as_array().unwrap();
    assert!(cards.iter().all(|c| c["level"].is_null()));
}

/// Test get card returns the full record.
#[tokio::test]
async fn test_get_card() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/cards/gelmek_2").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], "gelmek_2");
    assert_eq!(body["example"]["turkish_verb"]["negative_affix"], "me");
    assert_eq!(body["example"]["turkish_example_sentence"], "Ben parka gelmedim.");
    assert_eq!(body["level"], "A1");
}

/// Test get unknown card.
#[tokio::test]
async fn test_get_card_not_found() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/cards/yok_1").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "not_found");
}

/// Test loading a cards directory: nested verb folders and top-level files
/// load, malformed records are skipped.
#[tokio::test]
async fn test_catalog_load_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("gelmek")).unwrap();
    fs::write(
        dir.path().join("gelmek/gelmek_1.json"),
        fixtures::geldim_json().to_string(),
    )
    .unwrap();
    fs::write(
        dir.path().join("gelmek/gelmek_2.json"),
        fixtures::gelmedim_json().to_string(),
    )
    .unwrap();
    fs::write(
        dir.path().join("okumak_1.json"),
        fixtures::okuyorum_json().to_string(),
    )
    .unwrap();
    fs::write(dir.path().join("gelmek/broken.json"), "{ not json").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let catalog = Catalog::load(dir.path()).await.unwrap();
    assert_eq!(catalog.len(), 3);
    assert!(catalog.get("broken").is_none());
    assert_eq!(catalog.get("okumak_1").unwrap().verb_infinitive, "okumak");

    let ctx = TestContext::with_catalog(catalog, LevelStore::pending());
    let server = ctx.server();
    let response = server.get("/api/cards/gelmek_1").await;
    response.assert_status_ok();
}

/// Test a card with an empty root is rejected at load time.
#[tokio::test]
async fn test_catalog_skips_record_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let mut record = fixtures::geldim_json();
    record["turkish_verb"]["root"] = serde_json::json!("");
    fs::write(dir.path().join("gelmek_1.json"), record.to_string()).unwrap();

    let catalog = Catalog::load(dir.path()).await.unwrap();
    assert!(catalog.is_empty());
}

/// Test a missing cards directory is an error.
#[tokio::test]
async fn test_catalog_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    assert!(Catalog::load(&missing).await.is_err());
}
