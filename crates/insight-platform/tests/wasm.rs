//! WASM-target tests for insight-platform (Node.js runtime).
//!
//! Tests MemoryStorage, the offline engine, and the history archive
//! running on top of MemoryStorage under wasm32-unknown-unknown via
//! `wasm-pack test --node`.
//!
//! IndexedDB needs a browser and is not exercised here.

use wasm_bindgen_test::*;

use insight_core::archive::HistoryArchive;
use insight_core::event_bus::EventBus;
use insight_core::ports::{AnalysisEnginePort, AnalysisRequest, ClockPort, StoragePort};
use insight_platform::clock::BrowserClock;
use insight_platform::engine::OfflineEngine;
use insight_platform::storage::{open_storage, MemoryStorage};
use insight_types::analysis::AnalysisResult;
use insight_types::brand::BrandId;
use insight_types::config::StorageBackendType;
use insight_types::entry::AssistantPayload;
use insight_types::session::Session;
use insight_types::InsightError;
use std::rc::Rc;

// ─── MemoryStorage Tests ─────────────────────────────────

#[wasm_bindgen_test]
fn memory_storage_backend_name() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.backend_name(), "memory");
    assert!(storage.is_empty());
}

#[wasm_bindgen_test]
async fn memory_storage_set_get_delete() {
    let storage = MemoryStorage::new();
    assert!(storage.get("history:a").await.unwrap().is_none());

    storage.set("history:a", b"v1").await.unwrap();
    storage.set("history:a", b"v2").await.unwrap();
    assert_eq!(storage.get("history:a").await.unwrap(), Some(b"v2".to_vec()));
    assert_eq!(storage.len(), 1);

    storage.delete("history:a").await.unwrap();
    assert!(!storage.exists("history:a").await.unwrap());
    storage.delete("history:a").await.unwrap();
}

#[wasm_bindgen_test]
async fn memory_storage_list_keys_by_prefix() {
    let storage = MemoryStorage::new();
    storage.set("history:2", b"").await.unwrap();
    storage.set("history:1", b"").await.unwrap();
    storage.set("insight:config", b"{}").await.unwrap();

    let keys = storage.list_keys("history:").await.unwrap();
    assert_eq!(keys, vec!["history:1", "history:2"]);
    assert_eq!(storage.list_keys("").await.unwrap().len(), 3);
    assert!(storage.list_keys("nope").await.unwrap().is_empty());
}

#[wasm_bindgen_test]
async fn open_storage_memory_backend() {
    let storage = open_storage(&StorageBackendType::Memory).await.unwrap();
    assert_eq!(storage.backend_name(), "memory");
}

// ─── Engine Tests ────────────────────────────────────────

#[wasm_bindgen_test]
async fn offline_engine_fails_every_call() {
    let engine = OfflineEngine;
    let result = engine
        .ask(AnalysisRequest {
            prompt: "What is the top campaign?".to_string(),
            brand: BrandId::parse("BRImo").unwrap(),
            prior_turns: Vec::new(),
        })
        .await;
    assert!(matches!(result, Err(InsightError::Config(_))));
    assert_eq!(engine.engine_name(), "offline");
}

// ─── Clock Tests ─────────────────────────────────────────

#[wasm_bindgen_test]
async fn browser_clock_sleep_resolves() {
    let clock = BrowserClock::new();
    let before = clock.now();
    clock.sleep(5).await;
    assert!(clock.now() >= before);
}

// ─── Archive over MemoryStorage ──────────────────────────

#[wasm_bindgen_test]
async fn archive_on_memory_storage() {
    let storage = Rc::new(MemoryStorage::new());
    let archive = HistoryArchive::new(storage.clone(), Rc::new(BrowserClock), EventBus::new());

    let result: AnalysisResult = serde_json::from_str(
        r#"{"summary":"s","keyFinding":{"title":"t","value":"v","change":"c"}}"#,
    )
    .unwrap();
    let mut session = Session::new(BrandId::parse("Ceria").unwrap(), BrowserClock.now());
    session.begin_turn("Which channel is cheapest?").unwrap();
    session.resolve_turn(AssistantPayload::Answer { result }).unwrap();

    let saved = archive.save(&session).await.unwrap();
    assert_eq!(storage.len(), 1);
    assert_eq!(archive.list().await.unwrap()[0].id, saved.id);
    assert_eq!(archive.get(&saved.id).await.unwrap().session, session);
}
