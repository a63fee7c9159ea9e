use std::sync::Arc;

use storage::repository::{InMemoryStore, KeyValueStore, Storage, StorageError, keys};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage};

#[tokio::test(flavor = "current_thread")]
async fn survey_view_smoke_renders_first_page() {
    let mut harness = setup_view_harness(ViewKind::Survey);
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Food Preferences Survey"), "missing heading in {html}");
    assert!(html.contains("Basic Information"), "missing page title in {html}");
    assert!(html.contains("Page 1 of 4"), "missing page indicator in {html}");
    assert!(html.contains("submit-btn"), "missing submit button in {html}");

    let visits = harness
        .storage
        .persistent
        .get(keys::VISIT_COUNT)
        .await
        .expect("read visits");
    assert_eq!(visits.as_deref(), Some("1"));
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_smoke_restores_session_answers() {
    let session: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::with_entries([(
        keys::FORM_DATA,
        r#"{"name":"Ada Lovelace","email":"ada@example.com"}"#,
    )]));
    let persistent: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
    let mut harness =
        setup_view_harness_with_storage(ViewKind::Survey, Storage::new(persistent, session));
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Ada Lovelace"), "missing restored name in {html}");
    assert!(html.contains("ada@example.com"), "missing restored email in {html}");
}

struct FailingStore;

#[async_trait::async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_smoke_renders_error_state() {
    let storage = Storage::new(Arc::new(FailingStore), Arc::new(InMemoryStore::new()));
    let mut harness = setup_view_harness_with_storage(ViewKind::Survey, storage);
    harness.settle().await;
    let html = harness.render();

    assert!(
        html.contains("could not be loaded"),
        "missing error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn thank_you_view_smoke_renders_completion() {
    let persistent: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::with_entries([
        (keys::VISIT_COUNT, "3"),
        (keys::SURVEY_COMPLETED, "true"),
    ]));
    let session: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
    let mut harness =
        setup_view_harness_with_storage(ViewKind::ThankYou, Storage::new(persistent, session));
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Thank you!"), "missing heading in {html}");
    assert!(html.contains("have been recorded"), "missing completion in {html}");
    assert!(html.contains("Visits: 3"), "missing visit count in {html}");
}
