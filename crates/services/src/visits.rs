use std::sync::Arc;

use storage::repository::{KeyValueStore, StorageError, keys};
use tracing::warn;

const COMPLETED_FLAG: &str = "true";

/// Visit counter and completion flag kept in the persistent store.
#[derive(Clone)]
pub struct VisitTracker {
    store: Arc<dyn KeyValueStore>,
}

impl VisitTracker {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Increment the visit counter, creating it at `"0"` first if absent.
    ///
    /// An unparsable counter restarts from zero.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the counter cannot be read or written.
    pub async fn record_visit(&self) -> Result<u64, StorageError> {
        let current = if let Some(raw) = self.store.get(keys::VISIT_COUNT).await? {
            parse_count(&raw)
        } else {
            self.store.set(keys::VISIT_COUNT, "0").await?;
            0
        };
        let next = current.saturating_add(1);
        self.store
            .set(keys::VISIT_COUNT, &next.to_string())
            .await?;
        Ok(next)
    }

    /// Current visit count (zero when absent).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the counter cannot be read.
    pub async fn visit_count(&self) -> Result<u64, StorageError> {
        Ok(self
            .store
            .get(keys::VISIT_COUNT)
            .await?
            .map_or(0, |raw| parse_count(&raw)))
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the flag cannot be written.
    pub async fn mark_completed(&self) -> Result<(), StorageError> {
        self.store.set(keys::SURVEY_COMPLETED, COMPLETED_FLAG).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the flag cannot be read.
    pub async fn is_completed(&self) -> Result<bool, StorageError> {
        Ok(self.store.get(keys::SURVEY_COMPLETED).await?.as_deref() == Some(COMPLETED_FLAG))
    }
}

fn parse_count(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(value = raw, "discarding unparsable visit counter");
        0
    })
}

#[cfg(test)]
mod tests {
    use storage::repository::InMemoryStore;

    use super::*;

    #[tokio::test]
    async fn first_visit_creates_counter() {
        let store = InMemoryStore::new();
        let tracker = VisitTracker::new(Arc::new(store.clone()));

        assert_eq!(tracker.record_visit().await.unwrap(), 1);
        assert_eq!(tracker.record_visit().await.unwrap(), 2);
        assert_eq!(
            store.get(keys::VISIT_COUNT).await.unwrap().as_deref(),
            Some("2")
        );
    }

    #[tokio::test]
    async fn garbage_counter_restarts_from_zero() {
        let store = InMemoryStore::with_entries([(keys::VISIT_COUNT, "lots")]);
        let tracker = VisitTracker::new(Arc::new(store));
        assert_eq!(tracker.visit_count().await.unwrap(), 0);
        assert_eq!(tracker.record_visit().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn completion_flag_round_trips() {
        let tracker = VisitTracker::new(Arc::new(InMemoryStore::new()));
        assert!(!tracker.is_completed().await.unwrap());
        tracker.mark_completed().await.unwrap();
        assert!(tracker.is_completed().await.unwrap());
    }
}
