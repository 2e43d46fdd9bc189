//! In-memory result store.
//!
//! Ordered newest-first; grows by prepending a batch at job completion,
//! mutates single records in place on enrichment, and empties only on
//! explicit clear. Handles are cheap clones sharing the same list, so the
//! runner, the API surface, and fire-and-forget enrichment tasks all see one
//! store.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use looter_core::PostRecord;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    rows: Arc<Mutex<Vec<PostRecord>>>,
}

impl ResultStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PostRecord>> {
        // A panic while holding the lock leaves plain data behind; recover it.
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a batch at the front, preserving the batch's relative order.
    pub fn prepend_all(&self, batch: Vec<PostRecord>) {
        let mut rows = self.lock();
        rows.splice(0..0, batch);
    }

    /// Mutate the unique record with `id`.
    ///
    /// Returns `false` when no such record exists — the record may have been
    /// cleared while the caller was suspended, which is benign, not an error.
    pub fn update_one<F>(&self, id: Uuid, mutate: F) -> bool
    where
        F: FnOnce(&mut PostRecord),
    {
        let mut rows = self.lock();
        match rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                mutate(row);
                true
            }
            None => false,
        }
    }

    /// Empty the store unconditionally, returning how many records were removed.
    pub fn clear(&self) -> usize {
        let mut rows = self.lock();
        let removed = rows.len();
        rows.clear();
        removed
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<PostRecord> {
        self.lock().iter().find(|row| row.id == id).cloned()
    }

    /// Newest-first slice of at most `limit` records.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<PostRecord> {
        self.lock().iter().take(limit).cloned().collect()
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<PostRecord> {
        self.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use looter_core::{Platform, Sentiment};

    use super::*;

    fn record(username: &str) -> PostRecord {
        PostRecord {
            id: Uuid::new_v4(),
            platform: Platform::Instagram,
            username: username.to_owned(),
            followers: 100,
            captured_at: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
            likes: 10,
            comments: Some(2),
            views: None,
            retweets: None,
            description: format!("post by {username}"),
            sentiment: None,
        }
    }

    #[test]
    fn prepend_preserves_batch_order_at_the_front() {
        let store = ResultStore::new();
        store.prepend_all(vec![record("old1"), record("old2")]);
        store.prepend_all(vec![record("new1"), record("new2")]);

        let usernames: Vec<String> = store
            .snapshot()
            .into_iter()
            .map(|r| r.username)
            .collect();
        assert_eq!(usernames, vec!["new1", "new2", "old1", "old2"]);
    }

    #[test]
    fn update_with_unknown_id_leaves_store_unchanged() {
        let store = ResultStore::new();
        store.prepend_all(vec![record("alice")]);
        let before = store.snapshot();

        let updated = store.update_one(Uuid::new_v4(), |row| {
            row.sentiment = Some(Sentiment::Positive);
        });

        assert!(!updated);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn update_changes_only_the_targeted_field() {
        let store = ResultStore::new();
        let target = record("alice");
        let id = target.id;
        store.prepend_all(vec![target.clone(), record("bob")]);

        let updated = store.update_one(id, |row| {
            row.sentiment = Some(Sentiment::Negative);
        });
        assert!(updated);

        let row = store.get(id).expect("record still present");
        assert_eq!(row.sentiment, Some(Sentiment::Negative));
        assert_eq!(row.id, target.id);
        assert_eq!(row.username, target.username);
        assert_eq!(row.platform, target.platform);
        assert_eq!(row.followers, target.followers);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn clear_always_yields_an_empty_store() {
        let store = ResultStore::new();
        assert_eq!(store.clear(), 0);

        store.prepend_all(vec![record("a"), record("b"), record("c")]);
        assert_eq!(store.clear(), 3);
        assert!(store.is_empty());
    }

    #[test]
    fn recent_limits_from_the_front() {
        let store = ResultStore::new();
        store.prepend_all(vec![record("c")]);
        store.prepend_all(vec![record("b")]);
        store.prepend_all(vec![record("a")]);

        let recent: Vec<String> = store
            .recent(2)
            .into_iter()
            .map(|r| r.username)
            .collect();
        assert_eq!(recent, vec!["a", "b"]);
    }

    #[test]
    fn clones_share_the_same_rows() {
        let store = ResultStore::new();
        let view = store.clone();
        store.prepend_all(vec![record("shared")]);
        assert_eq!(view.len(), 1);
        view.clear();
        assert!(store.is_empty());
    }
}
