//! Per-record enrichment.
//!
//! Each enrichment is an independent task keyed by record id. Completions
//! race freely: `update_one` only ever overwrites the sentiment field with a
//! parsed label, so last-writer-wins needs no coordination. A record that
//! disappeared (store cleared, view torn down) makes the write a no-op.

use std::sync::Arc;

use looter_extract::ResultStore;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::client::SentimentClient;

/// Classify the record's description and write the label back.
///
/// Returns `true` only when the store was actually updated. All failure
/// paths — record missing, unrecognized label, classifier error, record
/// cleared mid-flight — leave the store as-is and log to the operator
/// channel; nothing surfaces to the user.
pub async fn enrich_record(client: &SentimentClient, store: &ResultStore, id: Uuid) -> bool {
    let Some(record) = store.get(id) else {
        tracing::debug!(%id, "record no longer in store, skipping enrichment");
        return false;
    };

    match client.classify(&record.description).await {
        Ok(Some(sentiment)) => {
            let updated = store.update_one(id, |row| row.sentiment = Some(sentiment));
            if updated {
                tracing::info!(%id, %sentiment, "sentiment updated");
            } else {
                tracing::debug!(%id, "record cleared during enrichment, label discarded");
            }
            updated
        }
        Ok(None) => {
            tracing::warn!(%id, "classifier returned an unrecognized label, leaving sentiment unset");
            false
        }
        Err(err) => {
            tracing::error!(%id, error = %err, "sentiment analysis failed");
            false
        }
    }
}

/// Fire-and-forget variant of [`enrich_record`].
///
/// Any number of these may be outstanding at once, including for the same
/// record; there is no dedup guard and none is needed.
pub fn spawn_enrichment(
    client: Arc<SentimentClient>,
    store: ResultStore,
    id: Uuid,
) -> JoinHandle<bool> {
    tokio::spawn(async move { enrich_record(&client, &store, id).await })
}
