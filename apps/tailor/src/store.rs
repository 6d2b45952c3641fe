//! In-memory artifact store keyed by random v4 UUIDs.
//!
//! Bounded two ways: entries expire `ttl` after insertion, and inserting into a
//! full store evicts the oldest entry first. Expired entries read as missing
//! even before the sweeper removes them. Nothing survives a restart.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::scoring::MatchScore;

/// Everything produced by one successful tailoring run. Immutable once stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactBundle {
    /// Source the PDF was rendered from; served by `/download/html/:id`.
    pub resume_html: String,
    pub pdf: Bytes,
    pub docx: Bytes,
    pub match_score: MatchScore,
    pub revised_resume: String,
}

struct Entry {
    bundle: Arc<ArtifactBundle>,
    inserted_at: Instant,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<Uuid, Entry>,
    /// Insertion order; with a fixed TTL this is also expiry order.
    order: VecDeque<Uuid>,
}

pub struct ArtifactStore {
    ttl: Duration,
    max_entries: usize,
    inner: RwLock<Inner>,
}

impl ArtifactStore {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Stores `bundle` under a fresh identifier and returns it.
    pub fn create(&self, bundle: ArtifactBundle) -> Uuid {
        let now = Instant::now();
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        self.drop_expired(&mut inner, now);
        while inner.entries.len() >= self.max_entries {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
            debug!("Evicted artifact bundle {oldest} (store full)");
        }

        let mut id = Uuid::new_v4();
        while inner.entries.contains_key(&id) {
            id = Uuid::new_v4();
        }

        inner.entries.insert(
            id,
            Entry {
                bundle: Arc::new(bundle),
                inserted_at: now,
            },
        );
        inner.order.push_back(id);
        id
    }

    /// Looks up a live bundle. Unknown and expired ids are both `None`.
    pub fn get(&self, id: &Uuid) -> Option<Arc<ArtifactBundle>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .entries
            .get(id)
            .filter(|entry| entry.inserted_at.elapsed() < self.ttl)
            .map(|entry| Arc::clone(&entry.bundle))
    }

    /// Removes expired entries, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        self.drop_expired(&mut inner, Instant::now())
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    fn drop_expired(&self, inner: &mut Inner, now: Instant) -> usize {
        let mut dropped = 0;
        while let Some(oldest) = inner.order.front().copied() {
            let expired = inner
                .entries
                .get(&oldest)
                .map_or(true, |e| now.duration_since(e.inserted_at) >= self.ttl);
            if !expired {
                break;
            }
            inner.order.pop_front();
            if inner.entries.remove(&oldest).is_some() {
                dropped += 1;
            }
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn bundle(text: &str) -> ArtifactBundle {
        ArtifactBundle {
            resume_html: format!("<div>{text}</div>"),
            pdf: Bytes::from_static(b"%PDF-1.3"),
            docx: Bytes::from_static(b"PK"),
            match_score: MatchScore::default(),
            revised_resume: text.to_string(),
        }
    }

    fn store() -> ArtifactStore {
        ArtifactStore::new(Duration::from_secs(60), 16)
    }

    #[tokio::test]
    async fn test_get_returns_created_bundle() {
        let store = store();
        let original = bundle("resume");
        let id = store.create(original.clone());
        assert_eq!(store.get(&id).as_deref(), Some(&original));
    }

    #[tokio::test]
    async fn test_unknown_id_is_none() {
        let store = store();
        store.create(bundle("resume"));
        assert!(store.get(&Uuid::new_v4()).is_none());
    }

    #[tokio::test]
    async fn test_get_does_not_mutate() {
        let store = store();
        let id = store.create(bundle("resume"));
        let _ = store.get(&id);
        let _ = store.get(&Uuid::new_v4());
        assert_eq!(store.len(), 1);
        assert!(store.get(&id).is_some());
    }

    #[tokio::test]
    async fn test_ids_unique_over_10k_creates() {
        let store = ArtifactStore::new(Duration::from_secs(60), 20_000);
        let ids: HashSet<Uuid> = (0..10_000).map(|_| store.create(bundle("x"))).collect();
        assert_eq!(ids.len(), 10_000);
        assert_eq!(store.len(), 10_000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_bundle_is_not_found() {
        let store = ArtifactStore::new(Duration::from_secs(30), 16);
        let id = store.create(bundle("resume"));
        tokio::time::advance(Duration::from_secs(29)).await;
        assert!(store.get(&id).is_some());
        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(store.get(&id).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_drops_only_expired() {
        let store = ArtifactStore::new(Duration::from_secs(30), 16);
        let old = store.create(bundle("old"));
        tokio::time::advance(Duration::from_secs(20)).await;
        let fresh = store.create(bundle("fresh"));
        tokio::time::advance(Duration::from_secs(15)).await;

        assert_eq!(store.purge_expired(), 1);
        assert!(store.get(&old).is_none());
        assert!(store.get(&fresh).is_some());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_full_store_evicts_oldest() {
        let store = ArtifactStore::new(Duration::from_secs(60), 2);
        let first = store.create(bundle("1"));
        let second = store.create(bundle("2"));
        let third = store.create(bundle("3"));

        assert!(store.get(&first).is_none());
        assert!(store.get(&second).is_some());
        assert!(store.get(&third).is_some());
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_creates_do_not_lose_entries() {
        let store = Arc::new(ArtifactStore::new(Duration::from_secs(60), 1_000));
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    (0..50)
                        .map(|i| store.create(bundle(&format!("{worker}-{i}"))))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            ids.extend(handle.await.unwrap());
        }
        assert_eq!(ids.len(), 400);
        assert!(ids.iter().all(|id| store.get(id).is_some()));
    }
}
