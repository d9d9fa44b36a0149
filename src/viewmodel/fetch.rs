use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::domain::article::Article;
use crate::pagination::Page;
use crate::repository::QueryKey;

/// Lifecycle of a remote fetch for one query key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            FetchState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Issued when a fetch begins; a resolution must present it back. A ticket
/// that no longer matches the current key, generation, and in-flight slot is
/// superseded, and its result is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub(crate) key: QueryKey,
    pub(crate) generation: u64,
}

impl FetchTicket {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    state: FetchState<Page<Article>>,
    fetched_at: Option<Instant>,
    generation: u64,
}

/// Explicitly owned arena of per-query fetch states for the article-list
/// family. All entries share one generation counter; bumping it invalidates
/// the whole family at once, which makes repeated invalidation idempotent.
#[derive(Debug, Clone)]
pub struct ListCache {
    entries: HashMap<QueryKey, CacheEntry>,
    generation: u64,
    stale_after: Duration,
}

impl ListCache {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            generation: 0,
            stale_after,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, key: &QueryKey) -> Option<&FetchState<Page<Article>>> {
        self.entries.get(key).map(|entry| &entry.state)
    }

    /// Returns the cached page if it is current-generation and younger than
    /// the staleness window.
    pub fn fresh_page(&self, key: &QueryKey, now: Instant) -> Option<&Page<Article>> {
        let entry = self.entries.get(key)?;
        if entry.generation != self.generation {
            return None;
        }
        let fetched_at = entry.fetched_at?;
        if now.duration_since(fetched_at) >= self.stale_after {
            return None;
        }
        entry.state.success()
    }

    /// Marks a fetch as started. An entry that already holds data keeps it
    /// visible while the refetch is in flight.
    pub fn mark_loading(&mut self, key: &QueryKey) {
        let entry = self.entries.entry(key.clone()).or_insert(CacheEntry {
            state: FetchState::Idle,
            fetched_at: None,
            generation: self.generation,
        });
        if entry.state.success().is_none() {
            entry.state = FetchState::Loading;
        }
    }

    pub fn insert_success(&mut self, key: QueryKey, page: Page<Article>, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry {
                state: FetchState::Success(page),
                fetched_at: Some(now),
                generation: self.generation,
            },
        );
    }

    /// Records a failed fetch. When the entry already holds data, the data
    /// stays visible and the caller is told to surface the failure as a
    /// notice instead; returns `true` in that case.
    pub fn insert_error(&mut self, key: &QueryKey, message: String) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) if entry.state.success().is_some() => {
                entry.fetched_at = None;
                true
            }
            Some(entry) => {
                entry.state = FetchState::Error(message);
                entry.fetched_at = None;
                false
            }
            None => {
                self.entries.insert(
                    key.clone(),
                    CacheEntry {
                        state: FetchState::Error(message),
                        fetched_at: None,
                        generation: self.generation,
                    },
                );
                false
            }
        }
    }

    /// Invalidates every cached article-list entry. Entries keep their data
    /// for stale-while-revalidate display, but none counts as fresh until
    /// refetched. Idempotent: invalidating an already-invalidated cache
    /// changes nothing further.
    pub fn invalidate_all(&mut self) {
        self.generation += 1;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::ArticleListQuery;

    fn page(total: usize) -> Page<Article> {
        Page::new(vec![], 1, 10, total)
    }

    #[test]
    fn fresh_entries_expire_after_the_staleness_window() {
        let mut cache = ListCache::new(Duration::from_secs(300));
        let key = ArticleListQuery::new().key();
        let now = Instant::now();

        cache.insert_success(key.clone(), page(5), now);
        assert!(cache.fresh_page(&key, now).is_some());
        assert!(
            cache
                .fresh_page(&key, now + Duration::from_secs(301))
                .is_none()
        );
    }

    #[test]
    fn invalidation_is_idempotent() {
        let mut cache = ListCache::new(Duration::from_secs(300));
        let key = ArticleListQuery::new().key();
        let now = Instant::now();

        cache.insert_success(key.clone(), page(5), now);
        cache.invalidate_all();
        let after_one = cache.generation();
        cache.invalidate_all();

        // Both invalidations leave the same observable state: the entry is
        // stale but its data is still there for display.
        assert!(cache.fresh_page(&key, now).is_none());
        assert!(cache.get(&key).unwrap().success().is_some());
        assert_eq!(cache.generation(), after_one + 1);
    }

    #[test]
    fn loading_keeps_existing_data_visible() {
        let mut cache = ListCache::new(Duration::from_secs(300));
        let key = ArticleListQuery::new().key();
        let now = Instant::now();

        cache.insert_success(key.clone(), page(5), now);
        cache.invalidate_all();
        cache.mark_loading(&key);

        assert!(cache.get(&key).unwrap().success().is_some());
    }

    #[test]
    fn errors_replace_state_only_when_there_is_no_data() {
        let mut cache = ListCache::new(Duration::from_secs(300));
        let key = ArticleListQuery::new().key();
        let other = ArticleListQuery::new().page(2).key();
        let now = Instant::now();

        cache.insert_success(key.clone(), page(5), now);
        assert!(cache.insert_error(&key, "boom".into()));
        assert!(cache.get(&key).unwrap().success().is_some());

        assert!(!cache.insert_error(&other, "boom".into()));
        assert_eq!(cache.get(&other).unwrap().error(), Some("boom"));
    }
}
