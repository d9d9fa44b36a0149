use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::ApiConfig;
use crate::domain::article::{Article, ArticleDetail, ArticleStatus, NewArticle, UpdateArticle};
use crate::domain::types::{ArticleId, PageSize};
use crate::pagination::{Page, PageInfo};
use crate::repository::errors::{ApiError, ApiResult};
use crate::repository::{ArticleListQuery, ArticleReader, ArticleWriter, normalize_search};
use crate::viewmodel::Notice;
use crate::viewmodel::debounce::Debouncer;
use crate::viewmodel::fetch::{FetchState, FetchTicket, ListCache};

const IDLE: FetchState<Page<Article>> = FetchState::Idle;

const FETCH_FALLBACK: &str = "Failed to load articles";
const CREATE_FALLBACK: &str = "Failed to create article";
const UPDATE_FALLBACK: &str = "Failed to update article";
const DELETE_FALLBACK: &str = "Failed to delete article";

const RETRY_DELAY: Duration = Duration::from_millis(250);

/// Immutable view of the model for rendering. Consumers compare `version`
/// to decide whether anything changed since their last read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSnapshot {
    pub version: u64,
    pub query: ArticleListQuery,
    pub state: FetchState<Page<Article>>,
    pub info: Option<PageInfo>,
    pub search_pending: bool,
}

/// View-model for the paginated, filterable article list.
///
/// Owns the query parameters, the search debouncer, and the keyed fetch
/// cache. The repository is passed in per call so the same model works
/// against the REST backend and against test doubles.
#[derive(Debug, Clone)]
pub struct ArticleListModel {
    query: ArticleListQuery,
    debouncer: Debouncer,
    cache: ListCache,
    in_flight: Option<FetchTicket>,
    retry_limit: u32,
    notices: VecDeque<Notice>,
    version: u64,
}

impl ArticleListModel {
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_query(config, ArticleListQuery::new())
    }

    /// Public-listing preset: published articles only.
    pub fn published(config: &ApiConfig) -> Self {
        Self::with_query(config, ArticleListQuery::published())
    }

    pub fn with_query(config: &ApiConfig, query: ArticleListQuery) -> Self {
        Self::with_cache(config, query, ListCache::new(config.stale_after()))
    }

    /// Builds the model around a caller-owned cache, e.g. one carried over
    /// from a previous screen showing the same list family.
    pub fn with_cache(config: &ApiConfig, query: ArticleListQuery, cache: ListCache) -> Self {
        Self {
            query,
            debouncer: Debouncer::new(config.debounce()),
            cache,
            in_flight: None,
            retry_limit: config.retry_limit,
            notices: VecDeque::new(),
            version: 0,
        }
    }

    pub fn query(&self) -> &ArticleListQuery {
        &self.query
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn cache(&self) -> &ListCache {
        &self.cache
    }

    /// Fetch state for the current query key.
    pub fn state(&self) -> &FetchState<Page<Article>> {
        self.cache.get(&self.query.key()).unwrap_or(&IDLE)
    }

    /// Derived pagination facts, available once the current key has data.
    pub fn page_info(&self) -> Option<PageInfo> {
        self.state().success().map(Page::info)
    }

    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            version: self.version,
            query: self.query.clone(),
            state: self.state().clone(),
            info: self.page_info(),
            search_pending: self.is_search_pending(),
        }
    }

    /// True while a search edit is waiting out its quiet period.
    pub fn is_search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Drains the accumulated user-facing notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    /// Records a keystroke in the search box. The query itself only changes
    /// once [`tick`](Self::tick) observes the settle interval elapse.
    pub fn set_search_input(&mut self, raw: &str, now: Instant) {
        self.debouncer.push(raw, now);
        self.touch();
    }

    /// Applies a search term immediately, bypassing the debouncer.
    pub fn set_search(&mut self, raw: &str) {
        self.debouncer.cancel();
        self.apply_search(normalize_search(raw.to_string()));
    }

    /// Advances the debouncer. Returns `true` when the query changed and a
    /// refetch is due.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(value) = self.debouncer.poll(now) {
            return self.apply_search(normalize_search(value));
        }
        false
    }

    pub fn set_status(&mut self, status: Option<ArticleStatus>) {
        if self.query.status == status {
            return;
        }
        self.query.status = status;
        self.query.page = 1;
        self.touch();
    }

    pub fn set_limit(&mut self, limit: PageSize) {
        if self.query.limit == limit {
            return;
        }
        self.query.limit = limit;
        self.query.page = 1;
        self.touch();
    }

    /// Moves to the requested page, clamped to the known page range of the
    /// current result set when one is cached.
    pub fn set_page(&mut self, page: usize) {
        let mut target = page.max(1);
        if let Some(info) = self.page_info() {
            target = target.min(info.total_pages);
        }
        if self.query.page == target {
            return;
        }
        self.query.page = target;
        self.touch();
    }

    /// Tears the model down: pending search edits and in-flight fetches are
    /// forgotten, so their late resolutions become no-ops.
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
        self.in_flight = None;
    }

    /// Starts a fetch for the current query unless a fresh page is cached or
    /// the same fetch is already in flight. The returned ticket must be
    /// handed back to [`resolve_fetch`](Self::resolve_fetch).
    pub fn begin_fetch(&mut self, now: Instant) -> Option<FetchTicket> {
        let key = self.query.key();
        if self.cache.fresh_page(&key, now).is_some() {
            return None;
        }

        let ticket = FetchTicket {
            key: key.clone(),
            generation: self.cache.generation(),
        };
        if self.in_flight.as_ref() == Some(&ticket) {
            return None;
        }

        self.cache.mark_loading(&key);
        self.in_flight = Some(ticket.clone());
        self.touch();
        Some(ticket)
    }

    /// Completes a fetch. Resolutions whose ticket has been superseded (by a
    /// query change, an invalidation, or teardown) are dropped without
    /// touching any state.
    pub fn resolve_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: ApiResult<Page<Article>>,
        now: Instant,
    ) {
        if self.in_flight.as_ref() != Some(&ticket)
            || ticket.key != self.query.key()
            || ticket.generation != self.cache.generation()
        {
            log::debug!("discarding superseded fetch for {}", ticket.key);
            return;
        }
        self.in_flight = None;

        match outcome {
            Ok(page) => self.cache.insert_success(ticket.key, page, now),
            Err(err) => {
                log::error!("failed to load articles: {err}");
                let message = fetch_error_message(&err);
                if self.cache.insert_error(&ticket.key, message.clone()) {
                    // Stale data stays visible; the failure becomes a toast.
                    self.notices.push_back(Notice::error(message));
                }
            }
        }
        self.touch();
    }

    /// Fetches the current page if needed, retrying transient failures up to
    /// the configured bound.
    pub async fn refresh<R>(&mut self, repo: &R, now: Instant)
    where
        R: ArticleReader + ?Sized,
    {
        let Some(ticket) = self.begin_fetch(now) else {
            return;
        };
        let query = self.query.clone();
        let outcome = fetch_with_retry(repo, &query, self.retry_limit).await;
        self.resolve_fetch(ticket, outcome, now);
    }

    /// Creates an article and invalidates the list cache so every page of
    /// every filter combination refetches on next display.
    pub async fn create_article<R>(
        &mut self,
        repo: &R,
        article: &NewArticle,
    ) -> ApiResult<ArticleDetail>
    where
        R: ArticleWriter + ?Sized,
    {
        match repo.create_article(article).await {
            Ok(created) => {
                self.finish_mutation("Successfully created article");
                Ok(created)
            }
            Err(err) => {
                log::error!("failed to create article: {err}");
                self.fail_mutation(&err, CREATE_FALLBACK);
                Err(err)
            }
        }
    }

    pub async fn update_article<R>(
        &mut self,
        repo: &R,
        id: ArticleId,
        updates: &UpdateArticle,
    ) -> ApiResult<ArticleDetail>
    where
        R: ArticleWriter + ?Sized,
    {
        match repo.update_article(id, updates).await {
            Ok(updated) => {
                self.finish_mutation("Successfully updated article");
                Ok(updated)
            }
            Err(err) => {
                log::error!("failed to update article {id}: {err}");
                self.fail_mutation(&err, UPDATE_FALLBACK);
                Err(err)
            }
        }
    }

    /// Deletes an article. The row is never removed optimistically; the list
    /// only changes after the server confirms and the refetch lands.
    pub async fn delete_article<R>(&mut self, repo: &R, id: ArticleId) -> ApiResult<()>
    where
        R: ArticleWriter + ?Sized,
    {
        match repo.delete_article(id).await {
            Ok(()) => {
                self.finish_mutation("Successfully deleted article");
                Ok(())
            }
            Err(err) => {
                log::error!("failed to delete article {id}: {err}");
                self.fail_mutation(&err, DELETE_FALLBACK);
                Err(err)
            }
        }
    }

    fn apply_search(&mut self, search: Option<String>) -> bool {
        if self.query.search == search {
            return false;
        }
        self.query.search = search;
        self.query.page = 1;
        self.touch();
        true
    }

    fn finish_mutation(&mut self, message: &str) {
        self.cache.invalidate_all();
        self.notices.push_back(Notice::success(message));
        self.touch();
    }

    fn fail_mutation(&mut self, err: &ApiError, fallback: &str) {
        self.notices
            .push_back(Notice::error(mutation_error_message(err, fallback)));
        self.touch();
    }

    fn touch(&mut self) {
        self.version += 1;
    }
}

async fn fetch_with_retry<R>(
    repo: &R,
    query: &ArticleListQuery,
    retry_limit: u32,
) -> ApiResult<Page<Article>>
where
    R: ArticleReader + ?Sized,
{
    let mut attempt = 0;
    loop {
        match repo.list_articles(query).await {
            Ok(page) => return Ok(page),
            Err(err) if err.is_transient() && attempt < retry_limit => {
                attempt += 1;
                log::warn!("article list fetch failed (attempt {attempt}): {err}");
                tokio::time::sleep(RETRY_DELAY * attempt).await;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Message shown when the list itself cannot be loaded. Server-side semantic
/// messages pass through; transport noise collapses to the generic fallback.
fn fetch_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Validation(message) => message.clone(),
        _ => FETCH_FALLBACK.to_string(),
    }
}

fn mutation_error_message(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Validation(message) => message.clone(),
        _ => fallback.to_string(),
    }
}
