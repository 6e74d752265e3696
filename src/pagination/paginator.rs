//! The page-by-page state machine.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::api::ApiError;
use crate::pagination::PageSpec;
use crate::response::Envelope;

/// A boxed future resolving to one fetched page.
pub type PageFuture<'a> = Pin<Box<dyn Future<Output = Result<Envelope, ApiError>> + Send + 'a>>;

type FetchFn<'a> = Box<dyn FnMut(u32) -> PageFuture<'a> + Send + 'a>;

/// Drives a multi-page result set one request at a time.
///
/// Page `n` is fetched only if `n` is within the caller's limit, within the
/// hard cap, and either `n == 1` or `n` is within the total page count the
/// previous response declared. A response declaring zero pages ends the
/// sequence after it is yielded. A fetch error is returned once and ends the
/// sequence. A finished paginator cannot be restarted.
///
/// Nothing is prefetched: each call to [`Paginator::next`] sends at most one
/// request.
///
/// # Example
///
/// ```rust,ignore
/// let mut pages = api.item_search("Books", &[("Keywords", "rust")], Some(3));
/// while let Some(envelope) = pages.next().await? {
///     println!("page {} of {}", pages.current(), pages.pages());
/// }
/// ```
pub struct Paginator<'a> {
    spec: PageSpec,
    fetch: FetchFn<'a>,
    next_page: u32,
    current: u32,
    pages: u32,
    results: u32,
    limit: Option<u32>,
    hard_cap: Option<u32>,
    done: bool,
}

impl<'a> Paginator<'a> {
    /// Creates a paginator that calls `fetch` with each page number.
    pub fn new<F>(spec: PageSpec, fetch: F) -> Self
    where
        F: FnMut(u32) -> PageFuture<'a> + Send + 'a,
    {
        Self {
            spec,
            fetch: Box::new(fetch),
            next_page: 1,
            current: 0,
            pages: 0,
            results: 0,
            limit: None,
            hard_cap: None,
            done: false,
        }
    }

    /// Sets the highest page the caller wants.
    #[must_use]
    pub fn limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the highest page the service will serve.
    #[must_use]
    pub fn hard_cap(mut self, cap: Option<u32>) -> Self {
        self.hard_cap = cap;
        self
    }

    /// Returns the page most recently fetched, or 0 before the first fetch.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Returns the total page count the last response declared.
    #[must_use]
    pub const fn pages(&self) -> u32 {
        self.pages
    }

    /// Returns the total result count the last response declared.
    #[must_use]
    pub const fn results(&self) -> u32 {
        self.results
    }

    /// Returns `true` once the sequence has ended.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Returns the page specification.
    #[must_use]
    pub const fn spec(&self) -> &PageSpec {
        &self.spec
    }

    /// Fetches the next page.
    ///
    /// Returns `Ok(None)` once the sequence has ended.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the paginator is finished afterwards.
    pub async fn next(&mut self) -> Result<Option<Envelope>, ApiError> {
        if self.done {
            return Ok(None);
        }

        let page = self.next_page;
        if !self.may_fetch(page) {
            self.done = true;
            return Ok(None);
        }

        tracing::debug!(counter = %self.spec.counter(), page, "Fetching page");
        let envelope = match (self.fetch)(page).await {
            Ok(envelope) => envelope,
            Err(e) => {
                self.done = true;
                return Err(e);
            }
        };

        self.current = self.spec.current_page().extract(&envelope).unwrap_or(page);
        self.pages = self.spec.total_pages().extract(&envelope).unwrap_or(0);
        self.results = self.spec.total_results().extract(&envelope).unwrap_or(0);
        self.next_page = page.saturating_add(1);
        if self.pages == 0 {
            self.done = true;
        }

        Ok(Some(envelope))
    }

    /// Fetches every remaining page.
    ///
    /// # Errors
    ///
    /// Returns the first fetch error; pages fetched before it are dropped.
    pub async fn collect_pages(mut self) -> Result<Vec<Envelope>, ApiError> {
        let mut envelopes = Vec::new();
        while let Some(envelope) = self.next().await? {
            envelopes.push(envelope);
        }
        Ok(envelopes)
    }

    fn may_fetch(&self, page: u32) -> bool {
        let within_limit = self.limit.map_or(true, |limit| page <= limit);
        let within_cap = self.hard_cap.map_or(true, |cap| page <= cap);
        let within_total = page == 1 || page <= self.pages;
        within_limit && within_cap && within_total
    }
}

impl fmt::Debug for Paginator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("counter", &self.spec.counter())
            .field("next_page", &self.next_page)
            .field("current", &self.current)
            .field("pages", &self.pages)
            .field("results", &self.results)
            .field("limit", &self.limit)
            .field("hard_cap", &self.hard_cap)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

// Verify Paginator is Send at compile time
const _: fn() = || {
    const fn assert_send<T: Send>() {}
    assert_send::<Paginator<'static>>();
};
