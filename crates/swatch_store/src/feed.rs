//! Paged theme feed
//!
//! The feed splits each fetch into a request and a completion so that the
//! caller can run the fetch however it likes. Every request carries the
//! generation of the feed that issued it; completions from before the last
//! [`reset`](ThemeFeed::reset) or [`refetch`](ThemeFeed::refetch) are dropped.

use tracing::debug;

use crate::error::StoreError;
use crate::record::{PublishedTheme, ThemePage};
use crate::repository::{ThemeRepository, DEFAULT_PAGE_SIZE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RequestKind {
    First,
    Next,
}

/// An issued page fetch, handed back to [`ThemeFeed::complete`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    generation: u64,
    kind: RequestKind,
    cursor: Option<String>,
    limit: usize,
}

impl PageRequest {
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Run the request against `repo`.
    pub fn fetch<R: ThemeRepository + ?Sized>(&self, repo: &R) -> Result<ThemePage, StoreError> {
        repo.page(self.cursor(), Some(self.limit))
    }
}

#[derive(Debug)]
pub struct ThemeFeed {
    pages: Vec<ThemePage>,
    next_cursor: Option<String>,
    page_size: usize,
    generation: u64,
    is_loading: bool,
    is_fetching_next_page: bool,
    error: Option<StoreError>,
}

impl Default for ThemeFeed {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ThemeFeed {
    /// Empty feed; it counts as loading until the first page completes.
    pub fn new(page_size: usize) -> Self {
        Self {
            pages: Vec::new(),
            next_cursor: None,
            page_size,
            generation: 0,
            is_loading: true,
            is_fetching_next_page: false,
            error: None,
        }
    }

    /// Start loading from the newest theme, discarding anything in flight.
    pub fn begin_first_page(&mut self) -> PageRequest {
        self.generation += 1;
        self.is_loading = true;
        self.is_fetching_next_page = false;
        self.error = None;
        PageRequest {
            generation: self.generation,
            kind: RequestKind::First,
            cursor: None,
            limit: self.page_size,
        }
    }

    /// Same as [`begin_first_page`](Self::begin_first_page).
    pub fn refetch(&mut self) -> PageRequest {
        self.begin_first_page()
    }

    /// Request the page after the last one loaded.
    ///
    /// Returns `None` while another fetch is in flight or when there is
    /// nothing more to load.
    pub fn begin_next_page(&mut self) -> Option<PageRequest> {
        if self.is_loading || self.is_fetching_next_page {
            return None;
        }
        let cursor = self.next_cursor.clone()?;
        self.is_fetching_next_page = true;
        self.error = None;
        Some(PageRequest {
            generation: self.generation,
            kind: RequestKind::Next,
            cursor: Some(cursor),
            limit: self.page_size,
        })
    }

    /// Apply the outcome of `request`. Returns `false` for stale requests.
    pub fn complete(
        &mut self,
        request: PageRequest,
        result: Result<ThemePage, StoreError>,
    ) -> bool {
        if request.generation != self.generation {
            debug!(
                request = request.generation,
                current = self.generation,
                "dropping stale feed page"
            );
            return false;
        }

        match (request.kind, result) {
            (RequestKind::First, Ok(page)) => {
                self.next_cursor = page.next_cursor.clone();
                self.pages = vec![page];
            }
            (RequestKind::First, Err(err)) => {
                err.log("getThemesPaginated", "first page");
                self.pages.clear();
                self.next_cursor = None;
                self.error = Some(err);
            }
            (RequestKind::Next, Ok(page)) => {
                self.next_cursor = page.next_cursor.clone();
                self.pages.push(page);
            }
            (RequestKind::Next, Err(err)) => {
                err.log("getThemesPaginated", request.cursor().unwrap_or_default());
                self.error = Some(err);
            }
        }

        match request.kind {
            RequestKind::First => self.is_loading = false,
            RequestKind::Next => self.is_fetching_next_page = false,
        }
        true
    }

    /// Drop all pages and ignore anything still in flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pages.clear();
        self.next_cursor = None;
        self.is_loading = false;
        self.is_fetching_next_page = false;
        self.error = None;
    }

    /// Load the first page from `repo` synchronously.
    pub fn load_first_page<R: ThemeRepository + ?Sized>(&mut self, repo: &R) {
        let request = self.begin_first_page();
        let result = request.fetch(repo);
        self.complete(request, result);
    }

    /// Load the next page from `repo` synchronously. Returns whether a page
    /// was requested.
    pub fn fetch_next_page<R: ThemeRepository + ?Sized>(&mut self, repo: &R) -> bool {
        let Some(request) = self.begin_next_page() else {
            return false;
        };
        let result = request.fetch(repo);
        self.complete(request, result)
    }

    pub fn pages(&self) -> &[ThemePage] {
        &self.pages
    }

    /// Every loaded theme in feed order.
    pub fn themes(&self) -> impl Iterator<Item = &PublishedTheme> + '_ {
        self.pages.iter().flat_map(|page| page.themes.iter())
    }

    pub fn has_next_page(&self) -> bool {
        self.next_cursor.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_fetching_next_page(&self) -> bool {
        self.is_fetching_next_page
    }

    pub fn error(&self) -> Option<&StoreError> {
        self.error.as_ref()
    }
}
