//! Paged font search
//!
//! [`FontSearch`] tracks the results for the current query and category.
//! Like the theme feed, every fetch is split into a request and a completion
//! so the caller decides how the catalog is reached. A request remembers the
//! generation that issued it; completions from an older query are dropped.
//!
//! Loaded pages are cached per `query::category`, so returning to an earlier
//! search restores its pages without another fetch.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Fonts requested per page when the caller does not pick a size.
pub const DEFAULT_FONT_PAGE_SIZE: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontCategory {
    SansSerif,
    Serif,
    Display,
    Handwriting,
    Monospace,
}

impl FontCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SansSerif => "sans-serif",
            Self::Serif => "serif",
            Self::Display => "display",
            Self::Handwriting => "handwriting",
            Self::Monospace => "monospace",
        }
    }
}

/// Category restriction of a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(FontCategory),
}

impl CategoryFilter {
    pub fn matches(self, category: FontCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == category,
        }
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => f.write_str(category.as_str()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown font category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let category = match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => return Ok(Self::All),
            "sans-serif" => FontCategory::SansSerif,
            "serif" => FontCategory::Serif,
            "display" => FontCategory::Display,
            "handwriting" => FontCategory::Handwriting,
            "monospace" => FontCategory::Monospace,
            _ => return Err(UnknownCategory(s.to_string())),
        };
        Ok(Self::Only(category))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontInfo {
    pub family: String,
    pub category: FontCategory,
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub variable: bool,
}

impl FontInfo {
    pub fn new(family: impl Into<String>, category: FontCategory) -> Self {
        Self {
            family: family.into(),
            category,
            variants: Vec::new(),
            variable: false,
        }
    }
}

/// One slice of catalog results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontPage {
    pub fonts: Vec<FontInfo>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

impl FontPage {
    fn next_offset(&self) -> usize {
        self.offset + self.limit
    }
}

/// Anything that can answer a paged font query.
pub trait FontCatalog {
    type Error: Display;

    fn search(
        &self,
        query: &str,
        category: CategoryFilter,
        limit: usize,
        offset: usize,
    ) -> Result<FontPage, Self::Error>;
}

/// Catalog over a fixed font list.
///
/// Families match when they contain the query, ignoring case.
#[derive(Clone, Debug, Default)]
pub struct FontList {
    fonts: Vec<FontInfo>,
}

impl FontList {
    pub fn new(fonts: Vec<FontInfo>) -> Self {
        Self { fonts }
    }
}

impl FontCatalog for FontList {
    type Error = std::convert::Infallible;

    fn search(
        &self,
        query: &str,
        category: CategoryFilter,
        limit: usize,
        offset: usize,
    ) -> Result<FontPage, Self::Error> {
        let needle = query.trim().to_lowercase();
        let matching: Vec<&FontInfo> = self
            .fonts
            .iter()
            .filter(|font| category.matches(font.category))
            .filter(|font| needle.is_empty() || font.family.to_lowercase().contains(&needle))
            .collect();

        let total = matching.len();
        let fonts = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok(FontPage {
            fonts,
            total,
            offset,
            limit,
            has_more: offset + limit < total,
        })
    }
}

fn cache_key(query: &str, category: CategoryFilter) -> String {
    format!("{query}::{category}")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RequestKind {
    First,
    Next,
}

/// An issued catalog fetch, handed back to [`FontSearch::complete`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontPageRequest {
    generation: u64,
    kind: RequestKind,
    query: String,
    category: CategoryFilter,
    offset: usize,
    limit: usize,
}

impl FontPageRequest {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Run the request against `catalog`.
    pub fn fetch<C: FontCatalog + ?Sized>(&self, catalog: &C) -> Result<FontPage, C::Error> {
        catalog.search(&self.query, self.category, self.limit, self.offset)
    }
}

#[derive(Debug)]
pub struct FontSearch {
    query: String,
    category: CategoryFilter,
    page_size: usize,
    enabled: bool,
    pages: Vec<FontPage>,
    has_next_page: bool,
    is_loading: bool,
    is_fetching_next_page: bool,
    generation: u64,
    cache: FxHashMap<String, Vec<FontPage>>,
}

impl Default for FontSearch {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_PAGE_SIZE)
    }
}

impl FontSearch {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            category: CategoryFilter::All,
            page_size: page_size.max(1),
            enabled: true,
            pages: Vec::new(),
            has_next_page: false,
            is_loading: false,
            is_fetching_next_page: false,
            generation: 0,
            cache: FxHashMap::default(),
        }
    }

    /// Switch to `query` in `category`.
    ///
    /// Cached results are restored at once and no request is issued.
    /// Otherwise the pages are cleared and the first page is requested.
    /// Anything still in flight for the previous search goes stale.
    pub fn search(
        &mut self,
        query: impl Into<String>,
        category: CategoryFilter,
    ) -> Option<FontPageRequest> {
        self.query = query.into();
        self.category = category;
        self.generation += 1;
        self.is_fetching_next_page = false;

        if !self.enabled {
            self.pages.clear();
            self.has_next_page = false;
            self.is_loading = false;
            return None;
        }

        let key = cache_key(&self.query, category);
        if let Some(cached) = self.cache.get(&key) {
            debug!(key = %key, pages = cached.len(), "font search served from cache");
            self.pages = cached.clone();
            self.has_next_page = cached.last().is_some_and(|page| page.has_more);
            self.is_loading = false;
            return None;
        }

        self.pages.clear();
        self.has_next_page = false;
        self.is_loading = true;
        Some(self.request(RequestKind::First, 0))
    }

    /// Turn the search on or off. A disabled search shows no results.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<FontPageRequest> {
        self.enabled = enabled;
        let query = std::mem::take(&mut self.query);
        self.search(query, self.category)
    }

    /// Request the page after the last one loaded.
    ///
    /// Returns `None` while a next page is in flight or when there is
    /// nothing more to load.
    pub fn begin_next_page(&mut self) -> Option<FontPageRequest> {
        if !self.has_next_page || self.is_fetching_next_page {
            return None;
        }
        let offset = self.pages.last()?.next_offset();
        self.is_fetching_next_page = true;
        Some(self.request(RequestKind::Next, offset))
    }

    fn request(&self, kind: RequestKind, offset: usize) -> FontPageRequest {
        FontPageRequest {
            generation: self.generation,
            kind,
            query: self.query.clone(),
            category: self.category,
            offset,
            limit: self.page_size,
        }
    }

    /// Apply the outcome of `request`. Returns `false` for stale requests.
    pub fn complete<E: Display>(
        &mut self,
        request: FontPageRequest,
        result: Result<FontPage, E>,
    ) -> bool {
        if request.generation != self.generation {
            debug!(
                request = request.generation,
                current = self.generation,
                query = %request.query,
                "dropping stale font page"
            );
            return false;
        }

        match request.kind {
            RequestKind::First => self.is_loading = false,
            RequestKind::Next => self.is_fetching_next_page = false,
        }

        let page = match result {
            Ok(page) => page,
            Err(err) => {
                warn!(
                    query = %request.query,
                    category = %request.category,
                    offset = request.offset,
                    error = %err,
                    "font search failed"
                );
                return true;
            }
        };

        self.has_next_page = page.has_more;
        match request.kind {
            RequestKind::First => self.pages = vec![page],
            RequestKind::Next => self.pages.push(page),
        }
        self.cache.insert(
            cache_key(&request.query, request.category),
            self.pages.clone(),
        );
        true
    }

    /// Run [`search`](Self::search) against `catalog` synchronously.
    pub fn load<C: FontCatalog + ?Sized>(
        &mut self,
        catalog: &C,
        query: impl Into<String>,
        category: CategoryFilter,
    ) {
        if let Some(request) = self.search(query, category) {
            let result = request.fetch(catalog);
            self.complete(request, result);
        }
    }

    /// Load the next page from `catalog` synchronously. Returns whether a
    /// page was requested.
    pub fn fetch_next_page<C: FontCatalog + ?Sized>(&mut self, catalog: &C) -> bool {
        let Some(request) = self.begin_next_page() else {
            return false;
        };
        let result = request.fetch(catalog);
        self.complete(request, result)
    }

    /// Forget every cached search.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    pub fn pages(&self) -> &[FontPage] {
        &self.pages
    }

    /// Every loaded font in catalog order.
    pub fn fonts(&self) -> impl Iterator<Item = &FontInfo> + '_ {
        self.pages.iter().flat_map(|page| page.fonts.iter())
    }

    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_fetching_next_page(&self) -> bool {
        self.is_fetching_next_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    /// Catalog that counts how often it is asked.
    struct Counting {
        list: FontList,
        calls: Cell<usize>,
    }

    impl Counting {
        fn new() -> Self {
            let mut fonts: Vec<FontInfo> = (0..5)
                .map(|i| FontInfo::new(format!("Sans {i}"), FontCategory::SansSerif))
                .collect();
            fonts.push(FontInfo::new("Roboto Mono", FontCategory::Monospace));
            fonts.push(FontInfo::new("Roboto Serif", FontCategory::Serif));
            Self {
                list: FontList::new(fonts),
                calls: Cell::new(0),
            }
        }
    }

    impl FontCatalog for Counting {
        type Error = String;

        fn search(
            &self,
            query: &str,
            category: CategoryFilter,
            limit: usize,
            offset: usize,
        ) -> Result<FontPage, String> {
            self.calls.set(self.calls.get() + 1);
            match self.list.search(query, category, limit, offset) {
                Ok(page) => Ok(page),
                Err(never) => match never {},
            }
        }
    }

    fn families(search: &FontSearch) -> Vec<&str> {
        search.fonts().map(|font| font.family.as_str()).collect()
    }

    #[test]
    fn category_filter_parses() {
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "monospace".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(FontCategory::Monospace))
        );
        assert!("gothic".parse::<CategoryFilter>().is_err());
        assert_eq!(cache_key("rob", CategoryFilter::All), "rob::all");
    }

    #[test]
    fn pages_by_offset_until_exhausted() {
        let catalog = Counting::new();
        let mut search = FontSearch::new(2);
        search.load(&catalog, "sans", CategoryFilter::All);
        assert_eq!(families(&search), vec!["Sans 0", "Sans 1"]);
        assert!(search.has_next_page());

        while search.fetch_next_page(&catalog) {}
        assert_eq!(search.fonts().count(), 5);
        assert_eq!(search.pages().last().map(|page| page.offset), Some(4));
        assert!(!search.has_next_page());
        assert_eq!(catalog.calls.get(), 3);
    }

    #[test]
    fn revisiting_a_search_uses_the_cache() {
        let catalog = Counting::new();
        let mut search = FontSearch::new(2);
        search.load(&catalog, "sans", CategoryFilter::All);
        search.fetch_next_page(&catalog);
        search.load(&catalog, "roboto", CategoryFilter::All);
        assert_eq!(catalog.calls.get(), 3);

        assert_eq!(search.search("sans", CategoryFilter::All), None);
        assert_eq!(catalog.calls.get(), 3);
        assert_eq!(search.fonts().count(), 4);
        assert!(search.has_next_page());
        assert!(!search.is_loading());

        // Same query in another category is a separate entry.
        let request = search.search("roboto", CategoryFilter::Only(FontCategory::Serif));
        assert!(request.is_some());
    }

    #[test]
    fn answers_for_an_old_query_are_dropped() {
        let catalog = Counting::new();
        let mut search = FontSearch::new(2);
        let stale = search.search("sans", CategoryFilter::All).unwrap();
        let current = search
            .search("roboto", CategoryFilter::Only(FontCategory::Monospace))
            .unwrap();

        let late = stale.fetch(&catalog);
        assert!(!search.complete(stale, late));
        assert!(search.is_loading());
        assert_eq!(search.fonts().count(), 0);

        let page = current.fetch(&catalog);
        assert!(search.complete(current, page));
        assert_eq!(families(&search), vec!["Roboto Mono"]);
    }

    #[test]
    fn next_page_for_an_old_query_is_dropped() {
        let catalog = Counting::new();
        let mut search = FontSearch::new(2);
        search.load(&catalog, "sans", CategoryFilter::All);
        let pending = search.begin_next_page().unwrap();
        assert_eq!(pending.offset(), 2);
        assert_eq!(search.begin_next_page(), None);

        search.load(&catalog, "roboto", CategoryFilter::All);
        let late = pending.fetch(&catalog);
        assert!(!search.complete(pending, late));
        assert_eq!(families(&search), vec!["Roboto Mono", "Roboto Serif"]);
    }

    #[test]
    fn failed_fetch_keeps_pages_and_skips_cache() {
        let catalog = Counting::new();
        let mut search = FontSearch::new(2);
        search.load(&catalog, "sans", CategoryFilter::All);

        let pending = search.begin_next_page().unwrap();
        assert!(search.complete(pending, Err::<FontPage, _>("Failed to fetch fonts")));
        assert_eq!(search.fonts().count(), 2);
        assert!(search.has_next_page());
        assert!(!search.is_fetching_next_page());

        let request = search.search("mono", CategoryFilter::All).unwrap();
        search.complete(request, Err::<FontPage, _>("Failed to fetch fonts"));
        assert!(!search.is_loading());
        assert!(search.search("mono", CategoryFilter::All).is_some());
    }

    #[test]
    fn disabled_search_shows_nothing() {
        let catalog = Counting::new();
        let mut search = FontSearch::new(2);
        search.load(&catalog, "sans", CategoryFilter::All);

        assert_eq!(search.set_enabled(false), None);
        assert_eq!(search.fonts().count(), 0);
        assert!(!search.has_next_page());

        assert_eq!(search.set_enabled(true), None);
        assert_eq!(search.query(), "sans");
        assert_eq!(search.fonts().count(), 2);
        assert_eq!(catalog.calls.get(), 1);
    }
}
