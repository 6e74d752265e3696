//! Multi-page result sets.
//!
//! Search results and customer reviews come back one page at a time. A
//! [`PageSpec`] names the request parameter that selects a page and says
//! where each response declares the current page, the total page count and
//! the total result count. A [`Paginator`] uses it to walk the pages.
//!
//! # Example
//!
//! ```rust
//! use amazon_product::pagination::PageSpec;
//!
//! let spec = PageSpec::item_search();
//! assert_eq!(spec.counter(), "ItemPage");
//! ```

mod extractor;
mod paginator;

pub use extractor::Extractor;
pub use paginator::{PageFuture, Paginator};

use crate::operations::Operation;
use crate::xml::XmlError;

/// Most pages an item search over SearchIndex `All` can return.
pub const ALL_INDEX_PAGE_CAP: u32 = 5;

/// Most pages an item search over any other index can return.
pub const SEARCH_PAGE_CAP: u32 = 400;

/// Returns the hard page cap for an item search over `search_index`.
#[must_use]
pub fn item_search_cap(search_index: &str) -> u32 {
    if search_index == "All" {
        ALL_INDEX_PAGE_CAP
    } else {
        SEARCH_PAGE_CAP
    }
}

/// Where a paginated operation keeps its counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSpec {
    counter: String,
    current_page: Extractor,
    total_pages: Extractor,
    total_results: Extractor,
}

impl PageSpec {
    /// Creates a spec from path expressions.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::InvalidPath`] if an expression cannot be parsed.
    pub fn new(
        counter: impl Into<String>,
        current_page: &str,
        total_pages: &str,
        total_results: &str,
    ) -> Result<Self, XmlError> {
        Ok(Self::from_extractors(
            counter,
            Extractor::new(current_page)?,
            Extractor::new(total_pages)?,
            Extractor::new(total_results)?,
        ))
    }

    /// Creates a spec from prepared extractors.
    #[must_use]
    pub fn from_extractors(
        counter: impl Into<String>,
        current_page: Extractor,
        total_pages: Extractor,
        total_results: Extractor,
    ) -> Self {
        Self {
            counter: counter.into(),
            current_page,
            total_pages,
            total_results,
        }
    }

    /// Item search pages, counted by `ItemPage`.
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // built-in expressions are valid
    pub fn item_search() -> Self {
        Self::new(
            Self::registry_counter(Operation::ItemSearch),
            "//aws:Items/aws:Request/aws:ItemSearchRequest/aws:ItemPage",
            "//aws:Items/aws:TotalPages",
            "//aws:Items/aws:TotalResults",
        )
        .expect("built-in item search paths are valid")
    }

    /// Customer review pages of an item lookup, counted by `ReviewPage`.
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // built-in expressions are valid
    pub fn reviews() -> Self {
        Self::new(
            Self::registry_counter(Operation::ItemLookup),
            "//aws:Items/aws:Request/aws:ItemLookupRequest/aws:ReviewPage",
            "//aws:Items/aws:Item/aws:CustomerReviews/aws:TotalReviewPages",
            "//aws:Items/aws:Item/aws:CustomerReviews/aws:TotalReviews",
        )
        .expect("built-in review paths are valid")
    }

    fn registry_counter(operation: Operation) -> &'static str {
        operation
            .page_counter()
            .expect("built-in specs cover paginated operations")
    }

    /// Returns the request parameter that selects a page.
    #[must_use]
    pub fn counter(&self) -> &str {
        &self.counter
    }

    /// Returns the extractor for the current page.
    #[must_use]
    pub const fn current_page(&self) -> &Extractor {
        &self.current_page
    }

    /// Returns the extractor for the total page count.
    #[must_use]
    pub const fn total_pages(&self) -> &Extractor {
        &self.total_pages
    }

    /// Returns the extractor for the total result count.
    #[must_use]
    pub const fn total_results(&self) -> &Extractor {
        &self.total_results
    }
}
