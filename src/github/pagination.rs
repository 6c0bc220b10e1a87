//! Pagination requests and page state for GitHub search responses.
//!
//! [`PageRequest`] describes which page to ask for; [`PageInfo`] records what
//! the response said about its position, in particular whether a `next` link
//! was present. The search stage walks pages until `has_next` is false.

use super::error::StatsError;

/// Largest page size GitHub accepts for search requests.
pub const MAX_PER_PAGE: u8 = 100;

/// A request for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u8,
}

impl PageRequest {
    /// Creates a validated page request.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::InvalidPagination` when `page` is zero or
    /// `per_page` is outside `1..=100`.
    pub fn new(page: u32, per_page: u8) -> Result<Self, StatsError> {
        if page == 0 {
            return Err(StatsError::InvalidPagination {
                message: "page must be at least 1".to_owned(),
            });
        }

        if per_page == 0 {
            return Err(StatsError::InvalidPagination {
                message: "per_page must be at least 1".to_owned(),
            });
        }

        if per_page > MAX_PER_PAGE {
            return Err(StatsError::InvalidPagination {
                message: format!("per_page must not exceed {MAX_PER_PAGE}"),
            });
        }

        Ok(Self { page, per_page })
    }

    /// First page with the given page size.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::InvalidPagination` for an invalid page size.
    pub fn first(per_page: u8) -> Result<Self, StatsError> {
        Self::new(1, per_page)
    }

    /// The request for the page after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            per_page: self.per_page,
        }
    }

    /// Page number (1-based).
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Items per page.
    #[must_use]
    pub const fn per_page(self) -> u8 {
        self.per_page
    }
}

/// Current page state for paginated results.
///
/// # Example
///
/// ```
/// use devstats::github::pagination::PageInfo;
///
/// let info = PageInfo::builder(2, 100)
///     .total_pages(Some(3))
///     .has_next(true)
///     .build();
/// assert_eq!(info.current_page(), 2);
/// assert!(info.has_next());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    current_page: u32,
    per_page: u8,
    total_pages: Option<u32>,
    has_next: bool,
}

impl PageInfo {
    /// Starts building page info for the given position.
    #[must_use]
    pub const fn builder(current_page: u32, per_page: u8) -> PageInfoBuilder {
        PageInfoBuilder {
            info: Self {
                current_page,
                per_page,
                total_pages: None,
                has_next: false,
            },
        }
    }

    /// Current page number (1-based).
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn per_page(&self) -> u8 {
        self.per_page
    }

    /// Total number of pages if GitHub reported a `last` link.
    #[must_use]
    pub const fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Returns true if a `next` link was present.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.has_next
    }
}

/// Builder for [`PageInfo`].
#[derive(Debug, Clone, Copy)]
pub struct PageInfoBuilder {
    info: PageInfo,
}

impl PageInfoBuilder {
    /// Sets the total number of pages.
    #[must_use]
    pub const fn total_pages(mut self, total_pages: Option<u32>) -> Self {
        self.info.total_pages = total_pages;
        self
    }

    /// Sets whether there is a next page.
    #[must_use]
    pub const fn has_next(mut self, has_next: bool) -> Self {
        self.info.has_next = has_next;
        self
    }

    /// Finishes the builder.
    #[must_use]
    pub const fn build(self) -> PageInfo {
        self.info
    }
}
