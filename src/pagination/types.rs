//! Pagination types and traits
//!
//! Defines the page shape and the fetch capability the pager drives.

use crate::error::Result;
use crate::types::QueryParams;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Maximum identifiers a single listing request may carry
pub const MAX_IDS_PER_REQUEST: usize = 50;

/// Page size requested from the endpoint
pub const MAX_RESULTS_PER_PAGE: u64 = 50;

/// Result counts reported alongside a page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Total number of results across all pages
    #[serde(default)]
    pub total_results: u64,
    /// Number of results included in this page
    #[serde(default)]
    pub results_per_page: u64,
}

/// One response from a listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Result counts
    #[serde(default)]
    pub page_info: PageInfo,
    /// Items in endpoint order
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Token for the next page; absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    /// Create a page with no continuation
    pub fn last(items: Vec<T>) -> Self {
        let count = items.len() as u64;
        Self {
            page_info: PageInfo {
                total_results: count,
                results_per_page: count,
            },
            items,
            next_page_token: None,
        }
    }

    /// Set the continuation token
    #[must_use]
    pub fn with_next(mut self, token: impl Into<String>) -> Self {
        self.next_page_token = Some(token.into());
        self
    }

    /// Set the total result count
    #[must_use]
    pub fn with_total(mut self, total_results: u64) -> Self {
        self.page_info.total_results = total_results;
        self
    }

    /// The continuation token, treating an empty token as absent
    pub fn next_token(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Check if this is the final page
    pub fn is_last(&self) -> bool {
        self.next_token().is_none()
    }
}

/// Capability to fetch one page of a listing.
///
/// Implementations perform exactly one request per call and never retry
/// on the pager's behalf. Report a missing listing with an error for which
/// [`Error::is_not_found`](crate::Error::is_not_found) holds.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Item type of the listing
    type Item: Send + 'static;

    /// Fetch the page identified by `page_token`, or the first page if `None`
    async fn fetch_page(
        &self,
        params: &QueryParams,
        page_token: Option<&str>,
    ) -> Result<Page<Self::Item>>;
}

#[async_trait]
impl<F: PageFetcher + ?Sized> PageFetcher for std::sync::Arc<F> {
    type Item = F::Item;

    async fn fetch_page(
        &self,
        params: &QueryParams,
        page_token: Option<&str>,
    ) -> Result<Page<Self::Item>> {
        (**self).fetch_page(params, page_token).await
    }
}
