//! Pagination module
//!
//! Turns a page-token based listing endpoint into one lazy stream of items.
//!
//! # Overview
//!
//! - [`PageFetcher`] - one request, one page; implemented by the caller or
//!   by [`ListEndpoint`](crate::endpoint::ListEndpoint)
//! - [`split_ids`] - cuts identifier lists to the per-request limit
//! - [`Pager`] - drives a fetcher page after page, batch after batch,
//!   yielding items on demand

mod batcher;
mod stream;
mod types;

pub use batcher::{batch_count, split_ids, IdBatches};
pub use stream::{ItemStream, Pager};
pub use types::{Page, PageFetcher, PageInfo, MAX_IDS_PER_REQUEST, MAX_RESULTS_PER_PAGE};
