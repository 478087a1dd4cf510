// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # pagewalk
//!
//! Lazy pagination over page-token listing APIs.
//!
//! Many listing APIs answer a request with one page of items plus an opaque
//! token for the next page, and cap how many identifiers a single request
//! may carry. pagewalk hides both limits behind one stream of items.
//!
//! ## Features
//!
//! - **Lazy Streams**: Pages are fetched only when the consumer needs more items
//! - **Identifier Batching**: Long id lists are split into requests of at most 50
//! - **Not-Found Tolerance**: A 404 listing is an empty listing, not a failure
//! - **Progress Reporting**: Optional batch and page progress sinks
//! - **YAML Config**: Describe an API once and list any of its resources
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use pagewalk::{load_config, ListEndpoint, Pager, QueryParams, Result};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = load_config("youtube.yaml")?;
//!     let client = Arc::new(pagewalk::http::HttpClient::with_config(config.client_config())?);
//!     let endpoint = ListEndpoint::from_config(client, &config, "playlistItems")?;
//!
//!     let pager = Pager::new(endpoint);
//!     let params = QueryParams::new().param("playlistId", "UU123");
//!     let mut items = pager.stream_all(params);
//!     while let Some(item) = items.next().await {
//!         println!("{}", item?);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                             Pager                               │
//! │   stream(params)   stream_all(params)   collect_all(params)     │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────────────┬──────────────────┐
//! │  Batching    │          PageFetcher          │    Progress      │
//! ├──────────────┼───────────────────────────────┼──────────────────┤
//! │ split_ids    │ ListEndpoint (YAML resource)  │ Batches          │
//! │ ≤ 50 per req │ HttpClient: retry, backoff,   │ Pages            │
//! │              │ rate limit                    │ tracing sink     │
//! └──────────────┴───────────────────────────────┴──────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Progress reporting
pub mod progress;

/// Lazy page and batch streaming
pub mod pagination;

/// HTTP client with retry and rate limiting
pub mod http;

/// API configuration
pub mod config;

/// HTTP list endpoints
pub mod endpoint;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{load_config, load_config_from_str, ApiConfig};
pub use endpoint::ListEndpoint;
pub use pagination::{Page, PageFetcher, Pager};
pub use progress::{ProgressScope, ProgressSink};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
