//! Lazy item streams over paged listings
//!
//! A [`Pager`] wraps a [`PageFetcher`] and turns a listing into a
//! `futures::Stream` of items. Nothing is fetched until the consumer polls,
//! and each page is fully drained before the next one is requested, so a
//! consumer that stops early never triggers requests for later pages or
//! identifier batches. Dropping the stream is the only cancellation needed.

use super::batcher::{batch_count, split_ids, IdBatches};
use super::types::{PageFetcher, MAX_IDS_PER_REQUEST, MAX_RESULTS_PER_PAGE};
use crate::error::Result;
use crate::progress::{steps, NoProgress, ProgressScope, ProgressSink};
use crate::types::QueryParams;
use futures::stream::{self, Stream, TryStreamExt};
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, error};

/// Stream of items produced by a [`Pager`]
pub type ItemStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Drives a [`PageFetcher`] until its listing is exhausted
pub struct Pager<F> {
    fetcher: F,
    progress: Arc<dyn ProgressSink>,
}

impl<F: PageFetcher> Pager<F> {
    /// Create a pager without progress reporting
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            progress: Arc::new(NoProgress),
        }
    }

    /// Report progress to the given sink
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Get the underlying fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Stream every item of one listing, page after page.
    ///
    /// `params` are sent unchanged on every request, identifiers included.
    /// A not-found answer ends the stream with no items; any other error is
    /// yielded once and ends the stream.
    pub fn stream(&self, params: QueryParams) -> ItemStream<'_, F::Item> {
        self.walk(Plan::Single(Some(params)))
    }

    /// Stream every item, splitting oversized identifier lists.
    ///
    /// When `params.ids` holds more than [`MAX_IDS_PER_REQUEST`] identifiers,
    /// each batch is listed in turn with `ids` replaced by the batch, and the
    /// per-batch streams are concatenated in order. A batch that is not found
    /// contributes no items; the next batch is still listed.
    pub fn stream_all(&self, params: QueryParams) -> ItemStream<'_, F::Item> {
        match params.id_count() {
            Some(len) if len > MAX_IDS_PER_REQUEST => {}
            _ => return self.stream(params),
        }

        let (base, ids) = params.take_ids();
        let ids = ids.unwrap_or_default();
        let total = batch_count(ids.len(), MAX_IDS_PER_REQUEST) as u64;
        match split_ids(ids, MAX_IDS_PER_REQUEST) {
            Ok(batches) => {
                debug!(batches = total, "splitting identifier list");
                self.walk(Plan::Split {
                    base,
                    batches,
                    total,
                })
            }
            Err(e) => Box::pin(stream::once(async move { Err(e) })),
        }
    }

    /// Collect every item of [`stream_all`](Self::stream_all) in order
    pub async fn collect_all(&self, params: QueryParams) -> Result<Vec<F::Item>> {
        self.stream_all(params).try_collect().await
    }

    fn walk(&self, plan: Plan) -> ItemStream<'_, F::Item> {
        let walker = Walker {
            fetcher: &self.fetcher,
            progress: self.progress.as_ref(),
            plan,
            phase: Phase::NeedBatch,
            batch: 0,
        };

        Box::pin(stream::unfold(walker, |mut walker| async move {
            let item = walker.next_item().await?;
            Some((item, walker))
        }))
    }
}

impl<F> std::fmt::Debug for Pager<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager").finish_non_exhaustive()
    }
}

/// Which parameter sets to list, in order
enum Plan {
    Single(Option<QueryParams>),
    Split {
        base: QueryParams,
        batches: IdBatches<String>,
        total: u64,
    },
}

impl Plan {
    fn next_params(&mut self) -> Option<QueryParams> {
        match self {
            Plan::Single(params) => params.take(),
            Plan::Split { base, batches, .. } => batches.next().map(|ids| base.with_ids(ids)),
        }
    }

    fn batch_total(&self) -> Option<u64> {
        match self {
            Plan::Single(_) => None,
            Plan::Split { total, .. } => Some(*total),
        }
    }
}

/// Page loop state for one parameter set
struct Cursor<T> {
    params: QueryParams,
    token: Option<String>,
    buffer: VecDeque<T>,
    pages: u64,
    items: u64,
    exhausted: bool,
}

impl<T> Cursor<T> {
    fn new(params: QueryParams) -> Self {
        Self {
            params,
            token: None,
            buffer: VecDeque::new(),
            pages: 0,
            items: 0,
            exhausted: false,
        }
    }
}

enum Phase<T> {
    NeedBatch,
    Paging(Cursor<T>),
    Done,
}

struct Walker<'a, F: PageFetcher> {
    fetcher: &'a F,
    progress: &'a dyn ProgressSink,
    plan: Plan,
    phase: Phase<F::Item>,
    batch: usize,
}

impl<F: PageFetcher> Walker<'_, F> {
    async fn next_item(&mut self) -> Option<Result<F::Item>> {
        loop {
            match &mut self.phase {
                Phase::Done => return None,
                Phase::NeedBatch => {
                    self.phase = match self.plan.next_params() {
                        Some(params) => {
                            self.batch += 1;
                            Phase::Paging(Cursor::new(params))
                        }
                        None => Phase::Done,
                    };
                }
                Phase::Paging(cursor) => {
                    if let Some(item) = cursor.buffer.pop_front() {
                        cursor.items += 1;
                        return Some(Ok(item));
                    }

                    if cursor.exhausted {
                        debug!(
                            batch = self.batch,
                            pages = cursor.pages,
                            items = cursor.items,
                            "listing exhausted"
                        );
                        if let Some(total) = self.plan.batch_total() {
                            self.progress.update(ProgressScope::Batches, Some(total), 1);
                        }
                        self.phase = Phase::NeedBatch;
                        continue;
                    }

                    let fetched = self
                        .fetcher
                        .fetch_page(&cursor.params, cursor.token.as_deref())
                        .await;

                    match fetched {
                        Ok(page) => {
                            cursor.pages += 1;
                            let total_pages =
                                steps(page.page_info.total_results, MAX_RESULTS_PER_PAGE);
                            self.progress
                                .update(ProgressScope::Pages, Some(total_pages), 1);

                            cursor.token = page.next_token().map(str::to_owned);
                            cursor.exhausted = cursor.token.is_none();
                            debug!(
                                batch = self.batch,
                                page = cursor.pages,
                                items = page.items.len(),
                                last = cursor.exhausted,
                                "fetched page"
                            );
                            cursor.buffer.extend(page.items);
                        }
                        Err(e) if e.is_not_found() => {
                            debug!(batch = self.batch, error = %e, "listing not found, treating as empty");
                            cursor.exhausted = true;
                        }
                        Err(e) => {
                            error!(
                                batch = self.batch,
                                page = cursor.pages + 1,
                                error = %e,
                                "page fetch failed"
                            );
                            self.phase = Phase::Done;
                            return Some(Err(e));
                        }
                    }
                }
            }
        }
    }
}
