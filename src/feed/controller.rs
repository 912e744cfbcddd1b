use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use tokio::sync::watch;

use super::state::{FeedState, FetchOutcome};
use crate::transport::NewsTransport;

/// Drives the catalog's fetch lifecycle.
///
/// Each operation registers its request synchronously, when it is called,
/// and returns a future that performs the fetch. A response is written only
/// if no newer mode change was issued in the meantime, so the order in which
/// futures are awaited or responses arrive never decides what the feed shows.
///
/// Dropping a returned future before it completes leaves the feed in
/// `Loading`/`LoadingMore` until the next mode change. Hung transport calls
/// have the same effect; there is no timeout at this layer.
pub struct FeedController<T> {
    transport: Arc<T>,
    state: Arc<watch::Sender<FeedState>>,
    page_size: u32,
}

impl<T> Clone for FeedController<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            state: Arc::clone(&self.state),
            page_size: self.page_size,
        }
    }
}

fn normalize_query(query: Option<String>) -> Option<String> {
    query
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
}

impl<T: NewsTransport + 'static> FeedController<T> {
    pub fn new(transport: Arc<T>, page_size: u32) -> Self {
        let (state, _) = watch::channel(FeedState::default());
        Self {
            transport,
            state: Arc::new(state),
            page_size: page_size.max(1),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> FeedState {
        self.state.borrow().clone()
    }

    /// Switch to search mode for `Some(query)` or to the first browse page
    /// for `None`. Supersedes every request issued before it.
    pub fn set_query_from_location(
        &self,
        query: Option<String>,
    ) -> BoxFuture<'static, FetchOutcome> {
        let query = normalize_query(query);
        let mut epoch = 0;
        self.state
            .send_modify(|state| epoch = state.begin_mode_change(query.clone()));

        let this = self.clone();
        match query {
            Some(query) => {
                tracing::debug!("Searching for {:?} (epoch {})", query, epoch);
                async move {
                    let result = this.transport.search(&query).await;
                    this.finish(epoch, |state| state.apply_search(epoch, result))
                }
                .boxed()
            }
            None => {
                tracing::debug!("Loading first page (epoch {})", epoch);
                async move {
                    let result = this.transport.list(1, this.page_size).await;
                    this.finish(epoch, |state| state.apply_first_page(epoch, result))
                }
                .boxed()
            }
        }
    }

    /// Back to the first browse page without a search term.
    pub fn reset(&self) -> BoxFuture<'static, FetchOutcome> {
        self.set_query_from_location(None)
    }

    /// Re-issue the current mode's initial request.
    pub fn retry(&self) -> BoxFuture<'static, FetchOutcome> {
        let query = self.state.borrow().query.clone();
        self.set_query_from_location(query)
    }

    /// Fetch and append the next browse page. Resolves to
    /// `FetchOutcome::Skipped` without touching the transport when there is
    /// no next page, the feed is searching, or a load is already outstanding.
    pub fn load_more(&self) -> BoxFuture<'static, FetchOutcome> {
        let mut ticket = None;
        self.state.send_if_modified(|state| {
            ticket = state.begin_load_more();
            ticket.is_some()
        });

        let Some(ticket) = ticket else {
            tracing::debug!("Load more ignored");
            return future::ready(FetchOutcome::Skipped).boxed();
        };

        tracing::debug!("Loading page {} (epoch {})", ticket.page, ticket.epoch);
        let this = self.clone();
        async move {
            let result = this.transport.list(ticket.page, this.page_size).await;
            this.finish(ticket.epoch, |state| state.apply_next_page(ticket, result))
        }
        .boxed()
    }

    fn finish(
        &self,
        epoch: u64,
        apply: impl FnOnce(&mut FeedState) -> FetchOutcome,
    ) -> FetchOutcome {
        let mut outcome = FetchOutcome::Discarded;
        self.state.send_if_modified(|state| {
            outcome = apply(state);
            outcome != FetchOutcome::Discarded
        });
        if outcome == FetchOutcome::Discarded {
            tracing::debug!("Discarded stale response for epoch {}", epoch);
        }
        outcome
    }
}
