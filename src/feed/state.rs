use crate::error::TransportError;
use crate::models::{Article, ListPage, Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedMode {
    #[default]
    Browse,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedStatus {
    #[default]
    Idle,
    Loading,
    LoadingMore,
    Ready,
    Error,
}

/// What happened to a fetch once it completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was written to the feed.
    Applied,
    /// The fetch failed and the feed moved to `FeedStatus::Error`.
    Failed,
    /// A newer request superseded this one; state was left untouched.
    Discarded,
    /// No request was issued.
    Skipped,
}

/// Presentation decision derived from a `FeedState`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedView<'a> {
    Loading,
    Failed { message: &'a str, has_items: bool },
    NoResults { query: &'a str },
    Empty,
    Articles(&'a [Article]),
}

/// Catalog state. Only `FeedController` writes it; everyone else reads
/// snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedState {
    pub(crate) mode: FeedMode,
    pub(crate) items: Vec<Article>,
    pub(crate) cursor: Option<Page>,
    pub(crate) query: Option<String>,
    pub(crate) status: FeedStatus,
    pub(crate) epoch: u64,
    pub(crate) error: Option<String>,
}

/// A load-more request admitted by `FeedState::begin_load_more`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LoadMoreTicket {
    pub epoch: u64,
    pub page: u32,
}

impl FeedState {
    pub fn mode(&self) -> FeedMode {
        self.mode
    }

    pub fn items(&self) -> &[Article] {
        &self.items
    }

    pub fn cursor(&self) -> Option<&Page> {
        self.cursor.as_ref()
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn status(&self) -> FeedStatus {
        self.status
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_load_more(&self) -> bool {
        self.mode == FeedMode::Browse
            && !matches!(self.status, FeedStatus::Loading | FeedStatus::LoadingMore)
            && self.cursor.is_some_and(|c| c.has_next)
    }

    pub fn view(&self) -> FeedView<'_> {
        match self.status {
            FeedStatus::Error => FeedView::Failed {
                message: self.error.as_deref().unwrap_or_default(),
                has_items: !self.items.is_empty(),
            },
            FeedStatus::Idle | FeedStatus::Loading if self.items.is_empty() => FeedView::Loading,
            FeedStatus::Ready if self.items.is_empty() => match (self.mode, self.query()) {
                (FeedMode::Search, Some(query)) => FeedView::NoResults { query },
                _ => FeedView::Empty,
            },
            _ => FeedView::Articles(&self.items),
        }
    }

    /// Start a new request generation for `query` (absent = browse).
    /// Returns the epoch the response must carry to be applied.
    pub(crate) fn begin_mode_change(&mut self, query: Option<String>) -> u64 {
        self.epoch += 1;
        self.mode = if query.is_some() {
            FeedMode::Search
        } else {
            FeedMode::Browse
        };
        if self.mode == FeedMode::Search {
            self.cursor = None;
        }
        self.query = query;
        self.status = FeedStatus::Loading;
        self.error = None;
        self.epoch
    }

    pub(crate) fn begin_load_more(&mut self) -> Option<LoadMoreTicket> {
        if !self.can_load_more() {
            return None;
        }
        let page = self.cursor.and_then(|c| c.next_page())?;
        self.status = FeedStatus::LoadingMore;
        self.error = None;
        Some(LoadMoreTicket {
            epoch: self.epoch,
            page,
        })
    }

    pub(crate) fn apply_first_page(
        &mut self,
        epoch: u64,
        result: Result<ListPage, TransportError>,
    ) -> FetchOutcome {
        if epoch != self.epoch {
            return FetchOutcome::Discarded;
        }
        match result {
            Ok(list) => {
                warn_if_inconsistent(&list.page);
                self.items = list.articles;
                self.cursor = Some(list.page);
                self.ready()
            }
            Err(e) => self.fail(e),
        }
    }

    pub(crate) fn apply_search(
        &mut self,
        epoch: u64,
        result: Result<Vec<Article>, TransportError>,
    ) -> FetchOutcome {
        if epoch != self.epoch {
            return FetchOutcome::Discarded;
        }
        match result {
            Ok(articles) => {
                self.items = articles;
                self.cursor = None;
                self.ready()
            }
            Err(e) => self.fail(e),
        }
    }

    pub(crate) fn apply_next_page(
        &mut self,
        ticket: LoadMoreTicket,
        result: Result<ListPage, TransportError>,
    ) -> FetchOutcome {
        if ticket.epoch != self.epoch || self.status != FeedStatus::LoadingMore {
            return FetchOutcome::Discarded;
        }
        match result {
            Ok(list) => {
                warn_if_inconsistent(&list.page);
                self.items.extend(list.articles);
                self.cursor = Some(list.page);
                self.ready()
            }
            Err(e) => self.fail(e),
        }
    }

    fn ready(&mut self) -> FetchOutcome {
        self.status = FeedStatus::Ready;
        self.error = None;
        FetchOutcome::Applied
    }

    fn fail(&mut self, error: TransportError) -> FetchOutcome {
        tracing::warn!("Feed request failed: {}", error);
        self.status = FeedStatus::Error;
        self.error = Some(error.to_string());
        FetchOutcome::Failed
    }
}

fn warn_if_inconsistent(page: &Page) {
    if !page.is_consistent() {
        tracing::warn!(
            "Pagination disagrees with itself: page {}/{} has_next={}",
            page.current_page,
            page.total_pages,
            page.has_next
        );
    }
}
