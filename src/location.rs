//! Maps navigable locations onto controller calls.

use futures::future::BoxFuture;
use tokio::sync::watch;
use tokio::task::JoinSet;
use url::Url;

use crate::article::ArticleController;
use crate::feed::{FeedController, FeedStatus, FetchOutcome};
use crate::models::Article;
use crate::transport::NewsTransport;

const SEARCH_PARAM: &str = "search";
const ARTICLE_SEGMENT: &str = "article";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` with an optional `?search=` term.
    Catalog { query: Option<String> },
    /// `/article/{identifier}`, identifier percent-decoded.
    Article { identifier: String },
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn parse(href: &str) -> Result<Self, url::ParseError> {
        Url::parse(href).map(Self::new)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    /// Trimmed `search` parameter; blank counts as absent.
    pub fn search_query(&self) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == SEARCH_PARAM)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    pub fn route(&self) -> Route {
        let segments: Vec<&str> = self
            .url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [] => Route::Catalog {
                query: self.search_query(),
            },
            [ARTICLE_SEGMENT, identifier] => Route::Article {
                identifier: urlencoding::decode(identifier)
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| identifier.to_string()),
            },
            _ => Route::Other,
        }
    }

    /// Catalog location on the same origin, with or without a search term.
    pub fn catalog(&self, query: Option<&str>) -> Location {
        let mut url = self.url.clone();
        url.set_path("/");
        url.set_fragment(None);
        url.set_query(None);
        if let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) {
            url.query_pairs_mut().append_pair(SEARCH_PARAM, query);
        }
        Location::new(url)
    }

    /// Detail location for `article` on the same origin.
    pub fn article(&self, article: &Article) -> Location {
        self.article_route(article.route_identifier())
    }

    pub fn article_route(&self, identifier: &str) -> Location {
        let mut url = self.url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.set_path("/");
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().push(ARTICLE_SEGMENT).push(identifier);
        }
        Location::new(url)
    }
}

/// Feeds location changes to the catalog and detail controllers.
///
/// The catalog is refetched when its search term changes or its last fetch
/// failed, so returning from a detail page keeps already loaded pages but
/// retries a catalog that never loaded. Entering a detail route
/// always resolves, unless it is the route already shown.
pub struct LocationBridge<T> {
    feed: FeedController<T>,
    article: ArticleController<T>,
    last_query: Option<Option<String>>,
    last_article: Option<String>,
}

impl<T: NewsTransport + 'static> LocationBridge<T> {
    pub fn new(feed: FeedController<T>, article: ArticleController<T>) -> Self {
        Self {
            feed,
            article,
            last_query: None,
            last_article: None,
        }
    }

    /// Issue whatever request `location` calls for, if any.
    pub fn observe(&mut self, location: &Location) -> Option<BoxFuture<'static, FetchOutcome>> {
        match location.route() {
            Route::Catalog { query } => {
                self.last_article = None;
                let failed = self.feed.snapshot().status() == FeedStatus::Error;
                if !failed && self.last_query.as_ref() == Some(&query) {
                    return None;
                }
                self.last_query = Some(query.clone());
                Some(self.feed.set_query_from_location(query))
            }
            Route::Article { identifier } => {
                if self.last_article.as_ref() == Some(&identifier) {
                    return None;
                }
                self.last_article = Some(identifier.clone());
                Some(self.article.open(&identifier, location.url().clone()))
            }
            Route::Other => {
                self.last_article = None;
                None
            }
        }
    }

    /// Follow `locations` until the sender is dropped, then wait for every
    /// request it issued to settle.
    pub async fn run(mut self, mut locations: watch::Receiver<Location>) {
        let mut tasks = JoinSet::new();
        loop {
            let location = locations.borrow_and_update().clone();
            tracing::debug!("Location changed: {}", location.href());
            if let Some(fetch) = self.observe(&location) {
                tasks.spawn(fetch);
            }
            while let Some(joined) = tasks.try_join_next() {
                log_join_error(joined);
            }

            if locations.changed().await.is_err() {
                break;
            }
        }
        while let Some(joined) = tasks.join_next().await {
            log_join_error(joined);
        }
    }
}

fn log_join_error(joined: Result<FetchOutcome, tokio::task::JoinError>) {
    if let Err(e) = joined {
        tracing::warn!("Location fetch task failed: {}", e);
    }
}
