//! Seam between the controllers and the news API.

mod http;

#[cfg(test)]
pub(crate) mod fake;

pub use http::HttpTransport;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::models::{Article, Category, ListPage};

pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Read-only calls against the news API.
///
/// Every call is an idempotent GET, so a caller may discard a response it no
/// longer needs without cancelling the request.
#[async_trait]
pub trait NewsTransport: Send + Sync {
    /// `GET /news?page=P&limit=L`
    async fn list(&self, page: u32, limit: u32) -> TransportResult<ListPage>;

    /// `GET /news/search?q=Q`. Unpaginated.
    async fn search(&self, query: &str) -> TransportResult<Vec<Article>>;

    /// `GET /news/slug/{slug}`. Missing slugs yield `TransportError::NotFound`.
    async fn by_slug(&self, slug: &str) -> TransportResult<Article>;

    /// `GET /news/categories`
    async fn categories(&self) -> TransportResult<Vec<Category>>;

    /// `GET /news/category/{category}`
    async fn by_category(&self, category: &Category) -> TransportResult<Vec<Article>>;
}
