use std::sync::Arc;

use crate::error::TransportError;
use crate::models::Article;
use crate::transport::NewsTransport;

/// Outcome of resolving a route identifier. Callers render all three
/// differently.
#[derive(Debug)]
pub enum Resolution {
    Found(Article),
    NotFound,
    ResolutionError(TransportError),
}

impl Resolution {
    pub fn article(&self) -> Option<&Article> {
        match self {
            Resolution::Found(article) => Some(article),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Resolution::NotFound)
    }
}

/// Resolves an identifier by slug, then by legacy id.
///
/// The id fallback only scans the first catalog page, so articles that have
/// moved past page one cannot be reached by id.
pub struct ArticleResolver<T> {
    transport: Arc<T>,
    fallback_limit: u32,
}

impl<T: NewsTransport> ArticleResolver<T> {
    pub fn new(transport: Arc<T>, fallback_limit: u32) -> Self {
        Self {
            transport,
            fallback_limit: fallback_limit.max(1),
        }
    }

    pub async fn resolve(&self, identifier: &str) -> Resolution {
        if identifier.trim().is_empty() {
            return Resolution::NotFound;
        }

        match self.transport.by_slug(identifier).await {
            Ok(article) => return Resolution::Found(article),
            Err(e) => {
                tracing::debug!(
                    "Slug lookup for {:?} failed ({}), scanning first catalog page",
                    identifier,
                    e
                );
            }
        }

        match self.transport.list(1, self.fallback_limit).await {
            Ok(list) => list
                .articles
                .into_iter()
                .find(|article| article.id.matches(identifier))
                .map(Resolution::Found)
                .unwrap_or(Resolution::NotFound),
            Err(e) => {
                tracing::warn!("Catalog fallback for {:?} failed: {}", identifier, e);
                Resolution::ResolutionError(e)
            }
        }
    }
}
