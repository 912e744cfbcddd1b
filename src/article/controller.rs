use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::watch;
use url::Url;

use super::resolver::{ArticleResolver, Resolution};
use crate::feed::FetchOutcome;
use crate::metadata::{MetadataSurface, MetadataSynthesizer};
use crate::models::Article;
use crate::transport::NewsTransport;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ArticleState {
    #[default]
    Idle,
    Loading,
    Found(Article),
    NotFound,
    Error(String),
}

/// Detail page state: the identifier being shown and where its resolution
/// stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticlePage {
    identifier: Option<String>,
    state: ArticleState,
    epoch: u64,
}

impl ArticlePage {
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn state(&self) -> &ArticleState {
        &self.state
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Resolves the article for the current detail route and keeps the page's
/// metadata surface in step with it.
pub struct ArticleController<T> {
    resolver: Arc<ArticleResolver<T>>,
    synthesizer: Arc<MetadataSynthesizer>,
    page: Arc<watch::Sender<ArticlePage>>,
    surface: Arc<watch::Sender<MetadataSurface>>,
}

impl<T> Clone for ArticleController<T> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            synthesizer: Arc::clone(&self.synthesizer),
            page: Arc::clone(&self.page),
            surface: Arc::clone(&self.surface),
        }
    }
}

impl<T: NewsTransport + 'static> ArticleController<T> {
    pub fn new(
        resolver: ArticleResolver<T>,
        synthesizer: MetadataSynthesizer,
        surface: MetadataSurface,
    ) -> Self {
        let (page, _) = watch::channel(ArticlePage::default());
        let (surface, _) = watch::channel(surface);
        Self {
            resolver: Arc::new(resolver),
            synthesizer: Arc::new(synthesizer),
            page: Arc::new(page),
            surface: Arc::new(surface),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ArticlePage> {
        self.page.subscribe()
    }

    pub fn subscribe_metadata(&self) -> watch::Receiver<MetadataSurface> {
        self.surface.subscribe()
    }

    pub fn snapshot(&self) -> ArticlePage {
        self.page.borrow().clone()
    }

    pub fn metadata(&self) -> MetadataSurface {
        self.surface.borrow().clone()
    }

    /// Resolve `identifier` for the page at `page_url`. Supersedes any
    /// resolution still in flight.
    pub fn open(&self, identifier: &str, page_url: Url) -> BoxFuture<'static, FetchOutcome> {
        let identifier = identifier.to_string();
        let mut epoch = 0;
        self.page.send_modify(|page| {
            page.epoch += 1;
            page.identifier = Some(identifier.clone());
            page.state = ArticleState::Loading;
            epoch = page.epoch;
        });

        let this = self.clone();
        async move {
            let resolution = this.resolver.resolve(&identifier).await;
            this.finish(epoch, resolution, &page_url)
        }
        .boxed()
    }

    fn finish(&self, epoch: u64, resolution: Resolution, page_url: &Url) -> FetchOutcome {
        let (state, outcome) = match resolution {
            Resolution::Found(article) => (ArticleState::Found(article), FetchOutcome::Applied),
            Resolution::NotFound => (ArticleState::NotFound, FetchOutcome::Applied),
            Resolution::ResolutionError(e) => {
                (ArticleState::Error(e.to_string()), FetchOutcome::Failed)
            }
        };

        // The surface is written while the page is still locked, so no other
        // open() can slip in between the epoch check and the metadata.
        let applied = self.page.send_if_modified(|page| {
            if page.epoch != epoch {
                return false;
            }
            if let ArticleState::Found(article) = &state {
                self.surface
                    .send_modify(|surface| self.synthesizer.synthesize(article, page_url, surface));
            }
            page.state = state;
            true
        });

        if !applied {
            tracing::debug!("Discarded stale article resolution for epoch {}", epoch);
            return FetchOutcome::Discarded;
        }
        outcome
    }
}
