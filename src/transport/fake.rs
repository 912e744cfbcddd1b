//! Scripted in-memory transport for controller tests.
//!
//! Responses are registered per request; `hold` parks the next matching
//! request until the returned sender fires, so tests can choose the order in
//! which responses arrive.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::{NewsTransport, TransportResult};
use crate::error::TransportError;
use crate::models::{Article, Category, ListPage, Page};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Call {
    List { page: u32, limit: u32 },
    Search(String),
    Slug(String),
    Categories,
    Category(String),
}

/// Stored failure; 404 replays as `NotFound`, anything else as `Http`.
type Scripted<T> = Result<T, u16>;

fn replay<T: Clone>(scripted: &Scripted<T>) -> TransportResult<T> {
    match scripted {
        Ok(value) => Ok(value.clone()),
        Err(404) => Err(TransportError::NotFound),
        Err(status) => Err(TransportError::Http { status: *status }),
    }
}

#[derive(Default)]
pub(crate) struct FakeTransport {
    calls: Mutex<Vec<Call>>,
    gates: Mutex<HashMap<Call, VecDeque<oneshot::Receiver<()>>>>,
    pages: Mutex<HashMap<u32, VecDeque<Scripted<ListPage>>>>,
    searches: Mutex<HashMap<String, Scripted<Vec<Article>>>>,
    slugs: Mutex<HashMap<String, Scripted<Article>>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a browse page. Repeated registrations for the same page number
    /// are served in order; the last one keeps answering.
    pub(crate) fn with_page(self, articles: Vec<Article>, page: Page) -> Self {
        self.push_page(page.current_page, Ok(ListPage { articles, page }));
        self
    }

    pub(crate) fn with_page_failure(self, page: u32, status: u16) -> Self {
        self.push_page(page, Err(status));
        self
    }

    pub(crate) fn with_search(self, query: &str, articles: Vec<Article>) -> Self {
        self.searches
            .lock()
            .unwrap()
            .insert(query.to_string(), Ok(articles));
        self
    }

    pub(crate) fn with_search_failure(self, query: &str, status: u16) -> Self {
        self.searches
            .lock()
            .unwrap()
            .insert(query.to_string(), Err(status));
        self
    }

    pub(crate) fn with_slug(self, slug: &str, article: Article) -> Self {
        self.slugs.lock().unwrap().insert(slug.to_string(), Ok(article));
        self
    }

    pub(crate) fn with_slug_failure(self, slug: &str, status: u16) -> Self {
        self.slugs.lock().unwrap().insert(slug.to_string(), Err(status));
        self
    }

    /// Park the next request matching `call` until the sender fires.
    pub(crate) fn hold(&self, call: Call) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .unwrap()
            .entry(call)
            .or_default()
            .push_back(rx);
        tx
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn push_page(&self, number: u32, scripted: Scripted<ListPage>) {
        self.pages
            .lock()
            .unwrap()
            .entry(number)
            .or_default()
            .push_back(scripted);
    }

    async fn enter(&self, call: Call) {
        self.calls.lock().unwrap().push(call.clone());
        let gate = self
            .gates
            .lock()
            .unwrap()
            .get_mut(&call)
            .and_then(|queue| queue.pop_front());
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }
}

#[async_trait]
impl NewsTransport for FakeTransport {
    async fn list(&self, page: u32, limit: u32) -> TransportResult<ListPage> {
        self.enter(Call::List { page, limit }).await;
        let mut pages = self.pages.lock().unwrap();
        match pages.get_mut(&page) {
            Some(queue) if queue.len() > 1 => replay(&queue.pop_front().unwrap()),
            Some(queue) => replay(queue.front().unwrap()),
            None => Ok(ListPage {
                articles: Vec::new(),
                page: Page::single(0),
            }),
        }
    }

    async fn search(&self, query: &str) -> TransportResult<Vec<Article>> {
        self.enter(Call::Search(query.to_string())).await;
        match self.searches.lock().unwrap().get(query) {
            Some(scripted) => replay(scripted),
            None => Ok(Vec::new()),
        }
    }

    async fn by_slug(&self, slug: &str) -> TransportResult<Article> {
        self.enter(Call::Slug(slug.to_string())).await;
        match self.slugs.lock().unwrap().get(slug) {
            Some(scripted) => replay(scripted),
            None => Err(TransportError::NotFound),
        }
    }

    async fn categories(&self) -> TransportResult<Vec<Category>> {
        self.enter(Call::Categories).await;
        Ok(Category::KNOWN.to_vec())
    }

    async fn by_category(&self, category: &Category) -> TransportResult<Vec<Article>> {
        self.enter(Call::Category(category.label().to_string())).await;
        Ok(Vec::new())
    }
}
