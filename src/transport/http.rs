use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use super::{NewsTransport, TransportResult};
use crate::config::Config;
use crate::error::{AppError, Result, TransportError};
use crate::models::{Article, Category, ListPage, Page};

const USER_AGENT_STRING: &str = concat!("tejo-reader/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct ArticlesEnvelope {
    #[serde(default)]
    articles: Vec<Article>,
    #[serde(default)]
    pagination: Option<Page>,
}

#[derive(Debug, Deserialize)]
struct CategoriesEnvelope {
    #[serde(default)]
    categories: Vec<Category>,
}

/// `NewsTransport` backed by the JSON API over HTTP.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(USER_AGENT_STRING)
            .build()
            .map_err(|e| AppError::Config(format!("failed to create HTTP client: {}", e)))?;

        Self::with_client(client, config.api_base_url()?)
    }

    pub fn with_client(client: Client, base_url: Url) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "API base URL cannot carry paths: {}",
                base_url
            )));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<D: DeserializeOwned>(&self, url: Url) -> TransportResult<D> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(TransportError::NotFound);
        }
        if !status.is_success() {
            tracing::warn!("GET {} failed: HTTP {}", url, status);
            return Err(TransportError::Http {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl NewsTransport for HttpTransport {
    async fn list(&self, page: u32, limit: u32) -> TransportResult<ListPage> {
        let mut url = self.endpoint(&["news"]);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());

        let envelope: ArticlesEnvelope = self.get_json(url).await?;
        let page = envelope
            .pagination
            .unwrap_or_else(|| Page::single(envelope.articles.len()));

        Ok(ListPage {
            articles: envelope.articles,
            page,
        })
    }

    async fn search(&self, query: &str) -> TransportResult<Vec<Article>> {
        let mut url = self.endpoint(&["news", "search"]);
        url.query_pairs_mut().append_pair("q", query);

        let envelope: ArticlesEnvelope = self.get_json(url).await?;
        Ok(envelope.articles)
    }

    async fn by_slug(&self, slug: &str) -> TransportResult<Article> {
        let url = self.endpoint(&["news", "slug", slug]);
        self.get_json(url).await
    }

    async fn categories(&self) -> TransportResult<Vec<Category>> {
        let url = self.endpoint(&["news", "categories"]);
        let envelope: CategoriesEnvelope = self.get_json(url).await?;
        Ok(envelope.categories)
    }

    async fn by_category(&self, category: &Category) -> TransportResult<Vec<Article>> {
        let url = self.endpoint(&["news", "category", category.label()]);
        let envelope: ArticlesEnvelope = self.get_json(url).await?;
        Ok(envelope.articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport_for(server: &MockServer) -> HttpTransport {
        let base = Url::parse(&format!("{}/api", server.uri())).unwrap();
        HttpTransport::with_client(Client::new(), base).unwrap()
    }

    fn article_json(id: i64, slug: &str) -> serde_json::Value {
        json!({
            "id": id,
            "slug": slug,
            "title": "Markets rally",
            "title_pt": "Mercados em alta",
            "content": "Stocks rose.",
            "content_pt": "As ações subiram.",
            "source": "BBC News",
            "category": "Economia",
            "image_url": "https://img.example.com/a.jpg",
            "url": "https://bbc.co.uk/news/a",
            "scraped_at": "2025-03-14T09:26:53"
        })
    }

    // ==================== endpoint tests ====================

    #[test]
    fn test_endpoint_keeps_base_path() {
        let transport =
            HttpTransport::with_client(Client::new(), Url::parse("https://x.pt/api/").unwrap())
                .unwrap();
        assert_eq!(
            transport.endpoint(&["news", "search"]).as_str(),
            "https://x.pt/api/news/search"
        );
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let transport =
            HttpTransport::with_client(Client::new(), Url::parse("https://x.pt/api").unwrap())
                .unwrap();
        assert_eq!(
            transport.endpoint(&["news", "category", "Guerra e Conflitos"]).as_str(),
            "https://x.pt/api/news/category/Guerra%20e%20Conflitos"
        );
    }

    #[test]
    fn test_rejects_non_base_url() {
        let result = HttpTransport::with_client(Client::new(), Url::parse("mailto:a@b.pt").unwrap());
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    // ==================== list ====================

    #[tokio::test]
    async fn test_list_decodes_pagination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/news"))
            .and(query_param("page", "2"))
            .and(query_param("limit", "12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "articles": [article_json(1, "a"), article_json(2, "b")],
                "pagination": {
                    "current_page": 2,
                    "total_pages": 3,
                    "total_count": 26,
                    "has_next": true
                }
            })))
            .mount(&server)
            .await;

        let page = transport_for(&server).list(2, 12).await.unwrap();

        assert_eq!(page.articles.len(), 2);
        assert_eq!(page.page.current_page, 2);
        assert!(page.page.has_next);
    }

    #[tokio::test]
    async fn test_list_without_pagination_is_single_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/news"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "articles": [article_json(1, "a")],
                "count": 1
            })))
            .mount(&server)
            .await;

        let page = transport_for(&server).list(1, 12).await.unwrap();

        assert_eq!(page.page, Page::single(1));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/news"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
            .mount(&server)
            .await;

        let err = transport_for(&server).list(1, 12).await.unwrap_err();

        assert!(matches!(err, TransportError::Http { status: 500 }));
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_decode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/news"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = transport_for(&server).list(1, 12).await.unwrap_err();

        assert!(matches!(err, TransportError::Decode(_)));
    }

    // ==================== search / slug ====================

    #[tokio::test]
    async fn test_search_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/news/search"))
            .and(query_param("q", "economia e mercados"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "articles": [article_json(1, "a"), article_json(2, "b"), article_json(3, "c")]
            })))
            .mount(&server)
            .await;

        let articles = transport_for(&server)
            .search("economia e mercados")
            .await
            .unwrap();

        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].display_title(), "Mercados em alta");
    }

    #[tokio::test]
    async fn test_by_slug_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/news/slug/mercados-em-alta"))
            .respond_with(ResponseTemplate::new(200).set_body_json(article_json(9, "mercados-em-alta")))
            .mount(&server)
            .await;

        let article = transport_for(&server)
            .by_slug("mercados-em-alta")
            .await
            .unwrap();

        assert!(article.id.matches("9"));
        assert_eq!(article.category, Some(Category::Economia));
    }

    #[tokio::test]
    async fn test_by_slug_missing_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/news/slug/nope"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = transport_for(&server).by_slug("nope").await.unwrap_err();

        assert!(err.is_not_found());
    }

    // ==================== categories ====================

    #[tokio::test]
    async fn test_categories_and_category_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/news/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "categories": ["Política", "Economia", "Geral"]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/news/category/Economia"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "articles": [article_json(4, "d")],
                "category": "Economia",
                "count": 1
            })))
            .mount(&server)
            .await;

        let transport = transport_for(&server);
        let categories = transport.categories().await.unwrap();
        let articles = transport.by_category(&Category::Economia).await.unwrap();

        assert_eq!(
            categories,
            vec![Category::Politica, Category::Economia, Category::Geral]
        );
        assert_eq!(articles.len(), 1);
    }
}
