use serde_json::{json, Map, Value};
use url::Url;

use super::MetadataSurface;
use crate::config::Config;
use crate::models::Article;

const DESCRIPTION_CHARS: usize = 160;
const STRUCTURED_DESCRIPTION_CHARS: usize = 200;
const ELLIPSIS: &str = "...";

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

/// Writes page metadata for a resolved article.
///
/// Every write is an upsert, so applying the same or a different article
/// repeatedly leaves one value per key. Missing article fields skip their
/// tags instead of writing empty content.
#[derive(Debug, Clone)]
pub struct MetadataSynthesizer {
    brand: String,
    locale: String,
}

impl MetadataSynthesizer {
    pub fn new(brand: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            locale: locale.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.site_brand.clone(), config.locale.clone())
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// `{title} | {brand}`
    pub fn document_title(&self, article: &Article) -> Option<String> {
        non_empty(article.display_title()).map(|title| format!("{} | {}", title, self.brand))
    }

    /// First 160 characters of the display text, ellipsis appended.
    pub fn description(article: &Article) -> Option<String> {
        non_empty(article.display_content())
            .map(|content| format!("{}{}", truncate_chars(content, DESCRIPTION_CHARS), ELLIPSIS))
    }

    pub fn synthesize(&self, article: &Article, page_url: &Url, surface: &mut MetadataSurface) {
        if let Some(title) = self.document_title(article) {
            surface.set_title(title);
        }

        let title = non_empty(article.display_title());
        let description = Self::description(article);
        let image = article.image_url();
        let url = page_url.as_str();

        let tags: [(&str, Option<&str>); 10] = [
            ("description", description.as_deref()),
            ("og:title", title),
            ("og:description", description.as_deref()),
            ("og:image", image),
            ("og:url", Some(url)),
            ("og:type", Some("article")),
            ("twitter:card", Some("summary_large_image")),
            ("twitter:title", title),
            ("twitter:description", description.as_deref()),
            ("twitter:image", image),
        ];
        for (key, content) in tags {
            match content {
                Some(content) => surface.upsert(key, content),
                None => tracing::debug!("Skipping {} for article {}", key, article.id),
            }
        }

        surface.replace_structured_data(self.structured_data(article, page_url));
    }

    /// schema.org `NewsArticle` record for the page.
    pub fn structured_data(&self, article: &Article, page_url: &Url) -> Value {
        let mut record = Map::new();
        record.insert("@context".into(), json!("https://schema.org"));
        record.insert("@type".into(), json!("NewsArticle"));
        if let Some(title) = non_empty(article.display_title()) {
            record.insert("headline".into(), json!(title));
        }
        if let Some(content) = non_empty(article.display_content()) {
            record.insert(
                "description".into(),
                json!(truncate_chars(content, STRUCTURED_DESCRIPTION_CHARS)),
            );
        }
        if let Some(image) = article.image_url() {
            record.insert("image".into(), json!(image));
        }
        if let Some(source) = non_empty(&article.source) {
            record.insert(
                "author".into(),
                json!({ "@type": "Organization", "name": source }),
            );
        }

        let mut publisher = json!({ "@type": "Organization", "name": self.brand });
        if let Ok(logo) = page_url.join("/logo.png") {
            publisher["logo"] = json!({ "@type": "ImageObject", "url": logo.as_str() });
        }
        record.insert("publisher".into(), publisher);

        if let Some(scraped_at) = article.scraped_at.as_deref().and_then(non_empty) {
            record.insert("datePublished".into(), json!(scraped_at));
            record.insert("dateModified".into(), json!(scraped_at));
        }
        record.insert(
            "mainEntityOfPage".into(),
            json!({ "@type": "WebPage", "@id": page_url.as_str() }),
        );
        if let Some(category) = &article.category {
            record.insert("articleSection".into(), json!(category.label()));
        }
        record.insert("inLanguage".into(), json!(self.locale));

        Value::Object(record)
    }
}
