use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Category;

const DATE_UNAVAILABLE: &str = "Data não disponível";

/// Legacy article identifier. The API has emitted both integers and strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleId(String);

impl ArticleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a route identifier addresses this article by id.
    pub fn matches(&self, identifier: &str) -> bool {
        self.0 == identifier
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for ArticleId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for ArticleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<i64>() {
            Ok(n) => serializer.serialize_i64(n),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for ArticleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Str(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => ArticleId(n.to_string()),
            Raw::Float(f) => ArticleId(f.to_string()),
            Raw::Str(s) => ArticleId(s),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_pt: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub content_pt: Option<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub scraped_at: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

impl Article {
    /// Translated title, falling back to the original.
    pub fn display_title(&self) -> &str {
        non_empty(self.title_pt.as_deref()).unwrap_or(&self.title)
    }

    /// Translated body, falling back to the original.
    pub fn display_content(&self) -> &str {
        non_empty(self.content_pt.as_deref()).unwrap_or(&self.content)
    }

    /// The original title when a distinct translation is being displayed.
    pub fn original_title(&self) -> Option<&str> {
        match non_empty(self.title_pt.as_deref()) {
            Some(pt) if pt != self.title && !self.title.is_empty() => Some(&self.title),
            _ => None,
        }
    }

    /// The original body when a distinct translation is being displayed.
    pub fn original_content(&self) -> Option<&str> {
        match non_empty(self.content_pt.as_deref()) {
            Some(pt) if pt != self.content && !self.content.is_empty() => Some(&self.content),
            _ => None,
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        non_empty(self.image_url.as_deref())
    }

    /// Route identifier for the detail page, slug preferred.
    pub fn route_identifier(&self) -> &str {
        non_empty(self.slug.as_deref()).unwrap_or(self.id.as_str())
    }

    /// Ingestion timestamp. The backend writes naive local ISO-8601 strings;
    /// those are read as UTC.
    pub fn scraped_at_datetime(&self) -> Option<DateTime<Utc>> {
        let raw = non_empty(self.scraped_at.as_deref())?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn formatted_date(&self) -> String {
        match self.scraped_at_datetime() {
            Some(dt) => dt.format("%d/%m/%Y, %H:%M").to_string(),
            None => DATE_UNAVAILABLE.to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_article(id: i64) -> Article {
    Article {
        id: ArticleId::from(id),
        slug: Some(format!("artigo-{}", id)),
        title: format!("Original title {}", id),
        title_pt: Some(format!("Título traduzido {}", id)),
        content: format!("Original content for article {}", id),
        content_pt: Some(format!("Conteúdo traduzido do artigo {}", id)),
        source: "BBC News".to_string(),
        category: Some(Category::Economia),
        image_url: Some(format!("https://img.example.com/{}.jpg", id)),
        url: Some(format!("https://bbc.co.uk/news/{}", id)),
        scraped_at: Some("2025-03-14T09:26:53.589793".to_string()),
    }
}
