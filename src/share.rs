use urlencoding::encode;

use crate::models::Article;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinks {
    pub twitter: String,
    pub facebook: String,
    pub whatsapp: String,
}

/// Social share URLs for `article` shown at `page_url`.
pub fn share_links(article: &Article, page_url: &str) -> ShareLinks {
    let title = article.display_title();
    ShareLinks {
        twitter: format!(
            "https://twitter.com/intent/tweet?text={}&url={}",
            encode(title),
            encode(page_url)
        ),
        facebook: format!(
            "https://www.facebook.com/sharer/sharer.php?u={}",
            encode(page_url)
        ),
        whatsapp: format!(
            "https://wa.me/?text={}",
            encode(&format!("{} {}", title, page_url))
        ),
    }
}
