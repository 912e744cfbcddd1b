mod article;
mod category;
mod page;

pub use article::{Article, ArticleId};
pub use category::Category;
pub use page::{ListPage, Page};

#[cfg(test)]
pub(crate) use article::sample_article;
