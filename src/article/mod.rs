mod controller;
mod resolver;

pub use controller::{ArticleController, ArticlePage, ArticleState};
pub use resolver::{ArticleResolver, Resolution};
