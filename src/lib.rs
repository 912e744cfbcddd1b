//! Catalog and article-detail core for the TejoMag news reader.
//!
//! `FeedController` drives browse, load-more and search fetches with
//! latest-request-wins ordering. `ArticleController` resolves a detail route
//! by slug or legacy id and keeps a `MetadataSurface` up to date.
//! `LocationBridge` connects both to location changes.

pub mod article;
pub mod config;
pub mod error;
pub mod feed;
pub mod location;
pub mod metadata;
pub mod models;
pub mod share;
pub mod transport;

pub use article::{ArticleController, ArticlePage, ArticleResolver, ArticleState, Resolution};
pub use config::Config;
pub use error::{AppError, Result, TransportError};
pub use feed::{FeedController, FeedMode, FeedState, FeedStatus, FeedView, FetchOutcome};
pub use location::{Location, LocationBridge, Route};
pub use metadata::{MetaAttribute, MetaTag, MetadataSurface, MetadataSynthesizer};
pub use models::{Article, ArticleId, Category, ListPage, Page};
pub use share::{share_links, ShareLinks};
pub use transport::{HttpTransport, NewsTransport};
