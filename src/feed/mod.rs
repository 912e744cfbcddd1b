mod controller;
mod state;

pub use controller::FeedController;
pub use state::{FeedMode, FeedState, FeedStatus, FeedView, FetchOutcome};
