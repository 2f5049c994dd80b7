pub mod client;
pub mod models;
pub mod normalize;

pub use client::BackendClient;
pub use models::{ApiError, Comment, Portfolio, Team, UserProfile};
pub use normalize::{fallback_trend, normalize_trend_payload};
