//! Data models shared by commands and services
//!
//! Wire types for the game backend live in `api::backend::models`; these are
//! the bot's own result structs.

pub mod ping;
pub mod session;
pub mod trade;
pub mod trend;

pub use ping::PingMetrics;
pub use session::Session;
pub use trade::{TradeResult, TradeSide};
pub use trend::{TeamTrend, TrendPoint, WindowSlot};
