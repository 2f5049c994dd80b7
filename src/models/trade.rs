//! Invest/sell models

use std::fmt;

/// Direction of a trade against a team
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Invest,
    Sell,
}

impl TradeSide {
    pub fn path_segment(&self) -> &'static str {
        match self {
            TradeSide::Invest => "invest",
            TradeSide::Sell => "sell",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            TradeSide::Invest => "📈",
            TradeSide::Sell => "📉",
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Invest => write!(f, "Invest"),
            TradeSide::Sell => write!(f, "Sell"),
        }
    }
}

/// Result of an executed invest or sell
#[derive(Debug)]
pub struct TradeResult {
    pub side: TradeSide,
    pub team_id: i64,
    pub team_name: String,
    pub amount: i64,
    pub balance: Option<f64>,
    pub holding: Option<f64>,
    pub message: Option<String>,
}
