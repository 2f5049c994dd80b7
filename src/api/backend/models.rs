use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request body for POST /auth/signup
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub student_id: String,
    pub name: String,
    pub password: String,
}

/// Request body for POST /auth/login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub student_id: String,
    pub password: String,
}

/// Token returned by signup and login
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
}

/// Response from GET /users/me
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(alias = "student_id")]
    pub student_id: String,
    pub name: String,
    /// Uninvested virtual capital
    #[serde(alias = "capital", alias = "cash")]
    pub balance: f64,
    #[serde(default, alias = "total_asset")]
    pub total_asset: Option<f64>,
}

/// A startup whose share price fluctuates during the game
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(alias = "currentPrice", alias = "current_price")]
    pub price: f64,
    #[serde(default, alias = "change_rate")]
    pub change_rate: Option<f64>,
    #[serde(default, alias = "pitchDeckUrl", alias = "deck_url")]
    pub deck_url: Option<String>,
}

/// One position in the user's portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    #[serde(alias = "team_id")]
    pub team_id: i64,
    #[serde(alias = "team_name")]
    pub team_name: String,
    /// Invested amount currently held in this team
    #[serde(alias = "amount", alias = "invested")]
    pub shares: f64,
    #[serde(default, alias = "current_value")]
    pub current_value: Option<f64>,
}

/// Response from GET /portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    #[serde(alias = "capital", alias = "cash")]
    pub balance: f64,
    #[serde(default, alias = "investments")]
    pub holdings: Vec<Holding>,
    #[serde(default, alias = "total_asset")]
    pub total_asset: Option<f64>,
}

/// Request body for POST /teams/{id}/invest and /teams/{id}/sell
#[derive(Debug, Clone, Serialize)]
pub struct TradeRequest {
    pub amount: i64,
}

/// Response from invest/sell
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeResponse {
    #[serde(default, alias = "capital")]
    pub balance: Option<f64>,
    #[serde(default, alias = "holding", alias = "invested")]
    pub shares: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A message in a team's comment feed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    #[serde(alias = "authorName", alias = "nickname")]
    pub author: String,
    #[serde(alias = "message", alias = "text")]
    pub content: String,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for POST /teams/{id}/comments
#[derive(Debug, Clone, Serialize)]
pub struct CommentRequest {
    pub content: String,
}

/// Error body returned by the backend
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}

/// Errors from backend API calls
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Rate Limited. Retry after {retry_after_secs} s")]
    RateLimited { retry_after_secs: u64 },
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    #[error("Request Error: {0}")]
    RequestError(String),
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}

impl ApiError {
    /// Message suitable for showing to a Discord user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) | ApiError::Forbidden(msg) | ApiError::NotFound(msg)
                if !msg.is_empty() =>
            {
                msg.clone()
            }
            ApiError::Unauthorized(_) => {
                "Your session has expired. Log in again with `$login` in a DM.".to_string()
            }
            ApiError::NotFound(_) => "Not found.".to_string(),
            ApiError::RateLimited { retry_after_secs } => format!(
                "The game server is busy. Try again in {} second(s).",
                retry_after_secs
            ),
            ApiError::ServerError(..) | ApiError::HttpError(..) => {
                "The game server returned an error. Please try again later.".to_string()
            }
            ApiError::RequestError(_) => "Could not reach the game server.".to_string(),
            other => other.to_string(),
        }
    }
}
