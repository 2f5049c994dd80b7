use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::models::{
    ApiError, AuthResponse, Comment, CommentRequest, ErrorResponse, LoginRequest, Portfolio,
    SignupRequest, Team, TradeRequest, TradeResponse, UserProfile,
};
use crate::models::TradeSide;
use crate::utils::backend_ratelimit::BackendRateLimiter;

const IDEMPOTENCY_KEY: &str = "Idempotency-Key";

/// REST client for the game backend.
///
/// Cloning is cheap; clones share the connection pool and rate limiter.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http_client: HttpClient,
    base_url: String,
    token: Option<String>,
    limiter: Arc<BackendRateLimiter>,
}

impl BackendClient {
    pub fn new(base_url: &str, requests_per_second: usize) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            limiter: Arc::new(BackendRateLimiter::new(requests_per_second)),
        }
    }

    /// Copy of this client that sends the given bearer token
    pub fn authorized(&self, token: String) -> Self {
        Self {
            token: Some(token),
            ..self.clone()
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn create_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = &self.token {
            let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::RequestError(format!("Failed to create auth header: {}", e)))?;
            headers.insert(AUTHORIZATION, auth_value);
        }

        Ok(headers)
    }

    fn retry_after_secs(response: &reqwest::Response) -> u64 {
        response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(1)
    }

    /// Map a non-success response to an error, keeping the backend's message
    async fn handle_error_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();

        if status == 429 {
            let retry_after_secs = Self::retry_after_secs(&response);
            warn!("Backend rate limited us, retry after {} s", retry_after_secs);
            return ApiError::RateLimited { retry_after_secs };
        }

        let body_text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body_text)
            .ok()
            .and_then(|body| body.message.or(body.error))
            .unwrap_or(body_text);

        match status {
            400 | 409 | 422 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            500..=599 => {
                warn!("Backend server error {}: {}", status, message);
                ApiError::ServerError(status, message)
            }
            _ => ApiError::HttpError(status, message),
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        self.limiter.acquire().await;

        let response = request
            .headers(self.create_headers()?)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// POST /auth/signup
    pub async fn signup(&self, body: &SignupRequest) -> Result<AuthResponse, ApiError> {
        debug!("Signing up student {}", body.student_id);
        self.send_json(self.http_client.post(self.url("/auth/signup")).json(body))
            .await
    }

    /// POST /auth/login
    pub async fn login(&self, body: &LoginRequest) -> Result<AuthResponse, ApiError> {
        debug!("Logging in student {}", body.student_id);
        self.send_json(self.http_client.post(self.url("/auth/login")).json(body))
            .await
    }

    /// GET /users/me
    pub async fn get_profile(&self) -> Result<UserProfile, ApiError> {
        self.send_json(self.http_client.get(self.url("/users/me"))).await
    }

    /// GET /teams
    pub async fn list_teams(&self) -> Result<Vec<Team>, ApiError> {
        self.send_json(self.http_client.get(self.url("/teams"))).await
    }

    /// GET /teams/{id}
    pub async fn get_team(&self, team_id: i64) -> Result<Team, ApiError> {
        self.send_json(self.http_client.get(self.url(&format!("/teams/{}", team_id))))
            .await
    }

    /// GET /teams/{id}/trend
    ///
    /// Returned raw; see `normalize::normalize_trend_payload`.
    pub async fn get_team_trend(&self, team_id: i64) -> Result<serde_json::Value, ApiError> {
        self.send_json(self.http_client.get(self.url(&format!("/teams/{}/trend", team_id))))
            .await
    }

    /// GET /portfolio
    pub async fn get_portfolio(&self) -> Result<Portfolio, ApiError> {
        self.send_json(self.http_client.get(self.url("/portfolio"))).await
    }

    /// POST /teams/{id}/invest or /teams/{id}/sell
    ///
    /// Each call carries a fresh idempotency key so a retried request is not
    /// executed twice by the backend.
    pub async fn trade(
        &self,
        side: TradeSide,
        team_id: i64,
        amount: i64,
    ) -> Result<TradeResponse, ApiError> {
        let path = format!("/teams/{}/{}", team_id, side.path_segment());
        let idempotency_key = uuid::Uuid::new_v4().to_string();
        debug!("{} {} on team {} (key {})", side, amount, team_id, idempotency_key);

        self.send_json(
            self.http_client
                .post(self.url(&path))
                .header(IDEMPOTENCY_KEY, idempotency_key)
                .json(&TradeRequest { amount }),
        )
        .await
    }

    /// GET /teams/{id}/comments
    pub async fn list_comments(&self, team_id: i64) -> Result<Vec<Comment>, ApiError> {
        self.send_json(self.http_client.get(self.url(&format!("/teams/{}/comments", team_id))))
            .await
    }

    /// POST /teams/{id}/comments
    pub async fn post_comment(&self, team_id: i64, content: &str) -> Result<Comment, ApiError> {
        let body = CommentRequest {
            content: content.to_string(),
        };
        self.send_json(
            self.http_client
                .post(self.url(&format!("/teams/{}/comments", team_id)))
                .json(&body),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = BackendClient::new("https://game.example.com/api/", 20);
        assert_eq!(client.url("/teams"), "https://game.example.com/api/teams");
    }

    #[test]
    fn test_authorized_client_sends_bearer_token() {
        let client = BackendClient::new("http://localhost", 20);
        assert!(client.create_headers().unwrap().get(AUTHORIZATION).is_none());

        let authed = client.authorized("abc123".to_string());
        let headers = authed.create_headers().unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc123");
        assert!(Arc::ptr_eq(&client.limiter, &authed.limiter));
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let authed = BackendClient::new("http://localhost", 20).authorized("bad\ntoken".to_string());
        assert!(matches!(authed.create_headers(), Err(ApiError::RequestError(_))));
    }
}
