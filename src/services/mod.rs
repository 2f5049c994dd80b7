use serenity::prelude::Context;
use sqlx::mysql::MySqlPool;

use crate::api::backend::BackendClient;
use crate::utils::SessionCipher;

pub mod auth_service;
pub mod chart_service;
pub mod comment_service;
pub mod ping_service;
pub mod portfolio_service;
pub mod team_service;
pub mod trade_service;
pub mod trend_service;

/// Get the database pool from client data
pub async fn pool(ctx: &Context) -> Result<MySqlPool, String> {
    let data = ctx.data.read().await;
    data.get::<crate::DatabasePool>()
        .cloned()
        .ok_or_else(|| "Database not initialized".to_string())
}

/// Get the unauthenticated backend client from client data
pub async fn backend(ctx: &Context) -> Result<BackendClient, String> {
    let data = ctx.data.read().await;
    data.get::<crate::Backend>()
        .cloned()
        .ok_or_else(|| "Backend client not initialized".to_string())
}

pub async fn cipher(ctx: &Context) -> Result<SessionCipher, String> {
    let data = ctx.data.read().await;
    data.get::<crate::Cipher>()
        .cloned()
        .ok_or_else(|| "Session cipher not initialized".to_string())
}
