use serenity::prelude::*;
use std::time::{Duration, Instant};

use crate::models::PingMetrics;

pub async fn get_ping_metrics(ctx: &Context, start_time: Instant) -> Result<PingMetrics, String> {
    let response_roundtrip = start_time.elapsed().as_millis() as u64;

    let uptime = {
        let data = ctx.data.read().await;
        data.get::<crate::BotData>()
            .map(|started| format_uptime(started.elapsed()))
            .unwrap_or_else(|| "Unknown".to_string())
    };

    let backend = super::backend(ctx).await?;
    let backend_start = Instant::now();
    let backend_latency = match backend.list_teams().await {
        Ok(_) => Some(backend_start.elapsed().as_millis() as u64),
        Err(e) => {
            tracing::warn!("Backend health check failed: {}", e);
            None
        }
    };

    Ok(PingMetrics {
        response_roundtrip,
        backend_latency,
        uptime,
    })
}

pub fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

pub fn create_ping_embed(metrics: &PingMetrics) -> serenity::builder::CreateEmbed {
    let backend = match metrics.backend_latency {
        Some(ms) => format!("{}ms", ms),
        None => "Unreachable".to_string(),
    };

    serenity::builder::CreateEmbed::default()
        .title("Pong! 🏓")
        .field("Response Roundtrip", format!("{}ms", metrics.response_roundtrip), true)
        .field("Game Server", backend, true)
        .field("Uptime", &metrics.uptime, false)
        .color(if metrics.backend_latency.is_some() { 0x00b0f4 } else { 0xffa500 })
}
