use serenity::all::{CreateAttachment, CreateEmbedFooter};
use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::services::{auth_service, chart_service, team_service, trend_service};
use crate::utils::{format_amount, format_change};

const CHART_FILENAME: &str = "trend.png";

/// Render a team's trend over the last 20 minutes
pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    tracing::info!("🎨 Chart command received from user {} with args: {:?}", msg.author.id, args);

    if args.is_empty() {
        return Err("❌ Usage: `$chart <team #>`".to_string());
    }
    let team_id = team_service::parse_team_id(Some(args[0]))?;

    if let Err(e) = msg.channel_id.broadcast_typing(&ctx.http).await {
        tracing::warn!("Failed to broadcast typing: {}", e);
    }

    let client = auth_service::client_for(ctx, msg).await?;
    let trend = trend_service::get_team_trend(&client, team_id).await?;

    let Some(window) = trend_service::build_window(&trend) else {
        let embed = CreateEmbed::default()
            .title(format!("📉 #{} {}", trend.team_id, trend.team_name))
            .description("No price data yet.")
            .color(0xffa500);
        msg.channel_id
            .send_message(ctx, CreateMessage::default().embed(embed))
            .await
            .map_err(|e| e.to_string())?;
        return Ok(());
    };

    let title = format!("#{} {} Price", trend.team_id, trend.team_name);
    let render_window = window.clone();
    let image = tokio::task::spawn_blocking(move || chart_service::render_trend_chart(&render_window, &title))
        .await
        .map_err(|e| format!("Chart task failed: {}", e))??;

    if image.is_empty() {
        return Err("❌ Chart generation failed: produced empty image data".to_string());
    }
    tracing::debug!("Chart rendered: {} bytes", image.len());

    let now = window.now_slot();
    let mut embed = CreateEmbed::default()
        .title(format!("📈 #{} {}", trend.team_id, trend.team_name))
        .field(
            "Now",
            format!("{} @ {}", now.value.map(format_amount).unwrap_or_else(|| "-".to_string()), now.label),
            true,
        )
        .field("20 min Change", format_change(trend_service::window_change_percent(&window)), true)
        .image(format!("attachment://{}", CHART_FILENAME))
        .color(0x00b0f4);

    let footer = if trend.is_fallback {
        format!("{} ~ {} • Sample data: this team has no trades yet", window.first_label(), window.last_label())
    } else {
        format!("{} ~ {}", window.first_label(), window.last_label())
    };
    embed = embed.footer(CreateEmbedFooter::new(footer));

    let message = CreateMessage::default()
        .embed(embed)
        .add_file(CreateAttachment::bytes(image, CHART_FILENAME));

    msg.channel_id
        .send_message(ctx, message)
        .await
        .map_err(|e| format!("Failed to send chart: {}", e))?;

    Ok(())
}
