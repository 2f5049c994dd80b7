use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::services::auth_service;

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    let description = if auth_service::logout(ctx, msg).await? {
        "Your session was removed from this bot."
    } else {
        "You were not logged in."
    };

    let embed = CreateEmbed::default()
        .title("🔒 Logged Out")
        .description(description)
        .color(0x00b0f4);

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
