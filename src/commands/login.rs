use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::services::auth_service;

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    let request = auth_service::parse_login_args(args)?;
    let student_id = auth_service::login(ctx, msg, request).await?;

    let embed = CreateEmbed::default()
        .title("🔓 Logged In")
        .description(format!("You are logged in as **{}**.", student_id))
        .color(0x00ff00);

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
