use serenity::builder::CreateMessage;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::services::portfolio_service;

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    let profile = portfolio_service::get_profile(ctx, msg).await?;
    let embed = portfolio_service::create_profile_embed(&profile);

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
