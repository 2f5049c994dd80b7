use serenity::builder::CreateMessage;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::services::{auth_service, team_service};
use crate::utils::parse_page_arg;

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    let page = parse_page_arg(args.first().copied())?;

    let client = auth_service::client_for(ctx, msg).await?;
    let teams = team_service::list_teams(&client).await?;
    let embed = team_service::create_team_page(&teams, page)?;

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| format!("Failed to send message: {}", e))?;

    Ok(())
}
