use serenity::builder::CreateMessage;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::services::{auth_service, team_service};

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    let team_id = team_service::parse_team_id(args.first().copied())?;

    let client = auth_service::client_for(ctx, msg).await?;
    let team = team_service::get_team(&client, team_id).await?;
    let embed = team_service::create_team_embed(&team);

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}

/// Link a team's pitch deck PDF
pub async fn execute_deck(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    let team_id = team_service::parse_team_id(args.first().copied())?;

    let client = auth_service::client_for(ctx, msg).await?;
    let team = team_service::get_team(&client, team_id).await?;
    let embed = team_service::create_deck_embed(&team)?;

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
