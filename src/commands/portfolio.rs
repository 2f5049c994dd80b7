use serenity::builder::CreateMessage;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::services::portfolio_service;

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    let portfolio = portfolio_service::get_portfolio(ctx, msg).await?;
    tracing::debug!("Portfolio for {} has {} holding(s)", msg.author.id, portfolio.holdings.len());

    let embed = portfolio_service::create_portfolio_embed(&portfolio);

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
