use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::models::TradeSide;
use crate::services::trade_service;

pub async fn execute(ctx: &Context, msg: &Message, side: TradeSide, args: &[&str]) -> Result<(), String> {
    if args.is_empty() {
        let verb = side.path_segment();
        let help_embed = CreateEmbed::default()
            .title(format!("{} {} Command", side.emoji(), side))
            .field("Usage", format!("`${} <team #> <amount>`", verb), false)
            .field("Examples", format!("`${0} 3 50000`\n`${0} 3 50k`", verb), false)
            .field("Notes", "• Requires login (`$login` in a DM)\n• Amounts are whole units of virtual capital", false)
            .color(0x00ff00);

        msg.channel_id
            .send_message(ctx, CreateMessage::default().embed(help_embed))
            .await
            .map_err(|e| e.to_string())?;
        return Ok(());
    }

    let (team_id, amount) = trade_service::parse_trade_args(side, args)?;
    tracing::info!("{} command from {}: team {} amount {}", side, msg.author.id, team_id, amount);

    let result = trade_service::execute_trade(ctx, msg, side, team_id, amount).await?;
    let embed = trade_service::create_trade_embed(&result);

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
