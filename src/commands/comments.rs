use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::services::{comment_service, team_service};
use crate::utils::parse_page_arg;

/// `$comments <team #> [page]`
pub async fn execute_list(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    let team_id = team_service::parse_team_id(args.first().copied())?;
    let page = parse_page_arg(args.get(1).copied())?;

    let (team, comments) = comment_service::get_comments(ctx, msg, team_id).await?;
    let embed = comment_service::create_comments_embed(&team, &comments, page)?;

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}

/// `$comment <team #> <text...>`
pub async fn execute_post(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    if args.len() < 2 {
        return Err("❌ Usage: `$comment <team #> <text>`".to_string());
    }

    let team_id = team_service::parse_team_id(Some(args[0]))?;
    let comment = comment_service::post_comment(ctx, msg, team_id, &args[1..].join(" ")).await?;

    let embed = CreateEmbed::default()
        .title("💬 Comment Posted")
        .field("Team", format!("#{}", team_id), true)
        .field("As", &comment.author, true)
        .description(&comment.content)
        .color(0x00ff00);

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
