use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::services::auth_service;

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    if args.is_empty() {
        let help_embed = CreateEmbed::default()
            .title("🔑 Sign Up")
            .description("Create your mock investment account. You start with virtual capital to invest.")
            .field("Usage", "`$signup <student_id> <password> <name>`", false)
            .field("Example", "`$signup 20231234 hunter22 Kim Min Su`", false)
            .field("Notes", "• DM only, your message contains a password\n• Student ID is 5-12 digits", false)
            .color(0x00ff00);

        msg.channel_id
            .send_message(ctx, CreateMessage::default().embed(help_embed))
            .await
            .map_err(|e| e.to_string())?;
        return Ok(());
    }

    let request = auth_service::parse_signup_args(args)?;
    let name = request.name.clone();
    let student_id = auth_service::signup(ctx, msg, request).await?;

    let embed = CreateEmbed::default()
        .title("🎉 Welcome!")
        .description(format!("Account created for **{}** ({}). You are now logged in.", name, student_id))
        .field("Next", "`$teams` to browse, `$me` to see your capital", false)
        .color(0x00ff00);

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
