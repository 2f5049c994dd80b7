use serenity::builder::CreateEmbed;
use serenity::model::channel::Message;
use serenity::prelude::Context;

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    let embed = CreateEmbed::default()
        .title("📖 Mock Investment Commands")
        .description("Invest your virtual capital in student startup teams and watch their share price move.")
        .color(0x00b0f4)
        .field(
            "🎯 General",
            "`$ping` - Check bot and game server latency\n`$help` - Show this help message",
            false,
        )
        .field(
            "🔑 Account (DM only)",
            "`$signup <student_id> <password> <name>` - Create your account\n`$login <student_id> <password>` - Log in\n`$logout` - Forget your session",
            false,
        )
        .field(
            "🏢 Teams",
            "`$teams [page]` - List teams and prices\n`$team <#>` - Team details\n`$deck <#>` - Pitch deck PDF\n`$chart <#>` - Price trend (last 20 minutes)",
            false,
        )
        .field(
            "💰 Investing",
            "`$invest <#> <amount>` - Invest capital (e.g. `$invest 3 50k`)\n`$sell <#> <amount>` - Sell back\n`$portfolio` - Your holdings\n`$me` - Your profile",
            false,
        )
        .field(
            "💬 Comments",
            "`$comments <#> [page]` - Read a team's feed\n`$comment <#> <text>` - Post a comment",
            false,
        )
        .field(
            "⚡ Rate Limiting",
            "Short cooldown per command per user, plus a global request limit.",
            false,
        );

    msg.channel_id
        .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
        .await
        .map_err(|e| format!("Failed to send help message: {}", e))?;

    Ok(())
}
