pub mod chart;
pub mod comments;
pub mod help;
pub mod login;
pub mod logout;
pub mod ping;
pub mod portfolio;
pub mod profile;
pub mod signup;
pub mod team;
pub mod teams;
pub mod trade;

use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::{debug, warn};

use crate::models::TradeSide;
use crate::utils::extract_clean_error;

pub const PREFIX: char = '$';

/// Split a message into a lowercase command name and its arguments
pub fn parse_command(content: &str) -> Option<(String, Vec<&str>)> {
    let mut parts = content.split_whitespace();
    let command = parts.next()?;
    let name = command.strip_prefix(PREFIX)?;
    if name.is_empty() {
        return None;
    }
    Some((name.to_lowercase(), parts.collect()))
}

/// Commands that carry a password and must only be used in DMs
pub fn is_credential_command(name: &str) -> bool {
    matches!(name, "signup" | "login")
}

async fn send_embed(ctx: &Context, msg: &Message, embed: CreateEmbed) {
    if let Err(e) = msg.channel_id.send_message(ctx, CreateMessage::default().embed(embed)).await {
        warn!("Failed to send message to {}: {}", msg.channel_id, e);
    }
}

async fn check_rate_limits(ctx: &Context, msg: &Message, name: &str) -> bool {
    let limiter = {
        let data = ctx.data.read().await;
        data.get::<crate::RateLimits>().cloned()
    };
    let Some(limiter) = limiter else {
        return true;
    };

    if let Err(remaining_ms) = limiter.check_global().await {
        debug!("Global rate limit hit, {}ms remaining", remaining_ms);
        return false;
    }

    match limiter.check_cooldown(msg.author.id.get(), name).await {
        Ok(()) => true,
        Err((remaining, should_warn)) => {
            if should_warn {
                send_embed(
                    ctx,
                    msg,
                    CreateEmbed::default()
                        .title("Command Cooldown")
                        .description(format!(
                            "⏳ Please wait {} seconds before using this command again.",
                            remaining
                        ))
                        .color(0xffa500),
                )
                .await;
            }
            false
        }
    }
}

pub async fn handle_message(ctx: &Context, msg: &Message) {
    if msg.author.bot {
        return;
    }

    let Some((name, args)) = parse_command(&msg.content) else {
        return;
    };

    let known = matches!(
        name.as_str(),
        "help" | "ping" | "signup" | "login" | "logout" | "me" | "profile" | "teams" | "team"
            | "deck" | "chart" | "invest" | "buy" | "sell" | "portfolio" | "pf" | "comments"
            | "comment"
    );
    if !known {
        return;
    }

    if !check_rate_limits(ctx, msg, &name).await {
        return;
    }

    if is_credential_command(&name) && msg.guild_id.is_some() {
        if let Err(e) = msg.delete(ctx).await {
            warn!("Could not delete credential message in {}: {}", msg.channel_id, e);
        }
        send_embed(
            ctx,
            msg,
            CreateEmbed::default()
                .title("🔒 Use a DM")
                .description(format!(
                    "Never share your password in a server channel. Send `${}` to me in a direct message instead.",
                    name
                ))
                .color(0xff0000),
        )
        .await;
        return;
    }

    debug!("Command {} from {} with {} arg(s)", name, msg.author.id, args.len());

    let result = match name.as_str() {
        "help" => help::execute(ctx, msg).await,
        "ping" => ping::execute(ctx, msg).await,
        "signup" => signup::execute(ctx, msg, &args).await,
        "login" => login::execute(ctx, msg, &args).await,
        "logout" => logout::execute(ctx, msg).await,
        "me" | "profile" => profile::execute(ctx, msg).await,
        "teams" => teams::execute(ctx, msg, &args).await,
        "team" => team::execute(ctx, msg, &args).await,
        "deck" => team::execute_deck(ctx, msg, &args).await,
        "chart" => chart::execute(ctx, msg, &args).await,
        "invest" | "buy" => trade::execute(ctx, msg, TradeSide::Invest, &args).await,
        "sell" => trade::execute(ctx, msg, TradeSide::Sell, &args).await,
        "portfolio" | "pf" => portfolio::execute(ctx, msg).await,
        "comments" => comments::execute_list(ctx, msg, &args).await,
        "comment" => comments::execute_post(ctx, msg, &args).await,
        _ => return,
    };

    if let Err(e) = result {
        warn!("Error executing command {}: {}", name, e);

        let clean_error = extract_clean_error(&e);
        let user_message = if clean_error.contains("429") || clean_error.contains("rate limit") {
            "⚠️ **Rate Limited**: Discord is rate limiting us. Please try again in a moment.".to_string()
        } else if clean_error.starts_with('❌') || clean_error.starts_with('⚠') {
            clean_error
        } else if !clean_error.is_empty() {
            format!("❌ {}", clean_error)
        } else {
            "❌ An error occurred while executing the command.".to_string()
        };

        send_embed(
            ctx,
            msg,
            CreateEmbed::default()
                .title("Command Error")
                .description(user_message)
                .color(0xff0000),
        )
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        let (name, args) = parse_command("$Invest 3 50k").unwrap();
        assert_eq!(name, "invest");
        assert_eq!(args, vec!["3", "50k"]);

        assert_eq!(parse_command("  $teams  ").map(|(n, a)| (n, a.len())), Some(("teams".to_string(), 0)));
        assert!(parse_command("hello $teams").is_none());
        assert!(parse_command("$").is_none());
        assert!(parse_command("").is_none());
    }

    #[test]
    fn test_credential_commands() {
        assert!(is_credential_command("login"));
        assert!(is_credential_command("signup"));
        assert!(!is_credential_command("logout"));
    }
}
