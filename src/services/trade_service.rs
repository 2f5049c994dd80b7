use serenity::builder::CreateEmbed;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::info;

use super::{auth_service, team_service};
use crate::models::{TradeResult, TradeSide};
use crate::utils::format_amount;

/// Largest single order accepted before it reaches the backend
const MAX_TRADE_AMOUNT: i64 = 1_000_000_000;

/// Parse an amount such as `50000`, `50,000` or `50k`
pub fn parse_amount(raw: &str) -> Result<i64, String> {
    let cleaned = raw.trim().replace(',', "").to_lowercase();
    let (digits, multiplier) = match cleaned.strip_suffix('k') {
        Some(digits) => (digits, 1_000),
        None => match cleaned.strip_suffix('m') {
            Some(digits) => (digits, 1_000_000),
            None => (cleaned.as_str(), 1),
        },
    };

    let amount = digits
        .parse::<i64>()
        .ok()
        .and_then(|value| value.checked_mul(multiplier))
        .ok_or_else(|| format!("❌ Invalid amount: `{}`", raw))?;

    if amount <= 0 {
        return Err("❌ Amount must be greater than zero".to_string());
    }
    if amount > MAX_TRADE_AMOUNT {
        return Err(format!("❌ Amount cannot exceed {}", format_amount(MAX_TRADE_AMOUNT as f64)));
    }

    Ok(amount)
}

/// `<team> <amount>`
pub fn parse_trade_args(side: TradeSide, args: &[&str]) -> Result<(i64, i64), String> {
    if args.len() != 2 {
        return Err(format!(
            "❌ Usage: `${} <team #> <amount>`",
            side.path_segment()
        ));
    }

    let team_id = team_service::parse_team_id(Some(args[0]))?;
    let amount = parse_amount(args[1])?;
    Ok((team_id, amount))
}

pub async fn execute_trade(
    ctx: &Context,
    msg: &Message,
    side: TradeSide,
    team_id: i64,
    amount: i64,
) -> Result<TradeResult, String> {
    let (client, session) = auth_service::authorized_client(ctx, msg).await?;

    let team = team_service::get_team(&client, team_id).await?;

    let response = client
        .trade(side, team_id, amount)
        .await
        .map_err(|e| format!("❌ {} failed: {}", side, e.user_message()))?;

    info!(
        "{} of {} on team {} by student {} succeeded",
        side, amount, team_id, session.student_id
    );

    Ok(TradeResult {
        side,
        team_id,
        team_name: team.name,
        amount,
        balance: response.balance,
        holding: response.shares,
        message: response.message,
    })
}

pub fn create_trade_embed(result: &TradeResult) -> CreateEmbed {
    let mut embed = CreateEmbed::default()
        .title(format!("{} {} Complete", result.side.emoji(), result.side))
        .field("Team", format!("#{} {}", result.team_id, result.team_name), false)
        .field("Amount", format_amount(result.amount as f64), true)
        .color(match result.side {
            TradeSide::Invest => 0x00ff00,
            TradeSide::Sell => 0xff6347,
        });

    if let Some(holding) = result.holding {
        embed = embed.field("Now Holding", format_amount(holding), true);
    }
    if let Some(balance) = result.balance {
        embed = embed.field("Remaining Capital", format_amount(balance), true);
    }
    if let Some(message) = &result.message {
        embed = embed.description(message);
    }

    embed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_forms() {
        assert_eq!(parse_amount("50000"), Ok(50_000));
        assert_eq!(parse_amount("50,000"), Ok(50_000));
        assert_eq!(parse_amount("50k"), Ok(50_000));
        assert_eq!(parse_amount("2M"), Ok(2_000_000));
    }

    #[test]
    fn test_parse_amount_rejects_bad_values() {
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("1.5").is_err());
        assert!(parse_amount("lots").is_err());
        assert!(parse_amount("9999999999999999999k").is_err());
        assert!(parse_amount("2000m").is_err());
    }

    #[test]
    fn test_parse_trade_args() {
        assert_eq!(parse_trade_args(TradeSide::Invest, &["#3", "10k"]), Ok((3, 10_000)));
        let err = parse_trade_args(TradeSide::Sell, &["3"]).unwrap_err();
        assert!(err.contains("$sell"));
    }
}
