use serenity::builder::{CreateEmbed, CreateEmbedFooter};
use serenity::model::channel::Message;
use serenity::prelude::Context;

use super::auth_service;
use crate::api::backend::{Portfolio, UserProfile};
use crate::utils::{format_amount, Table};

pub async fn get_profile(ctx: &Context, msg: &Message) -> Result<UserProfile, String> {
    let (client, _) = auth_service::authorized_client(ctx, msg).await?;
    client
        .get_profile()
        .await
        .map_err(|e| format!("❌ Failed to load profile: {}", e.user_message()))
}

pub async fn get_portfolio(ctx: &Context, msg: &Message) -> Result<Portfolio, String> {
    let (client, _) = auth_service::authorized_client(ctx, msg).await?;
    client
        .get_portfolio()
        .await
        .map_err(|e| format!("❌ Failed to load portfolio: {}", e.user_message()))
}

/// Total of capital plus held positions, preferring the backend's figure
pub fn total_asset(portfolio: &Portfolio) -> f64 {
    portfolio.total_asset.unwrap_or_else(|| {
        portfolio.balance
            + portfolio
                .holdings
                .iter()
                .map(|h| h.current_value.unwrap_or(h.shares))
                .sum::<f64>()
    })
}

pub fn create_profile_embed(profile: &UserProfile) -> CreateEmbed {
    let mut embed = CreateEmbed::default()
        .title(format!("🎓 {}", profile.name))
        .field("Student ID", &profile.student_id, true)
        .field("Capital", format_amount(profile.balance), true)
        .color(0x00b0f4);

    if let Some(total) = profile.total_asset {
        embed = embed.field("Total Asset", format_amount(total), true);
    }
    embed
}

pub fn create_portfolio_embed(portfolio: &Portfolio) -> CreateEmbed {
    let description = if portfolio.holdings.is_empty() {
        "No investments yet. Browse `$teams` and `$invest`!".to_string()
    } else {
        let mut table = Table::new(&["#", "Team", "Invested", "Value"])
            .align_right(0)
            .align_right(2)
            .align_right(3);
        for holding in &portfolio.holdings {
            table.add_row(vec![
                holding.team_id.to_string(),
                holding.team_name.clone(),
                format_amount(holding.shares),
                holding
                    .current_value
                    .map(format_amount)
                    .unwrap_or_else(|| "-".to_string()),
            ]);
        }
        table.render()
    };

    CreateEmbed::default()
        .title("💼 Portfolio")
        .description(description)
        .field("Capital", format_amount(portfolio.balance), true)
        .field("Total Asset", format_amount(total_asset(portfolio)), true)
        .footer(CreateEmbedFooter::new("Values follow the latest team prices"))
        .color(0x00b0f4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::backend::models::Holding;

    fn holding(value: Option<f64>) -> Holding {
        Holding {
            team_id: 1,
            team_name: "Acme".to_string(),
            shares: 100.0,
            current_value: value,
        }
    }

    #[test]
    fn test_total_asset_prefers_backend_value() {
        let portfolio = Portfolio {
            balance: 1000.0,
            holdings: vec![holding(Some(150.0))],
            total_asset: Some(9999.0),
        };
        assert_eq!(total_asset(&portfolio), 9999.0);
    }

    #[test]
    fn test_total_asset_sums_positions() {
        let portfolio = Portfolio {
            balance: 1000.0,
            holdings: vec![holding(Some(150.0)), holding(None)],
            total_asset: None,
        };
        assert_eq!(total_asset(&portfolio), 1250.0);
    }
}
