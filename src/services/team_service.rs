use serenity::builder::{CreateEmbed, CreateEmbedFooter};

use crate::api::backend::{ApiError, BackendClient, Team};
use crate::utils::{format_amount, format_change, paginate, Table};

const TEAMS_PER_PAGE: usize = 10;

pub async fn list_teams(client: &BackendClient) -> Result<Vec<Team>, String> {
    let mut teams = client
        .list_teams()
        .await
        .map_err(|e| format!("❌ Failed to load teams: {}", e.user_message()))?;

    teams.sort_by_key(|team| team.id);
    Ok(teams)
}

pub async fn get_team(client: &BackendClient, team_id: i64) -> Result<Team, String> {
    client.get_team(team_id).await.map_err(|e| match e {
        ApiError::NotFound(_) => format!("❌ Team #{} not found", team_id),
        other => format!("❌ Failed to load team: {}", other.user_message()),
    })
}

/// Parse a `#12` / `12` team argument
pub fn parse_team_id(arg: Option<&str>) -> Result<i64, String> {
    let arg = arg.ok_or_else(|| "❌ Please give a team number, e.g. `3`".to_string())?;
    arg.trim_start_matches('#')
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| format!("❌ Invalid team number: `{}`", arg))
}

/// One embed page of the team board
pub fn create_team_page(teams: &[Team], page: usize) -> Result<CreateEmbed, String> {
    if teams.is_empty() {
        return Ok(CreateEmbed::default()
            .title("🏢 Teams")
            .description("No teams are listed yet.")
            .color(0xffa500));
    }

    let (page_teams, total_pages) = paginate(teams, page, TEAMS_PER_PAGE)?;

    let mut table = Table::new(&["#", "Team", "Price", "Change"])
        .align_right(0)
        .align_right(2)
        .align_right(3);
    for team in page_teams {
        table.add_row(vec![
            team.id.to_string(),
            team.name.clone(),
            format_amount(team.price),
            format_change(team.change_rate),
        ]);
    }

    Ok(CreateEmbed::default()
        .title("🏢 Teams")
        .description(table.render())
        .footer(CreateEmbedFooter::new(format!(
            "Page {}/{} • $team <#> for details",
            page, total_pages
        )))
        .color(0x00b0f4))
}

pub fn create_team_embed(team: &Team) -> CreateEmbed {
    let mut embed = CreateEmbed::default()
        .title(format!("🏢 #{} {}", team.id, team.name))
        .field("Price", format_amount(team.price), true)
        .field("Change", format_change(team.change_rate), true)
        .color(0x00b0f4);

    if let Some(description) = team.description.as_deref().filter(|d| !d.trim().is_empty()) {
        embed = embed.description(description);
    }

    let deck = match &team.deck_url {
        Some(url) => format!("[Open pitch deck]({})", url),
        None => "No pitch deck uploaded".to_string(),
    };

    embed
        .field("Pitch Deck", deck, false)
        .footer(CreateEmbedFooter::new(format!(
            "$chart {0} • $invest {0} <amount> • $comments {0}",
            team.id
        )))
}

/// Pitch deck link for a team; error if none uploaded
pub fn create_deck_embed(team: &Team) -> Result<CreateEmbed, String> {
    let url = team
        .deck_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| format!("❌ {} has not uploaded a pitch deck yet", team.name))?;

    Ok(CreateEmbed::default()
        .title(format!("📄 {} Pitch Deck", team.name))
        .url(url)
        .description(format!("[Download PDF]({})", url))
        .color(0x00b0f4))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: i64, deck_url: Option<&str>) -> Team {
        Team {
            id,
            name: format!("Team {}", id),
            description: None,
            price: 1000.0,
            change_rate: Some(1.5),
            deck_url: deck_url.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_team_id() {
        assert_eq!(parse_team_id(Some("3")), Ok(3));
        assert_eq!(parse_team_id(Some("#12")), Ok(12));
        assert!(parse_team_id(Some("0")).is_err());
        assert!(parse_team_id(Some("acme")).is_err());
        assert!(parse_team_id(None).is_err());
    }

    #[test]
    fn test_team_page_out_of_range() {
        let teams: Vec<Team> = (1..=12).map(|id| team(id, None)).collect();
        assert!(create_team_page(&teams, 2).is_ok());
        assert!(create_team_page(&teams, 3).is_err());
        assert!(create_team_page(&[], 1).is_ok());
    }

    #[test]
    fn test_deck_requires_url() {
        assert!(create_deck_embed(&team(1, None)).is_err());
        assert!(create_deck_embed(&team(1, Some("  "))).is_err());
        assert!(create_deck_embed(&team(1, Some("https://cdn.example.com/deck.pdf"))).is_ok());
    }
}
