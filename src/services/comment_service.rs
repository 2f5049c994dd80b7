use serenity::builder::{CreateEmbed, CreateEmbedFooter};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::info;

use super::{auth_service, team_service};
use crate::api::backend::{Comment, Team};
use crate::utils::paginate;

const COMMENTS_PER_PAGE: usize = 8;
const MAX_COMMENT_CHARS: usize = 300;

/// Trim and validate comment text
pub fn validate_comment(content: &str) -> Result<String, String> {
    let content = content.trim();
    if content.is_empty() {
        return Err("❌ Comment cannot be empty".to_string());
    }
    if content.chars().count() > MAX_COMMENT_CHARS {
        return Err(format!("❌ Comment must be {} characters or fewer", MAX_COMMENT_CHARS));
    }
    Ok(content.to_string())
}

/// A team and its comments, newest first
pub async fn get_comments(ctx: &Context, msg: &Message, team_id: i64) -> Result<(Team, Vec<Comment>), String> {
    let client = auth_service::client_for(ctx, msg).await?;
    let team = team_service::get_team(&client, team_id).await?;

    let mut comments = client
        .list_comments(team_id)
        .await
        .map_err(|e| format!("❌ Failed to load comments: {}", e.user_message()))?;

    sort_newest_first(&mut comments);
    Ok((team, comments))
}

pub async fn post_comment(ctx: &Context, msg: &Message, team_id: i64, content: &str) -> Result<Comment, String> {
    let content = validate_comment(content)?;
    let (client, session) = auth_service::authorized_client(ctx, msg).await?;

    let comment = client
        .post_comment(team_id, &content)
        .await
        .map_err(|e| format!("❌ Failed to post comment: {}", e.user_message()))?;

    info!("Student {} commented on team {}", session.student_id, team_id);
    Ok(comment)
}

/// Undated comments keep their relative order after dated ones
fn sort_newest_first(comments: &mut [Comment]) {
    comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

pub fn create_comments_embed(team: &Team, comments: &[Comment], page: usize) -> Result<CreateEmbed, String> {
    let title = format!("💬 #{} {} Comments", team.id, team.name);

    if comments.is_empty() {
        return Ok(CreateEmbed::default()
            .title(title)
            .description(format!("No comments yet. Be the first with `$comment {} <text>`", team.id))
            .color(0xffa500));
    }

    let (page_comments, total_pages) = paginate(comments, page, COMMENTS_PER_PAGE)?;

    let mut description = String::new();
    for comment in page_comments {
        let when = comment
            .created_at
            .map(|at| format!(" <t:{}:R>", at.timestamp()))
            .unwrap_or_default();
        description.push_str(&format!("**{}**{}\n{}\n\n", comment.author, when, comment.content));
    }

    Ok(CreateEmbed::default()
        .title(title)
        .description(description.trim_end().to_string())
        .footer(CreateEmbedFooter::new(format!("Page {}/{}", page, total_pages)))
        .color(0x00b0f4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn comment(id: i64, minute: Option<u32>) -> Comment {
        Comment {
            id,
            author: "kim".to_string(),
            content: format!("comment {}", id),
            created_at: minute.map(|m| Utc.with_ymd_and_hms(2024, 5, 1, 12, m, 0).unwrap()),
        }
    }

    #[test]
    fn test_validate_comment() {
        assert_eq!(validate_comment("  great pitch  "), Ok("great pitch".to_string()));
        assert!(validate_comment("   ").is_err());
        assert!(validate_comment(&"가".repeat(301)).is_err());
        assert!(validate_comment(&"가".repeat(300)).is_ok());
    }

    #[test]
    fn test_newest_first() {
        let mut comments = vec![comment(1, Some(1)), comment(2, None), comment(3, Some(30))];
        sort_newest_first(&mut comments);
        let ids: Vec<i64> = comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
