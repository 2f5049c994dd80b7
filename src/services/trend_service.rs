use tracing::{debug, info};

use crate::api::backend::{fallback_trend, normalize_trend_payload, ApiError, BackendClient};
use crate::models::TeamTrend;
use crate::trend::{resample, TrendWindow};

/// Fetch a team and its trend points.
///
/// A team with no samples yet gets the built-in sample series, flagged with
/// `is_fallback` so the chart can say so.
pub async fn get_team_trend(client: &BackendClient, team_id: i64) -> Result<TeamTrend, String> {
    let team = client.get_team(team_id).await.map_err(|e| match e {
        ApiError::NotFound(_) => format!("❌ Team #{} not found", team_id),
        other => format!("❌ Failed to load team: {}", other.user_message()),
    })?;

    let payload = client
        .get_team_trend(team_id)
        .await
        .map_err(|e| format!("❌ Failed to load trend: {}", e.user_message()))?;

    let points = normalize_trend_payload(&payload);
    debug!("Team {} trend has {} point(s)", team_id, points.len());

    let (points, is_fallback) = if points.is_empty() {
        info!("Team {} has no trend data, using sample series", team_id);
        (fallback_trend(), true)
    } else {
        (points, false)
    };

    Ok(TeamTrend {
        team_id,
        team_name: team.name,
        points,
        is_fallback,
    })
}

/// Resampled window for a trend, or `None` when there is nothing to show
pub fn build_window(trend: &TeamTrend) -> Option<TrendWindow> {
    resample(&trend.points).filter(|window| !window.is_blank())
}

/// Change between the first and last filled slots of a window, in percent
pub fn window_change_percent(window: &TrendWindow) -> Option<f64> {
    let mut filled = window.values().flatten();
    let first = filled.next()?;
    let last = window.now_slot().value?;

    if first == 0.0 {
        return None;
    }
    Some((last - first) / first * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrendPoint;

    fn trend(points: Vec<TrendPoint>) -> TeamTrend {
        TeamTrend {
            team_id: 1,
            team_name: "Acme".to_string(),
            points,
            is_fallback: false,
        }
    }

    #[test]
    fn test_empty_trend_has_no_window() {
        assert!(build_window(&trend(Vec::new())).is_none());
    }

    #[test]
    fn test_change_over_window() {
        let window = build_window(&trend(fallback_trend())).unwrap();
        let change = window_change_percent(&window).unwrap();
        // 88 at the window start, 119 now
        assert!((change - 35.227).abs() < 0.01);
    }

    #[test]
    fn test_change_undefined_from_zero() {
        let window = build_window(&trend(vec![
            TrendPoint::new("10:00", 0.0),
            TrendPoint::new("10:05", 3.0),
        ]))
        .unwrap();
        assert_eq!(window_change_percent(&window), None);
    }
}
