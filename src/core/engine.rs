use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::core::aggregate::{self, ClientSnapshot};
use crate::core::rules;
use crate::core::score::{self, InsightsSummary};
use crate::db::Database;
use crate::models::insight::Insight;

/// Widest training window any rule reads.
pub const TRAINING_LOOKBACK_DAYS: i64 = 56;
/// Nutrition adherence window.
pub const NUTRITION_LOOKBACK_DAYS: i64 = 28;

#[derive(Debug, Clone, Serialize)]
pub struct ClientInsights {
    pub insights: Vec<Insight>,
    pub summary: InsightsSummary,
    pub last_updated: DateTime<Utc>,
}

/// The pure pipeline: aggregates -> rules -> ranking -> summary.
/// `now` is captured once by the caller and threaded through every
/// window, so identical snapshots always yield identical output.
pub fn analyze(snapshot: &ClientSnapshot, now: DateTime<Utc>) -> ClientInsights {
    let agg = aggregate::aggregate(snapshot, now);
    let mut insights = rules::evaluate(&agg);
    score::rank(&mut insights);
    let summary = score::summarize(&insights, &agg);
    ClientInsights {
        insights,
        summary,
        last_updated: now,
    }
}

/// Load one client's raw rows. Each query may return nothing; an
/// unknown client simply produces empty aggregates downstream.
pub fn fetch_snapshot(
    db: &Database,
    client_id: &str,
    now: DateTime<Utc>,
) -> Result<ClientSnapshot> {
    let since = now - Duration::days(TRAINING_LOOKBACK_DAYS);
    let sessions = db.sessions_in_window(client_id, since, now)?;

    let session_ids: Vec<String> = sessions.iter().map(|s| s.id.clone()).collect();
    let sets = db.sets_by_sessions(&session_ids)?;

    let prs = db.prs_in_window(client_id, since, now)?;

    // Half-open on dates: the 28 full days before today, never more
    // logged days than the adherence window has.
    let nutrition_since = (now - Duration::days(NUTRITION_LOOKBACK_DAYS)).date_naive();
    let nutrition_logs =
        db.nutrition_logs_in_window(client_id, nutrition_since, now.date_naive())?;
    let log_ids: Vec<String> = nutrition_logs.iter().map(|l| l.id.clone()).collect();
    let meals = db.meals_by_logs(&log_ids)?;
    let meal_ids: Vec<String> = meals.iter().map(|m| m.id.clone()).collect();
    let meal_items = db.items_by_meals(&meal_ids)?;

    let exercises = db.all_exercises()?;

    Ok(ClientSnapshot {
        sessions,
        sets,
        prs,
        nutrition_logs,
        meals,
        meal_items,
        exercises,
    })
}

/// Fetch and analyze in one step.
pub fn compute(db: &Database, client_id: &str, now: DateTime<Utc>) -> Result<ClientInsights> {
    let snapshot = fetch_snapshot(db, client_id, now)?;
    Ok(analyze(&snapshot, now))
}
