mod common;

use chrono::Duration;
use coachvital::core::aggregate::ClientSnapshot;
use coachvital::core::engine::{analyze, compute, fetch_snapshot};

// ── analyze ──────────────────────────────────────────────────────────────────

#[test]
fn test_analyze_is_deterministic_for_a_fixed_instant() {
    let now = common::fixed_now();
    let snapshot = ClientSnapshot {
        sessions: (1..=8)
            .map(|d| common::completed_session("jane", now, d))
            .collect(),
        sets: vec![
            common::set_days_ago("s1", "squat", 100.0, 5, now, 2),
            common::set_days_ago("s1", "bench", 80.0, 8, now, 4),
        ],
        prs: vec![common::pr_days_ago("jane", "squat", 150.0, 1, now, 3)],
        ..Default::default()
    };

    let a = serde_json::to_string(&analyze(&snapshot, now)).unwrap();
    let b = serde_json::to_string(&analyze(&snapshot, now)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_analyze_stamps_last_updated_with_now() {
    let now = common::fixed_now();
    let result = analyze(&ClientSnapshot::default(), now);
    assert_eq!(result.last_updated, now);
}

#[test]
fn test_analyze_output_is_ranked_high_first() {
    let now = common::fixed_now();
    // Dense recent history fires a mix of priorities.
    let snapshot = ClientSnapshot {
        sessions: (1..=10)
            .map(|d| common::completed_session("jane", now, d))
            .collect(),
        prs: vec![common::pr_days_ago("jane", "squat", 150.0, 1, now, 2)],
        ..Default::default()
    };

    let result = analyze(&snapshot, now);
    assert!(!result.insights.is_empty());
    let ranks: Vec<u8> = result.insights.iter().map(|i| i.priority.rank()).collect();
    let mut sorted = ranks.clone();
    sorted.sort_unstable();
    assert_eq!(ranks, sorted);
}

#[test]
fn test_analyze_empty_snapshot_still_produces_a_summary() {
    let now = common::fixed_now();
    let result = analyze(&ClientSnapshot::default(), now);

    let ids: Vec<&str> = result.insights.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec!["no-nutrition-tracking"]);
    assert_eq!(result.summary.quick_stats.total_workouts, 0);
    assert_eq!(result.summary.weekly_trend.len(), 8);
}

// ── fetch_snapshot ───────────────────────────────────────────────────────────

#[test]
fn test_fetch_snapshot_limits_sessions_to_lookback() {
    let (_dir, db) = common::setup_db();
    let now = common::fixed_now();

    db.insert_session(&common::completed_session("jane", now, 10)).unwrap();
    db.insert_session(&common::completed_session("jane", now, 55)).unwrap();
    db.insert_session(&common::completed_session("jane", now, 57)).unwrap();

    let snapshot = fetch_snapshot(&db, "jane", now).unwrap();
    assert_eq!(snapshot.sessions.len(), 2);
}

#[test]
fn test_fetch_snapshot_only_pulls_sets_of_window_sessions() {
    let (_dir, db) = common::setup_db();
    let now = common::fixed_now();

    let recent = common::completed_session("jane", now, 5);
    let ancient = common::completed_session("jane", now, 60);
    db.insert_session(&recent).unwrap();
    db.insert_session(&ancient).unwrap();
    db.insert_set(&common::set_days_ago(&recent.id, "squat", 100.0, 5, now, 5))
        .unwrap();
    db.insert_set(&common::set_days_ago(&ancient.id, "squat", 90.0, 5, now, 60))
        .unwrap();

    let snapshot = fetch_snapshot(&db, "jane", now).unwrap();
    assert_eq!(snapshot.sets.len(), 1);
    assert_eq!(snapshot.sets[0].session_id, recent.id);
}

#[test]
fn test_fetch_snapshot_is_scoped_to_one_client() {
    let (_dir, db) = common::setup_db();
    let now = common::fixed_now();

    db.insert_session(&common::completed_session("jane", now, 3)).unwrap();
    db.insert_session(&common::completed_session("alex", now, 3)).unwrap();
    db.insert_pr(&common::pr_days_ago("alex", "squat", 200.0, 1, now, 2))
        .unwrap();

    let snapshot = fetch_snapshot(&db, "jane", now).unwrap();
    assert_eq!(snapshot.sessions.len(), 1);
    assert_eq!(snapshot.sessions[0].client_id, "jane");
    assert!(snapshot.prs.is_empty());
}

#[test]
fn test_fetch_snapshot_nutrition_window_is_28_days() {
    let (_dir, db) = common::setup_db();
    let now = common::fixed_now();

    db.insert_nutrition_log(&common::log_days_ago("jane", now, 5)).unwrap();
    db.insert_nutrition_log(&common::log_days_ago("jane", now, 40)).unwrap();

    let snapshot = fetch_snapshot(&db, "jane", now).unwrap();
    assert_eq!(snapshot.nutrition_logs.len(), 1);
}

#[test]
fn test_fully_logged_client_caps_adherence_at_one_hundred() {
    let (_dir, db) = common::setup_db();
    let now = common::fixed_now();

    // A log for every day, including today and the window boundary.
    for d in 0..=28 {
        db.insert_nutrition_log(&common::log_days_ago("jane", now, d)).unwrap();
    }

    let snapshot = fetch_snapshot(&db, "jane", now).unwrap();
    assert_eq!(snapshot.nutrition_logs.len(), 28);

    let result = analyze(&snapshot, now);
    let insight = result
        .insights
        .iter()
        .find(|i| i.id == "nutrition-consistent")
        .unwrap();
    assert_eq!(insight.metric.as_deref(), Some("100% of days logged"));
}

#[test]
fn test_fetch_snapshot_joins_meals_and_items() {
    let (_dir, db) = common::setup_db();
    let now = common::fixed_now();

    let log = common::log_days_ago("jane", now, 2);
    db.insert_nutrition_log(&log).unwrap();
    let (meal, item) = common::meal_with_macros(&log.id, 700.0, 45.0);
    db.insert_meal(&meal).unwrap();
    db.insert_meal_item(&item).unwrap();

    let snapshot = fetch_snapshot(&db, "jane", now).unwrap();
    assert_eq!(snapshot.meals.len(), 1);
    assert_eq!(snapshot.meal_items.len(), 1);
    assert_eq!(snapshot.meal_items[0].protein, 45.0);
}

// ── compute ──────────────────────────────────────────────────────────────────

#[test]
fn test_compute_on_unknown_client_yields_empty_profile() {
    let (_dir, db) = common::setup_db();
    let result = compute(&db, "nobody", common::fixed_now()).unwrap();

    let ids: Vec<&str> = result.insights.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec!["no-nutrition-tracking"]);
    assert_eq!(result.summary.quick_stats.total_workouts, 0);
}

#[test]
fn test_compute_end_to_end_consistency_insight() {
    let (_dir, db) = common::setup_db();
    let now = common::fixed_now();

    for d in [1, 3, 5, 7, 9, 11] {
        db.insert_session(&common::completed_session("jane", now, d)).unwrap();
    }

    let result = compute(&db, "jane", now).unwrap();
    let ids: Vec<&str> = result.insights.iter().map(|i| i.id).collect();
    assert!(ids.contains(&"consistency-high"));
    assert!(ids.contains(&"streak-active"));
    assert_eq!(result.summary.quick_stats.current_streak, 6);
}

#[test]
fn test_compute_ignores_rows_at_the_reference_instant() {
    let (_dir, db) = common::setup_db();
    let now = common::fixed_now();

    // started_at == now is outside the half-open fetch window.
    let mut s = common::completed_session("jane", now, 0);
    s.started_at = now;
    db.insert_session(&s).unwrap();
    db.insert_session(&common::completed_session("jane", now + Duration::days(1), 0))
        .unwrap();

    let result = compute(&db, "jane", now).unwrap();
    assert_eq!(result.summary.quick_stats.total_workouts, 0);
}
