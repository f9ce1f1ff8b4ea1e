mod common;

use chrono::Duration;
use coachvital::db::Database;
use coachvital::models::session::SessionStatus;
use tempfile::TempDir;

// ── open and migrate ─────────────────────────────────────────────────────────

#[test]
fn test_open_creates_schema_and_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.db");

    let db = Database::open(&path).unwrap();
    drop(db);
    // Second open re-runs the migration against an existing schema.
    let db = Database::open(&path).unwrap();
    assert!(db.all_exercises().unwrap().is_empty());
}

#[cfg(unix)]
#[test]
fn test_database_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.db");
    let _db = Database::open(&path).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

// ── sessions ─────────────────────────────────────────────────────────────────

#[test]
fn test_sessions_in_window_is_half_open() {
    let (_dir, db) = common::setup_db();
    let now = common::fixed_now();

    db.insert_session(&common::completed_session("jane", now, 0)).unwrap();
    db.insert_session(&common::completed_session("jane", now, 7)).unwrap();
    db.insert_session(&common::completed_session("jane", now, 14)).unwrap();

    let since = now - Duration::days(14);
    let sessions = db.sessions_in_window("jane", since, now).unwrap();
    // The boundary session at `since` is included, the one at `now` is not.
    assert_eq!(sessions.len(), 2);
    assert!(sessions.windows(2).all(|p| p[0].started_at <= p[1].started_at));
}

#[test]
fn test_recent_sessions_newest_first_with_limit() {
    let (_dir, db) = common::setup_db();
    let now = common::fixed_now();

    for d in 1..=5 {
        db.insert_session(&common::completed_session("jane", now, d)).unwrap();
    }

    let sessions = db.recent_sessions("jane", 3).unwrap();
    assert_eq!(sessions.len(), 3);
    assert_eq!(sessions[0].started_at, now - Duration::days(1));
    assert_eq!(sessions[2].started_at, now - Duration::days(3));
}

#[test]
fn test_finish_session_transitions_once() {
    let (_dir, db) = common::setup_db();
    let now = common::fixed_now();

    let mut session = common::completed_session("jane", now, 1);
    session.status = SessionStatus::InProgress;
    session.ended_at = None;
    session.duration_minutes = None;
    db.insert_session(&session).unwrap();

    db.finish_session(&session.id, SessionStatus::Completed, now, Some(50.0))
        .unwrap();
    let stored = db.session_by_id(&session.id).unwrap().unwrap();
    assert_eq!(stored.status, SessionStatus::Completed);
    assert_eq!(stored.duration_minutes, Some(50.0));

    // Completed sessions are immutable.
    let again = db.finish_session(&session.id, SessionStatus::Completed, now, Some(55.0));
    assert!(again.is_err());
}

#[test]
fn test_notes_are_editable_after_completion() {
    let (_dir, db) = common::setup_db();
    let session = common::completed_session("jane", common::fixed_now(), 1);
    db.insert_session(&session).unwrap();

    db.set_session_notes(&session.id, "coach note").unwrap();
    let stored = db.session_by_id(&session.id).unwrap().unwrap();
    assert_eq!(stored.notes.as_deref(), Some("coach note"));

    assert!(db.set_session_notes("no-such-id", "x").is_err());
}

#[test]
fn test_session_by_id_missing_is_none() {
    let (_dir, db) = common::setup_db();
    assert!(db.session_by_id("missing").unwrap().is_none());
}

// ── sets ─────────────────────────────────────────────────────────────────────

#[test]
fn test_sets_by_sessions_empty_input() {
    let (_dir, db) = common::setup_db();
    assert!(db.sets_by_sessions(&[]).unwrap().is_empty());
}

#[test]
fn test_sets_by_sessions_filters_and_orders() {
    let (_dir, db) = common::setup_db();
    let now = common::fixed_now();

    // Parent sessions first; sets reference them by foreign key.
    for id in ["s1", "s2", "s3"] {
        let mut session = common::completed_session("jane", now, 1);
        session.id = id.to_string();
        db.insert_session(&session).unwrap();
    }

    db.insert_set(&common::set_days_ago("s1", "squat", 100.0, 5, now, 1)).unwrap();
    db.insert_set(&common::set_days_ago("s2", "bench", 80.0, 5, now, 3)).unwrap();
    db.insert_set(&common::set_days_ago("s3", "row", 70.0, 8, now, 2)).unwrap();

    let sets = db
        .sets_by_sessions(&["s1".to_string(), "s2".to_string()])
        .unwrap();
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0].session_id, "s2");
    assert_eq!(sets[1].session_id, "s1");
}

#[test]
fn test_insert_set_requires_parent_session() {
    let (_dir, db) = common::setup_db();
    let orphan = common::set_days_ago("no-such-session", "squat", 100.0, 5, common::fixed_now(), 1);
    assert!(db.insert_set(&orphan).is_err());
}

#[test]
fn test_set_roundtrips_optional_fields() {
    let (_dir, db) = common::setup_db();
    let now = common::fixed_now();

    let session = common::completed_session("jane", now, 1);
    db.insert_session(&session).unwrap();

    let mut set = common::set_days_ago(&session.id, "squat", 102.5, 3, now, 1);
    set.rpe = Some(8.5);
    set.peak_velocity = Some(0.62);
    set.velocity_drop = Some(12.0);
    db.insert_set(&set).unwrap();

    let stored = &db.sets_by_session(&session.id).unwrap()[0];
    assert_eq!(stored.weight, 102.5);
    assert_eq!(stored.rpe, Some(8.5));
    assert_eq!(stored.peak_velocity, Some(0.62));
    assert_eq!(stored.velocity_drop, Some(12.0));
    assert_eq!(stored.completed_at, set.completed_at);
}

// ── prs ──────────────────────────────────────────────────────────────────────

#[test]
fn test_best_pr_prefers_weight_then_recency() {
    let (_dir, db) = common::setup_db();
    let now = common::fixed_now();

    db.insert_pr(&common::pr_days_ago("jane", "squat", 140.0, 1, now, 30)).unwrap();
    let heavier = common::pr_days_ago("jane", "squat", 150.0, 1, now, 20);
    db.insert_pr(&heavier).unwrap();
    let tie_newer = common::pr_days_ago("jane", "squat", 150.0, 1, now, 5);
    db.insert_pr(&tie_newer).unwrap();

    let best = db.best_pr("jane", "squat").unwrap().unwrap();
    assert_eq!(best.id, tie_newer.id);

    assert!(db.best_pr("jane", "bench").unwrap().is_none());
}

#[test]
fn test_prs_in_window_scopes_by_client_and_time() {
    let (_dir, db) = common::setup_db();
    let now = common::fixed_now();

    db.insert_pr(&common::pr_days_ago("jane", "squat", 140.0, 1, now, 3)).unwrap();
    db.insert_pr(&common::pr_days_ago("jane", "squat", 130.0, 1, now, 40)).unwrap();
    db.insert_pr(&common::pr_days_ago("alex", "squat", 160.0, 1, now, 3)).unwrap();

    let prs = db
        .prs_in_window("jane", now - Duration::days(28), now)
        .unwrap();
    assert_eq!(prs.len(), 1);
    assert_eq!(prs[0].weight, 140.0);
}

// ── nutrition ────────────────────────────────────────────────────────────────

#[test]
fn test_nutrition_logs_window_is_half_open() {
    let (_dir, db) = common::setup_db();
    let now = common::fixed_now();

    // One log per day from today back through the window boundary.
    for d in 0..=28 {
        db.insert_nutrition_log(&common::log_days_ago("jane", now, d)).unwrap();
    }

    let since = (now - Duration::days(28)).date_naive();
    let until = now.date_naive();
    let logs = db.nutrition_logs_in_window("jane", since, until).unwrap();
    // The boundary date is included, today's date is not: 28 days exactly.
    assert_eq!(logs.len(), 28);
    assert_eq!(logs[0].date, since);
    assert_eq!(logs[27].date, until - Duration::days(1));
}

#[test]
fn test_get_or_create_log_is_unique_per_day() {
    let (_dir, db) = common::setup_db();
    let date = common::fixed_now().date_naive();

    let first = db.get_or_create_log("jane", date).unwrap();
    let second = db.get_or_create_log("jane", date).unwrap();
    assert_eq!(first.id, second.id);

    let other_client = db.get_or_create_log("alex", date).unwrap();
    assert_ne!(first.id, other_client.id);
}

#[test]
fn test_meals_by_logs_ordered_by_position() {
    let (_dir, db) = common::setup_db();
    let date = common::fixed_now().date_naive();
    let log = db.get_or_create_log("jane", date).unwrap();

    use coachvital::models::nutrition::Meal;
    db.insert_meal(&Meal::new(log.id.clone(), "dinner".to_string(), 1)).unwrap();
    db.insert_meal(&Meal::new(log.id.clone(), "breakfast".to_string(), 0)).unwrap();

    let meals = db.meals_by_logs(&[log.id.clone()]).unwrap();
    assert_eq!(meals.len(), 2);
    assert_eq!(meals[0].name, "breakfast");
    assert_eq!(meals[1].name, "dinner");

    assert!(db.meals_by_logs(&[]).unwrap().is_empty());
}

#[test]
fn test_items_by_meals_joins_macros() {
    let (_dir, db) = common::setup_db();
    let date = common::fixed_now().date_naive();
    let log = db.get_or_create_log("jane", date).unwrap();
    let (meal, item) = common::meal_with_macros(&log.id, 650.0, 42.0);
    db.insert_meal(&meal).unwrap();
    db.insert_meal_item(&item).unwrap();

    let items = db.items_by_meals(&[meal.id.clone()]).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].calories, 650.0);
    assert_eq!(items[0].protein, 42.0);
}

// ── exercises ────────────────────────────────────────────────────────────────

#[test]
fn test_upsert_exercise_overwrites() {
    use coachvital::models::exercise::Exercise;

    let (_dir, db) = common::setup_db();
    db.upsert_exercise(&Exercise {
        id: "squat".to_string(),
        name: "Squat".to_string(),
        muscle_group: None,
    })
    .unwrap();
    db.upsert_exercise(&Exercise {
        id: "squat".to_string(),
        name: "Back Squat".to_string(),
        muscle_group: Some("legs".to_string()),
    })
    .unwrap();

    let all = db.all_exercises().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Back Squat");
    assert_eq!(all[0].muscle_group.as_deref(), Some("legs"));
}
