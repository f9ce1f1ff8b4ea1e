#![allow(dead_code)]

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use coachvital::db::Database;
use coachvital::models::nutrition::{Meal, MealItem, NutritionLog};
use coachvital::models::pr::PersonalRecord;
use coachvital::models::session::{SessionStatus, WorkoutSession};
use coachvital::models::set::SetRecord;
use tempfile::TempDir;

/// Create a temporary database for testing.
pub fn setup_db() -> (TempDir, Database) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).unwrap();
    (dir, db)
}

pub fn noon_utc(date: NaiveDate) -> DateTime<Utc> {
    let dt = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    Utc.from_utc_datetime(&dt)
}

/// Fixed reference instant for window math: noon UTC on a Sunday.
pub fn fixed_now() -> DateTime<Utc> {
    noon_utc(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
}

/// Completed 60-minute session started `days_ago` full days before `now`.
pub fn completed_session(client: &str, now: DateTime<Utc>, days_ago: i64) -> WorkoutSession {
    let mut s = WorkoutSession::new(client.to_string());
    s.started_at = now - Duration::days(days_ago);
    s.ended_at = Some(s.started_at + Duration::minutes(60));
    s.status = SessionStatus::Completed;
    s.duration_minutes = Some(60.0);
    s
}

pub fn set_days_ago(
    session_id: &str,
    exercise_id: &str,
    weight: f64,
    reps: u32,
    now: DateTime<Utc>,
    days_ago: i64,
) -> SetRecord {
    let mut set = SetRecord::new(session_id.to_string(), exercise_id.to_string(), weight, reps);
    set.completed_at = now - Duration::days(days_ago);
    set
}

pub fn pr_days_ago(
    client: &str,
    exercise_id: &str,
    weight: f64,
    reps: u32,
    now: DateTime<Utc>,
    days_ago: i64,
) -> PersonalRecord {
    let mut pr = PersonalRecord::new(client.to_string(), exercise_id.to_string(), weight, reps);
    pr.achieved_at = now - Duration::days(days_ago);
    pr
}

pub fn log_days_ago(client: &str, now: DateTime<Utc>, days_ago: i64) -> NutritionLog {
    let date = (now - Duration::days(days_ago)).date_naive();
    NutritionLog::new(client.to_string(), date)
}

/// A single-item meal attached to a log, carrying the given macros.
pub fn meal_with_macros(log_id: &str, calories: f64, protein: f64) -> (Meal, MealItem) {
    let meal = Meal::new(log_id.to_string(), "meal".to_string(), 0);
    let mut item = MealItem::new(meal.id.clone(), "meal".to_string());
    item.calories = calories;
    item.protein = protein;
    (meal, item)
}
