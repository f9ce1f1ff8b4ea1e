use anyhow::Result;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use regex::Regex;

use crate::db::Database;
use crate::models::config::Config;
use crate::models::exercise::Exercise;
use crate::models::nutrition::{Meal, MealItem, NutritionLog};
use crate::models::pr::PersonalRecord;
use crate::models::session::{SessionStatus, WorkoutSession};
use crate::models::set::SetRecord;

pub struct SessionEntry<'a> {
    pub client: &'a str,
    pub routine: Option<&'a str>,
    pub status: SessionStatus,
    pub duration_minutes: Option<f64>,
    pub notes: Option<&'a str>,
    pub date: Option<NaiveDate>,
}

pub struct NutritionEntry<'a> {
    pub client: &'a str,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub meal: Option<&'a str>,
    pub date: Option<NaiveDate>,
}

/// Backdated entries land at noon UTC on the given date.
fn entry_timestamp(date: Option<NaiveDate>) -> DateTime<Utc> {
    match date.and_then(|d| d.and_hms_opt(12, 0, 0)) {
        Some(dt) => Utc.from_utc_datetime(&dt),
        None => Utc::now(),
    }
}

/// Record a workout session. Returns the created session.
pub fn log_session(db: &Database, config: &Config, entry: SessionEntry) -> Result<WorkoutSession> {
    let client_id = config.resolve_client(entry.client);
    if client_id.trim().is_empty() {
        anyhow::bail!("client id must not be empty");
    }

    let mut s = WorkoutSession::new(client_id);
    s.routine_id = entry.routine.map(String::from);
    s.status = entry.status;
    s.duration_minutes = entry.duration_minutes;
    s.notes = entry.notes.map(String::from);
    s.started_at = entry_timestamp(entry.date);
    if entry.status == SessionStatus::Completed {
        let minutes = entry.duration_minutes.unwrap_or(60.0);
        s.ended_at = Some(s.started_at + chrono::Duration::minutes(minutes as i64));
    }

    db.insert_session(&s)?;
    Ok(s)
}

/// Parse a `WEIGHTxREPS[@RPE]` shorthand, e.g. `100x5@8` or `82.5x3`.
pub fn parse_set_spec(spec: &str) -> Result<(f64, u32, Option<f64>)> {
    let re = Regex::new(r"^(\d+(?:\.\d+)?)x(\d+)(?:@(\d+(?:\.\d+)?))?$")
        .map_err(|_| anyhow::anyhow!("internal: bad set-spec pattern"))?;
    let caps = re
        .captures(spec.trim())
        .ok_or_else(|| anyhow::anyhow!("invalid set spec: {} (expected WEIGHTxREPS[@RPE])", spec))?;

    let weight: f64 = caps[1].parse()?;
    let reps: u32 = caps[2].parse()?;
    let rpe: Option<f64> = match caps.get(3) {
        Some(m) => Some(m.as_str().parse()?),
        None => None,
    };

    if weight <= 0.0 {
        anyhow::bail!("weight must be positive: {}", spec);
    }
    if reps == 0 {
        anyhow::bail!("reps must be at least 1: {}", spec);
    }
    if let Some(r) = rpe
        && !(1.0..=10.0).contains(&r)
    {
        anyhow::bail!("RPE must be between 1 and 10: {}", spec);
    }

    Ok((weight, reps, rpe))
}

/// Parse a `PEAK:DROP` velocity pair (m/s and percent).
pub fn parse_velocity_spec(spec: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 2 {
        anyhow::bail!("velocity format must be PEAK:DROP (e.g. 0.45:18)");
    }
    let peak: f64 = parts[0]
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid peak velocity: {}", parts[0]))?;
    let drop: f64 = parts[1]
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid velocity drop: {}", parts[1]))?;
    Ok((peak, drop))
}

/// Record sets against an existing session.
pub fn log_sets(
    db: &Database,
    session_id: &str,
    exercise_id: &str,
    specs: &[String],
    velocity: Option<(f64, f64)>,
    date: Option<NaiveDate>,
) -> Result<Vec<SetRecord>> {
    let session = db
        .session_by_id(session_id)?
        .ok_or_else(|| anyhow::anyhow!("unknown session: {}", session_id))?;

    let mut sets = Vec::new();
    for spec in specs {
        let (weight, reps, rpe) = parse_set_spec(spec)?;
        let mut set = SetRecord::new(session.id.clone(), exercise_id.to_string(), weight, reps);
        set.rpe = rpe;
        if let Some((peak, drop)) = velocity {
            set.peak_velocity = Some(peak);
            set.velocity_drop = Some(drop);
        }
        set.completed_at = entry_timestamp(date);
        db.insert_set(&set)?;
        sets.push(set);
    }
    Ok(sets)
}

/// Record a personal record.
pub fn log_pr(
    db: &Database,
    config: &Config,
    client: &str,
    exercise_id: &str,
    weight: f64,
    reps: u32,
    date: Option<NaiveDate>,
) -> Result<PersonalRecord> {
    if weight <= 0.0 {
        anyhow::bail!("weight must be positive");
    }
    if reps == 0 {
        anyhow::bail!("reps must be at least 1");
    }
    let client_id = config.resolve_client(client);
    let mut pr = PersonalRecord::new(client_id, exercise_id.to_string(), weight, reps);
    pr.achieved_at = entry_timestamp(date);
    db.insert_pr(&pr)?;
    Ok(pr)
}

/// Append a meal to the day's nutrition log, creating the log if absent.
pub fn log_nutrition(
    db: &Database,
    config: &Config,
    entry: NutritionEntry,
) -> Result<(NutritionLog, Meal, MealItem)> {
    let client_id = config.resolve_client(entry.client);
    let date = entry.date.unwrap_or_else(|| Utc::now().date_naive());

    let log = db.get_or_create_log(&client_id, date)?;
    let position = db.meal_count(&log.id)?;
    let name = entry.meal.unwrap_or("meal").to_string();
    let meal = Meal::new(log.id.clone(), name.clone(), position);
    db.insert_meal(&meal)?;

    let mut item = MealItem::new(meal.id.clone(), name);
    item.calories = entry.calories;
    item.protein = entry.protein;
    item.carbs = entry.carbs;
    item.fat = entry.fat;
    db.insert_meal_item(&item)?;

    Ok((log, meal, item))
}

/// Register or update exercise metadata.
pub fn log_exercise(
    db: &Database,
    id: &str,
    name: Option<&str>,
    muscle: Option<&str>,
) -> Result<Exercise> {
    let exercise = Exercise {
        id: id.to_string(),
        name: name.unwrap_or(id).to_string(),
        muscle_group: muscle.map(String::from),
    };
    db.upsert_exercise(&exercise)?;
    Ok(exercise)
}
