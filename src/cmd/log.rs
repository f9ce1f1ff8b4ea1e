use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;
use std::str::FromStr;

use coachvital::core::logging::{self, NutritionEntry, SessionEntry};
use coachvital::db::Database;
use coachvital::models::config::Config;
use coachvital::models::session::SessionStatus;
use coachvital::output;
use coachvital::output::human;

#[allow(clippy::too_many_arguments)]
pub fn run_session(
    client: &str,
    routine: Option<&str>,
    duration: Option<f64>,
    status: &str,
    notes: Option<&str>,
    date: Option<NaiveDate>,
    human_flag: bool,
) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let status = SessionStatus::from_str(status)?;

    let session = logging::log_session(
        &db,
        &config,
        SessionEntry {
            client,
            routine,
            status,
            duration_minutes: duration,
            notes,
            date,
        },
    )?;

    if human_flag {
        println!("Logged: {}", human::format_session(&session));
    } else {
        let out = output::success(
            "log",
            json!({
                "session": {
                    "id": session.id,
                    "client_id": session.client_id,
                    "started_at": session.started_at.to_rfc3339(),
                    "status": session.status.to_string(),
                }
            }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_set(
    session: &str,
    exercise: &str,
    specs: &[String],
    velocity: Option<&str>,
    date: Option<NaiveDate>,
    human_flag: bool,
) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    let velocity = velocity.map(logging::parse_velocity_spec).transpose()?;

    let sets = logging::log_sets(&db, session, exercise, specs, velocity, date)?;

    if human_flag {
        for set in &sets {
            let rpe = set
                .rpe
                .map_or_else(String::new, |r| format!(" @ RPE {r}"));
            println!("Logged: {} {}x{}{}", exercise, set.weight, set.reps, rpe);
        }
    } else {
        let entries: Vec<_> = sets
            .iter()
            .map(|s| {
                json!({
                    "id": s.id,
                    "exercise_id": s.exercise_id,
                    "weight": s.weight,
                    "reps": s.reps,
                    "rpe": s.rpe,
                })
            })
            .collect();
        let out = output::success("log", json!({ "sets": entries }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_pr(
    client: &str,
    exercise: &str,
    weight: f64,
    reps: u32,
    date: Option<NaiveDate>,
    human_flag: bool,
) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;

    let pr = logging::log_pr(&db, &config, client, exercise, weight, reps, date)?;

    if human_flag {
        println!("Logged PR: {}", human::format_pr(&pr));
    } else {
        let out = output::success(
            "log",
            json!({
                "pr": {
                    "id": pr.id,
                    "exercise_id": pr.exercise_id,
                    "weight": pr.weight,
                    "reps": pr.reps,
                    "achieved_at": pr.achieved_at.to_rfc3339(),
                }
            }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn run_nutrition(
    client: &str,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    meal: Option<&str>,
    date: Option<NaiveDate>,
    human_flag: bool,
) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;

    let (log, meal, item) = logging::log_nutrition(
        &db,
        &config,
        NutritionEntry {
            client,
            calories,
            protein,
            carbs,
            fat,
            meal,
            date,
        },
    )?;

    if human_flag {
        println!(
            "Logged: {} {} ({:.0} kcal, {:.0}g protein)",
            log.date, meal.name, item.calories, item.protein
        );
    } else {
        let out = output::success(
            "log",
            json!({
                "log_id": log.id,
                "date": log.date.to_string(),
                "meal": { "id": meal.id, "name": meal.name },
                "item": {
                    "calories": item.calories,
                    "protein": item.protein,
                    "carbs": item.carbs,
                    "fat": item.fat,
                }
            }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_exercise(
    id: &str,
    name: Option<&str>,
    muscle: Option<&str>,
    human_flag: bool,
) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    let exercise = logging::log_exercise(&db, id, name, muscle)?;

    if human_flag {
        let muscle = exercise.muscle_group.as_deref().unwrap_or("-");
        println!("Registered: {} ({})", exercise.name, muscle);
    } else {
        let out = output::success("log", json!({ "exercise": exercise }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
