use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};

use coachvital::db::Database;
use coachvital::models::config::Config;
use coachvital::output;
use coachvital::output::human;

pub fn run_sessions(client: &str, last: Option<u32>, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let client_id = config.resolve_client(client);

    let sessions = db.recent_sessions(&client_id, last.unwrap_or(10))?;

    if human_flag {
        if sessions.is_empty() {
            println!("No sessions for {client_id}.");
        }
        for s in &sessions {
            println!("{}", human::format_session(s));
        }
    } else {
        let out = output::success("show", serde_json::to_value(&sessions)?);
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_prs(client: &str, last: Option<u32>, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let client_id = config.resolve_client(client);

    let prs = db.recent_prs(&client_id, last.unwrap_or(10))?;

    if human_flag {
        if prs.is_empty() {
            println!("No PRs for {client_id}.");
        }
        for pr in &prs {
            println!("{}", human::format_pr(pr));
        }
    } else {
        let out = output::success("show", serde_json::to_value(&prs)?);
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_nutrition(
    client: &str,
    last: Option<u32>,
    date: Option<NaiveDate>,
    human_flag: bool,
) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let client_id = config.resolve_client(client);

    // The last N days ending at the anchor date, anchor included.
    let anchor = date.unwrap_or_else(|| Utc::now().date_naive());
    let until = anchor + Duration::days(1);
    let since = until - Duration::days(i64::from(last.unwrap_or(28)));
    let logs = db.nutrition_logs_in_window(&client_id, since, until)?;

    if human_flag {
        if logs.is_empty() {
            println!("No nutrition logs for {client_id}.");
        }
        for log in &logs {
            println!("{}", human::format_nutrition_log(log));
        }
    } else {
        let out = output::success("show", serde_json::to_value(&logs)?);
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_exercises(human_flag: bool) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    let exercises = db.all_exercises()?;

    if human_flag {
        if exercises.is_empty() {
            println!("No exercises registered.");
        }
        for e in &exercises {
            println!("{} | {}", e.id, e.muscle_group.as_deref().unwrap_or("-"));
        }
    } else {
        let out = output::success("show", serde_json::to_value(&exercises)?);
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
