use anyhow::Result;
use chrono::{NaiveDate, TimeZone, Utc};

use coachvital::core::engine;
use coachvital::db::Database;
use coachvital::models::config::Config;
use coachvital::output;
use coachvital::output::human;

pub fn run(client: &str, date: Option<NaiveDate>, human_flag: bool) -> Result<()> {
    if client.trim().is_empty() {
        anyhow::bail!("client id must not be empty");
    }

    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let client_id = config.resolve_client(client);

    // One reference instant for every window in the run.
    let now = match date.and_then(|d| d.and_hms_opt(12, 0, 0)) {
        Some(dt) => Utc.from_utc_datetime(&dt),
        None => Utc::now(),
    };

    let result = engine::compute(&db, &client_id, now)?;

    if human_flag {
        println!("{}", human::format_insights(&result));
    } else {
        let out = output::success("insights", serde_json::to_value(&result)?);
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
