use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter};

use crate::models::set::SetRecord;

use super::Database;

struct SetRow {
    id: String,
    session_id: String,
    exercise_id: String,
    weight: f64,
    reps: i64,
    rpe: Option<f64>,
    peak_velocity: Option<f64>,
    velocity_drop: Option<f64>,
    completed_at: String,
}

const COLUMNS: &str =
    "id, session_id, exercise_id, weight, reps, rpe, peak_velocity, velocity_drop, completed_at";

fn row_to_set(r: SetRow) -> Result<SetRecord> {
    let completed_at: DateTime<Utc> =
        DateTime::parse_from_rfc3339(&r.completed_at)?.with_timezone(&Utc);
    Ok(SetRecord {
        id: r.id,
        session_id: r.session_id,
        exercise_id: r.exercise_id,
        weight: r.weight,
        reps: u32::try_from(r.reps).unwrap_or(0),
        rpe: r.rpe,
        peak_velocity: r.peak_velocity,
        velocity_drop: r.velocity_drop,
        completed_at,
    })
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SetRow> {
    Ok(SetRow {
        id: row.get(0)?,
        session_id: row.get(1)?,
        exercise_id: row.get(2)?,
        weight: row.get(3)?,
        reps: row.get(4)?,
        rpe: row.get(5)?,
        peak_velocity: row.get(6)?,
        velocity_drop: row.get(7)?,
        completed_at: row.get(8)?,
    })
}

impl Database {
    pub fn insert_set(&self, s: &SetRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO sets (id, session_id, exercise_id, weight, reps, rpe, peak_velocity, velocity_drop, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                s.id,
                s.session_id,
                s.exercise_id,
                s.weight,
                i64::from(s.reps),
                s.rpe,
                s.peak_velocity,
                s.velocity_drop,
                s.completed_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// All sets belonging to the given sessions, ascending by completion time.
    pub fn sets_by_sessions(&self, session_ids: &[String]) -> Result<Vec<SetRecord>> {
        if session_ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; session_ids.len()].join(",");
        let sql = format!(
            "SELECT {COLUMNS} FROM sets WHERE session_id IN ({placeholders}) ORDER BY completed_at"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(session_ids.iter()), map_row)?;

        let mut sets = Vec::new();
        for row in rows {
            sets.push(row_to_set(row?)?);
        }
        Ok(sets)
    }

    pub fn sets_by_session(&self, session_id: &str) -> Result<Vec<SetRecord>> {
        self.sets_by_sessions(&[session_id.to_string()])
    }
}
