use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::params;

use crate::models::pr::PersonalRecord;

use super::Database;

struct PrRow {
    id: String,
    client_id: String,
    exercise_id: String,
    weight: f64,
    reps: i64,
    achieved_at: String,
}

const COLUMNS: &str = "id, client_id, exercise_id, weight, reps, achieved_at";

fn row_to_pr(r: PrRow) -> Result<PersonalRecord> {
    let achieved_at: DateTime<Utc> =
        DateTime::parse_from_rfc3339(&r.achieved_at)?.with_timezone(&Utc);
    Ok(PersonalRecord {
        id: r.id,
        client_id: r.client_id,
        exercise_id: r.exercise_id,
        weight: r.weight,
        reps: u32::try_from(r.reps).unwrap_or(0),
        achieved_at,
    })
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PrRow> {
    Ok(PrRow {
        id: row.get(0)?,
        client_id: row.get(1)?,
        exercise_id: row.get(2)?,
        weight: row.get(3)?,
        reps: row.get(4)?,
        achieved_at: row.get(5)?,
    })
}

impl Database {
    pub fn insert_pr(&self, pr: &PersonalRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO prs (id, client_id, exercise_id, weight, reps, achieved_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                pr.id,
                pr.client_id,
                pr.exercise_id,
                pr.weight,
                i64::from(pr.reps),
                pr.achieved_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// PR history for a client with achieved_at in [since, until), ascending.
    pub fn prs_in_window(
        &self,
        client_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<PersonalRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM prs
             WHERE client_id = ?1 AND achieved_at >= ?2 AND achieved_at < ?3
             ORDER BY achieved_at"
        ))?;
        let rows = stmt.query_map(
            params![client_id, since.to_rfc3339(), until.to_rfc3339()],
            map_row,
        )?;

        let mut prs = Vec::new();
        for row in rows {
            prs.push(row_to_pr(row?)?);
        }
        Ok(prs)
    }

    pub fn recent_prs(&self, client_id: &str, limit: u32) -> Result<Vec<PersonalRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM prs WHERE client_id = ?1
             ORDER BY achieved_at DESC LIMIT ?2"
        ))?;
        let rows = stmt.query_map(params![client_id, i64::from(limit)], map_row)?;

        let mut prs = Vec::new();
        for row in rows {
            prs.push(row_to_pr(row?)?);
        }
        Ok(prs)
    }

    /// Current best for a client+exercise: heaviest weight, latest on ties.
    pub fn best_pr(&self, client_id: &str, exercise_id: &str) -> Result<Option<PersonalRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM prs WHERE client_id = ?1 AND exercise_id = ?2
             ORDER BY weight DESC, achieved_at DESC LIMIT 1"
        ))?;
        let mut rows = stmt.query_map(params![client_id, exercise_id], map_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row_to_pr(row?)?)),
            None => Ok(None),
        }
    }
}
