use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::params;
use std::str::FromStr;

use crate::models::session::{SessionStatus, WorkoutSession};

use super::Database;

struct SessionRow {
    id: String,
    client_id: String,
    routine_id: Option<String>,
    started_at: String,
    ended_at: Option<String>,
    status: String,
    duration_minutes: Option<f64>,
    notes: Option<String>,
}

const COLUMNS: &str =
    "id, client_id, routine_id, started_at, ended_at, status, duration_minutes, notes";

fn row_to_session(r: SessionRow) -> Result<WorkoutSession> {
    let started_at: DateTime<Utc> =
        DateTime::parse_from_rfc3339(&r.started_at)?.with_timezone(&Utc);
    let ended_at = match r.ended_at {
        Some(ref s) => Some(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc)),
        None => None,
    };
    Ok(WorkoutSession {
        id: r.id,
        client_id: r.client_id,
        routine_id: r.routine_id,
        started_at,
        ended_at,
        status: SessionStatus::from_str(&r.status)?,
        duration_minutes: r.duration_minutes,
        notes: r.notes,
    })
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SessionRow> {
    Ok(SessionRow {
        id: row.get(0)?,
        client_id: row.get(1)?,
        routine_id: row.get(2)?,
        started_at: row.get(3)?,
        ended_at: row.get(4)?,
        status: row.get(5)?,
        duration_minutes: row.get(6)?,
        notes: row.get(7)?,
    })
}

impl Database {
    pub fn insert_session(&self, s: &WorkoutSession) -> Result<()> {
        self.conn.execute(
            "INSERT INTO sessions (id, client_id, routine_id, started_at, ended_at, status, duration_minutes, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                s.id,
                s.client_id,
                s.routine_id,
                s.started_at.to_rfc3339(),
                s.ended_at.map(|t| t.to_rfc3339()),
                s.status.to_string(),
                s.duration_minutes,
                s.notes,
            ],
        )?;
        Ok(())
    }

    /// Sessions for a client with started_at in [since, until), ascending.
    pub fn sessions_in_window(
        &self,
        client_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<WorkoutSession>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE client_id = ?1 AND started_at >= ?2 AND started_at < ?3
             ORDER BY started_at"
        ))?;
        let rows = stmt.query_map(
            params![client_id, since.to_rfc3339(), until.to_rfc3339()],
            map_row,
        )?;

        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row_to_session(row?)?);
        }
        Ok(sessions)
    }

    pub fn recent_sessions(&self, client_id: &str, limit: u32) -> Result<Vec<WorkoutSession>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM sessions WHERE client_id = ?1
             ORDER BY started_at DESC LIMIT ?2"
        ))?;
        let rows = stmt.query_map(params![client_id, i64::from(limit)], map_row)?;

        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row_to_session(row?)?);
        }
        Ok(sessions)
    }

    pub fn session_by_id(&self, id: &str) -> Result<Option<WorkoutSession>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM sessions WHERE id = ?1"))?;
        let mut rows = stmt.query_map(params![id], map_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row_to_session(row?)?)),
            None => Ok(None),
        }
    }

    /// Transition a session out of in_progress/paused. Completed sessions
    /// are immutable apart from notes.
    pub fn finish_session(
        &self,
        id: &str,
        status: SessionStatus,
        ended_at: DateTime<Utc>,
        duration_minutes: Option<f64>,
    ) -> Result<()> {
        let session = self
            .session_by_id(id)?
            .ok_or_else(|| anyhow::anyhow!("unknown session: {}", id))?;
        if session.status == SessionStatus::Completed {
            anyhow::bail!("session {} is already completed", id);
        }
        self.conn.execute(
            "UPDATE sessions SET status = ?2, ended_at = ?3, duration_minutes = ?4 WHERE id = ?1",
            params![
                id,
                status.to_string(),
                ended_at.to_rfc3339(),
                duration_minutes
            ],
        )?;
        Ok(())
    }

    /// The one mutation allowed after completion.
    pub fn set_session_notes(&self, id: &str, notes: &str) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE sessions SET notes = ?2 WHERE id = ?1",
            params![id, notes],
        )?;
        if updated == 0 {
            anyhow::bail!("unknown session: {}", id);
        }
        Ok(())
    }
}
