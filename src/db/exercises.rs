use anyhow::Result;
use rusqlite::params;

use crate::models::exercise::Exercise;

use super::Database;

impl Database {
    pub fn upsert_exercise(&self, e: &Exercise) -> Result<()> {
        self.conn.execute(
            "INSERT INTO exercises (id, name, muscle_group) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET name = ?2, muscle_group = ?3",
            params![e.id, e.name, e.muscle_group],
        )?;
        Ok(())
    }

    pub fn all_exercises(&self) -> Result<Vec<Exercise>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, muscle_group FROM exercises ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok(Exercise {
                id: row.get(0)?,
                name: row.get(1)?,
                muscle_group: row.get(2)?,
            })
        })?;

        let mut exercises = Vec::new();
        for row in rows {
            exercises.push(row?);
        }
        Ok(exercises)
    }
}
