use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, params_from_iter};

use crate::models::nutrition::{Meal, MealItem, NutritionLog};

use super::Database;

struct LogRow {
    id: String,
    client_id: String,
    date: String,
    target_calories: Option<f64>,
    target_protein: Option<f64>,
    target_carbs: Option<f64>,
    target_fat: Option<f64>,
    notes: Option<String>,
}

const LOG_COLUMNS: &str =
    "id, client_id, date, target_calories, target_protein, target_carbs, target_fat, notes";

fn row_to_log(r: LogRow) -> Result<NutritionLog> {
    Ok(NutritionLog {
        id: r.id,
        client_id: r.client_id,
        date: r.date.parse::<NaiveDate>()?,
        target_calories: r.target_calories,
        target_protein: r.target_protein,
        target_carbs: r.target_carbs,
        target_fat: r.target_fat,
        notes: r.notes,
    })
}

fn map_log(row: &rusqlite::Row<'_>) -> rusqlite::Result<LogRow> {
    Ok(LogRow {
        id: row.get(0)?,
        client_id: row.get(1)?,
        date: row.get(2)?,
        target_calories: row.get(3)?,
        target_protein: row.get(4)?,
        target_carbs: row.get(5)?,
        target_fat: row.get(6)?,
        notes: row.get(7)?,
    })
}

impl Database {
    pub fn insert_nutrition_log(&self, log: &NutritionLog) -> Result<()> {
        self.conn.execute(
            "INSERT INTO nutrition_logs (id, client_id, date, target_calories, target_protein, target_carbs, target_fat, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                log.id,
                log.client_id,
                log.date.to_string(),
                log.target_calories,
                log.target_protein,
                log.target_carbs,
                log.target_fat,
                log.notes,
            ],
        )?;
        Ok(())
    }

    /// The day's log for a client, creating it if absent. One log per
    /// (client, date) by construction.
    pub fn get_or_create_log(&self, client_id: &str, date: NaiveDate) -> Result<NutritionLog> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {LOG_COLUMNS} FROM nutrition_logs WHERE client_id = ?1 AND date = ?2"
        ))?;
        let mut rows = stmt.query_map(params![client_id, date.to_string()], map_log)?;
        if let Some(row) = rows.next() {
            return row_to_log(row?);
        }
        drop(rows);
        drop(stmt);

        let log = NutritionLog::new(client_id.to_string(), date);
        self.insert_nutrition_log(&log)?;
        Ok(log)
    }

    /// Logs for a client with date in [since, until), ascending.
    pub fn nutrition_logs_in_window(
        &self,
        client_id: &str,
        since: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<NutritionLog>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {LOG_COLUMNS} FROM nutrition_logs
             WHERE client_id = ?1 AND date >= ?2 AND date < ?3
             ORDER BY date"
        ))?;
        let rows = stmt.query_map(
            params![client_id, since.to_string(), until.to_string()],
            map_log,
        )?;

        let mut logs = Vec::new();
        for row in rows {
            logs.push(row_to_log(row?)?);
        }
        Ok(logs)
    }

    pub fn insert_meal(&self, meal: &Meal) -> Result<()> {
        self.conn.execute(
            "INSERT INTO meals (id, log_id, name, position) VALUES (?1, ?2, ?3, ?4)",
            params![meal.id, meal.log_id, meal.name, i64::from(meal.position)],
        )?;
        Ok(())
    }

    pub fn meals_by_logs(&self, log_ids: &[String]) -> Result<Vec<Meal>> {
        if log_ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; log_ids.len()].join(",");
        let sql = format!(
            "SELECT id, log_id, name, position FROM meals
             WHERE log_id IN ({placeholders}) ORDER BY log_id, position"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(log_ids.iter()), |row| {
            let position: i64 = row.get(3)?;
            Ok(Meal {
                id: row.get(0)?,
                log_id: row.get(1)?,
                name: row.get(2)?,
                position: u32::try_from(position).unwrap_or(0),
            })
        })?;

        let mut meals = Vec::new();
        for row in rows {
            meals.push(row?);
        }
        Ok(meals)
    }

    pub fn meal_count(&self, log_id: &str) -> Result<u32> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM meals WHERE log_id = ?1",
            params![log_id],
            |row| row.get(0),
        )?;
        Ok(u32::try_from(count).unwrap_or(0))
    }

    pub fn insert_meal_item(&self, item: &MealItem) -> Result<()> {
        self.conn.execute(
            "INSERT INTO meal_items (id, meal_id, name, calories, protein, carbs, fat)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                item.id,
                item.meal_id,
                item.name,
                item.calories,
                item.protein,
                item.carbs,
                item.fat,
            ],
        )?;
        Ok(())
    }

    pub fn items_by_meals(&self, meal_ids: &[String]) -> Result<Vec<MealItem>> {
        if meal_ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; meal_ids.len()].join(",");
        let sql = format!(
            "SELECT id, meal_id, name, calories, protein, carbs, fat FROM meal_items
             WHERE meal_id IN ({placeholders})"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(meal_ids.iter()), |row| {
            Ok(MealItem {
                id: row.get(0)?,
                meal_id: row.get(1)?,
                name: row.get(2)?,
                calories: row.get(3)?,
                protein: row.get(4)?,
                carbs: row.get(5)?,
                fat: row.get(6)?,
            })
        })?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }
}
