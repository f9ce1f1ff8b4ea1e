use anyhow::Result;
use rusqlite::Connection;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS sessions (
            id               TEXT PRIMARY KEY,
            client_id        TEXT NOT NULL,
            routine_id       TEXT,
            started_at       TEXT NOT NULL,
            ended_at         TEXT,
            status           TEXT NOT NULL DEFAULT 'in_progress',
            duration_minutes REAL,
            notes            TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_sessions_client_ts ON sessions(client_id, started_at);

        CREATE TABLE IF NOT EXISTS sets (
            id            TEXT PRIMARY KEY,
            session_id    TEXT NOT NULL REFERENCES sessions(id),
            exercise_id   TEXT NOT NULL,
            weight        REAL NOT NULL,
            reps          INTEGER NOT NULL,
            rpe           REAL,
            peak_velocity REAL,
            velocity_drop REAL,
            completed_at  TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_sets_session ON sets(session_id);
        CREATE INDEX IF NOT EXISTS idx_sets_ts ON sets(completed_at);

        CREATE TABLE IF NOT EXISTS prs (
            id          TEXT PRIMARY KEY,
            client_id   TEXT NOT NULL,
            exercise_id TEXT NOT NULL,
            weight      REAL NOT NULL,
            reps        INTEGER NOT NULL,
            achieved_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_prs_client_ts ON prs(client_id, achieved_at);

        CREATE TABLE IF NOT EXISTS nutrition_logs (
            id              TEXT PRIMARY KEY,
            client_id       TEXT NOT NULL,
            date            TEXT NOT NULL,
            target_calories REAL,
            target_protein  REAL,
            target_carbs    REAL,
            target_fat      REAL,
            notes           TEXT,
            UNIQUE(client_id, date)
        );
        CREATE INDEX IF NOT EXISTS idx_nutrition_client_date ON nutrition_logs(client_id, date);

        CREATE TABLE IF NOT EXISTS meals (
            id       TEXT PRIMARY KEY,
            log_id   TEXT NOT NULL REFERENCES nutrition_logs(id),
            name     TEXT NOT NULL,
            position INTEGER NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_meals_log ON meals(log_id);

        CREATE TABLE IF NOT EXISTS meal_items (
            id       TEXT PRIMARY KEY,
            meal_id  TEXT NOT NULL REFERENCES meals(id),
            name     TEXT NOT NULL,
            calories REAL NOT NULL DEFAULT 0,
            protein  REAL NOT NULL DEFAULT 0,
            carbs    REAL NOT NULL DEFAULT 0,
            fat      REAL NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_meal_items_meal ON meal_items(meal_id);

        CREATE TABLE IF NOT EXISTS exercises (
            id           TEXT PRIMARY KEY,
            name         TEXT NOT NULL,
            muscle_group TEXT
        );",
    )?;
    Ok(())
}
