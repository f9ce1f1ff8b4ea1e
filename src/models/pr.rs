use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A personal record: best weight x reps for a client+exercise pair.
/// History is retained; the current best is resolved at query time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalRecord {
    pub id: String,
    pub client_id: String,
    pub exercise_id: String,
    pub weight: f64,
    pub reps: u32,
    pub achieved_at: DateTime<Utc>,
}

impl PersonalRecord {
    pub fn new(client_id: String, exercise_id: String, weight: f64, reps: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_id,
            exercise_id,
            weight,
            reps,
            achieved_at: Utc::now(),
        }
    }
}
