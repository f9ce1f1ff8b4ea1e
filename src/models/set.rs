use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRecord {
    pub id: String,
    pub session_id: String,
    pub exercise_id: String,
    pub weight: f64,
    pub reps: u32,
    /// Rate of perceived exertion, 1-10.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpe: Option<f64>,
    /// Peak movement velocity in m/s, when a VBT device was attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_velocity: Option<f64>,
    /// Velocity drop across the set, percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity_drop: Option<f64>,
    pub completed_at: DateTime<Utc>,
}

impl SetRecord {
    pub fn new(session_id: String, exercise_id: String, weight: f64, reps: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_id,
            exercise_id,
            weight,
            reps,
            rpe: None,
            peak_velocity: None,
            velocity_drop: None,
            completed_at: Utc::now(),
        }
    }

    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }
}
