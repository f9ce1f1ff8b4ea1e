use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One day of nutrition tracking. At most one log per (client, date);
/// the engine only reads these in aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionLog {
    pub id: String,
    pub client_id: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_protein: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_carbs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_fat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NutritionLog {
    pub fn new(client_id: String, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_id,
            date,
            target_calories: None,
            target_protein: None,
            target_carbs: None,
            target_fat: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,
    pub log_id: String,
    pub name: String,
    pub position: u32,
}

impl Meal {
    pub fn new(log_id: String, name: String, position: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            log_id,
            name,
            position,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealItem {
    pub id: String,
    pub meal_id: String,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl MealItem {
    pub fn new(meal_id: String, name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            meal_id,
            name,
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
        }
    }
}
