use serde::Serialize;

/// What kind of observation an insight carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    StrengthGain,
    Consistency,
    Recovery,
    Nutrition,
    Volume,
    Velocity,
    Recommendation,
    Warning,
    Celebration,
    Pr,
    Pattern,
    Goal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    Training,
    Nutrition,
    Recovery,
    Progress,
    Behavior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank; lower sorts first.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    /// Score adjustment magnitude applied by this priority.
    pub fn adjustment(self) -> f64 {
        match self {
            Self::High => 15.0,
            Self::Medium => 10.0,
            Self::Low => 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// A derived observation about a client's recent training or nutrition.
/// Never persisted; recomputed fresh on every evaluation. Ids are
/// rule-specific constants, so at most one insight per id per run.
#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub category: InsightCategory,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actionable: Option<String>,
}

impl Insight {
    /// Positive insights push their category score up.
    pub fn is_positive(&self) -> bool {
        self.insight_type == InsightType::Celebration
            || self.trend == Some(Trend::Up)
            || matches!(self.insight_type, InsightType::Consistency | InsightType::Pr)
    }

    /// Negative insights push their category score down.
    pub fn is_negative(&self) -> bool {
        self.insight_type == InsightType::Warning
    }
}
