use serde::Serialize;

use crate::core::aggregate::{Aggregates, TrainingPattern, WeekStats};
use crate::models::insight::{Insight, InsightCategory, InsightType};

/// Baseline midpoints: chosen so the insight feed can move each score
/// up or down symmetrically.
const TRAINING_BASELINE: f64 = 60.0;
const NUTRITION_BASELINE: f64 = 50.0;
const CONSISTENCY_BASELINE: f64 = 50.0;
const PROGRESS_BASELINE: f64 = 50.0;

#[derive(Debug, Clone, Serialize)]
pub struct QuickStats {
    pub total_workouts: u32,
    pub avg_per_week: f64,
    pub total_volume: f64,
    pub prs_this_month: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsightsSummary {
    pub training_score: f64,
    pub nutrition_score: f64,
    pub consistency_score: f64,
    pub progress_score: f64,
    pub overall_score: u32,
    pub strengths: Vec<String>,
    pub areas_to_improve: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_insight: Option<Insight>,
    pub weekly_trend: Vec<WeekStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_pattern: Option<TrainingPattern>,
    pub quick_stats: QuickStats,
}

/// Sort insights by priority rank, high first. The sort is stable:
/// equal priorities keep their catalog-registration order.
pub fn rank(insights: &mut [Insight]) {
    insights.sort_by_key(|i| i.priority.rank());
}

/// Fold the ranked insight list into category scores and the summary.
pub fn summarize(insights: &[Insight], agg: &Aggregates) -> InsightsSummary {
    let mut training = TRAINING_BASELINE;
    let mut nutrition = NUTRITION_BASELINE;
    let mut consistency = CONSISTENCY_BASELINE;
    let mut progress = PROGRESS_BASELINE;

    for insight in insights {
        let adj = insight.priority.adjustment();
        let delta = if insight.is_positive() {
            adj
        } else if insight.is_negative() {
            -adj
        } else {
            0.0
        };

        match insight.category {
            InsightCategory::Training => training += delta,
            InsightCategory::Nutrition => nutrition += delta,
            InsightCategory::Behavior => consistency += delta,
            InsightCategory::Progress => progress += delta,
            // There is no recovery score; recovery insights only act
            // through the penalty below.
            InsightCategory::Recovery => {}
        }

        // Deliberate asymmetry: negative recovery insights bleed into
        // the training score at half strength. No positive counterpart.
        if insight.category == InsightCategory::Recovery && insight.is_negative() {
            training -= adj / 2.0;
        }
    }

    let training = training.clamp(0.0, 100.0);
    let nutrition = nutrition.clamp(0.0, 100.0);
    let consistency = consistency.clamp(0.0, 100.0);
    let progress = progress.clamp(0.0, 100.0);

    let overall =
        (training * 0.3 + nutrition * 0.2 + consistency * 0.3 + progress * 0.2).round() as u32;

    let strengths: Vec<String> = insights
        .iter()
        .filter(|i| i.is_positive())
        .take(3)
        .map(|i| i.title.clone())
        .collect();
    let areas_to_improve: Vec<String> = insights
        .iter()
        .filter(|i| {
            matches!(
                i.insight_type,
                InsightType::Warning | InsightType::Recommendation
            )
        })
        .take(3)
        .map(|i| i.title.clone())
        .collect();

    let training_pattern = if agg.completed_count >= 5 {
        Some(agg.pattern.clone())
    } else {
        None
    };

    InsightsSummary {
        training_score: training,
        nutrition_score: nutrition,
        consistency_score: consistency,
        progress_score: progress,
        overall_score: overall,
        strengths,
        areas_to_improve,
        top_insight: insights.first().cloned(),
        weekly_trend: agg.weekly.clone(),
        training_pattern,
        quick_stats: QuickStats {
            total_workouts: agg.completed_count,
            avg_per_week: f64::from(agg.sessions_4wk) / 4.0,
            total_volume: agg.total_volume,
            prs_this_month: agg.prs_4wk,
            current_streak: agg.streaks.current,
            longest_streak: agg.streaks.longest,
        },
    }
}
