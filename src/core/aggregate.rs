use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::models::exercise::Exercise;
use crate::models::nutrition::{Meal, MealItem, NutritionLog};
use crate::models::pr::PersonalRecord;
use crate::models::session::{SessionStatus, WorkoutSession};
use crate::models::set::SetRecord;

/// Gap tolerance in days: consecutive sessions this far apart still
/// count as one streak.
pub const STREAK_GAP_DAYS: i64 = 3;

/// Number of trailing weekly buckets in the trend series.
pub const TREND_WEEKS: i64 = 8;

/// Days the nutrition adherence window covers.
pub const NUTRITION_WINDOW_DAYS: i64 = 28;

/// Raw rows for one client over the engine's lookback horizon. Every
/// collection may be empty; missing upstream data degrades to empty
/// aggregates, never to an error.
#[derive(Debug, Clone, Default)]
pub struct ClientSnapshot {
    pub sessions: Vec<WorkoutSession>,
    pub sets: Vec<SetRecord>,
    pub prs: Vec<PersonalRecord>,
    pub nutrition_logs: Vec<NutritionLog>,
    pub meals: Vec<Meal>,
    pub meal_items: Vec<MealItem>,
    pub exercises: Vec<Exercise>,
}

/// One non-overlapping 7-day bucket of the trailing trend series.
#[derive(Debug, Clone, Serialize)]
pub struct WeekStats {
    pub week_start: NaiveDate,
    pub sessions: u32,
    pub volume: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_rpe: Option<f64>,
    pub prs: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingPattern {
    /// Completed sessions per day of week, Sun=0..Sat=6.
    pub day_histogram: [u32; 7],
    /// Top 3 non-zero days by count, descending; ties keep day order.
    pub preferred_days: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_rest_days: Option<f64>,
    pub avg_session_duration: f64,
    pub most_trained_muscles: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Streaks {
    pub current: u32,
    pub longest: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VelocityStats {
    /// Sets carrying a velocity-drop measurement.
    pub samples: u32,
    pub avg_drop: Option<f64>,
    pub recent_samples: u32,
    pub older_samples: u32,
    pub recent_avg_peak: Option<f64>,
    pub older_avg_peak: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RpeStats {
    pub total_samples: u32,
    pub recent_samples: u32,
    pub recent_avg: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NutritionStats {
    pub log_count: u32,
    /// Logged days over the 28-day window, percent.
    pub adherence_pct: f64,
    pub avg_daily_protein: Option<f64>,
}

/// Everything the rule catalog reads, computed once per evaluation.
#[derive(Debug, Clone)]
pub struct Aggregates {
    pub completed_count: u32,
    pub sessions_2wk: u32,
    pub sessions_prior_2wk: u32,
    pub sessions_4wk: u32,
    pub volume_2wk: f64,
    pub volume_prior_2wk: f64,
    pub total_volume: f64,
    pub prs_1wk: u32,
    pub prs_4wk: u32,
    pub days_since_last_pr: Option<i64>,
    pub velocity: VelocityStats,
    pub rpe: RpeStats,
    pub weekly: Vec<WeekStats>,
    pub pattern: TrainingPattern,
    pub streaks: Streaks,
    pub nutrition: NutritionStats,
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Half-open window membership: [now - days, now).
fn in_window(ts: DateTime<Utc>, now: DateTime<Utc>, days: i64) -> bool {
    ts >= now - Duration::days(days) && ts < now
}

/// Membership in [now - outer, now - inner).
fn in_prior_window(ts: DateTime<Utc>, now: DateTime<Utc>, outer: i64, inner: i64) -> bool {
    ts >= now - Duration::days(outer) && ts < now - Duration::days(inner)
}

/// Compute all aggregates from a raw snapshot. Pure and deterministic:
/// `now` is the single reference instant for every window.
pub fn aggregate(snapshot: &ClientSnapshot, now: DateTime<Utc>) -> Aggregates {
    let completed: Vec<&WorkoutSession> = snapshot
        .sessions
        .iter()
        .filter(|s| s.status == SessionStatus::Completed)
        .collect();

    let sessions_2wk = completed
        .iter()
        .filter(|s| in_window(s.started_at, now, 14))
        .count() as u32;
    let sessions_prior_2wk = completed
        .iter()
        .filter(|s| in_prior_window(s.started_at, now, 28, 14))
        .count() as u32;
    let sessions_4wk = completed
        .iter()
        .filter(|s| in_window(s.started_at, now, 28))
        .count() as u32;

    let volume_2wk: f64 = snapshot
        .sets
        .iter()
        .filter(|s| in_window(s.completed_at, now, 14))
        .map(SetRecord::volume)
        .sum();
    let volume_prior_2wk: f64 = snapshot
        .sets
        .iter()
        .filter(|s| in_prior_window(s.completed_at, now, 28, 14))
        .map(SetRecord::volume)
        .sum();
    let total_volume: f64 = snapshot.sets.iter().map(SetRecord::volume).sum();

    let prs_1wk = snapshot
        .prs
        .iter()
        .filter(|p| in_window(p.achieved_at, now, 7))
        .count() as u32;
    let prs_4wk = snapshot
        .prs
        .iter()
        .filter(|p| in_window(p.achieved_at, now, 28))
        .count() as u32;
    let days_since_last_pr = snapshot
        .prs
        .iter()
        .map(|p| p.achieved_at)
        .max()
        .map(|t| (now - t).num_days());

    Aggregates {
        completed_count: completed.len() as u32,
        sessions_2wk,
        sessions_prior_2wk,
        sessions_4wk,
        volume_2wk,
        volume_prior_2wk,
        total_volume,
        prs_1wk,
        prs_4wk,
        days_since_last_pr,
        velocity: velocity_stats(&snapshot.sets, now),
        rpe: rpe_stats(&snapshot.sets, now),
        weekly: weekly_stats(&completed, &snapshot.sets, &snapshot.prs, now),
        pattern: training_pattern(&completed, &snapshot.sets, &snapshot.exercises),
        streaks: compute_streaks(&completed),
        nutrition: nutrition_stats(snapshot),
    }
}

/// The 8 trailing weekly buckets, oldest first.
pub fn weekly_stats(
    completed: &[&WorkoutSession],
    sets: &[SetRecord],
    prs: &[PersonalRecord],
    now: DateTime<Utc>,
) -> Vec<WeekStats> {
    let mut weeks = Vec::with_capacity(TREND_WEEKS as usize);
    for i in 0..TREND_WEEKS {
        let start = now - Duration::days((TREND_WEEKS - i) * 7);
        let end = now - Duration::days((TREND_WEEKS - i - 1) * 7);
        let in_bucket = |ts: DateTime<Utc>| ts >= start && ts < end;

        let sessions = completed.iter().filter(|s| in_bucket(s.started_at)).count() as u32;
        let week_sets: Vec<&SetRecord> =
            sets.iter().filter(|s| in_bucket(s.completed_at)).collect();
        let volume: f64 = week_sets.iter().map(|s| s.volume()).sum();
        let rpes: Vec<f64> = week_sets.iter().filter_map(|s| s.rpe).collect();
        let pr_count = prs.iter().filter(|p| in_bucket(p.achieved_at)).count() as u32;

        weeks.push(WeekStats {
            week_start: start.date_naive(),
            sessions,
            volume,
            avg_rpe: mean(&rpes),
            prs: pr_count,
        });
    }
    weeks
}

pub fn training_pattern(
    completed: &[&WorkoutSession],
    sets: &[SetRecord],
    exercises: &[Exercise],
) -> TrainingPattern {
    let mut day_histogram = [0u32; 7];
    for s in completed {
        let day = s.started_at.weekday().num_days_from_sunday() as usize;
        day_histogram[day] += 1;
    }

    let mut days: Vec<(u32, u32)> = (0..7u32)
        .map(|d| (d, day_histogram[d as usize]))
        .filter(|(_, count)| *count > 0)
        .collect();
    days.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
    let preferred_days: Vec<u32> = days.iter().take(3).map(|(d, _)| *d).collect();

    // Rest days between consecutive sessions, ascending by start time.
    // Contributions are not clamped: same-day sessions count as -1.
    let mut ordered: Vec<&&WorkoutSession> = completed.iter().collect();
    ordered.sort_by_key(|s| s.started_at);
    let gaps: Vec<f64> = ordered
        .windows(2)
        .map(|pair| {
            let days_between =
                (pair[1].started_at.date_naive() - pair[0].started_at.date_naive()).num_days();
            (days_between - 1) as f64
        })
        .collect();
    let avg_rest_days = mean(&gaps);

    let durations: Vec<f64> = completed.iter().filter_map(|s| s.duration_minutes).collect();
    let avg_session_duration = mean(&durations).unwrap_or(0.0);

    // Muscle groups by set count, first-seen order on ties.
    let by_exercise: HashMap<&str, &str> = exercises
        .iter()
        .filter_map(|e| e.muscle_group.as_deref().map(|m| (e.id.as_str(), m)))
        .collect();
    let mut muscles: Vec<(String, u32)> = Vec::new();
    for set in sets {
        if let Some(muscle) = by_exercise.get(set.exercise_id.as_str()) {
            if let Some(entry) = muscles.iter_mut().find(|(name, _)| name == muscle) {
                entry.1 += 1;
            } else {
                muscles.push(((*muscle).to_string(), 1));
            }
        }
    }
    muscles.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
    let most_trained_muscles: Vec<String> =
        muscles.into_iter().take(3).map(|(name, _)| name).collect();

    TrainingPattern {
        day_histogram,
        preferred_days,
        avg_rest_days,
        avg_session_duration,
        most_trained_muscles,
    }
}

/// Walk completed sessions newest-first; a gap over STREAK_GAP_DAYS
/// closes the current run. `current` is the first run found regardless
/// of how stale its newest session is.
pub fn compute_streaks(completed: &[&WorkoutSession]) -> Streaks {
    if completed.is_empty() {
        return Streaks {
            current: 0,
            longest: 0,
        };
    }

    let mut dates: Vec<NaiveDate> = completed.iter().map(|s| s.started_at.date_naive()).collect();
    dates.sort_by(|a, b| b.cmp(a));

    let mut runs: Vec<u32> = Vec::new();
    let mut run = 1u32;
    for pair in dates.windows(2) {
        let gap = (pair[0] - pair[1]).num_days();
        if gap <= STREAK_GAP_DAYS {
            run += 1;
        } else {
            runs.push(run);
            run = 1;
        }
    }
    runs.push(run);

    Streaks {
        current: runs[0],
        longest: runs.iter().copied().max().unwrap_or(0),
    }
}

fn velocity_stats(sets: &[SetRecord], now: DateTime<Utc>) -> VelocityStats {
    let drops: Vec<f64> = sets.iter().filter_map(|s| s.velocity_drop).collect();

    let recent_peaks: Vec<f64> = sets
        .iter()
        .filter(|s| in_window(s.completed_at, now, 14))
        .filter_map(|s| s.peak_velocity)
        .collect();
    let older_peaks: Vec<f64> = sets
        .iter()
        .filter(|s| in_prior_window(s.completed_at, now, 56, 14))
        .filter_map(|s| s.peak_velocity)
        .collect();

    VelocityStats {
        samples: drops.len() as u32,
        avg_drop: mean(&drops),
        recent_samples: recent_peaks.len() as u32,
        older_samples: older_peaks.len() as u32,
        recent_avg_peak: mean(&recent_peaks),
        older_avg_peak: mean(&older_peaks),
    }
}

fn rpe_stats(sets: &[SetRecord], now: DateTime<Utc>) -> RpeStats {
    let all: Vec<f64> = sets.iter().filter_map(|s| s.rpe).collect();
    let recent: Vec<f64> = sets
        .iter()
        .filter(|s| in_window(s.completed_at, now, 14))
        .filter_map(|s| s.rpe)
        .collect();

    RpeStats {
        total_samples: all.len() as u32,
        recent_samples: recent.len() as u32,
        recent_avg: mean(&recent),
    }
}

fn nutrition_stats(snapshot: &ClientSnapshot) -> NutritionStats {
    let log_count = snapshot.nutrition_logs.len() as u32;
    let adherence_pct = f64::from(log_count) / NUTRITION_WINDOW_DAYS as f64 * 100.0;

    if log_count == 0 {
        return NutritionStats {
            log_count,
            adherence_pct,
            avg_daily_protein: None,
        };
    }

    let log_by_meal: HashMap<&str, &str> = snapshot
        .meals
        .iter()
        .map(|m| (m.id.as_str(), m.log_id.as_str()))
        .collect();
    let mut protein_by_log: HashMap<&str, f64> = HashMap::new();
    for item in &snapshot.meal_items {
        if let Some(log_id) = log_by_meal.get(item.meal_id.as_str()) {
            *protein_by_log.entry(log_id).or_insert(0.0) += item.protein;
        }
    }

    let total_protein: f64 = snapshot
        .nutrition_logs
        .iter()
        .map(|log| protein_by_log.get(log.id.as_str()).copied().unwrap_or(0.0))
        .sum();
    let avg_daily_protein = Some(total_protein / f64::from(log_count));

    NutritionStats {
        log_count,
        adherence_pct,
        avg_daily_protein,
    }
}
