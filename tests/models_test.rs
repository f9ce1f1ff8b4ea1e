use std::str::FromStr;

use coachvital::models::insight::{Insight, InsightCategory, InsightType, Priority, Trend};
use coachvital::models::session::{SessionStatus, WorkoutSession};
use coachvital::models::set::SetRecord;

// ── session status ───────────────────────────────────────────────────────────

#[test]
fn test_session_status_roundtrip() {
    for status in [
        SessionStatus::InProgress,
        SessionStatus::Completed,
        SessionStatus::Paused,
    ] {
        let text = status.to_string();
        assert_eq!(SessionStatus::from_str(&text).unwrap(), status);
    }
}

#[test]
fn test_session_status_parse_is_case_insensitive() {
    assert_eq!(
        SessionStatus::from_str("COMPLETED").unwrap(),
        SessionStatus::Completed
    );
    assert!(SessionStatus::from_str("done").is_err());
}

#[test]
fn test_new_session_defaults_to_in_progress() {
    let s = WorkoutSession::new("jane".to_string());
    assert_eq!(s.status, SessionStatus::InProgress);
    assert!(s.ended_at.is_none());
    assert!(!s.id.is_empty());
}

// ── set volume ───────────────────────────────────────────────────────────────

#[test]
fn test_set_volume_is_weight_times_reps() {
    let set = SetRecord::new("s1".to_string(), "squat".to_string(), 102.5, 4);
    assert_eq!(set.volume(), 410.0);
}

// ── priority ─────────────────────────────────────────────────────────────────

#[test]
fn test_priority_rank_ordering() {
    assert!(Priority::High.rank() < Priority::Medium.rank());
    assert!(Priority::Medium.rank() < Priority::Low.rank());
}

#[test]
fn test_priority_adjustments() {
    assert_eq!(Priority::High.adjustment(), 15.0);
    assert_eq!(Priority::Medium.adjustment(), 10.0);
    assert_eq!(Priority::Low.adjustment(), 5.0);
}

// ── insight polarity ─────────────────────────────────────────────────────────

fn insight(insight_type: InsightType, trend: Option<Trend>) -> Insight {
    Insight {
        id: "test",
        insight_type,
        category: InsightCategory::Training,
        priority: Priority::Medium,
        title: String::new(),
        description: String::new(),
        metric: None,
        trend,
        actionable: None,
    }
}

#[test]
fn test_celebration_pr_and_consistency_are_positive() {
    assert!(insight(InsightType::Celebration, None).is_positive());
    assert!(insight(InsightType::Pr, None).is_positive());
    assert!(insight(InsightType::Consistency, None).is_positive());
}

#[test]
fn test_upward_trend_is_positive_regardless_of_type() {
    assert!(insight(InsightType::Volume, Some(Trend::Up)).is_positive());
    assert!(!insight(InsightType::Volume, Some(Trend::Stable)).is_positive());
}

#[test]
fn test_only_warnings_are_negative() {
    assert!(insight(InsightType::Warning, None).is_negative());
    assert!(!insight(InsightType::Recommendation, None).is_negative());
    // A warning with an upward trend is both; scoring treats positive first.
    let odd = insight(InsightType::Warning, Some(Trend::Up));
    assert!(odd.is_positive() && odd.is_negative());
}

// ── serialization ────────────────────────────────────────────────────────────

#[test]
fn test_insight_serializes_type_field_snake_case() {
    let value = serde_json::to_value(insight(InsightType::StrengthGain, Some(Trend::Up))).unwrap();
    assert_eq!(value["type"], "strength_gain");
    assert_eq!(value["trend"], "up");
    assert_eq!(value["priority"], "medium");
    assert!(value.get("metric").is_none());
    assert!(value.get("actionable").is_none());
}

#[test]
fn test_session_serializes_omitting_empty_options() {
    let s = WorkoutSession::new("jane".to_string());
    let value = serde_json::to_value(&s).unwrap();
    assert_eq!(value["status"], "in_progress");
    assert!(value.get("routine_id").is_none());
    assert!(value.get("ended_at").is_none());
}
