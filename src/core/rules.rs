use crate::core::aggregate::Aggregates;
use crate::models::insight::{Insight, InsightCategory, InsightType, Priority, Trend};

type RuleFn = fn(&Aggregates) -> Option<Insight>;

/// One entry in the rule catalog. Each rule is a pure function of the
/// aggregates and emits at most one insight with a constant id.
pub struct Rule {
    pub id: &'static str,
    pub eval: RuleFn,
}

/// Fixed catalog, executed in registration order. Rules are independent:
/// none reads another rule's output, and order only affects the position
/// of equal-priority insights after ranking.
pub const CATALOG: &[Rule] = &[
    Rule { id: "consistency-high", eval: consistency_high },
    Rule { id: "consistency-dropping", eval: consistency_dropping },
    Rule { id: "no-recent-training", eval: no_recent_training },
    Rule { id: "volume-increase", eval: volume_increase },
    Rule { id: "volume-decrease", eval: volume_decrease },
    Rule { id: "pr-streak", eval: pr_streak },
    Rule { id: "new-prs", eval: new_prs },
    Rule { id: "pr-plateau", eval: pr_plateau },
    Rule { id: "velocity-fatigue", eval: velocity_fatigue },
    Rule { id: "velocity-optimal", eval: velocity_optimal },
    Rule { id: "velocity-declining", eval: velocity_declining },
    Rule { id: "rpe-high", eval: rpe_high },
    Rule { id: "rpe-low", eval: rpe_low },
    Rule { id: "training-concentrated", eval: training_concentrated },
    Rule { id: "rest-days-low", eval: rest_days_low },
    Rule { id: "rest-days-high", eval: rest_days_high },
    Rule { id: "nutrition-consistent", eval: nutrition_consistent },
    Rule { id: "nutrition-inconsistent", eval: nutrition_inconsistent },
    Rule { id: "protein-low", eval: protein_low },
    Rule { id: "protein-high", eval: protein_high },
    Rule { id: "no-nutrition-tracking", eval: no_nutrition_tracking },
    Rule { id: "streak-active", eval: streak_active },
    Rule { id: "milestone-sessions", eval: milestone_sessions },
    Rule { id: "pr-month", eval: pr_month },
];

/// Run every rule against the aggregates, catalog order.
pub fn evaluate(agg: &Aggregates) -> Vec<Insight> {
    CATALOG.iter().filter_map(|rule| (rule.eval)(agg)).collect()
}

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Percentage change; a zero previous value suppresses the rule
/// instead of dividing by zero.
fn pct_change(recent: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((recent - previous) / previous * 100.0)
}

fn consistency_high(agg: &Aggregates) -> Option<Insight> {
    let n = agg.sessions_2wk;
    if n < 6 {
        return None;
    }
    Some(Insight {
        id: "consistency-high",
        insight_type: InsightType::Consistency,
        category: InsightCategory::Behavior,
        priority: Priority::Medium,
        title: "Training consistency is strong".to_string(),
        description: format!("{n} completed sessions in the last two weeks. Keep the rhythm going."),
        metric: Some(format!("{n} sessions in 2 weeks")),
        trend: Some(Trend::Up),
        actionable: None,
    })
}

fn consistency_dropping(agg: &Aggregates) -> Option<Insight> {
    let (recent, prior) = (agg.sessions_2wk, agg.sessions_prior_2wk);
    if recent >= 2 || prior < 4 {
        return None;
    }
    Some(Insight {
        id: "consistency-dropping",
        insight_type: InsightType::Warning,
        category: InsightCategory::Behavior,
        priority: Priority::High,
        title: "Training frequency is dropping".to_string(),
        description: format!(
            "Down to {recent} session(s) in the last two weeks from {prior} in the two weeks before."
        ),
        metric: Some(format!("{recent} vs {prior} sessions")),
        trend: Some(Trend::Down),
        actionable: Some("Book the next session now; even a short one keeps momentum.".to_string()),
    })
}

fn no_recent_training(agg: &Aggregates) -> Option<Insight> {
    if agg.sessions_2wk > 0 || agg.completed_count == 0 {
        return None;
    }
    Some(Insight {
        id: "no-recent-training",
        insight_type: InsightType::Warning,
        category: InsightCategory::Training,
        priority: Priority::High,
        title: "No training in two weeks".to_string(),
        description: "No completed sessions in the last 14 days.".to_string(),
        metric: None,
        trend: None,
        actionable: Some("Schedule a comeback workout and keep the load light.".to_string()),
    })
}

fn volume_increase(agg: &Aggregates) -> Option<Insight> {
    let pct = pct_change(agg.volume_2wk, agg.volume_prior_2wk)?;
    if pct <= 15.0 {
        return None;
    }
    Some(Insight {
        id: "volume-increase",
        insight_type: InsightType::Volume,
        category: InsightCategory::Training,
        priority: Priority::Medium,
        title: "Training volume is climbing".to_string(),
        description: format!("Total volume is up {pct:.0}% versus the previous two weeks."),
        metric: Some(format!("{pct:+.0}% volume")),
        trend: Some(Trend::Up),
        actionable: None,
    })
}

fn volume_decrease(agg: &Aggregates) -> Option<Insight> {
    let pct = pct_change(agg.volume_2wk, agg.volume_prior_2wk)?;
    if pct >= -25.0 {
        return None;
    }
    Some(Insight {
        id: "volume-decrease",
        insight_type: InsightType::Warning,
        category: InsightCategory::Training,
        priority: Priority::Medium,
        title: "Training volume fell sharply".to_string(),
        description: format!(
            "Total volume is down {:.0}% versus the previous two weeks.",
            pct.abs()
        ),
        metric: Some(format!("{pct:+.0}% volume")),
        trend: Some(Trend::Down),
        actionable: Some("Check for missed sessions or shortened workouts.".to_string()),
    })
}

fn pr_streak(agg: &Aggregates) -> Option<Insight> {
    let n = agg.prs_1wk;
    if n < 3 {
        return None;
    }
    Some(Insight {
        id: "pr-streak",
        insight_type: InsightType::Celebration,
        category: InsightCategory::Progress,
        priority: Priority::Low,
        title: "PR streak".to_string(),
        description: format!("{n} personal records this week. Exceptional work."),
        metric: Some(format!("{n} PRs this week")),
        trend: Some(Trend::Up),
        actionable: None,
    })
}

fn new_prs(agg: &Aggregates) -> Option<Insight> {
    let n = agg.prs_1wk;
    if n == 0 || n >= 3 {
        return None;
    }
    Some(Insight {
        id: "new-prs",
        insight_type: InsightType::Pr,
        category: InsightCategory::Progress,
        priority: Priority::Medium,
        title: "New personal records".to_string(),
        description: format!("{n} new PR(s) this week."),
        metric: Some(format!("{n} PRs this week")),
        trend: Some(Trend::Up),
        actionable: None,
    })
}

fn pr_plateau(agg: &Aggregates) -> Option<Insight> {
    if agg.completed_count <= 5 {
        return None;
    }
    let stale = agg.days_since_last_pr.is_none_or(|d| d > 21);
    if !stale {
        return None;
    }
    let description = match agg.days_since_last_pr {
        Some(d) => format!("It has been {d} days since the last PR."),
        None => "No PRs on record yet despite regular training.".to_string(),
    };
    Some(Insight {
        id: "pr-plateau",
        insight_type: InsightType::Recommendation,
        category: InsightCategory::Progress,
        priority: Priority::Medium,
        title: "No PRs lately".to_string(),
        description,
        metric: agg.days_since_last_pr.map(|d| format!("{d} days since last PR")),
        trend: None,
        actionable: Some("Program a heavy single or a rep-max test.".to_string()),
    })
}

fn velocity_fatigue(agg: &Aggregates) -> Option<Insight> {
    let v = &agg.velocity;
    if v.samples < 5 {
        return None;
    }
    let drop = v.avg_drop?;
    if drop <= 25.0 {
        return None;
    }
    Some(Insight {
        id: "velocity-fatigue",
        insight_type: InsightType::Warning,
        category: InsightCategory::Recovery,
        priority: Priority::High,
        title: "High velocity drop-off".to_string(),
        description: format!(
            "Average velocity drop is {drop:.0}% across recent sets; bar speed is fading fast."
        ),
        metric: Some(format!("{drop:.0}% avg velocity drop")),
        trend: Some(Trend::Down),
        actionable: Some("Cut set volume or add a lighter day.".to_string()),
    })
}

fn velocity_optimal(agg: &Aggregates) -> Option<Insight> {
    let v = &agg.velocity;
    if v.samples < 5 {
        return None;
    }
    let drop = v.avg_drop?;
    if drop >= 15.0 {
        return None;
    }
    Some(Insight {
        id: "velocity-optimal",
        insight_type: InsightType::Velocity,
        category: InsightCategory::Training,
        priority: Priority::Low,
        title: "Bar speed is well managed".to_string(),
        description: format!(
            "Average velocity drop is only {drop:.0}%; fatigue is under control."
        ),
        metric: Some(format!("{drop:.0}% avg velocity drop")),
        trend: Some(Trend::Stable),
        actionable: None,
    })
}

fn velocity_declining(agg: &Aggregates) -> Option<Insight> {
    let v = &agg.velocity;
    if v.recent_samples < 3 || v.older_samples < 3 {
        return None;
    }
    let (recent, older) = (v.recent_avg_peak?, v.older_avg_peak?);
    if recent >= 0.9 * older {
        return None;
    }
    Some(Insight {
        id: "velocity-declining",
        insight_type: InsightType::Warning,
        category: InsightCategory::Recovery,
        priority: Priority::High,
        title: "Peak velocity is declining".to_string(),
        description: format!("Average peak velocity fell from {older:.2} to {recent:.2} m/s."),
        metric: Some(format!("{older:.2} -> {recent:.2} m/s")),
        trend: Some(Trend::Down),
        actionable: Some("Consider a deload week; chronic fatigue may be building.".to_string()),
    })
}

fn rpe_high(agg: &Aggregates) -> Option<Insight> {
    let r = &agg.rpe;
    if r.total_samples < 10 || r.recent_samples < 5 {
        return None;
    }
    let avg = r.recent_avg?;
    if avg < 9.0 {
        return None;
    }
    Some(Insight {
        id: "rpe-high",
        insight_type: InsightType::Warning,
        category: InsightCategory::Recovery,
        priority: Priority::High,
        title: "Effort is redlining".to_string(),
        description: format!("Average RPE over the last two weeks is {avg:.1}."),
        metric: Some(format!("avg RPE {avg:.1}")),
        trend: None,
        actionable: Some("Insert a deload or pull back accessory volume.".to_string()),
    })
}

fn rpe_low(agg: &Aggregates) -> Option<Insight> {
    let avg = agg.rpe.recent_avg?;
    if avg >= 6.0 || agg.volume_2wk <= 0.0 {
        return None;
    }
    Some(Insight {
        id: "rpe-low",
        insight_type: InsightType::Recommendation,
        category: InsightCategory::Training,
        priority: Priority::Medium,
        title: "Room to push harder".to_string(),
        description: format!("Average RPE is only {avg:.1}; most sets have reps in reserve."),
        metric: Some(format!("avg RPE {avg:.1}")),
        trend: None,
        actionable: Some("Nudge working weights up 2-5%.".to_string()),
    })
}

fn training_concentrated(agg: &Aggregates) -> Option<Insight> {
    if agg.completed_count < 8 {
        return None;
    }
    let day = *agg.pattern.preferred_days.first()?;
    let count = agg.pattern.day_histogram[day as usize];
    let share = f64::from(count) / f64::from(agg.completed_count) * 100.0;
    if share <= 40.0 {
        return None;
    }
    let name = DAY_NAMES[day as usize];
    Some(Insight {
        id: "training-concentrated",
        insight_type: InsightType::Pattern,
        category: InsightCategory::Behavior,
        priority: Priority::Low,
        title: "Training is concentrated on one day".to_string(),
        description: format!("{share:.0}% of sessions fall on {name}."),
        metric: Some(format!("{share:.0}% on {name}")),
        trend: None,
        actionable: None,
    })
}

fn rest_days_low(agg: &Aggregates) -> Option<Insight> {
    let avg = agg.pattern.avg_rest_days?;
    if avg >= 1.0 {
        return None;
    }
    Some(Insight {
        id: "rest-days-low",
        insight_type: InsightType::Warning,
        category: InsightCategory::Recovery,
        priority: Priority::High,
        title: "Hardly any rest days".to_string(),
        description: format!("Averaging {avg:.1} rest days between sessions."),
        metric: Some(format!("{avg:.1} rest days avg")),
        trend: None,
        actionable: Some("Schedule at least one full rest day per week.".to_string()),
    })
}

fn rest_days_high(agg: &Aggregates) -> Option<Insight> {
    let avg = agg.pattern.avg_rest_days?;
    if avg <= 4.0 {
        return None;
    }
    Some(Insight {
        id: "rest-days-high",
        insight_type: InsightType::Recommendation,
        category: InsightCategory::Behavior,
        priority: Priority::Medium,
        title: "Long gaps between sessions".to_string(),
        description: format!("Averaging {avg:.1} rest days between sessions."),
        metric: Some(format!("{avg:.1} rest days avg")),
        trend: None,
        actionable: Some("Aim for a consistent every-2-3-days cadence.".to_string()),
    })
}

fn nutrition_consistent(agg: &Aggregates) -> Option<Insight> {
    let n = &agg.nutrition;
    if n.log_count < 7 || n.adherence_pct < 80.0 {
        return None;
    }
    Some(Insight {
        id: "nutrition-consistent",
        insight_type: InsightType::Nutrition,
        category: InsightCategory::Nutrition,
        priority: Priority::Low,
        title: "Nutrition tracking is dialed in".to_string(),
        description: format!(
            "Logged {:.0}% of days over the last four weeks.",
            n.adherence_pct
        ),
        metric: Some(format!("{:.0}% of days logged", n.adherence_pct)),
        trend: Some(Trend::Up),
        actionable: None,
    })
}

fn nutrition_inconsistent(agg: &Aggregates) -> Option<Insight> {
    let n = &agg.nutrition;
    // Zero logs is handled by no-nutrition-tracking alone.
    if n.log_count == 0 || n.adherence_pct >= 50.0 {
        return None;
    }
    Some(Insight {
        id: "nutrition-inconsistent",
        insight_type: InsightType::Warning,
        category: InsightCategory::Nutrition,
        priority: Priority::Medium,
        title: "Nutrition logging is patchy".to_string(),
        description: format!(
            "Only {:.0}% of days logged over the last four weeks.",
            n.adherence_pct
        ),
        metric: Some(format!("{:.0}% of days logged", n.adherence_pct)),
        trend: None,
        actionable: Some("Log at least a rough total every day.".to_string()),
    })
}

fn protein_low(agg: &Aggregates) -> Option<Insight> {
    let protein = agg.nutrition.avg_daily_protein?;
    if protein <= 0.0 || protein >= 100.0 {
        return None;
    }
    Some(Insight {
        id: "protein-low",
        insight_type: InsightType::Warning,
        category: InsightCategory::Nutrition,
        priority: Priority::High,
        title: "Protein intake looks low".to_string(),
        description: format!("Averaging {protein:.0} g of protein on logged days."),
        metric: Some(format!("{protein:.0} g/day protein")),
        trend: None,
        actionable: Some("Target roughly 1.6-2.2 g per kg of bodyweight.".to_string()),
    })
}

fn protein_high(agg: &Aggregates) -> Option<Insight> {
    let protein = agg.nutrition.avg_daily_protein?;
    if protein < 150.0 {
        return None;
    }
    Some(Insight {
        id: "protein-high",
        insight_type: InsightType::Nutrition,
        category: InsightCategory::Nutrition,
        priority: Priority::Low,
        title: "Protein intake is strong".to_string(),
        description: format!("Averaging {protein:.0} g of protein on logged days."),
        metric: Some(format!("{protein:.0} g/day protein")),
        trend: Some(Trend::Stable),
        actionable: None,
    })
}

fn no_nutrition_tracking(agg: &Aggregates) -> Option<Insight> {
    if agg.nutrition.log_count > 0 {
        return None;
    }
    Some(Insight {
        id: "no-nutrition-tracking",
        insight_type: InsightType::Recommendation,
        category: InsightCategory::Nutrition,
        priority: Priority::Medium,
        title: "No nutrition logs".to_string(),
        description: "Nothing logged in the last four weeks.".to_string(),
        metric: None,
        trend: None,
        actionable: Some("Start with calories and protein only.".to_string()),
    })
}

fn streak_active(agg: &Aggregates) -> Option<Insight> {
    let n = agg.streaks.current;
    if n < 4 {
        return None;
    }
    Some(Insight {
        id: "streak-active",
        insight_type: InsightType::Celebration,
        category: InsightCategory::Behavior,
        priority: Priority::Low,
        title: "Active training streak".to_string(),
        description: format!("{n} sessions without a long break."),
        metric: Some(format!("{n}-session streak")),
        trend: None,
        actionable: None,
    })
}

fn milestone_sessions(agg: &Aggregates) -> Option<Insight> {
    let n = agg.completed_count;
    if n < 20 {
        return None;
    }
    Some(Insight {
        id: "milestone-sessions",
        insight_type: InsightType::Celebration,
        category: InsightCategory::Progress,
        priority: Priority::Low,
        title: "Session milestone".to_string(),
        description: format!("{n} completed sessions in the last eight weeks."),
        metric: Some(format!("{n} sessions")),
        trend: None,
        actionable: None,
    })
}

fn pr_month(agg: &Aggregates) -> Option<Insight> {
    let n = agg.prs_4wk;
    if n < 5 {
        return None;
    }
    Some(Insight {
        id: "pr-month",
        insight_type: InsightType::Celebration,
        category: InsightCategory::Progress,
        priority: Priority::Low,
        title: "A month of PRs".to_string(),
        description: format!("{n} personal records in the last four weeks."),
        metric: Some(format!("{n} PRs in 4 weeks")),
        trend: None,
        actionable: None,
    })
}
