use colored::Colorize;
use comfy_table::Table;

use crate::core::engine::ClientInsights;
use crate::models::insight::Priority;
use crate::models::nutrition::NutritionLog;
use crate::models::pr::PersonalRecord;
use crate::models::session::WorkoutSession;

/// Pretty-print a single session line.
pub fn format_session(s: &WorkoutSession) -> String {
    let ts = s.started_at.format("%Y-%m-%d %H:%M");
    let mut line = format!("{} | {} [{}]", ts, s.client_id, s.status);
    if let Some(minutes) = s.duration_minutes {
        line.push_str(&format!("  {minutes:.0} min"));
    }
    if let Some(ref routine) = s.routine_id {
        line.push_str(&format!("  routine: {routine}"));
    }
    if let Some(ref notes) = s.notes {
        line.push_str(&format!("  # {notes}"));
    }
    line
}

pub fn format_pr(pr: &PersonalRecord) -> String {
    format!(
        "{} | {}: {} x {}",
        pr.achieved_at.format("%Y-%m-%d"),
        pr.exercise_id,
        pr.weight,
        pr.reps
    )
}

pub fn format_nutrition_log(log: &NutritionLog) -> String {
    let mut line = format!("{} | logged", log.date);
    if let Some(cal) = log.target_calories {
        line.push_str(&format!("  target {cal:.0} kcal"));
    }
    if let Some(protein) = log.target_protein {
        line.push_str(&format!("  target {protein:.0} g protein"));
    }
    line
}

fn priority_tag(priority: Priority) -> String {
    match priority {
        Priority::High => "[HIGH]".red().bold().to_string(),
        Priority::Medium => "[MED] ".yellow().to_string(),
        Priority::Low => "[LOW] ".dimmed().to_string(),
    }
}

/// Pretty-print a full insights report.
pub fn format_insights(result: &ClientInsights) -> String {
    let s = &result.summary;
    let mut out = format!(
        "=== Client Insights: {} ===\n\n",
        result.last_updated.format("%Y-%m-%d")
    );

    out.push_str(&format!(
        "Overall: {}  (training {:.0} | nutrition {:.0} | consistency {:.0} | progress {:.0})\n\n",
        s.overall_score.to_string().bold(),
        s.training_score,
        s.nutrition_score,
        s.consistency_score,
        s.progress_score
    ));

    if result.insights.is_empty() {
        out.push_str("No insights for this period.\n");
    } else {
        for insight in &result.insights {
            out.push_str(&format!(
                "{} {} - {}\n",
                priority_tag(insight.priority),
                insight.title.bold(),
                insight.description
            ));
            if let Some(ref metric) = insight.metric {
                out.push_str(&format!("       {}\n", metric.dimmed()));
            }
            if let Some(ref action) = insight.actionable {
                out.push_str(&format!("       -> {action}\n"));
            }
        }
    }

    if !s.strengths.is_empty() {
        out.push_str(&format!("\nStrengths: {}\n", s.strengths.join(", ")));
    }
    if !s.areas_to_improve.is_empty() {
        out.push_str(&format!("To improve: {}\n", s.areas_to_improve.join(", ")));
    }

    let mut table = Table::new();
    table.set_header(vec!["week of", "sessions", "volume", "avg rpe", "prs"]);
    for week in &s.weekly_trend {
        table.add_row(vec![
            week.week_start.to_string(),
            week.sessions.to_string(),
            format!("{:.0}", week.volume),
            week.avg_rpe
                .map_or_else(|| "-".to_string(), |r| format!("{r:.1}")),
            week.prs.to_string(),
        ]);
    }
    out.push_str(&format!("\n{table}\n"));

    let q = &s.quick_stats;
    out.push_str(&format!(
        "\nWorkouts: {} ({:.1}/week) | Volume: {:.0} | PRs this month: {} | Streak: {} (best {})\n",
        q.total_workouts,
        q.avg_per_week,
        q.total_volume,
        q.prs_this_month,
        q.current_streak,
        q.longest_streak
    ));

    out
}
