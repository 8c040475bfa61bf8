use colored::Colorize;

use crate::core::format_date;
use crate::features::activity::{
    DailyStats, SessionKind, SiteLimit, SiteVisit, SiteVisitStats, StatsTotals, TimerSession,
};

/// Format minutes as "25m" or "1h 30m".
fn minutes_short(total_minutes: i64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Format seconds as "45s", "3m 05s" or "1h 02m".
fn seconds_short(total_seconds: i64) -> String {
    if total_seconds < 60 {
        return format!("{total_seconds}s");
    }
    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{minutes}m {:02}s", total_seconds % 60);
    }
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

/// Format a timer session
pub fn format_session_pretty(session: &TimerSession) -> String {
    let icon = match session.kind {
        SessionKind::Work => "🍅",
        SessionKind::Break => "☕",
    };

    let state = if session.completed {
        "completed".green()
    } else if session.is_active() {
        "running".yellow()
    } else {
        "ended".dimmed()
    };

    let mut lines = vec![format!(
        "{icon} {} session #{} [{state}]",
        session.kind.display_name().bold(),
        session.id
    )];

    lines.push(format!("   Planned: {}", minutes_short(session.duration_minutes)));
    lines.push(format!("   Started: {}", session.start_time.format("%Y-%m-%d %H:%M:%S")));

    if let Some(end) = session.end_time {
        lines.push(format!("   Ended:   {}", end.format("%Y-%m-%d %H:%M:%S")));
    }
    if let Some(elapsed) = session.elapsed() {
        lines.push(format!("   Actual:  {}", minutes_short(elapsed.num_minutes())));
    }
    if let Some(ref preset) = session.preset_id {
        lines.push(format!("   Preset:  {}", preset.dimmed()));
    }

    lines.join("\n")
}

/// Format a site visit
pub fn format_visit_pretty(visit: &SiteVisit) -> String {
    let header = if visit.blocked {
        format!("⛔ Blocked attempt #{} on {}", visit.id, visit.site_url.bold()).red().to_string()
    } else {
        format!("🌐 Visit #{} to {}", visit.id, visit.site_url.bold())
    };

    let mut lines = vec![header];
    lines.push(format!("   Started: {}", visit.start_time.format("%Y-%m-%d %H:%M:%S")));

    match visit.duration_seconds {
        Some(secs) if !visit.blocked => {
            lines.push(format!("   Duration: {}", seconds_short(secs)));
        }
        Some(_) => {}
        None => lines.push("   Still open".yellow().to_string()),
    }

    lines.join("\n")
}

/// Format a site's limit, optionally with the day's usage
pub fn format_limit_pretty(limit: &SiteLimit, usage: Option<&SiteVisitStats>) -> String {
    let mut line = format!(
        "{}  {}/day",
        limit.site_url.bold(),
        minutes_short(limit.daily_limit_minutes).cyan()
    );

    if let Some(usage) = usage {
        let used = minutes_short(usage.total_minutes());
        if limit.is_exceeded(usage) {
            line.push_str(&format!("  {}", format!("{used} used, limit reached").red()));
        } else {
            line.push_str(&format!(
                "  {used} used, {} left",
                minutes_short(limit.remaining_minutes(usage)).green()
            ));
        }
    }

    line
}

/// Format all site limits
pub fn format_limits_pretty(limits: &[SiteLimit]) -> String {
    if limits.is_empty() {
        return "Site limits (0)\n  No limits set".to_string();
    }

    let mut output = format!("Site limits ({})\n", limits.len());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for limit in limits {
        output.push_str(&format_limit_pretty(limit, None));
        output.push('\n');
    }

    output
}

/// Format one day's stats
pub fn format_day_pretty(day: &DailyStats) -> String {
    format!(
        "{}  work {}  break {}  cycles {}  blocked {}",
        format_date(day.date).bold(),
        minutes_short(day.total_work_minutes).green(),
        minutes_short(day.total_break_minutes).cyan(),
        day.completed_cycles,
        day.blocked_attempts
    )
}

/// Format a run of daily stats with totals
pub fn format_days_pretty(days: &[DailyStats], title: &str) -> String {
    if days.is_empty() {
        return format!("{title}\n  No stats recorded");
    }

    let mut output = format!("{title}\n");
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for day in days {
        output.push_str(&format_day_pretty(day));
        output.push('\n');
    }

    let totals = StatsTotals::from_days(days);
    output.push_str(&"─".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "Total ({} days)  work {}  break {}  cycles {}  blocked {}",
        totals.days,
        minutes_short(totals.work_minutes),
        minutes_short(totals.break_minutes),
        totals.completed_cycles,
        totals.blocked_attempts
    ));

    output
}

/// Format a site's visit totals for a day
pub fn format_site_stats_pretty(stats: &SiteVisitStats) -> String {
    let time = stats
        .total_duration_seconds
        .map_or_else(|| "no finished visits".dimmed().to_string(), seconds_short);

    format!(
        "{} on {}\n   Visits:  {}\n   Time:    {time}\n   Blocked: {}",
        stats.site_url.bold(),
        format_date(stats.date),
        stats.visit_count,
        stats.blocked_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_short() {
        assert_eq!(minutes_short(25), "25m");
        assert_eq!(minutes_short(90), "1h 30m");
        assert_eq!(minutes_short(0), "0m");
    }

    #[test]
    fn test_seconds_short() {
        assert_eq!(seconds_short(45), "45s");
        assert_eq!(seconds_short(185), "3m 05s");
        assert_eq!(seconds_short(3_720), "1h 02m");
    }

    #[test]
    fn test_empty_lists() {
        assert!(format_limits_pretty(&[]).contains("No limits set"));
        assert!(format_days_pretty(&[], "Weekly").contains("No stats recorded"));
    }
}
