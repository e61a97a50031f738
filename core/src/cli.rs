use std::fmt::Write;

use crate::template::{format_trend_metric, trend_metric_name};
use crate::trend::{remaining_sessions, TrendConfig};
use crate::types::{TemplateType, TrendDirection, TrendVerdict};

/// Tekstrapport for en trend-vurdering.
pub fn render_trend_report(verdict: &TrendVerdict, template: TemplateType, cfg: &TrendConfig) -> String {
    let mut out = String::new();

    let Some(direction) = verdict.direction else {
        let remaining = remaining_sessions(verdict, cfg);
        let _ = writeln!(out, "--- Trend Report ---");
        let _ = writeln!(out, "Not enough data");
        if remaining > 0 {
            let plural = if remaining > 1 { "s" } else { "" };
            let _ = writeln!(out, "Log {remaining} more workout{plural} to see your trend");
        } else {
            let _ = writeln!(out, "Keep logging to see your trend");
        }
        return out;
    };

    let status = match direction {
        TrendDirection::Improving => "Improving",
        TrendDirection::Maintaining => "Maintaining",
        TrendDirection::Declining => "Declining",
    };
    let pct = verdict.percent_change.unwrap_or(0.0);
    let sign = if pct > 0.0 { "+" } else { "" };

    let _ = writeln!(out, "--- Trend Report ---");
    let _ = writeln!(out, "{status}");
    let _ = writeln!(out, "Based on your last {} vs previous {} workouts", cfg.window, cfg.window);
    let _ = writeln!(out, "Recent avg: {}", format_trend_metric(template, verdict.recent_avg));
    let _ = writeln!(out, "Previous avg: {}", format_trend_metric(template, verdict.previous_avg));
    let _ = writeln!(out, "Change: {sign}{pct:.1}%");
    let _ = writeln!(out, "Tracking {}", trend_metric_name(template));
    out
}
