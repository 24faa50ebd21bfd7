use chrono::{DateTime, Utc};

use crate::event::ListenerStatus;
use crate::model::serde_utils::flexible_utc;

/// Format elapsed seconds as human-readable string.
/// - < 60s: "Xs"
/// - < 3600s: "XmYs"
/// - >= 3600s: "XhYm"
pub fn format_elapsed(secs: i64) -> String {
    let secs = secs.max(0);
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m{}s", secs / 60, secs % 60)
    } else {
        format!("{}h{}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Message timestamp as "HH:MM", with the date once it is not today.
pub fn format_timestamp(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if ts.date_naive() == now.date_naive() {
        ts.format("%H:%M").to_string()
    } else {
        ts.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Deadlines are shown to the minute; unparseable values verbatim.
pub fn format_deadline(raw: &str) -> String {
    match flexible_utc::parse(raw) {
        Some(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        None => raw.to_string(),
    }
}

pub fn is_overdue(raw: &str, now: DateTime<Utc>) -> bool {
    flexible_utc::parse(raw).is_some_and(|ts| ts < now)
}

/// Cut to `max` characters, marking the cut with "...".
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

pub fn listener_label(status: &ListenerStatus) -> String {
    match status {
        ListenerStatus::Disconnected => "offline".to_string(),
        ListenerStatus::Connecting => "connecting".to_string(),
        ListenerStatus::Connected => "live".to_string(),
        ListenerStatus::Reconnecting { attempt, delay } => {
            format!("retry #{} in {}", attempt, format_elapsed(delay.as_secs() as i64))
        }
    }
}
