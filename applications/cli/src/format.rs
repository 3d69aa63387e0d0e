//! Plain-text rendering for CLI output

use chrono::{DateTime, NaiveDateTime};
use melodia_core::{DashboardStats, HealthStatus, Track, User};
use serde::Serialize;

/// Render `value` as pretty JSON, falling back to its debug form.
pub fn json<T: Serialize + std::fmt::Debug>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
}

/// `m:ss`, or `-` when unknown
pub fn duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s.is_finite() && s >= 0.0 => {
            let total = s.round() as u64;
            format!("{}:{:02}", total / 60, total % 60)
        }
        _ => "-".to_string(),
    }
}

/// Date part of a backend timestamp.
///
/// Accepts RFC 3339 and the zone-less `2024-01-31T10:00:00[.fff]` form;
/// anything else is shown as-is.
pub fn date(timestamp: Option<&str>) -> String {
    let Some(raw) = timestamp else {
        return "-".to_string();
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

pub fn track_line(track: &Track) -> String {
    let mut line = format!(
        "{:>6}  {} - {}  [{}]",
        track.id.as_str(),
        track.artist,
        track.title,
        duration(track.duration)
    );
    if let Some(album) = &track.album {
        line.push_str(&format!("  ({album})"));
    }
    line
}

pub fn tracks(tracks: &[Track]) -> String {
    if tracks.is_empty() {
        return "No songs".to_string();
    }
    tracks.iter().map(track_line).collect::<Vec<_>>().join("\n")
}

pub fn user_line(user: &User) -> String {
    format!(
        "{:>6}  {:<16} {:<28} {:<5} {:<8} {}",
        user.id.as_str(),
        user.username,
        user.email,
        if user.is_admin() { "admin" } else { "user" },
        if user.is_active { "active" } else { "disabled" },
        date(user.created_at.as_deref()),
    )
}

/// Queue in play order, marking the track that is playing
pub fn play_order(current: Option<&Track>, order: &[Track]) -> String {
    order
        .iter()
        .map(|track| {
            let marker = if current.is_some_and(|c| c.id == track.id) {
                ">"
            } else {
                " "
            };
            format!("{marker} {}", track_line(track))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn users(users: &[User]) -> String {
    if users.is_empty() {
        return "No users".to_string();
    }
    users.iter().map(user_line).collect::<Vec<_>>().join("\n")
}

pub fn profile(user: &User) -> String {
    let mut out = format!(
        "Username: {}\nEmail:    {}\nRole:     {}\nSince:    {}",
        user.username,
        user.email,
        if user.is_admin() { "admin" } else { "user" },
        date(user.created_at.as_deref()),
    );
    if !user.is_active {
        out.push_str("\nAccount disabled");
    }
    out
}

pub fn dashboard(stats: &DashboardStats) -> String {
    format!(
        "Users:        {}\nActive users: {}\nSongs:        {}",
        stats.total_users, stats.active_users, stats.total_songs
    )
}

pub fn health(status: &HealthStatus) -> String {
    if status.0.is_empty() {
        return "No components reported".to_string();
    }
    status
        .0
        .iter()
        .map(|(component, state)| format!("{component:<16} {state}"))
        .collect::<Vec<_>>()
        .join("\n")
}
