//! Timestamp formatting for the views.

use chrono::{DateTime, NaiveDate, Utc};

/// Coarse age of a timestamp: "Just now", "{h}h ago" or "{d}d ago".
/// Hours are floored; 24 hours and up roll over to whole days.
/// Timestamps ahead of `now` read as "Just now".
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - timestamp).num_hours();
    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        format!("{}d ago", hours / 24)
    }
}

/// "December 27, 2024"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// "Dec 27"
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// "Dec 27, 08:30 AM"
pub fn short_date_time(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %I:%M %p").to_string()
}
