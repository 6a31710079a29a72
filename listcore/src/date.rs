use chrono::{DateTime, TimeZone};
use std::fmt;

/// Date label shown at the top-right of a chat-list row.
///
/// Today's messages show the time, the last week the weekday, anything
/// older (or in the future) the full date.
pub fn format_message_list_date<Tz>(timestamp: i64, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let Some(date) = now.timezone().timestamp_opt(timestamp, 0).single() else {
        return String::new();
    };
    let today = now.date_naive();
    let day = date.date_naive();

    if day == today {
        date.format("%H:%M").to_string()
    } else if day < today && (today - day).num_days() < 7 {
        date.format("%a").to_string()
    } else {
        date.format("%d.%m.%y").to_string()
    }
}

/// Server timestamp converted to the local clock.
pub fn local_timestamp(server_timestamp: i32, time_difference: i32) -> i64 {
    i64::from(server_timestamp) - i64::from(time_difference)
}
