use listcore::types::Presence;
use std::time::Duration;

/// Time until an online presence lapses, measured from the local clock.
///
/// The extra second lets the server-side `until` actually pass before the
/// row is rebuilt as offline.
pub fn offline_delay(presence: &Presence, time_difference: i32, now: i32) -> Option<Duration> {
    presence
        .seconds_until_offline(time_difference, now)
        .map(|left| Duration::from_secs(left as u64 + 1))
}
