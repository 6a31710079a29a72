use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PresenceStatus {
    /// Online until the given server timestamp.
    Online { until: i32 },
    Recently,
    LastWeek,
    LastMonth,
    LastSeen { at: i32 },
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presence {
    pub status: PresenceStatus,
}

/// Presence as seen from the local clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativePresence {
    Online,
    Recently,
    LastSeen(i32),
    Offline,
}

impl Presence {
    pub fn online_until(until: i32) -> Self {
        Self {
            status: PresenceStatus::Online { until },
        }
    }

    /// `now` is the local unix time; `time_difference` the server offset.
    pub fn relative_status(&self, time_difference: i32, now: i32) -> RelativePresence {
        let server_now = now.saturating_add(time_difference);
        match self.status {
            PresenceStatus::Online { until } if until > server_now => RelativePresence::Online,
            PresenceStatus::Online { until } => RelativePresence::LastSeen(until),
            PresenceStatus::LastSeen { at } => RelativePresence::LastSeen(at),
            PresenceStatus::Recently => RelativePresence::Recently,
            PresenceStatus::LastWeek | PresenceStatus::LastMonth | PresenceStatus::Hidden => {
                RelativePresence::Offline
            }
        }
    }

    /// Seconds until an online status lapses, if it is currently online.
    pub fn seconds_until_offline(&self, time_difference: i32, now: i32) -> Option<i32> {
        match self.status {
            PresenceStatus::Online { until } => {
                let left = until.saturating_sub(now.saturating_add(time_difference));
                (left > 0).then_some(left)
            }
            _ => None,
        }
    }
}
