use serde::{Deserialize, Serialize};

/// How long a chat stays muted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuteDuration {
    OneHour,
    FourHours,
    EightHours,
    OneDay,
    ThreeDays,
    Forever,
}

impl MuteDuration {
    /// Choices offered by the mute picker, in display order.
    pub const PICKER: [MuteDuration; 6] = [
        MuteDuration::OneHour,
        MuteDuration::FourHours,
        MuteDuration::EightHours,
        MuteDuration::OneDay,
        MuteDuration::ThreeDays,
        MuteDuration::Forever,
    ];

    /// Shortcuts shown directly in the context menu.
    pub const QUICK: [MuteDuration; 3] = [
        MuteDuration::OneHour,
        MuteDuration::ThreeDays,
        MuteDuration::Forever,
    ];

    pub const PICKER_DEFAULT: MuteDuration = MuteDuration::Forever;

    /// Mute interval in seconds as the server expects it.
    pub fn seconds(self) -> i32 {
        const HOUR: i32 = 60 * 60;
        match self {
            MuteDuration::OneHour => HOUR,
            MuteDuration::FourHours => HOUR * 4,
            MuteDuration::EightHours => HOUR * 8,
            MuteDuration::OneDay => HOUR * 24,
            MuteDuration::ThreeDays => HOUR * 24 * 3,
            MuteDuration::Forever => i32::MAX,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MuteDuration::OneHour => "For 1 Hour",
            MuteDuration::FourHours => "For 4 Hours",
            MuteDuration::EightHours => "For 8 Hours",
            MuteDuration::OneDay => "For 1 Day",
            MuteDuration::ThreeDays => "For 3 Days",
            MuteDuration::Forever => "Forever",
        }
    }

    pub fn picker_index(self) -> usize {
        Self::PICKER.iter().position(|d| *d == self).unwrap_or(Self::PICKER.len() - 1)
    }
}
