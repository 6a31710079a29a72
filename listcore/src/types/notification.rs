use serde::{Deserialize, Serialize};

/// Number of bundled "modern" tones shipped with the app.
pub const BUNDLED_MODERN_COUNT: i32 = 12;
/// Number of bundled "classic" tones shipped with the app.
pub const BUNDLED_CLASSIC_COUNT: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PeerMessageSound {
    #[default]
    Default,
    None,
    BundledModern {
        id: i32,
    },
    BundledClassic {
        id: i32,
    },
    Cloud {
        file_id: i64,
    },
}

impl PeerMessageSound {
    /// Whether anything audible would play.
    pub fn is_audible(&self) -> bool {
        !matches!(self, PeerMessageSound::Default | PeerMessageSound::None)
    }

    pub fn title(&self, list: Option<&NotificationSoundList>) -> String {
        match self {
            PeerMessageSound::Default => "Default".to_string(),
            PeerMessageSound::None => "None".to_string(),
            PeerMessageSound::BundledModern { id } => MODERN_TONES
                .get(*id as usize)
                .map(|s| s.to_string())
                .unwrap_or_else(|| format!("Tone {}", id)),
            PeerMessageSound::BundledClassic { id } => CLASSIC_TONES
                .get(*id as usize)
                .map(|s| s.to_string())
                .unwrap_or_else(|| format!("Classic {}", id)),
            PeerMessageSound::Cloud { file_id } => list
                .and_then(|l| l.sounds.iter().find(|s| s.file_id == *file_id))
                .map(|s| s.title.clone())
                .unwrap_or_else(|| "Cloud tone".to_string()),
        }
    }
}

const MODERN_TONES: [&str; BUNDLED_MODERN_COUNT as usize] = [
    "Note", "Aurora", "Bamboo", "Chord", "Circles", "Complete", "Hello", "Input", "Keys",
    "Popcorn", "Pulse", "Synth",
];

const CLASSIC_TONES: [&str; BUNDLED_CLASSIC_COUNT as usize] = [
    "Tri-tone", "Tremolo", "Alert", "Bell", "Calypso", "Chime", "Glass", "Telegraph",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSound {
    pub file_id: i64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NotificationSoundList {
    #[serde(default)]
    pub sounds: Vec<NotificationSound>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeerNotificationSettings {
    #[serde(default)]
    pub message_sound: PeerMessageSound,
    #[serde(default)]
    pub mute_until: Option<i32>,
}

/// App-wide notification preferences.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppNotificationSettings {
    #[serde(default)]
    pub tone: PeerMessageSound,
}

/// Cached full-peer data the menu cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CachedPeerData {
    Channel { can_delete_history: bool },
    Group,
    User,
}

impl CachedPeerData {
    pub fn can_delete_for_all(&self) -> Option<bool> {
        match self {
            CachedPeerData::Channel { can_delete_history } => Some(*can_delete_history),
            _ => None,
        }
    }
}
