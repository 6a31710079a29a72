use listcore::MenuCapabilities;
use listcore::types::LayoutMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumLimits {
    pub dialog_filters_chats_limit_default: usize,
    pub dialog_filters_chats_limit_premium: usize,
}

impl Default for PremiumLimits {
    fn default() -> Self {
        Self {
            dialog_filters_chats_limit_default: 100,
            dialog_filters_chats_limit_premium: 200,
        }
    }
}

impl PremiumLimits {
    pub fn menu_capabilities(&self) -> MenuCapabilities {
        MenuCapabilities {
            folder_chats_limit_default: self.dialog_filters_chats_limit_default,
            folder_chats_limit_premium: self.dialog_filters_chats_limit_premium,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub layout: LayoutMode,
    pub premium_limits: PremiumLimits,
    /// Minimum boost level a channel needs to change its name color.
    pub channel_color_level_min: u32,
    /// Server minus local clock, seconds.
    pub time_difference: i32,
    pub settings_dir: PathBuf,
    #[serde(with = "duration_secs")]
    pub reactions_refresh: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            layout: LayoutMode::Normal,
            premium_limits: PremiumLimits::default(),
            channel_color_level_min: 1,
            time_difference: 0,
            settings_dir: PathBuf::from("settings"),
            reactions_refresh: Duration::from_secs(5),
        }
    }
}

impl ClientConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ClientConfig::from_json(r#"{"layout":"minimized","reactions_refresh":0.5}"#).unwrap();
        assert_eq!(config.layout, LayoutMode::Minimized);
        assert_eq!(config.reactions_refresh, Duration::from_millis(500));
        assert_eq!(config.channel_color_level_min, 1);
        assert_eq!(config.premium_limits.dialog_filters_chats_limit_premium, 200);
    }
}
