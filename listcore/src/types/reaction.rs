use serde::{Deserialize, Serialize};

use super::message::MessageId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReactionValue {
    Builtin { emoji: String },
    CustomEmoji { file_id: i64 },
}

impl ReactionValue {
    pub fn builtin(emoji: impl Into<String>) -> Self {
        ReactionValue::Builtin {
            emoji: emoji.into(),
        }
    }
}

/// One reaction the user is applying to a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpdateMessageReaction {
    pub value: ReactionValue,
    #[serde(default)]
    pub is_large: bool,
}

impl UpdateMessageReaction {
    pub fn new(value: ReactionValue) -> Self {
        Self {
            value,
            is_large: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableReaction {
    pub value: ReactionValue,
    pub title: String,
    #[serde(default)]
    pub is_premium: bool,
}

/// Server catalogue of reactions; `hash` changes with the content.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AvailableReactions {
    pub hash: i32,
    #[serde(default)]
    pub reactions: Vec<AvailableReaction>,
}

/// Screen rectangle an animation starts from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// The most recent reaction the user applied, kept for the send animation.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractiveReaction {
    pub message_id: MessageId,
    pub values: Vec<UpdateMessageReaction>,
    pub from_rect: Option<ScreenRect>,
}
