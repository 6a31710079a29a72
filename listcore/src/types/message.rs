use serde::{Deserialize, Serialize};

use super::peer::{Peer, PeerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId {
    pub peer_id: PeerId,
    #[serde(default)]
    pub namespace: i32,
    pub id: i32,
}

impl MessageId {
    pub fn new(peer_id: PeerId, id: i32) -> Self {
        Self {
            peer_id,
            namespace: 0,
            id,
        }
    }
}

/// Position of a message in the history, used for read-state checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageIndex {
    pub id: MessageId,
    pub timestamp: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageFlags {
    #[serde(default)]
    pub incoming: bool,
    #[serde(default)]
    pub unsent: bool,
    #[serde(default)]
    pub failed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Video,
    InstantVideo,
    Sticker,
    AnimatedSticker,
    Voice,
    Audio,
    Gif,
    Document,
}

/// Service messages shown instead of a text body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionKind {
    GroupCreated { title: String },
    MembersAdded,
    MemberJoined,
    MemberLeft,
    TitleChanged { title: String },
    PhotoChanged,
    PinnedMessage,
    TopicCreated { title: String },
    PhoneCall { missed: bool },
    Custom { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Media {
    Image {
        #[serde(default)]
        has_representation: bool,
    },
    File {
        kind: FileKind,
        #[serde(default)]
        has_dimensions: bool,
        #[serde(default)]
        probably_sticker: bool,
        #[serde(default)]
        file_name: Option<String>,
    },
    Action(ActionKind),
    Poll {
        question: String,
    },
    Location,
    Contact,
    Other,
}

impl Media {
    pub fn is_action(&self) -> bool {
        matches!(self, Media::Action(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardInfo {
    #[serde(default)]
    pub author: Option<Peer>,
    #[serde(default)]
    pub author_signature: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub timestamp: i32,
    #[serde(default)]
    pub flags: MessageFlags,
    #[serde(default)]
    pub author: Option<Peer>,
    #[serde(default)]
    pub forward_info: Option<ForwardInfo>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub media: Vec<Media>,
    #[serde(default)]
    pub contains_secret_media: bool,
    #[serde(default)]
    pub is_imported: bool,
}

impl Message {
    pub fn new(id: MessageId, timestamp: i32, text: impl Into<String>) -> Self {
        Self {
            id,
            timestamp,
            flags: MessageFlags::default(),
            author: None,
            forward_info: None,
            text: text.into(),
            media: Vec::new(),
            contains_secret_media: false,
            is_imported: false,
        }
    }

    pub fn index(&self) -> MessageIndex {
        MessageIndex {
            id: self.id,
            timestamp: self.timestamp,
        }
    }

    /// The media that decides how the message is summarised.
    pub fn effective_media(&self) -> Option<&Media> {
        self.media.first()
    }

    pub fn is_service(&self) -> bool {
        self.effective_media().is_some_and(Media::is_action)
    }
}
