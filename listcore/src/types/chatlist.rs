use serde::{Deserialize, Serialize};

use super::message::{Message, MessageIndex};
use super::peer::{PeerId, RenderedPeer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatListGroup {
    #[default]
    Root,
    Archive,
}

/// Window layout of the chat list column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    #[default]
    Normal,
    /// Avatars only.
    Minimized,
    /// Single column; selection is not highlighted.
    Single,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromoInfo {
    Psa {
        kind: String,
        #[serde(default)]
        message: Option<String>,
    },
    Proxy,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinnedType {
    Pinned,
    /// The bottom-most pinned chat.
    LastPinned,
    #[default]
    Unpinned,
    /// Sponsored or PSA entry injected by the server.
    Ad(PromoInfo),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiddenArchiveStatus {
    #[default]
    Normal,
    Collapsed,
    Hidden(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderData {
    #[serde(default)]
    pub include_peers: Vec<PeerId>,
    #[serde(default)]
    pub emoticon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatListFilter {
    #[default]
    AllChats,
    Filter {
        id: i32,
        title: String,
        data: FolderData,
    },
}

impl ChatListFilter {
    pub fn id(&self) -> Option<i32> {
        match self {
            ChatListFilter::AllChats => None,
            ChatListFilter::Filter { id, .. } => Some(*id),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ChatListFilter::AllChats => "All Chats",
            ChatListFilter::Filter { title, .. } => title,
        }
    }

    pub fn contains(&self, peer_id: PeerId) -> bool {
        match self {
            ChatListFilter::AllChats => true,
            ChatListFilter::Filter { data, .. } => data.include_peers.contains(&peer_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatListFilterPreferences {
    #[serde(default)]
    pub list: Vec<ChatListFilter>,
}

/// Stable identity of a chat-list row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiEntryId {
    ChatId {
        peer_id: PeerId,
        #[serde(default)]
        thread_id: Option<i64>,
    },
    GroupId(ChatListGroup),
    Forum(PeerId),
    Reveal,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReadCounters {
    #[serde(default)]
    pub count: i32,
    #[serde(default)]
    pub marked_unread: bool,
    #[serde(default)]
    pub is_muted: bool,
    /// Highest outgoing message id the other side has read.
    #[serde(default)]
    pub max_outgoing_read_id: i32,
}

impl ReadCounters {
    pub fn is_outgoing_message_read(&self, index: MessageIndex) -> bool {
        index.id.id <= self.max_outgoing_read_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub text: String,
    #[serde(default)]
    pub date: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadData {
    pub title: String,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub is_owned_by_me: bool,
    #[serde(default)]
    pub max_outgoing_read_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumTopicData {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub is_unread: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputActivity {
    Typing,
    RecordingVoice,
    UploadingFile,
    ChoosingSticker,
}

/// One chat inside the archive folder summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupItem {
    pub peer: RenderedPeer,
    #[serde(default)]
    pub is_unread: bool,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerPhoto {
    pub photo_id: i64,
    pub date: i32,
    #[serde(default)]
    pub has_video: bool,
}
