use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier namespaces a peer id can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeerNamespace {
    CloudUser,
    CloudGroup,
    CloudChannel,
    SecretChat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeerId {
    pub namespace: PeerNamespace,
    pub id: i64,
}

/// The official service-notifications account.
pub const SERVICE_NOTIFICATIONS_ID: i64 = 777000;
/// The "Replies" pseudo-chat.
pub const REPLIES_ID: i64 = 1271266957;

impl PeerId {
    pub const fn new(namespace: PeerNamespace, id: i64) -> Self {
        Self { namespace, id }
    }

    pub const fn user(id: i64) -> Self {
        Self::new(PeerNamespace::CloudUser, id)
    }

    pub const fn group(id: i64) -> Self {
        Self::new(PeerNamespace::CloudGroup, id)
    }

    pub const fn channel(id: i64) -> Self {
        Self::new(PeerNamespace::CloudChannel, id)
    }

    pub const fn secret(id: i64) -> Self {
        Self::new(PeerNamespace::SecretChat, id)
    }

    pub fn service_notifications() -> Self {
        Self::user(SERVICE_NOTIFICATIONS_ID)
    }

    pub fn replies() -> Self {
        Self::user(REPLIES_ID)
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = match self.namespace {
            PeerNamespace::CloudUser => "u",
            PeerNamespace::CloudGroup => "g",
            PeerNamespace::CloudChannel => "c",
            PeerNamespace::SecretChat => "s",
        };
        write!(f, "{}{}", ns, self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Broadcast,
    Group,
}

/// Admin rights relevant to the chat list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChannelPermissions {
    #[serde(default)]
    pub send_messages: bool,
    #[serde(default)]
    pub pin_messages: bool,
    #[serde(default)]
    pub manage_topics: bool,
    #[serde(default)]
    pub change_info: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiStatus {
    pub file_id: i64,
    pub until: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: PeerId,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub is_support: bool,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_scam: bool,
    #[serde(default)]
    pub is_fake: bool,
    #[serde(default)]
    pub has_video_avatar: bool,
    #[serde(default)]
    pub emoji_status: Option<EmojiStatus>,
    #[serde(default)]
    pub name_color: Option<i32>,
    #[serde(default)]
    pub background_emoji_id: Option<i64>,
}

impl User {
    pub fn new(id: PeerId, first_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: None,
            is_bot: false,
            is_support: false,
            is_premium: false,
            is_verified: false,
            is_scam: false,
            is_fake: false,
            has_video_avatar: false,
            emoji_status: None,
            name_color: None,
            background_emoji_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: PeerId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: PeerId,
    pub title: String,
    pub kind: ChannelKind,
    #[serde(default)]
    pub is_forum: bool,
    #[serde(default)]
    pub is_creator: bool,
    #[serde(default)]
    pub admin: Option<ChannelPermissions>,
    #[serde(default)]
    pub address_name: Option<String>,
    #[serde(default)]
    pub has_geo: bool,
    #[serde(default)]
    pub has_active_voice_chat: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_scam: bool,
    #[serde(default)]
    pub is_fake: bool,
    #[serde(default)]
    pub name_color: Option<i32>,
    #[serde(default)]
    pub background_emoji_id: Option<i64>,
    /// Rights granted to every member when the user is not an admin.
    #[serde(default)]
    pub default_send_messages: bool,
}

impl Channel {
    pub fn new(id: PeerId, title: impl Into<String>, kind: ChannelKind) -> Self {
        Self {
            id,
            title: title.into(),
            kind,
            is_forum: false,
            is_creator: false,
            admin: None,
            address_name: None,
            has_geo: false,
            has_active_voice_chat: false,
            is_verified: false,
            is_scam: false,
            is_fake: false,
            name_color: None,
            background_emoji_id: None,
            default_send_messages: true,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.is_creator || self.admin.is_some()
    }

    pub fn has_send_permission(&self) -> bool {
        match self.kind {
            ChannelKind::Broadcast => {
                self.is_creator || self.admin.is_some_and(|a| a.send_messages)
            }
            ChannelKind::Group => {
                self.is_creator || self.admin.is_some() || self.default_send_messages
            }
        }
    }

    pub fn has_pin_permission(&self) -> bool {
        self.is_creator || self.admin.is_some_and(|a| a.pin_messages)
    }

    pub fn has_manage_topics_permission(&self) -> bool {
        self.is_creator || self.admin.is_some_and(|a| a.manage_topics)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretChat {
    pub id: PeerId,
    pub regular_peer_id: PeerId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Peer {
    User(User),
    Group(Group),
    Channel(Channel),
    SecretChat(SecretChat),
}

impl Peer {
    pub fn id(&self) -> PeerId {
        match self {
            Peer::User(u) => u.id,
            Peer::Group(g) => g.id,
            Peer::Channel(c) => c.id,
            Peer::SecretChat(s) => s.id,
        }
    }

    pub fn display_title(&self) -> String {
        match self {
            Peer::User(u) => match &u.last_name {
                Some(last) if !last.is_empty() => format!("{} {}", u.first_name, last),
                _ => u.first_name.clone(),
            },
            Peer::Group(g) => g.title.clone(),
            Peer::Channel(c) => c.title.clone(),
            Peer::SecretChat(_) => String::new(),
        }
    }

    /// First name for users, full title otherwise.
    pub fn compact_display_title(&self) -> String {
        match self {
            Peer::User(u) if !u.first_name.is_empty() => u.first_name.clone(),
            _ => self.display_title(),
        }
    }

    pub fn display_letters(&self) -> String {
        self.display_title()
            .split_whitespace()
            .take(2)
            .filter_map(|w| w.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn as_channel(&self) -> Option<&Channel> {
        match self {
            Peer::Channel(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_user(&self) -> Option<&User> {
        match self {
            Peer::User(u) => Some(u),
            _ => None,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Peer::User(_))
    }

    pub fn is_channel(&self) -> bool {
        matches!(self, Peer::Channel(_))
    }

    /// Broadcast channels only; supergroups are channels too but read
    /// like groups.
    pub fn is_broadcast(&self) -> bool {
        self.as_channel()
            .is_some_and(|c| c.kind == ChannelKind::Broadcast)
    }

    pub fn is_secret_chat(&self) -> bool {
        matches!(self, Peer::SecretChat(_))
    }

    pub fn is_forum(&self) -> bool {
        self.as_channel().is_some_and(|c| c.is_forum)
    }

    pub fn is_verified(&self) -> bool {
        match self {
            Peer::User(u) => u.is_verified,
            Peer::Channel(c) => c.is_verified,
            _ => false,
        }
    }

    pub fn is_premium(&self) -> bool {
        self.as_user().is_some_and(|u| u.is_premium)
    }

    pub fn is_scam(&self) -> bool {
        match self {
            Peer::User(u) => u.is_scam,
            Peer::Channel(c) => c.is_scam,
            _ => false,
        }
    }

    pub fn is_fake(&self) -> bool {
        match self {
            Peer::User(u) => u.is_fake,
            Peer::Channel(c) => c.is_fake,
            _ => false,
        }
    }

    pub fn has_video_avatar(&self) -> bool {
        self.as_user().is_some_and(|u| u.has_video_avatar)
    }

    pub fn emoji_status(&self) -> Option<&EmojiStatus> {
        self.as_user().and_then(|u| u.emoji_status.as_ref())
    }

    pub fn name_color(&self) -> Option<i32> {
        match self {
            Peer::User(u) => u.name_color,
            Peer::Channel(c) => c.name_color,
            _ => None,
        }
    }

    pub fn background_emoji_id(&self) -> Option<i64> {
        match self {
            Peer::User(u) => u.background_emoji_id,
            Peer::Channel(c) => c.background_emoji_id,
            _ => None,
        }
    }
}

/// A chat-list peer together with the peers it references, e.g. a secret
/// chat and the user on the other side.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderedPeer {
    pub peer_id: Option<PeerId>,
    #[serde(default)]
    pub peers: Vec<Peer>,
}

impl RenderedPeer {
    pub fn new(peer: Peer) -> Self {
        Self {
            peer_id: Some(peer.id()),
            peers: vec![peer],
        }
    }

    pub fn secret(chat: SecretChat, user: Peer) -> Self {
        Self {
            peer_id: Some(chat.id),
            peers: vec![Peer::SecretChat(chat), user],
        }
    }

    pub fn get(&self, id: PeerId) -> Option<&Peer> {
        self.peers.iter().find(|p| p.id() == id)
    }

    pub fn peer(&self) -> Option<&Peer> {
        self.peer_id.and_then(|id| self.get(id))
    }

    /// The peer whose name and avatar represent the chat.
    pub fn chat_main_peer(&self) -> Option<&Peer> {
        match self.peer()? {
            Peer::SecretChat(s) => self.get(s.regular_peer_id),
            other => Some(other),
        }
    }

    pub fn is_secret(&self) -> bool {
        self.peer().is_some_and(Peer::is_secret_chat)
    }
}
