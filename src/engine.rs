//! The boundary to the messaging engine.
//!
//! Everything the chat list reads or changes goes through [`Engine`]. Results
//! are never applied to a row directly; the engine publishes a fresh
//! snapshot and the row is rebuilt from it.

use async_trait::async_trait;
use listcore::types::{
    AppNotificationSettings, AvailableReactions, CachedPeerData, ChatListFilterPreferences,
    ChatListGroup, FolderData, MessageId, NotificationSoundList, PeerId, PeerMessageSound,
    PeerNotificationSettings, PeerPhoto, ReactionValue, StickerFile, UpdateMessageReaction,
};
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

/// Where a chat is pinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinLocation {
    Group(ChatListGroup),
    Filter(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TogglePinnedOutcome {
    Done,
    LimitExceeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChannelBoostStatus {
    pub level: u32,
    pub boosts: u32,
    pub next_level_boosts: Option<u32>,
}

#[async_trait]
pub trait Engine: Send + Sync {
    // ---- queries ----

    async fn peer_notification_settings(
        &self,
        peer_id: PeerId,
        thread_id: Option<i64>,
    ) -> EngineResult<Option<PeerNotificationSettings>>;

    async fn cached_peer_data(&self, peer_id: PeerId) -> EngineResult<Option<CachedPeerData>>;

    async fn chat_list_filters(&self) -> EngineResult<ChatListFilterPreferences>;

    async fn notification_sound_list(&self) -> EngineResult<Option<NotificationSoundList>>;

    async fn app_notification_settings(&self) -> EngineResult<AppNotificationSettings>;

    async fn channel_boost_status(&self, peer_id: PeerId) -> EngineResult<ChannelBoostStatus>;

    async fn available_reactions(&self) -> EngineResult<Option<AvailableReactions>>;

    /// Photos already in the local cache; never blocks.
    fn cached_peer_photos(&self, peer_id: PeerId) -> Vec<PeerPhoto>;

    async fn peer_photos(&self, peer_id: PeerId) -> EngineResult<Vec<PeerPhoto>>;

    // ---- mutations ----

    async fn toggle_item_pinned(
        &self,
        location: PinLocation,
        peer_id: PeerId,
    ) -> EngineResult<TogglePinnedOutcome>;

    /// Fails with [`EngineError::LimitReached`](crate::error::EngineError::LimitReached)
    /// when the forum is at its pinned-topic limit.
    async fn toggle_forum_topic_pinned(&self, peer_id: PeerId, thread_id: i64) -> EngineResult<()>;

    async fn toggle_peer_muted(&self, peer_id: PeerId, thread_id: Option<i64>) -> EngineResult<()>;

    async fn update_peer_mute_setting(
        &self,
        peer_id: PeerId,
        thread_id: Option<i64>,
        mute_interval: i32,
    ) -> EngineResult<()>;

    async fn update_peers_group(&self, peer_ids: Vec<PeerId>, group: ChatListGroup) -> EngineResult<()>;

    /// `None` flips the current mark.
    async fn toggle_unread_mark(&self, peer_ids: Vec<PeerId>, value: Option<bool>) -> EngineResult<()>;

    async fn remove_chat(&self, peer_id: PeerId, thread_id: Option<i64>) -> EngineResult<()>;

    async fn clear_history(
        &self,
        peer_id: PeerId,
        thread_id: Option<i64>,
        for_everyone: bool,
    ) -> EngineResult<()>;

    async fn set_forum_topic_closed(&self, peer_id: PeerId, thread_id: i64, closed: bool) -> EngineResult<()>;

    async fn update_peer_notification_sound(
        &self,
        peer_id: PeerId,
        thread_id: Option<i64>,
        sound: PeerMessageSound,
    ) -> EngineResult<()>;

    async fn update_chat_list_filter(&self, filter_id: i32, data: FolderData) -> EngineResult<()>;

    async fn update_peer_name_color_and_emoji(
        &self,
        peer_id: PeerId,
        name_color: i32,
        background_emoji_id: Option<i64>,
    ) -> EngineResult<()>;

    async fn update_name_color_and_emoji(
        &self,
        name_color: i32,
        background_emoji_id: Option<i64>,
    ) -> EngineResult<()>;

    async fn set_emoji_status(&self, file: Option<StickerFile>, expiration: Option<i32>) -> EngineResult<()>;

    async fn update_message_reactions(
        &self,
        message_id: MessageId,
        reactions: Vec<UpdateMessageReaction>,
        store_as_recently_used: bool,
    ) -> EngineResult<()>;

    async fn update_quick_reaction(&self, reaction: ReactionValue) -> EngineResult<()>;
}
