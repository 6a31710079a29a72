#![allow(dead_code)]

use async_trait::async_trait;
use chatlist::dispatch::{ConfirmOutcome, ConfirmRequest, Destination, PremiumLimitKind, UiHost};
use chatlist::engine::{ChannelBoostStatus, Engine, PinLocation, TogglePinnedOutcome};
use chatlist::error::{EngineError, EngineResult};
use chatlist::mute::MuteDuration;
use chatlist::types::{
    AppNotificationSettings, AvailableReactions, CachedPeerData, ChatListFilterPreferences,
    ChatListGroup, FolderData, MessageId, NotificationSoundList, PeerId, PeerMessageSound,
    PeerNotificationSettings, PeerPhoto, ReactionValue, StickerFile, UpdateMessageReaction,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Counts how many in-flight engine futures were dropped before finishing.
pub struct DropProbe(Arc<AtomicUsize>);

impl Drop for DropProbe {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    TogglePinned(PinLocation, PeerId),
    ToggleTopicPinned(PeerId, i64),
    ToggleMuted(PeerId, Option<i64>),
    MuteSetting(PeerId, Option<i64>, i32),
    PeersGroup(Vec<PeerId>, ChatListGroup),
    UnreadMark(Vec<PeerId>, Option<bool>),
    RemoveChat(PeerId, Option<i64>),
    ClearHistory(PeerId, Option<i64>, bool),
    TopicClosed(PeerId, i64, bool),
    Sound(PeerId, Option<i64>, PeerMessageSound),
    UpdateFilter(i32, FolderData),
    PeerColor(PeerId, i32, Option<i64>),
    AccountColor(i32, Option<i64>),
    EmojiStatus(Option<StickerFile>, Option<i32>),
    Reactions(MessageId, Vec<UpdateMessageReaction>, bool),
    QuickReaction(ReactionValue),
}

#[derive(Default)]
pub struct MockEngine {
    pub calls: Mutex<Vec<Call>>,
    pub pin_outcome: Mutex<Option<TogglePinnedOutcome>>,
    pub topic_pin_error: Mutex<Option<EngineError>>,
    pub filters: Mutex<ChatListFilterPreferences>,
    pub cached_peer_data: Mutex<Option<CachedPeerData>>,
    pub app_tone: Mutex<PeerMessageSound>,
    pub boost_level: Mutex<u32>,
    pub available_reactions: Mutex<Option<AvailableReactions>>,
    pub reaction_fetches: AtomicUsize,
    pub cached_photos: Mutex<Vec<PeerPhoto>>,
    pub photos: Mutex<Vec<PeerPhoto>>,
    pub hang_photos: AtomicBool,
    pub hang_reactions: AtomicBool,
    pub dropped_requests: Arc<AtomicUsize>,
}

impl MockEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn dropped(&self) -> usize {
        self.dropped_requests.load(Ordering::SeqCst)
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn probe(&self) -> DropProbe {
        DropProbe(self.dropped_requests.clone())
    }
}

#[async_trait]
impl Engine for MockEngine {
    async fn peer_notification_settings(
        &self,
        _peer_id: PeerId,
        _thread_id: Option<i64>,
    ) -> EngineResult<Option<PeerNotificationSettings>> {
        Ok(None)
    }

    async fn cached_peer_data(&self, _peer_id: PeerId) -> EngineResult<Option<CachedPeerData>> {
        Ok(self.cached_peer_data.lock().unwrap().clone())
    }

    async fn chat_list_filters(&self) -> EngineResult<ChatListFilterPreferences> {
        Ok(self.filters.lock().unwrap().clone())
    }

    async fn notification_sound_list(&self) -> EngineResult<Option<NotificationSoundList>> {
        Err(EngineError::Network("offline".to_string()))
    }

    async fn app_notification_settings(&self) -> EngineResult<AppNotificationSettings> {
        Ok(AppNotificationSettings {
            tone: *self.app_tone.lock().unwrap(),
        })
    }

    async fn channel_boost_status(&self, _peer_id: PeerId) -> EngineResult<ChannelBoostStatus> {
        Ok(ChannelBoostStatus {
            level: *self.boost_level.lock().unwrap(),
            ..Default::default()
        })
    }

    async fn available_reactions(&self) -> EngineResult<Option<AvailableReactions>> {
        self.reaction_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.available_reactions.lock().unwrap().clone())
    }

    fn cached_peer_photos(&self, _peer_id: PeerId) -> Vec<PeerPhoto> {
        self.cached_photos.lock().unwrap().clone()
    }

    async fn peer_photos(&self, _peer_id: PeerId) -> EngineResult<Vec<PeerPhoto>> {
        let probe = self.probe();
        if self.hang_photos.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        let photos = self.photos.lock().unwrap().clone();
        std::mem::forget(probe);
        Ok(photos)
    }

    async fn toggle_item_pinned(
        &self,
        location: PinLocation,
        peer_id: PeerId,
    ) -> EngineResult<TogglePinnedOutcome> {
        self.record(Call::TogglePinned(location, peer_id));
        let outcome = *self.pin_outcome.lock().unwrap();
        Ok(outcome.unwrap_or(TogglePinnedOutcome::Done))
    }

    async fn toggle_forum_topic_pinned(&self, peer_id: PeerId, thread_id: i64) -> EngineResult<()> {
        self.record(Call::ToggleTopicPinned(peer_id, thread_id));
        let error = self.topic_pin_error.lock().unwrap().clone();
        error.map_or(Ok(()), Err)
    }

    async fn toggle_peer_muted(&self, peer_id: PeerId, thread_id: Option<i64>) -> EngineResult<()> {
        self.record(Call::ToggleMuted(peer_id, thread_id));
        Ok(())
    }

    async fn update_peer_mute_setting(
        &self,
        peer_id: PeerId,
        thread_id: Option<i64>,
        mute_interval: i32,
    ) -> EngineResult<()> {
        self.record(Call::MuteSetting(peer_id, thread_id, mute_interval));
        Ok(())
    }

    async fn update_peers_group(&self, peer_ids: Vec<PeerId>, group: ChatListGroup) -> EngineResult<()> {
        self.record(Call::PeersGroup(peer_ids, group));
        Ok(())
    }

    async fn toggle_unread_mark(&self, peer_ids: Vec<PeerId>, value: Option<bool>) -> EngineResult<()> {
        self.record(Call::UnreadMark(peer_ids, value));
        Ok(())
    }

    async fn remove_chat(&self, peer_id: PeerId, thread_id: Option<i64>) -> EngineResult<()> {
        self.record(Call::RemoveChat(peer_id, thread_id));
        Ok(())
    }

    async fn clear_history(
        &self,
        peer_id: PeerId,
        thread_id: Option<i64>,
        for_everyone: bool,
    ) -> EngineResult<()> {
        self.record(Call::ClearHistory(peer_id, thread_id, for_everyone));
        Ok(())
    }

    async fn set_forum_topic_closed(&self, peer_id: PeerId, thread_id: i64, closed: bool) -> EngineResult<()> {
        self.record(Call::TopicClosed(peer_id, thread_id, closed));
        Ok(())
    }

    async fn update_peer_notification_sound(
        &self,
        peer_id: PeerId,
        thread_id: Option<i64>,
        sound: PeerMessageSound,
    ) -> EngineResult<()> {
        self.record(Call::Sound(peer_id, thread_id, sound));
        Ok(())
    }

    async fn update_chat_list_filter(&self, filter_id: i32, data: FolderData) -> EngineResult<()> {
        self.record(Call::UpdateFilter(filter_id, data));
        Ok(())
    }

    async fn update_peer_name_color_and_emoji(
        &self,
        peer_id: PeerId,
        name_color: i32,
        background_emoji_id: Option<i64>,
    ) -> EngineResult<()> {
        self.record(Call::PeerColor(peer_id, name_color, background_emoji_id));
        Ok(())
    }

    async fn update_name_color_and_emoji(
        &self,
        name_color: i32,
        background_emoji_id: Option<i64>,
    ) -> EngineResult<()> {
        self.record(Call::AccountColor(name_color, background_emoji_id));
        Ok(())
    }

    async fn set_emoji_status(&self, file: Option<StickerFile>, expiration: Option<i32>) -> EngineResult<()> {
        self.record(Call::EmojiStatus(file, expiration));
        Ok(())
    }

    async fn update_message_reactions(
        &self,
        message_id: MessageId,
        reactions: Vec<UpdateMessageReaction>,
        store_as_recently_used: bool,
    ) -> EngineResult<()> {
        let probe = self.probe();
        if self.hang_reactions.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        std::mem::forget(probe);
        self.record(Call::Reactions(message_id, reactions, store_as_recently_used));
        Ok(())
    }

    async fn update_quick_reaction(&self, reaction: ReactionValue) -> EngineResult<()> {
        self.record(Call::QuickReaction(reaction));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Alert(String),
    Confirm(ConfirmRequest),
    PickMute(MuteDuration),
    PremiumLimit(PremiumLimitKind),
    BoostPrompt(PeerId, u32, u32),
    PremiumOffer,
    Toast(String),
    Navigate(Destination),
    AnimateArchive(PeerId),
    HidePromo(Option<PeerId>),
    ArchiveCollapsed(bool),
    PlaySound(PeerMessageSound),
}

pub struct MockHost {
    pub calls: Mutex<Vec<HostCall>>,
    pub mute_choice: Mutex<Option<MuteDuration>>,
    pub confirm_outcome: Mutex<ConfirmOutcome>,
}

impl MockHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            mute_choice: Mutex::new(None),
            confirm_outcome: Mutex::new(ConfirmOutcome::Ok { checked: false }),
        })
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl UiHost for MockHost {
    async fn alert(&self, text: String) {
        self.record(HostCall::Alert(text));
    }

    async fn confirm(&self, request: ConfirmRequest) -> ConfirmOutcome {
        self.record(HostCall::Confirm(request));
        *self.confirm_outcome.lock().unwrap()
    }

    async fn pick_mute_duration(
        &self,
        _options: &[MuteDuration],
        preselected: MuteDuration,
    ) -> Option<MuteDuration> {
        self.record(HostCall::PickMute(preselected));
        *self.mute_choice.lock().unwrap()
    }

    async fn show_premium_limit(&self, kind: PremiumLimitKind) {
        self.record(HostCall::PremiumLimit(kind));
    }

    async fn show_boost_prompt(&self, peer_id: PeerId, status: ChannelBoostStatus, required_level: u32) {
        self.record(HostCall::BoostPrompt(peer_id, status.level, required_level));
    }

    async fn show_premium_offer(&self) {
        self.record(HostCall::PremiumOffer);
    }

    async fn toast(&self, text: String) {
        self.record(HostCall::Toast(text));
    }

    async fn navigate(&self, destination: Destination) {
        self.record(HostCall::Navigate(destination));
    }

    async fn animate_archive(&self, peer_id: PeerId) {
        self.record(HostCall::AnimateArchive(peer_id));
    }

    async fn hide_promo(&self, peer_id: Option<PeerId>) {
        self.record(HostCall::HidePromo(peer_id));
    }

    async fn set_archive_collapsed(&self, collapsed: bool) {
        self.record(HostCall::ArchiveCollapsed(collapsed));
    }

    async fn play_sound(&self, sound: PeerMessageSound) {
        self.record(HostCall::PlaySound(sound));
    }
}

/// Polls `f` until it holds or a second passes.
pub async fn eventually(mut f: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if f() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    f()
}
