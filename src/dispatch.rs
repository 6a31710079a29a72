//! Turns menu actions into engine requests.
//!
//! Every action runs as one spawned task. Results are never written back to
//! the row; the engine republishes state and the list rebuilds from it.

use async_trait::async_trait;
use listcore::menu::folder_accepts;
use listcore::mute::MuteDuration;
use listcore::types::{ChatListFilter, ChatListGroup, Peer, PeerId, PeerMessageSound};
use listcore::{MenuAction, RowSnapshot};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::config::ClientConfig;
use crate::engine::{ChannelBoostStatus, Engine, PinLocation, TogglePinnedOutcome};
use crate::error::{EngineError, EngineResult};

/// Which plan limit a prompt is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PremiumLimitKind {
    Pin,
    PinInArchive,
    PinInFolders(i32),
    ChatInFolders,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    FolderSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub text: String,
    pub ok_label: String,
    pub third_label: Option<String>,
    /// Optional checkbox shown under the text.
    pub checkbox: Option<String>,
}

impl ConfirmRequest {
    pub fn new(text: impl Into<String>, ok_label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ok_label: ok_label.into(),
            third_label: None,
            checkbox: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Ok { checked: bool },
    Third,
    Cancel,
}

/// The UI surface actions are allowed to touch.
#[async_trait]
pub trait UiHost: Send + Sync {
    async fn alert(&self, text: String);
    async fn confirm(&self, request: ConfirmRequest) -> ConfirmOutcome;
    /// `None` when the picker was dismissed.
    async fn pick_mute_duration(
        &self,
        options: &[MuteDuration],
        preselected: MuteDuration,
    ) -> Option<MuteDuration>;
    async fn show_premium_limit(&self, kind: PremiumLimitKind);
    async fn show_boost_prompt(&self, peer_id: PeerId, status: ChannelBoostStatus, required_level: u32);
    async fn show_premium_offer(&self);
    async fn toast(&self, text: String);
    async fn navigate(&self, destination: Destination);
    async fn animate_archive(&self, peer_id: PeerId);
    async fn hide_promo(&self, peer_id: Option<PeerId>);
    async fn set_archive_collapsed(&self, collapsed: bool);
    async fn play_sound(&self, sound: PeerMessageSound);
}

#[derive(Clone)]
pub struct ActionDispatcher {
    engine: Arc<dyn Engine>,
    host: Arc<dyn UiHost>,
    config: Arc<ClientConfig>,
}

impl ActionDispatcher {
    pub fn new(engine: Arc<dyn Engine>, host: Arc<dyn UiHost>, config: Arc<ClientConfig>) -> Self {
        Self {
            engine,
            host,
            config,
        }
    }

    /// Starts `action` for `row`. Returns `None` when there is nothing to
    /// act on.
    pub fn dispatch(&self, row: &RowSnapshot, action: MenuAction) -> Option<JoinHandle<()>> {
        let host = self.host.clone();
        match action {
            MenuAction::ExpandArchive => {
                return Some(tokio::spawn(async move { host.set_archive_collapsed(false).await }));
            }
            MenuAction::CollapseArchive => {
                return Some(tokio::spawn(async move { host.set_archive_collapsed(true).await }));
            }
            MenuAction::HidePromo => {
                let peer_id = row.peer_id;
                return Some(tokio::spawn(async move { host.hide_promo(peer_id).await }));
            }
            _ => {}
        }

        let Some(peer_id) = row.peer_id else {
            debug!(target: "ChatList/Dispatch", "Ignoring {:?}: row has no peer", action);
            return None;
        };
        let topic_only = matches!(action, MenuAction::ToggleTopicClosed);
        let chat_only = matches!(
            action,
            MenuAction::ToggleArchive | MenuAction::MarkUnread | MenuAction::MarkRead
        );
        if (topic_only && !row.is_topic()) || (chat_only && row.is_topic()) {
            debug!(target: "ChatList/Dispatch", "Ignoring {:?} for this row mode", action);
            return None;
        }

        let this = self.clone();
        let row = row.clone();
        Some(tokio::spawn(async move {
            debug!(target: "ChatList/Dispatch", "Running {:?} for {:?}", action, peer_id);
            if let Err(e) = this.run(&row, peer_id, action.clone()).await {
                warn!(target: "ChatList/Dispatch", "{:?} failed for {:?}: {e}", action, peer_id);
            }
        }))
    }

    async fn run(&self, row: &RowSnapshot, peer_id: PeerId, action: MenuAction) -> EngineResult<()> {
        let thread_id = row.thread_id;
        match action {
            MenuAction::TogglePin => match thread_id {
                Some(thread_id) => self.toggle_topic_pin(row, peer_id, thread_id).await,
                None => self.toggle_chat_pin(row, peer_id).await,
            },
            MenuAction::ToggleMute => self.toggle_mute(row, peer_id).await,
            MenuAction::Mute { duration } => {
                self.engine
                    .update_peer_mute_setting(peer_id, thread_id, duration.seconds())
                    .await
            }
            MenuAction::ToggleArchive => {
                if row.group_id == ChatListGroup::Root {
                    self.host.animate_archive(peer_id).await;
                    self.engine
                        .update_peers_group(vec![peer_id], ChatListGroup::Archive)
                        .await
                } else {
                    self.engine
                        .update_peers_group(vec![peer_id], ChatListGroup::Root)
                        .await
                }
            }
            MenuAction::MarkUnread => self.engine.toggle_unread_mark(vec![peer_id], Some(true)).await,
            MenuAction::MarkRead => self.engine.toggle_unread_mark(vec![peer_id], Some(false)).await,
            MenuAction::ToggleTopicClosed => match thread_id {
                Some(thread_id) => {
                    self.engine
                        .set_forum_topic_closed(peer_id, thread_id, !row.is_closed_topic)
                        .await
                }
                None => Ok(()),
            },
            MenuAction::Delete => self.delete(row, peer_id).await,
            MenuAction::ClearHistory { can_delete_for_all } => {
                self.clear_history(peer_id, thread_id, can_delete_for_all).await
            }
            MenuAction::AddToFolder { filter_id } => self.toggle_folder(row, peer_id, filter_id).await,
            MenuAction::SetSound { sound } => {
                self.preview(sound).await;
                self.engine
                    .update_peer_notification_sound(peer_id, thread_id, sound)
                    .await
            }
            MenuAction::PreviewSound { sound } => {
                self.preview(sound).await;
                Ok(())
            }
            MenuAction::HidePromo | MenuAction::ExpandArchive | MenuAction::CollapseArchive => Ok(()),
        }
    }

    /// Unread toggle for the row's chat. Topics have no unread mark.
    pub fn toggle_unread(&self, row: &RowSnapshot) -> Option<JoinHandle<()>> {
        let peer_id = row.peer_id?;
        if row.is_topic() {
            return None;
        }
        let engine = self.engine.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = engine.toggle_unread_mark(vec![peer_id], None).await {
                warn!(target: "ChatList/Dispatch", "Failed to toggle unread for {:?}: {e}", peer_id);
            }
        }))
    }

    async fn toggle_topic_pin(&self, row: &RowSnapshot, peer_id: PeerId, thread_id: i64) -> EngineResult<()> {
        match self.engine.toggle_forum_topic_pinned(peer_id, thread_id).await {
            Ok(()) => Ok(()),
            Err(EngineError::LimitReached { count }) => {
                if row.is_premium_account {
                    self.host
                        .alert(format!("Sorry, you can't pin more than {count} topics to the top."))
                        .await;
                } else {
                    self.host.show_premium_limit(PremiumLimitKind::Pin).await;
                }
                Ok(())
            }
            Err(e) => {
                self.host.alert("An error occurred.".to_string()).await;
                Err(e)
            }
        }
    }

    async fn toggle_chat_pin(&self, row: &RowSnapshot, peer_id: PeerId) -> EngineResult<()> {
        let location = match &row.filter {
            ChatListFilter::Filter { id, .. } => PinLocation::Filter(*id),
            ChatListFilter::AllChats => PinLocation::Group(row.associated_group),
        };
        match self.engine.toggle_item_pinned(location, peer_id).await? {
            TogglePinnedOutcome::Done => Ok(()),
            TogglePinnedOutcome::LimitExceeded if row.is_premium_account => {
                let mut request = ConfirmRequest::new(
                    "Sorry, you can't pin any more chats to the top. Unpin some that are currently pinned or use folders.",
                    "OK",
                );
                request.third_label = Some("Set Up Folders".to_string());
                if self.host.confirm(request).await == ConfirmOutcome::Third {
                    self.host.navigate(Destination::FolderSettings).await;
                }
                Ok(())
            }
            TogglePinnedOutcome::LimitExceeded => {
                let kind = match location {
                    PinLocation::Filter(id) => PremiumLimitKind::PinInFolders(id),
                    PinLocation::Group(ChatListGroup::Archive) => PremiumLimitKind::PinInArchive,
                    PinLocation::Group(ChatListGroup::Root) => PremiumLimitKind::Pin,
                };
                info!(target: "ChatList/Dispatch", "Pin limit reached ({:?})", kind);
                self.host.show_premium_limit(kind).await;
                Ok(())
            }
        }
    }

    async fn toggle_mute(&self, row: &RowSnapshot, peer_id: PeerId) -> EngineResult<()> {
        if row.is_muted {
            return self.engine.toggle_peer_muted(peer_id, row.thread_id).await;
        }
        let picked = self
            .host
            .pick_mute_duration(&MuteDuration::PICKER, MuteDuration::PICKER_DEFAULT)
            .await;
        match picked {
            Some(duration) => {
                self.engine
                    .update_peer_mute_setting(peer_id, row.thread_id, duration.seconds())
                    .await
            }
            None => Ok(()),
        }
    }

    async fn delete(&self, row: &RowSnapshot, peer_id: PeerId) -> EngineResult<()> {
        let (text, ok) = delete_prompt(row);
        match self.host.confirm(ConfirmRequest::new(text, ok)).await {
            ConfirmOutcome::Ok { .. } => self.engine.remove_chat(peer_id, row.thread_id).await,
            _ => Ok(()),
        }
    }

    async fn clear_history(
        &self,
        peer_id: PeerId,
        thread_id: Option<i64>,
        can_delete_for_all: Option<bool>,
    ) -> EngineResult<()> {
        let mut request = ConfirmRequest::new(
            "Are you sure you want to delete all message history?",
            "Clear History",
        );
        if can_delete_for_all == Some(true) {
            request.checkbox = Some("Delete for everyone".to_string());
        }
        match self.host.confirm(request).await {
            ConfirmOutcome::Ok { checked } => {
                self.engine
                    .clear_history(peer_id, thread_id, checked && can_delete_for_all == Some(true))
                    .await
            }
            _ => Ok(()),
        }
    }

    async fn toggle_folder(&self, row: &RowSnapshot, peer_id: PeerId, filter_id: i32) -> EngineResult<()> {
        let filters = self.engine.chat_list_filters().await?;
        let Some(filter) = filters.list.into_iter().find(|f| f.id() == Some(filter_id)) else {
            return Err(EngineError::NotFound(format!("folder {filter_id}")));
        };
        let caps = self.config.premium_limits.menu_capabilities();
        if !folder_accepts(&filter, row, &caps) {
            if row.is_premium_account {
                self.host.alert("Sorry, you can't add more chats to this folder.".to_string()).await;
            } else {
                self.host.show_premium_limit(PremiumLimitKind::ChatInFolders).await;
            }
            return Ok(());
        }
        let ChatListFilter::Filter { mut data, .. } = filter else {
            return Ok(());
        };
        if let Some(pos) = data.include_peers.iter().position(|p| *p == peer_id) {
            data.include_peers.remove(pos);
        } else {
            data.include_peers.push(peer_id);
        }
        self.engine.update_chat_list_filter(filter_id, data).await
    }

    /// Plays `sound`, resolving the default to the app-wide tone.
    async fn preview(&self, sound: PeerMessageSound) {
        let sound = match sound {
            PeerMessageSound::Default => match self.engine.app_notification_settings().await {
                Ok(settings) => settings.tone,
                Err(e) => {
                    warn!(target: "ChatList/Dispatch", "No app notification settings: {e}");
                    return;
                }
            },
            other => other,
        };
        if sound.is_audible() {
            self.host.play_sound(sound).await;
        }
    }
}

fn delete_prompt(row: &RowSnapshot) -> (&'static str, &'static str) {
    if row.is_topic() {
        return ("Are you sure you want to delete this topic?", "Delete");
    }
    match &row.main_peer {
        Some(peer) if peer.is_broadcast() => ("Are you sure you want to leave this channel?", "Leave"),
        Some(peer) if peer.is_channel() => ("Are you sure you want to leave this group?", "Leave"),
        Some(Peer::Group(_)) => {
            ("Are you sure you want to delete and exit this group?", "Delete")
        }
        _ => ("Are you sure you want to delete this chat?", "Delete"),
    }
}
