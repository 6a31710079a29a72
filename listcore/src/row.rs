//! Render-ready presentation of one chat-list entry.
//!
//! A [`ChatListRow`] is derived once from the engine's snapshot of a chat,
//! forum topic or the archive folder. After construction only two things
//! change: the online dot can lapse and the peer photo list can be
//! replaced. Text layouts are measured lazily in [`ChatListRow::make_size`]
//! and reused until the available width shrinks.

use chrono::{DateTime, FixedOffset, Utc};
use log::trace;
use std::sync::Arc;

use crate::date::{format_message_list_date, local_timestamp};
use crate::preview::{chat_list_text, folder_text};
use crate::text::{LayoutSize, StyledText, TextLayout, TextMetrics, TextRole, default_metrics};
use crate::types::{
    ChatListFilter, ChatListGroup, Draft, FileKind, ForumTopicData, GroupItem,
    HiddenArchiveStatus, InputActivity, LayoutMode, Media, Message, Peer, PeerId, PeerPhoto,
    PinnedType, Presence, PromoInfo, ReadCounters, RelativePresence, RenderedPeer, ThreadData,
    UiEntryId, User,
};

pub const MARGIN: f32 = 9.0;
pub const MIN_ROW_WIDTH: f32 = 300.0;

pub const CONTENT_IMAGE_SIZE: f32 = 16.0;
pub const CONTENT_IMAGE_SPACING: f32 = 2.0;
pub const CONTENT_IMAGE_TRAILING_SPACE: f32 = 5.0;
pub const MAX_CONTENT_IMAGES: usize = 3;

/// Horizontal span reserved for each mention/reaction dot.
pub const INDICATOR_WIDTH: f32 = 30.0;
const MUTE_ICON_WIDTH: f32 = 12.0;
const STATUS_ICON_WIDTH: f32 = 16.0;
const SCAM_BADGE_WIDTH: f32 = 40.0;
const BADGE_TEXT_HEIGHT: f32 = 13.0;

pub const HEIGHT_NORMAL: f32 = 70.0;
pub const HEIGHT_COLLAPSED_ARCHIVE: f32 = 30.0;
const TOPIC_BASE_HEIGHT: f32 = 53.0;
const TOPIC_FALLBACK_TITLE_HEIGHT: f32 = 17.0;

const SAVED_MESSAGES: &str = "Saved Messages";
const ARCHIVED_CHATS: &str = "Archived Chats";
const YOU: &str = "You";

/// Account-wide inputs every row needs.
#[derive(Clone)]
pub struct RowContext {
    pub account_peer_id: PeerId,
    /// Server minus local clock, seconds.
    pub time_difference: i32,
    pub layout: LayoutMode,
    pub is_premium: bool,
    pub now: DateTime<FixedOffset>,
    pub metrics: Arc<dyn TextMetrics>,
}

impl RowContext {
    pub fn new(account_peer_id: PeerId) -> Self {
        Self {
            account_peer_id,
            time_difference: 0,
            layout: LayoutMode::Normal,
            is_premium: false,
            now: Utc::now().fixed_offset(),
            metrics: default_metrics(),
        }
    }

    /// Unix time clamped into the engine's 32-bit timestamp range.
    pub fn unix_now(&self) -> i32 {
        let ts = self.now.timestamp();
        i32::try_from(ts).unwrap_or(if ts < 0 { i32::MIN } else { i32::MAX })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowMode {
    Chat,
    Topic { thread_id: i64, data: ThreadData },
}

impl RowMode {
    pub fn thread_id(&self) -> Option<i64> {
        match self {
            RowMode::Topic { thread_id, .. } => Some(*thread_id),
            RowMode::Chat => None,
        }
    }

    pub fn thread_data(&self) -> Option<&ThreadData> {
        match self {
            RowMode::Topic { data, .. } => Some(data),
            RowMode::Chat => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleMode {
    #[default]
    Normal,
    /// Topic row shown inside the forum's info panel.
    ForumInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    Peer {
        peer_id: PeerId,
        letters: String,
        is_forum: bool,
    },
    ArchivedChats,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    Count(i32),
    /// Manually marked unread; drawn as an empty pill.
    MarkedUnread,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStyle {
    Normal,
    Muted,
    Selected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub kind: BadgeKind,
    pub style: BadgeStyle,
    pub width: f32,
    pub height: f32,
}

impl Badge {
    pub fn new(kind: BadgeKind, muted: bool, metrics: &dyn TextMetrics) -> Self {
        let text = match kind {
            BadgeKind::Count(count) => count.to_string(),
            BadgeKind::MarkedUnread => " ".to_string(),
        };
        let digits = text.chars().count() as f32;
        let text_width: f32 = text.chars().map(|c| metrics.advance(c)).sum();
        let width = (digits * 10.0 - 10.0 + 7.0).max(text_width + 8.0);
        let height = BADGE_TEXT_HEIGHT + 7.0;
        Self {
            kind,
            style: if muted {
                BadgeStyle::Muted
            } else {
                BadgeStyle::Normal
            },
            width: width.max(height),
            height,
        }
    }

    pub fn text(&self) -> String {
        match self.kind {
            BadgeKind::Count(count) => count.to_string(),
            BadgeKind::MarkedUnread => String::new(),
        }
    }

    fn selected(&self) -> Self {
        Self {
            style: BadgeStyle::Selected,
            ..self.clone()
        }
    }
}

/// A media preview drawn in front of the message text.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentImage {
    pub message_id: crate::types::MessageId,
    pub media: Media,
    pub width: f32,
    pub height: f32,
}

/// Plain and selected variants of the same text.
#[derive(Debug, Clone)]
pub struct LayoutPair {
    pub normal: TextLayout,
    pub selected: TextLayout,
}

impl LayoutPair {
    fn new(text: StyledText, max_lines: usize, cutout: f32) -> Self {
        let selected = text.selected();
        Self {
            normal: TextLayout::new(text, max_lines).with_cutout(cutout),
            selected: TextLayout::new(selected, max_lines).with_cutout(cutout),
        }
    }

    fn measure(&mut self, width: f32, metrics: &dyn TextMetrics) -> LayoutSize {
        self.selected.measure(width, metrics);
        self.normal.measure(width, metrics)
    }

    fn pick(&self, selected: bool) -> &TextLayout {
        if selected { &self.selected } else { &self.normal }
    }

    fn measurements(&self) -> usize {
        self.normal.measurements() + self.selected.measurements()
    }
}

/// Topic names and the latest message of a forum shown as one block.
#[derive(Debug, Clone)]
pub struct TopicsLayout {
    pub names: LayoutPair,
    pub text: Option<LayoutPair>,
}

impl TopicsLayout {
    fn new(message: &Message, items: &[ForumTopicData], draft: Option<&Draft>) -> Self {
        let mut names = StyledText::new();
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                names.push(" • ", TextRole::Gray);
            }
            let role = if item.is_unread {
                TextRole::Text
            } else {
                TextRole::Gray
            };
            names.push(item.title.clone(), role);
        }
        let text = chat_list_text(Some(message), 1, draft);
        Self {
            names: LayoutPair::new(names, 1, 0.0),
            text: (!text.is_empty()).then(|| LayoutPair::new(text, 1, 0.0)),
        }
    }

    fn measure(&mut self, width: f32, metrics: &dyn TextMetrics) {
        self.names.measure(width, metrics);
        if let Some(text) = &mut self.text {
            text.measure(width, metrics);
        }
    }

    fn measurements(&self) -> usize {
        self.names.measurements() + self.text.as_ref().map_or(0, LayoutPair::measurements)
    }
}

/// Everything the engine knows about a chat or topic row.
#[derive(Debug, Clone)]
pub struct ChatRowInput {
    pub entry_id: UiEntryId,
    pub mode: RowMode,
    pub title_mode: TitleMode,
    /// Most recent first.
    pub messages: Vec<Message>,
    pub read_state: Option<ReadCounters>,
    pub draft: Option<Draft>,
    pub pinned_type: PinnedType,
    pub rendered_peer: RenderedPeer,
    pub presence: Option<Presence>,
    pub forum_topic_data: Option<ForumTopicData>,
    pub forum_topic_items: Vec<ForumTopicData>,
    pub activities: Vec<InputActivity>,
    pub highlight_text: Option<String>,
    pub associated_group: ChatListGroup,
    pub is_muted: bool,
    pub has_failed: bool,
    pub has_unread_mentions: bool,
    pub has_unread_reactions: bool,
    pub show_badge: bool,
    pub filter: ChatListFilter,
}

impl ChatRowInput {
    pub fn new(rendered_peer: RenderedPeer) -> Self {
        let entry_id = match rendered_peer.peer_id {
            Some(peer_id) => UiEntryId::ChatId {
                peer_id,
                thread_id: None,
            },
            None => UiEntryId::Empty,
        };
        Self {
            entry_id,
            mode: RowMode::Chat,
            title_mode: TitleMode::Normal,
            messages: Vec::new(),
            read_state: None,
            draft: None,
            pinned_type: PinnedType::Unpinned,
            rendered_peer,
            presence: None,
            forum_topic_data: None,
            forum_topic_items: Vec::new(),
            activities: Vec::new(),
            highlight_text: None,
            associated_group: ChatListGroup::Root,
            is_muted: false,
            has_failed: false,
            has_unread_mentions: false,
            has_unread_reactions: false,
            show_badge: true,
            filter: ChatListFilter::AllChats,
        }
    }
}

/// The archive folder summary row.
#[derive(Debug, Clone)]
pub struct GroupRowInput {
    pub entry_id: UiEntryId,
    pub pinned_type: PinnedType,
    pub group: ChatListGroup,
    pub items: Vec<GroupItem>,
    pub messages: Vec<Message>,
    pub unread_count: i32,
    pub activities: Vec<InputActivity>,
    pub animate_group: bool,
    pub archive_status: HiddenArchiveStatus,
    pub has_failed: bool,
    pub filter: ChatListFilter,
}

impl GroupRowInput {
    pub fn archive(items: Vec<GroupItem>) -> Self {
        Self {
            entry_id: UiEntryId::GroupId(ChatListGroup::Archive),
            pinned_type: PinnedType::Unpinned,
            group: ChatListGroup::Archive,
            messages: items.iter().filter_map(|i| i.message.clone()).collect(),
            items,
            unread_count: 0,
            activities: Vec::new(),
            animate_group: false,
            archive_status: HiddenArchiveStatus::Normal,
            has_failed: false,
            filter: ChatListFilter::AllChats,
        }
    }
}

/// Read-only facts about a row needed to build its menu and run actions.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSnapshot {
    pub account_peer_id: PeerId,
    pub peer_id: Option<PeerId>,
    pub thread_id: Option<i64>,
    /// The chat's main peer (the user behind a secret chat).
    pub main_peer: Option<Peer>,
    /// The peer the row is keyed by (the secret chat itself).
    pub peer: Option<Peer>,
    pub thread_data: Option<ThreadData>,
    pub group_id: ChatListGroup,
    pub associated_group: ChatListGroup,
    pub filter: ChatListFilter,
    pub archive_status: Option<HiddenArchiveStatus>,
    pub layout: LayoutMode,
    pub is_premium_account: bool,
    pub is_pinned: bool,
    pub is_muted: bool,
    pub is_ad: bool,
    pub is_secret: bool,
    pub is_unread: bool,
    pub mark_as_unread: bool,
    pub can_archive: bool,
    pub is_closed_topic: bool,
    pub is_forum: bool,
}

impl RowSnapshot {
    pub fn is_topic(&self) -> bool {
        self.thread_id.is_some()
    }
}

pub struct ChatListRow {
    entry_id: UiEntryId,
    context: RowContext,
    mode: RowMode,
    title_mode: TitleMode,
    messages: Vec<Message>,
    peer: Option<Peer>,
    rendered_peer: Option<RenderedPeer>,
    group_id: ChatListGroup,
    associated_group: ChatListGroup,
    forum_topic_data: Option<ForumTopicData>,
    forum_topic_items: Vec<ForumTopicData>,
    read_state: Option<ReadCounters>,
    draft: Option<Draft>,
    pinned_type: PinnedType,
    activities: Vec<InputActivity>,
    highlight_text: Option<String>,
    filter: ChatListFilter,
    archive_status: Option<HiddenArchiveStatus>,
    hidden: bool,
    animate_archive: bool,

    is_muted: bool,
    has_failed: bool,
    is_online: Option<bool>,
    has_active_group_call: bool,
    is_verified: bool,
    is_premium: bool,
    is_scam: bool,
    is_fake: bool,
    mentions_count: Option<i32>,
    reactions_count: Option<i32>,
    avatar: Avatar,
    photos: Vec<PeerPhoto>,

    title: StyledText,
    title_layout: LayoutPair,
    date: Option<StyledText>,
    date_width: f32,
    chat_name_layout: Option<LayoutPair>,
    forum_topic_name_layout: Option<LayoutPair>,
    message_layout: Option<LayoutPair>,
    topics_layout: Option<TopicsLayout>,
    badge: Option<Badge>,

    text_left_cutout: f32,
    content_images: Vec<ContentImage>,

    width: f32,
    is_selected: bool,
}

fn status_control_width(peer: &Peer) -> Option<f32> {
    if peer.is_scam() || peer.is_fake() {
        Some(SCAM_BADGE_WIDTH)
    } else if peer.is_premium() || peer.is_verified() || peer.emoji_status().is_some() {
        Some(STATUS_ICON_WIDTH)
    } else {
        None
    }
}

fn sponsor_label(promo: &PromoInfo) -> String {
    match promo {
        PromoInfo::Psa { kind, .. } => match kind.as_str() {
            "covid" => "Coronavirus Info".to_string(),
            _ => "PSA".to_string(),
        },
        PromoInfo::Proxy => "Proxy Sponsor".to_string(),
    }
}

fn date_text(message: &Message, context: &RowContext) -> StyledText {
    let time = local_timestamp(message.timestamp, context.time_difference);
    StyledText::plain(format_message_list_date(time, &context.now), TextRole::Gray)
}

fn measure_single_line(text: &StyledText, metrics: &dyn TextMetrics) -> f32 {
    let mut layout = TextLayout::new(text.clone(), 1);
    layout.measure(f32::MAX, metrics).width
}

/// Media that gets a thumbnail in front of the preview text, if any.
fn content_image_media(message: &Message) -> Option<&Media> {
    if message.contains_secret_media {
        return None;
    }
    for media in &message.media {
        match media {
            Media::Image { has_representation } => {
                return has_representation.then_some(media);
            }
            Media::File {
                kind,
                has_dimensions,
                probably_sticker,
                ..
            } => {
                let is_plain_video = *kind == FileKind::Video && !*probably_sticker;
                return (is_plain_video && *has_dimensions).then_some(media);
            }
            _ => continue,
        }
    }
    None
}

/// Width of the strip of thumbnails the preview text flows around.
pub fn content_images_cutout(images: &[ContentImage]) -> f32 {
    let mut cutout = 0.0;
    for (i, image) in images.iter().enumerate() {
        if i != 0 {
            cutout += CONTENT_IMAGE_SPACING;
        }
        cutout += image.width;
        if i == images.len() - 1 {
            cutout += CONTENT_IMAGE_TRAILING_SPACE;
        }
    }
    cutout
}

impl ChatListRow {
    /// Row for a chat or a forum topic.
    pub fn chat(input: ChatRowInput, context: RowContext, width: f32) -> Self {
        let ChatRowInput {
            entry_id,
            mode,
            title_mode,
            messages,
            read_state,
            mut draft,
            pinned_type,
            rendered_peer,
            presence,
            forum_topic_data,
            forum_topic_items,
            activities,
            highlight_text,
            associated_group,
            is_muted,
            has_failed,
            has_unread_mentions,
            has_unread_reactions,
            show_badge,
            filter,
        } = input;

        let metrics = context.metrics.clone();
        let account = context.account_peer_id;
        let peer = rendered_peer.chat_main_peer().cloned();
        let peer_id = rendered_peer.peer_id;
        let is_secret = rendered_peer.is_secret();

        if let Some(channel) = peer.as_ref().and_then(Peer::as_channel)
            && !channel.has_send_permission()
        {
            draft = None;
        }
        if draft.as_ref().is_some_and(|d| d.text.is_empty()) {
            draft = None;
        }

        let is_online = match (&presence, peer_id) {
            (Some(presence), Some(peer_id))
                if peer_id != account && peer_id != PeerId::service_notifications() =>
            {
                let relative = presence.relative_status(context.time_difference, context.unix_now());
                Some(relative == RelativePresence::Online)
            }
            _ => None,
        };

        let has_active_group_call = peer
            .as_ref()
            .and_then(Peer::as_channel)
            .is_some_and(|c| c.has_active_voice_chat)
            && mode.thread_id().is_none();

        let (is_verified, is_premium, is_scam, is_fake) = match &peer {
            Some(p) => (
                p.is_verified(),
                p.is_premium() && p.id() != account,
                p.is_scam(),
                p.is_fake(),
            ),
            None => (false, false, false, false),
        };

        let title = match &mode {
            RowMode::Chat => {
                let text = match &peer {
                    Some(p) if p.id() == account => SAVED_MESSAGES.to_string(),
                    Some(p) => p.display_title(),
                    None => String::new(),
                };
                let role = if is_secret {
                    TextRole::Secret
                } else {
                    TextRole::Title
                };
                StyledText::plain(text, role)
            }
            RowMode::Topic { data, .. } => StyledText::plain(data.title.clone(), TextRole::Title),
        };

        let topics_layout = match messages.first() {
            Some(message) if !forum_topic_items.is_empty() => {
                Some(TopicsLayout::new(message, &forum_topic_items, draft.as_ref()))
            }
            _ => None,
        };

        let mut date = None;
        let mut chat_name_layout = None;
        let mut forum_topic_name_layout = None;
        let mut content_images = Vec::new();

        if let PinnedType::Ad(promo) = &pinned_type {
            date = Some(StyledText::plain(sponsor_label(promo), TextRole::Gray));
        } else if let Some(message) = messages.first().filter(|_| forum_topic_items.is_empty()) {
            date = Some(date_text(message, &context));

            let author = if message.is_imported {
                message.forward_info.as_ref().and_then(|info| {
                    info.author.clone().or_else(|| {
                        info.author_signature
                            .as_ref()
                            .map(|sig| Peer::User(User::new(PeerId::user(0), sig.clone())))
                    })
                })
            } else {
                message.author.clone()
            };

            if let (Some(author), Some(p)) = (&author, &peer)
                && !p.is_user()
                && !p.is_broadcast()
                && draft.is_none()
                && !message.is_service()
            {
                let mut peer_text = if author.id() == account {
                    YOU.to_string()
                } else {
                    author.display_title()
                };

                let mut topic_name = StyledText::new();
                if let Some(data) = forum_topic_data.as_ref().filter(|_| p.is_forum()) {
                    topic_name.push(data.title.clone(), TextRole::Peer);
                } else if let (true, TitleMode::ForumInfo, RowMode::Topic { data, .. }) =
                    (p.is_forum(), title_mode, &mode)
                {
                    peer_text = author.compact_display_title();
                    topic_name.push(data.title.clone(), TextRole::Peer);
                }
                if !topic_name.is_empty() {
                    forum_topic_name_layout = Some(LayoutPair::new(topic_name, 1, 0.0));
                }

                let name = StyledText::plain(peer_text, TextRole::Peer);
                if !name.is_empty() {
                    chat_name_layout = Some(LayoutPair::new(name, 1, 0.0));
                }
            }

            if draft.is_none() && !is_secret && forum_topic_items.is_empty() {
                for message in &messages {
                    if let Some(media) = content_image_media(message) {
                        content_images.push(ContentImage {
                            message_id: message.id,
                            media: media.clone(),
                            width: CONTENT_IMAGE_SIZE,
                            height: CONTENT_IMAGE_SIZE,
                        });
                    }
                }
            }
        }

        content_images.truncate(MAX_CONTENT_IMAGES);
        let text_left_cutout = content_images_cutout(&content_images);

        let mentions_count = has_unread_mentions.then_some(1);
        let reactions_count = has_unread_reactions.then_some(1);

        let empty_avatar = matches!(mode, RowMode::Topic { .. }) && title_mode == TitleMode::Normal;
        let avatar = match &peer {
            Some(p) if p.id() != account && p.id() != PeerId::replies() && !empty_avatar => {
                Avatar::Peer {
                    peer_id: p.id(),
                    letters: p.display_letters(),
                    is_forum: p.is_forum(),
                }
            }
            _ => Avatar::Empty,
        };

        let mut badge = None;
        if show_badge {
            let muted = is_muted || read_state.as_ref().is_some_and(|r| r.is_muted);
            let unread_count = read_state.as_ref().map_or(0, |r| r.count);
            let marked = read_state.as_ref().is_some_and(|r| r.marked_unread);
            let duplicates_mention = mentions_count.is_some_and(|m| unread_count <= 1 && m == unread_count);
            if unread_count > 0 && !duplicates_mention {
                badge = Some(Badge::new(BadgeKind::Count(unread_count), muted, metrics.as_ref()));
            } else if marked && mentions_count.is_none() {
                badge = Some(Badge::new(BadgeKind::MarkedUnread, muted, metrics.as_ref()));
            }
        }

        let mut message_layout = None;
        if forum_topic_items.is_empty() {
            let message = messages.first();
            let (text, cutout) = match (&pinned_type, message) {
                (PinnedType::Ad(PromoInfo::Psa { message: Some(body), .. }), None) => {
                    (StyledText::plain(body.clone(), TextRole::Gray), 0.0)
                }
                (PinnedType::Ad(_), None) => (StyledText::new(), 0.0),
                _ => (
                    chat_list_text(message, messages.len(), draft.as_ref()),
                    text_left_cutout,
                ),
            };
            if !text.is_empty() {
                let max_lines = if chat_name_layout.is_some() { 1 } else { 2 };
                message_layout = Some(LayoutPair::new(text, max_lines, cutout));
            }
        }

        let date_width = date
            .as_ref()
            .map_or(0.0, |d| measure_single_line(d, metrics.as_ref()));

        let title_lines = if matches!(mode, RowMode::Topic { .. }) { 2 } else { 1 };

        let mut row = Self {
            entry_id,
            context,
            mode,
            title_mode,
            messages,
            peer,
            rendered_peer: Some(rendered_peer),
            group_id: ChatListGroup::Root,
            associated_group,
            forum_topic_data,
            forum_topic_items,
            read_state,
            draft,
            pinned_type,
            activities,
            highlight_text,
            filter,
            archive_status: None,
            hidden: false,
            animate_archive: false,
            is_muted,
            has_failed,
            is_online,
            has_active_group_call,
            is_verified,
            is_premium,
            is_scam,
            is_fake,
            mentions_count,
            reactions_count,
            avatar,
            photos: Vec::new(),
            title_layout: LayoutPair::new(title.clone(), title_lines, 0.0),
            title,
            date,
            date_width,
            chat_name_layout,
            forum_topic_name_layout,
            message_layout,
            topics_layout,
            badge,
            text_left_cutout,
            content_images,
            width: 0.0,
            is_selected: false,
        };
        row.make_size(width, 0.0);
        trace!(target: "ChatList/Row", "built row {:?} at width {}", row.entry_id, width);
        row
    }

    /// Row summarising a chat-list folder (the archive).
    pub fn group(input: GroupRowInput, context: RowContext, width: f32) -> Self {
        let GroupRowInput {
            entry_id,
            pinned_type,
            group,
            items,
            messages,
            unread_count,
            activities,
            animate_group,
            archive_status,
            has_failed,
            filter,
        } = input;

        let metrics = context.metrics.clone();
        let title = StyledText::plain(ARCHIVED_CHATS, TextRole::Title);
        let date = messages.first().map(|m| date_text(m, &context));
        let date_width = date
            .as_ref()
            .map_or(0.0, |d| measure_single_line(d, metrics.as_ref()));

        let badge = (unread_count > 0)
            .then(|| Badge::new(BadgeKind::Count(unread_count), true, metrics.as_ref()));

        let text = folder_text(&items);
        let message_layout = (!text.is_empty()).then(|| LayoutPair::new(text, 2, 0.0));

        let mut row = Self {
            entry_id,
            context,
            mode: RowMode::Chat,
            title_mode: TitleMode::Normal,
            messages,
            peer: None,
            rendered_peer: None,
            group_id: group,
            associated_group: ChatListGroup::Root,
            forum_topic_data: None,
            forum_topic_items: Vec::new(),
            read_state: None,
            draft: None,
            pinned_type,
            activities,
            highlight_text: None,
            filter,
            archive_status: Some(archive_status),
            hidden: archive_status == HiddenArchiveStatus::Hidden(true),
            animate_archive: animate_group,
            is_muted: false,
            has_failed,
            is_online: None,
            has_active_group_call: false,
            is_verified: false,
            is_premium: false,
            is_scam: false,
            is_fake: false,
            mentions_count: None,
            reactions_count: None,
            avatar: Avatar::ArchivedChats,
            photos: Vec::new(),
            title_layout: LayoutPair::new(title.clone(), 1, 0.0),
            title,
            date,
            date_width,
            chat_name_layout: None,
            forum_topic_name_layout: None,
            message_layout,
            topics_layout: None,
            badge,
            text_left_cutout: 0.0,
            content_images: Vec::new(),
            width: 0.0,
            is_selected: false,
        };
        row.make_size(width, 0.0);
        row
    }

    // ---- identity ----

    pub fn entry_id(&self) -> UiEntryId {
        self.entry_id
    }

    pub fn peer_id(&self) -> Option<PeerId> {
        self.rendered_peer.as_ref().and_then(|r| r.peer_id)
    }

    pub fn peer(&self) -> Option<&Peer> {
        self.peer.as_ref()
    }

    pub fn message(&self) -> Option<&Message> {
        self.messages.first()
    }

    pub fn mode(&self) -> &RowMode {
        &self.mode
    }

    pub fn title_mode(&self) -> TitleMode {
        self.title_mode
    }

    pub fn group_id(&self) -> ChatListGroup {
        self.group_id
    }

    pub fn associated_group(&self) -> ChatListGroup {
        self.associated_group
    }

    pub fn pinned_type(&self) -> &PinnedType {
        &self.pinned_type
    }

    pub fn filter(&self) -> &ChatListFilter {
        &self.filter
    }

    pub fn archive_status(&self) -> Option<HiddenArchiveStatus> {
        self.archive_status
    }

    pub fn context(&self) -> &RowContext {
        &self.context
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn highlight_text(&self) -> Option<&str> {
        self.highlight_text.as_deref()
    }

    pub fn forum_topic_data(&self) -> Option<&ForumTopicData> {
        self.forum_topic_data.as_ref()
    }

    // ---- flags ----

    pub fn is_group(&self) -> bool {
        self.group_id != ChatListGroup::Root
    }

    pub fn is_topic(&self) -> bool {
        matches!(self.mode, RowMode::Topic { .. })
    }

    pub fn is_forum(&self) -> bool {
        self.peer.as_ref().is_some_and(Peer::is_forum)
    }

    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    pub fn badge_muted(&self) -> bool {
        self.is_muted || self.read_state.as_ref().is_some_and(|r| r.is_muted)
    }

    pub fn is_online(&self) -> Option<bool> {
        self.is_online
    }

    pub fn has_active_group_call(&self) -> bool {
        self.has_active_group_call
    }

    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    pub fn is_premium(&self) -> bool {
        self.is_premium
    }

    pub fn is_scam(&self) -> bool {
        self.is_scam
    }

    pub fn is_fake(&self) -> bool {
        self.is_fake
    }

    pub fn has_draft(&self) -> bool {
        self.draft.is_some()
    }

    pub fn is_failed(&self) -> bool {
        self.has_failed
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn mentions_count(&self) -> Option<i32> {
        self.mentions_count
    }

    pub fn reactions_count(&self) -> Option<i32> {
        self.reactions_count
    }

    pub fn is_pinned(&self) -> bool {
        matches!(self.pinned_type, PinnedType::Pinned | PinnedType::LastPinned)
    }

    pub fn is_last_pinned(&self) -> bool {
        matches!(self.pinned_type, PinnedType::LastPinned)
    }

    pub fn is_fixed_item(&self) -> bool {
        !matches!(self.pinned_type, PinnedType::Unpinned)
    }

    pub fn is_ad(&self) -> bool {
        matches!(self.pinned_type, PinnedType::Ad(_))
    }

    pub fn is_closed_topic(&self) -> bool {
        self.mode.thread_data().is_some_and(|d| d.is_closed)
    }

    pub fn is_secret(&self) -> bool {
        self.rendered_peer.as_ref().is_some_and(RenderedPeer::is_secret)
    }

    pub fn is_unread_marked(&self) -> bool {
        self.read_state.as_ref().is_some_and(|r| r.marked_unread)
    }

    pub fn is_sending(&self) -> bool {
        self.message().is_some_and(|m| m.flags.unsent)
    }

    pub fn is_saved_messages(&self) -> bool {
        self.peer
            .as_ref()
            .is_some_and(|p| p.id() == self.context.account_peer_id)
    }

    pub fn is_replies_chat(&self) -> bool {
        self.peer.as_ref().is_some_and(|p| p.id() == PeerId::replies())
    }

    pub fn is_out_message(&self) -> bool {
        self.message().is_some_and(|m| {
            !m.flags.incoming && m.id.peer_id != self.context.account_peer_id
        })
    }

    /// Whether the latest outgoing message has been read by the other side.
    pub fn is_read(&self) -> bool {
        if let RowMode::Topic { data, .. } = &self.mode {
            return self
                .message()
                .is_some_and(|m| data.max_outgoing_read_id >= m.id.id);
        }
        match &self.peer {
            Some(Peer::User(user)) if user.is_bot => return !user.is_support,
            Some(Peer::User(user)) if user.id == self.context.account_peer_id => return true,
            Some(p) if p.is_broadcast() => return true,
            _ => {}
        }
        match (&self.read_state, self.message()) {
            (Some(read_state), Some(message)) => read_state.is_outgoing_message_read(message.index()),
            _ => false,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.archive_status == Some(HiddenArchiveStatus::Collapsed)
            && self.context.layout != LayoutMode::Minimized
    }

    pub fn can_archive(&self) -> bool {
        if self.group_id != ChatListGroup::Root || self.is_ad() {
            return false;
        }
        match self.peer_id() {
            Some(id) => {
                id != self.context.account_peer_id
                    && self.peer.as_ref().map(Peer::id) != Some(PeerId::service_notifications())
            }
            None => true,
        }
    }

    pub fn has_reveal_state(&self) -> bool {
        self.can_archive() || (self.group_id != ChatListGroup::Root && !self.is_collapsed())
    }

    pub fn can_delete_topic(&self) -> bool {
        self.is_topic()
            && self
                .peer
                .as_ref()
                .and_then(Peer::as_channel)
                .is_some_and(|c| c.is_admin() && c.has_manage_topics_permission())
    }

    pub fn can_resort_pinned(&self) -> bool {
        match self.mode {
            RowMode::Topic { .. } => self
                .peer
                .as_ref()
                .and_then(Peer::as_channel)
                .is_some_and(|c| c.has_pin_permission()),
            RowMode::Chat => true,
        }
    }

    pub fn has_forum_icon(&self) -> bool {
        if self.chat_name_layout.is_none() || self.forum_topic_name_layout.is_none() {
            return false;
        }
        self.forum_topic_data.is_some()
            || (self.is_forum() && self.title_mode == TitleMode::ForumInfo && self.is_topic())
    }

    pub fn has_unread(&self) -> bool {
        self.badge.is_some()
    }

    /// Offer "Mark as Unread" in the menu.
    pub fn mark_as_unread(&self) -> bool {
        !self.is_secret()
            && !self.is_unread_marked()
            && self.badge.is_none()
            && self.mentions_count.is_none()
    }

    /// Consumes the one-shot "animate into archive" flag.
    pub fn take_animate_archive(&mut self) -> bool {
        std::mem::take(&mut self.animate_archive)
    }

    // ---- content ----

    pub fn title(&self) -> &StyledText {
        &self.title
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn photos(&self) -> &[PeerPhoto] {
        &self.photos
    }

    pub fn badge(&self) -> Option<&Badge> {
        self.badge.as_ref()
    }

    pub fn content_images(&self) -> &[ContentImage] {
        &self.content_images
    }

    pub fn text_left_cutout(&self) -> f32 {
        self.text_left_cutout
    }

    pub fn activities(&self) -> &[InputActivity] {
        &self.activities
    }

    pub fn topics_layout(&self) -> Option<&TopicsLayout> {
        self.topics_layout.as_ref()
    }

    pub fn tool_tip(&self) -> Option<String> {
        self.message_layout.as_ref().map(|l| l.normal.text().string())
    }

    // ---- selection ----

    pub fn set_selected(&mut self, selected: bool) {
        self.is_selected = selected;
    }

    pub fn is_active_selected(&self) -> bool {
        self.is_selected
            && self.context.layout != LayoutMode::Single
            && !(self.is_forum() && !self.is_topic())
    }

    pub fn ctx_title_layout(&self) -> &TextLayout {
        self.title_layout.pick(self.is_active_selected())
    }

    pub fn ctx_chat_name_layout(&self) -> Option<&TextLayout> {
        self.chat_name_layout
            .as_ref()
            .map(|l| l.pick(self.is_active_selected()))
    }

    pub fn ctx_forum_topic_name_layout(&self) -> Option<&TextLayout> {
        self.forum_topic_name_layout
            .as_ref()
            .map(|l| l.pick(self.is_active_selected()))
    }

    /// Hidden while typing indicators are shown in its place.
    pub fn ctx_message_layout(&self) -> Option<&TextLayout> {
        if !self.activities.is_empty() {
            return None;
        }
        self.message_layout
            .as_ref()
            .map(|l| l.pick(self.is_active_selected()))
    }

    pub fn ctx_date(&self) -> Option<StyledText> {
        let date = self.date.as_ref()?;
        Some(if self.is_active_selected() {
            date.selected()
        } else {
            date.clone()
        })
    }

    pub fn ctx_badge(&self) -> Option<Badge> {
        let badge = self.badge.as_ref()?;
        Some(if self.is_active_selected() {
            badge.selected()
        } else {
            badge.clone()
        })
    }

    // ---- sizing ----

    pub fn width(&self) -> f32 {
        self.width
    }

    fn base_width(&self) -> f32 {
        self.width.max(MIN_ROW_WIDTH) - MARGIN * 4.0
    }

    fn delivery_width(&self) -> f32 {
        if self.is_out_message() {
            if self.is_read() { 14.0 } else { 8.0 }
        } else {
            0.0
        }
    }

    fn icon_offset(&self) -> f32 {
        if self.is_topic() && self.title_mode == TitleMode::Normal {
            30.0
        } else {
            50.0
        }
    }

    fn indicators_width(&self) -> f32 {
        let mut w = 0.0;
        if let Some(badge) = &self.badge {
            w += badge.width + 5.0;
        }
        if self.mentions_count.is_some() {
            w += INDICATOR_WIDTH;
        }
        if self.reactions_count.is_some() {
            w += INDICATOR_WIDTH;
        }
        w
    }

    pub fn title_width(&self) -> f32 {
        let mut offset = 0.0;
        if let Some(peer) = &self.peer
            && peer.id() != self.context.account_peer_id
            && let Some(control) = status_control_width(peer)
        {
            offset += control + 4.0;
        }
        if self.is_muted {
            offset += MUTE_ICON_WIDTH + 4.0;
        }
        if self.is_secret() {
            offset += 10.0;
        }
        offset += self.icon_offset();
        if self.is_closed_topic() {
            offset += 10.0;
        }
        (self.base_width() - self.date_width - self.delivery_width() - offset).max(0.0)
    }

    pub fn chat_name_width(&self) -> f32 {
        let w = self.indicators_width() + self.icon_offset();
        (self.base_width() - w - self.delivery_width()).max(0.0)
    }

    pub fn message_width(&self) -> f32 {
        let mut w = self.indicators_width();
        if self.is_pinned() && self.badge.is_none() {
            w += 15.0;
        }
        w += self.icon_offset();
        let cutout = if self.chat_name_layout.is_some() {
            self.text_left_cutout
        } else {
            0.0
        };
        (self.base_width() - w - cutout).max(0.0)
    }

    pub fn left_inset(&self) -> f32 {
        match (&self.mode, self.title_mode) {
            (RowMode::Topic { .. }, TitleMode::Normal) => 30.0 + 10.0 * 2.0,
            _ => 50.0 + 10.0 * 2.0,
        }
    }

    fn measurements(&self) -> usize {
        self.title_layout.measurements()
            + self.chat_name_layout.as_ref().map_or(0, LayoutPair::measurements)
            + self.forum_topic_name_layout.as_ref().map_or(0, LayoutPair::measurements)
            + self.message_layout.as_ref().map_or(0, LayoutPair::measurements)
            + self.topics_layout.as_ref().map_or(0, TopicsLayout::measurements)
    }

    /// Lays the row out for `width`. Returns whether anything was
    /// remeasured or the width changed.
    pub fn make_size(&mut self, width: f32, old_width: f32) -> bool {
        let before = self.measurements();
        let previous = if old_width > 0.0 { old_width } else { self.width };
        self.width = width;

        let metrics = self.context.metrics.clone();
        let metrics = metrics.as_ref();

        let title_width = self.title_width();
        self.title_layout.measure(title_width, metrics);

        let chat_name_width = self.chat_name_width();
        match (&mut self.chat_name_layout, &mut self.forum_topic_name_layout) {
            (Some(name), Some(topic)) => {
                let half = (chat_name_width / 2.0 - 20.0).max(0.0);
                let name_size = name.measure(half, metrics);
                let rest = (chat_name_width - name_size.width - 20.0).max(0.0);
                topic.measure(rest, metrics);
            }
            (Some(name), None) => {
                name.measure(chat_name_width, metrics);
            }
            _ => {}
        }

        let message_width = self.message_width();
        if let Some(message) = &mut self.message_layout {
            message.measure(message_width, metrics);
        }
        if let Some(topics) = &mut self.topics_layout {
            topics.measure(message_width, metrics);
        }

        previous != width || self.measurements() != before
    }

    /// Total remeasurements performed so far, across every layout.
    pub fn layout_measurements(&self) -> usize {
        self.measurements()
    }

    pub fn height(&self) -> f32 {
        let minimized = self.context.layout == LayoutMode::Minimized;
        if let Some(status) = self.archive_status
            && !minimized
        {
            return match status {
                HiddenArchiveStatus::Collapsed => HEIGHT_COLLAPSED_ARCHIVE,
                _ => HEIGHT_NORMAL,
            };
        }
        if minimized {
            return HEIGHT_NORMAL;
        }
        match self.mode {
            RowMode::Chat => HEIGHT_NORMAL,
            RowMode::Topic { .. } => {
                let title_height = self
                    .title_layout
                    .normal
                    .measured_width()
                    .map(|_| self.title_layout.normal.size().height)
                    .unwrap_or(TOPIC_FALLBACK_TITLE_HEIGHT);
                TOPIC_BASE_HEIGHT + title_height
            }
        }
    }

    // ---- post-construction updates ----

    /// Presence lapsed. Returns whether the row needs a redraw.
    pub fn set_offline(&mut self) -> bool {
        if self.is_online == Some(true) {
            self.is_online = Some(false);
            true
        } else {
            false
        }
    }

    /// New photo history arrived. Returns whether it differs.
    pub fn set_photos(&mut self, photos: Vec<PeerPhoto>) -> bool {
        if self.photos != photos {
            self.photos = photos;
            true
        } else {
            false
        }
    }

    /// Whether the peer's photo history should be followed.
    pub fn wants_photo_history(&self) -> bool {
        self.peer.as_ref().is_some_and(|p| {
            p.is_premium() && p.id() != self.context.account_peer_id && p.has_video_avatar()
        })
    }

    pub fn snapshot(&self) -> RowSnapshot {
        let peer = self
            .rendered_peer
            .as_ref()
            .and_then(|r| r.peer())
            .cloned();
        RowSnapshot {
            account_peer_id: self.context.account_peer_id,
            peer_id: self.peer_id(),
            thread_id: self.mode.thread_id(),
            main_peer: self.peer.clone(),
            peer,
            thread_data: self.mode.thread_data().cloned(),
            group_id: self.group_id,
            associated_group: self.associated_group,
            filter: self.filter.clone(),
            archive_status: self.archive_status,
            layout: self.context.layout,
            is_premium_account: self.context.is_premium,
            is_pinned: self.is_pinned(),
            is_muted: self.is_muted,
            is_ad: self.is_ad(),
            is_secret: self.is_secret(),
            is_unread: self.badge.is_some()
                || self.mentions_count.is_some()
                || self.is_unread_marked(),
            mark_as_unread: self.mark_as_unread(),
            can_archive: self.can_archive(),
            is_closed_topic: self.is_closed_topic(),
            is_forum: self.is_forum(),
        }
    }
}

impl std::fmt::Debug for ChatListRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatListRow")
            .field("entry_id", &self.entry_id)
            .field("title", &self.title.string())
            .field("badge", &self.badge)
            .field("width", &self.width)
            .finish()
    }
}
