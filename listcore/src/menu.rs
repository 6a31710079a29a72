//! Context-menu assembly for chat-list rows.
//!
//! Menus are plain data: every item carries a [`MenuAction`] tag that the
//! runtime maps onto an engine request. Nothing here performs I/O.

use serde::{Deserialize, Serialize};

use crate::mute::MuteDuration;
use crate::row::RowSnapshot;
use crate::types::{
    AppNotificationSettings, BUNDLED_CLASSIC_COUNT, BUNDLED_MODERN_COUNT, CachedPeerData,
    ChatListFilter, ChatListFilterPreferences, ChatListGroup, HiddenArchiveStatus, LayoutMode,
    NotificationSoundList, Peer, PeerMessageSound, PeerNotificationSettings,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MenuAction {
    TogglePin,
    ToggleMute,
    Mute { duration: MuteDuration },
    ToggleArchive,
    MarkUnread,
    MarkRead,
    ToggleTopicClosed,
    Delete,
    ClearHistory { can_delete_for_all: Option<bool> },
    HidePromo,
    ExpandArchive,
    CollapseArchive,
    AddToFolder { filter_id: i32 },
    SetSound { sound: PeerMessageSound },
    PreviewSound { sound: PeerMessageSound },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub action: Option<MenuAction>,
    /// Fired while the pointer rests on the item.
    pub hover: Option<MenuAction>,
    pub checked: bool,
    pub destructive: bool,
    /// Selecting it shows a plan-limit prompt instead of acting.
    pub locked: bool,
    pub submenu: Vec<MenuEntry>,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, action: MenuAction) -> Self {
        Self {
            label: label.into(),
            action: Some(action),
            hover: None,
            checked: false,
            destructive: false,
            locked: false,
            submenu: Vec::new(),
        }
    }

    fn parent(label: impl Into<String>, submenu: Vec<MenuEntry>) -> Self {
        Self {
            label: label.into(),
            action: None,
            hover: None,
            checked: false,
            destructive: false,
            locked: false,
            submenu,
        }
    }

    fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }

    fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    fn with_submenu(mut self, submenu: Vec<MenuEntry>) -> Self {
        self.submenu = submenu;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item(MenuItem),
    Separator,
}

impl MenuEntry {
    pub fn as_item(&self) -> Option<&MenuItem> {
        match self {
            MenuEntry::Item(item) => Some(item),
            MenuEntry::Separator => None,
        }
    }
}

impl From<MenuItem> for MenuEntry {
    fn from(item: MenuItem) -> Self {
        MenuEntry::Item(item)
    }
}

/// Engine data the menu is composed from, fetched once per open.
#[derive(Debug, Clone, Default)]
pub struct MenuData {
    pub filters: ChatListFilterPreferences,
    pub cached_peer_data: Option<CachedPeerData>,
    pub app_notification_settings: AppNotificationSettings,
    pub sounds: Option<NotificationSoundList>,
    pub peer_notification_settings: Option<PeerNotificationSettings>,
}

/// Plan-dependent limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuCapabilities {
    pub folder_chats_limit_default: usize,
    pub folder_chats_limit_premium: usize,
}

impl Default for MenuCapabilities {
    fn default() -> Self {
        Self {
            folder_chats_limit_default: 100,
            folder_chats_limit_premium: 200,
        }
    }
}

impl MenuCapabilities {
    pub fn folder_limit(&self, is_premium: bool) -> usize {
        if is_premium {
            self.folder_chats_limit_premium
        } else {
            self.folder_chats_limit_default
        }
    }
}

/// Whether `filter` can take the row's peer (or already has it).
pub fn folder_accepts(filter: &ChatListFilter, row: &RowSnapshot, caps: &MenuCapabilities) -> bool {
    let (ChatListFilter::Filter { data, .. }, Some(peer_id)) = (filter, row.peer_id) else {
        return false;
    };
    data.include_peers.contains(&peer_id)
        || data.include_peers.len() < caps.folder_limit(row.is_premium_account)
}

fn pin_item(row: &RowSnapshot) -> MenuItem {
    MenuItem::new(if row.is_pinned { "Unpin" } else { "Pin" }, MenuAction::TogglePin)
}

fn mute_label(row: &RowSnapshot) -> &'static str {
    if row.is_muted { "Unmute" } else { "Mute" }
}

fn sound_item(sound: PeerMessageSound, selected: PeerMessageSound, list: Option<&NotificationSoundList>) -> MenuEntry {
    let mut item = MenuItem::new(sound.title(list), MenuAction::SetSound { sound });
    item.hover = Some(MenuAction::PreviewSound { sound });
    item.checked(sound == selected).into()
}

/// The tone picker: default, none, cloud tones, then the bundled sets.
pub fn sound_menu(data: &MenuData) -> Vec<MenuEntry> {
    let selected = data
        .peer_notification_settings
        .as_ref()
        .map(|s| s.message_sound)
        .unwrap_or_default();
    let list = data.sounds.as_ref();

    let mut entries = vec![
        sound_item(PeerMessageSound::Default, selected, None),
        sound_item(PeerMessageSound::None, selected, None),
        MenuEntry::Separator,
    ];

    if let Some(sounds) = list {
        for sound in &sounds.sounds {
            let tone = PeerMessageSound::Cloud {
                file_id: sound.file_id,
            };
            entries.push(sound_item(tone, selected, list));
        }
        if !sounds.sounds.is_empty() {
            entries.push(MenuEntry::Separator);
        }
    }

    for id in 0..BUNDLED_MODERN_COUNT {
        entries.push(sound_item(PeerMessageSound::BundledModern { id }, selected, list));
    }
    entries.push(MenuEntry::Separator);
    for id in 0..BUNDLED_CLASSIC_COUNT {
        entries.push(sound_item(PeerMessageSound::BundledClassic { id }, selected, list));
    }
    entries
}

fn topic_menu(row: &RowSnapshot, peer: &Peer) -> Option<Vec<MenuEntry>> {
    let (channel, data) = (peer.as_channel()?, row.thread_data.as_ref()?);
    let mut items: Vec<MenuEntry> = Vec::new();
    if channel.has_pin_permission() {
        items.push(pin_item(row).into());
    }
    items.push(MenuItem::new(mute_label(row), MenuAction::ToggleMute).into());
    if data.is_owned_by_me || channel.is_admin() {
        let label = if row.is_closed_topic {
            "Reopen Topic"
        } else {
            "Close Topic"
        };
        items.push(MenuItem::new(label, MenuAction::ToggleTopicClosed).into());
        items.push(MenuEntry::Separator);
        items.push(MenuItem::new("Delete", MenuAction::Delete).destructive().into());
    }
    Some(items)
}

/// Builds the context menu of one row.
///
/// Items fall into three groups (state toggles, grouping, destructive
/// actions) separated only between non-empty groups.
pub fn build_menu(row: &RowSnapshot, data: &MenuData, caps: &MenuCapabilities) -> Vec<MenuEntry> {
    if row.is_topic()
        && let Some(peer) = &row.main_peer
        && let Some(items) = topic_menu(row, peer)
    {
        return items;
    }

    let can_delete_for_all = data
        .cached_peer_data
        .as_ref()
        .and_then(CachedPeerData::can_delete_for_all);

    let mut first: Vec<MenuItem> = Vec::new();
    let mut second: Vec<MenuItem> = Vec::new();
    let mut third: Vec<MenuItem> = Vec::new();

    match (&row.main_peer, row.peer_id, &row.peer) {
        (Some(main_peer), Some(_), Some(peer)) => {
            if !row.is_ad && row.group_id == ChatListGroup::Root {
                first.push(pin_item(row));
            }

            if row.group_id == ChatListGroup::Root
                && (row.can_archive || row.associated_group != ChatListGroup::Root)
                && row.filter == ChatListFilter::AllChats
            {
                let label = if row.associated_group == ChatListGroup::Root {
                    "Archive"
                } else {
                    "Unarchive"
                };
                second.push(MenuItem::new(label, MenuAction::ToggleArchive));
            }

            if peer.id() != row.account_peer_id && !row.is_ad {
                let mut mute = MenuItem::new(mute_label(row), MenuAction::ToggleMute);
                if !row.is_muted {
                    let mut submenu: Vec<MenuEntry> = MuteDuration::QUICK
                        .iter()
                        .map(|d| MenuItem::new(d.label(), MenuAction::Mute { duration: *d }).into())
                        .collect();
                    submenu.push(MenuEntry::Separator);
                    submenu.push(MenuItem::parent("Sound", sound_menu(data)).into());
                    mute = mute.with_submenu(submenu);
                }
                first.push(mute);
            }

            if main_peer.is_user() {
                third.push(MenuItem::new(
                    "Clear History",
                    MenuAction::ClearHistory { can_delete_for_all },
                ));
                third.push(MenuItem::new("Delete Chat", MenuAction::Delete).destructive());
            }

            if !row.is_secret {
                if row.mark_as_unread {
                    first.push(MenuItem::new("Mark as Unread", MenuAction::MarkUnread));
                } else if row.is_unread {
                    first.push(MenuItem::new("Mark as Read", MenuAction::MarkRead));
                }
            }

            if row.is_ad {
                first.push(MenuItem::new("Hide", MenuAction::HidePromo));
            }

            match peer {
                Peer::Group(_) if !row.is_ad => {
                    third.push(MenuItem::new(
                        "Clear History",
                        MenuAction::ClearHistory { can_delete_for_all },
                    ));
                    third.push(MenuItem::new("Delete and Exit", MenuAction::Delete).destructive());
                }
                Peer::Channel(channel) if !row.is_ad && !channel.has_geo => {
                    if peer.is_broadcast() {
                        third.push(MenuItem::new("Leave Channel", MenuAction::Delete).destructive());
                    } else {
                        if channel.address_name.is_none() {
                            third.push(MenuItem::new(
                                "Clear History",
                                MenuAction::ClearHistory { can_delete_for_all },
                            ));
                        }
                        third.push(MenuItem::new("Leave Group", MenuAction::Delete).destructive());
                    }
                }
                _ => {}
            }
        }
        _ => {
            if !row.is_ad && row.group_id == ChatListGroup::Root {
                first.push(pin_item(row));
            }
        }
    }

    if row.group_id != ChatListGroup::Root
        && row.layout != LayoutMode::Minimized
        && let Some(status) = row.archive_status
    {
        first.push(match status {
            HiddenArchiveStatus::Collapsed => MenuItem::new("Expand", MenuAction::ExpandArchive),
            _ => MenuItem::new("Collapse", MenuAction::CollapseArchive),
        });
    }

    if let Some(peer_id) = row.peer_id
        && !row.is_secret
    {
        let folders: Vec<MenuEntry> = data
            .filters
            .list
            .iter()
            .filter_map(|filter| match filter {
                ChatListFilter::AllChats => None,
                ChatListFilter::Filter { id, title, data } => {
                    let mut item =
                        MenuItem::new(title.clone(), MenuAction::AddToFolder { filter_id: *id })
                            .checked(data.include_peers.contains(&peer_id));
                    item.locked = !folder_accepts(filter, row, caps);
                    Some(item.into())
                }
            })
            .collect();
        if !folders.is_empty() {
            second.push(MenuItem::parent("Add to Folder", folders));
        }
    }

    let mut entries: Vec<MenuEntry> = Vec::new();
    for group in [first, second, third] {
        if group.is_empty() {
            continue;
        }
        if !entries.is_empty() {
            entries.push(MenuEntry::Separator);
        }
        entries.extend(group.into_iter().map(MenuEntry::Item));
    }
    entries
}
