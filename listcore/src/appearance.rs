//! Name color and background icon selection for the account or a channel.

use serde::{Deserialize, Serialize};

use crate::types::{Peer, PeerId, StickerFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum PeerNameColor {
    Red,
    Orange,
    Violet,
    Green,
    Cyan,
    Blue,
    Pink,
    /// Server-defined palette entry beyond the built-in seven.
    Other(i32),
}

impl From<i32> for PeerNameColor {
    fn from(raw: i32) -> Self {
        match raw {
            0 => PeerNameColor::Red,
            1 => PeerNameColor::Orange,
            2 => PeerNameColor::Violet,
            3 => PeerNameColor::Green,
            4 => PeerNameColor::Cyan,
            5 => PeerNameColor::Blue,
            6 => PeerNameColor::Pink,
            other => PeerNameColor::Other(other),
        }
    }
}

impl From<PeerNameColor> for i32 {
    fn from(color: PeerNameColor) -> Self {
        color.raw()
    }
}

impl PeerNameColor {
    pub fn raw(self) -> i32 {
        match self {
            PeerNameColor::Red => 0,
            PeerNameColor::Orange => 1,
            PeerNameColor::Violet => 2,
            PeerNameColor::Green => 3,
            PeerNameColor::Cyan => 4,
            PeerNameColor::Blue => 5,
            PeerNameColor::Pink => 6,
            PeerNameColor::Other(raw) => raw,
        }
    }
}

/// Colors in picker order for the given server display order.
pub fn display_colors(display_order: &[i32]) -> Vec<PeerNameColor> {
    display_order.iter().copied().map(PeerNameColor::from).collect()
}

/// Default order when the server sends none.
pub const DEFAULT_DISPLAY_ORDER: [i32; 7] = [5, 3, 1, 0, 2, 4, 6];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectColorSource {
    Account(Peer),
    Channel(Peer),
}

impl SelectColorSource {
    pub fn peer(&self) -> &Peer {
        match self {
            SelectColorSource::Account(peer) | SelectColorSource::Channel(peer) => peer,
        }
    }

    pub fn peer_id(&self) -> PeerId {
        self.peer().id()
    }

    pub fn name_color(&self) -> Option<PeerNameColor> {
        self.peer().name_color().map(PeerNameColor::from)
    }

    pub fn background_icon(&self) -> Option<i64> {
        self.peer().background_emoji_id()
    }

    pub fn title(&self) -> &'static str {
        match self {
            SelectColorSource::Account(_) => "Your Name Color",
            SelectColorSource::Channel(_) => "Channel Color",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSelectionState {
    pub selected: PeerNameColor,
    pub background_emoji_id: Option<i64>,
    pub saving: bool,
}

impl ColorSelectionState {
    pub fn initial(source: &SelectColorSource) -> Self {
        Self {
            selected: source.name_color().unwrap_or(PeerNameColor::Blue),
            background_emoji_id: source.background_icon(),
            saving: false,
        }
    }

    pub fn toggle_color(&mut self, color: PeerNameColor) {
        self.selected = color;
    }

    /// A bundled file clears the icon.
    pub fn set_background_icon(&mut self, file: &StickerFile) {
        self.background_emoji_id = (!file.is_bundled()).then_some(file.file_id);
    }

    pub fn remove_icon(&mut self) {
        self.background_emoji_id = None;
    }

    pub fn has_icon(&self) -> bool {
        self.background_emoji_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Channel, ChannelKind, User};

    #[test]
    fn test_initial_state_defaults_to_blue() {
        let source = SelectColorSource::Account(Peer::User(User::new(PeerId::user(1), "Me")));
        let state = ColorSelectionState::initial(&source);
        assert_eq!(state.selected, PeerNameColor::Blue);
        assert!(!state.has_icon());
    }

    #[test]
    fn test_initial_state_uses_peer_values() {
        let mut channel = Channel::new(PeerId::channel(4), "News", ChannelKind::Broadcast);
        channel.name_color = Some(6);
        channel.background_emoji_id = Some(99);
        let state = ColorSelectionState::initial(&SelectColorSource::Channel(Peer::Channel(channel)));
        assert_eq!(state.selected, PeerNameColor::Pink);
        assert_eq!(state.background_emoji_id, Some(99));
    }

    #[test]
    fn test_icon_selection() {
        let source = SelectColorSource::Account(Peer::User(User::new(PeerId::user(1), "Me")));
        let mut state = ColorSelectionState::initial(&source);
        state.set_background_icon(&StickerFile::new(5, "application/x-tgsticker"));
        assert_eq!(state.background_emoji_id, Some(5));
        state.set_background_icon(&StickerFile::new(0, "bundle/emoji"));
        assert_eq!(state.background_emoji_id, None);
        state.set_background_icon(&StickerFile::new(7, "image/webp"));
        state.remove_icon();
        assert!(!state.has_icon());
    }

    #[test]
    fn test_raw_values_survive_serde() {
        let colors = display_colors(&[5, 0, 11]);
        assert_eq!(colors, vec![PeerNameColor::Blue, PeerNameColor::Red, PeerNameColor::Other(11)]);
        let json = serde_json::to_string(&colors).unwrap();
        assert_eq!(json, "[5,0,11]");
    }
}
