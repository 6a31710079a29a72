pub mod appearance;
pub mod date;
pub mod menu;
pub mod mute;
pub mod preview;
pub mod row;
pub mod settings;
pub mod text;
pub mod types;

pub use menu::{MenuAction, MenuCapabilities, MenuData, MenuEntry, MenuItem, build_menu};
pub use row::{ChatListRow, ChatRowInput, GroupRowInput, RowContext, RowMode, RowSnapshot, TitleMode};
pub use settings::{EmojiStickerSuggestionMode, SettingsError, StickerSettings};
