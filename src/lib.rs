// Platform-independent derivation lives in listcore; re-exported for callers.
pub use listcore::{appearance as color, date, menu as menu_core, mute, preview, settings, text, types};
pub use listcore::{
    ChatListRow, ChatRowInput, GroupRowInput, MenuAction, MenuEntry, RowContext, RowSnapshot,
    StickerSettings,
};

// Runtime side: engine boundary, subscriptions, actions
pub mod appearance;
pub mod config;
pub mod dispatch;
pub mod disposable;
pub mod engine;
pub mod error;
pub mod menu;
pub mod presence;
pub mod reactions;
pub mod row;
pub mod slot;
pub mod store;

pub use config::ClientConfig;
pub use dispatch::{ActionDispatcher, UiHost};
pub use engine::Engine;
pub use reactions::Reactions;
pub use row::{RowController, RowEvent};
pub use store::SettingsStore;
