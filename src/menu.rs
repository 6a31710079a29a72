use futures_util::future::join5;
use listcore::{MenuCapabilities, MenuData, MenuEntry, RowSnapshot, build_menu};
use log::warn;
use std::sync::Arc;

use crate::engine::Engine;
use crate::error::EngineResult;

fn or_default<T: Default>(what: &str, result: EngineResult<T>) -> T {
    result.unwrap_or_else(|e| {
        warn!(target: "ChatList/Menu", "Could not load {what}: {e}");
        T::default()
    })
}

/// Queries everything the row's menu depends on, once and concurrently,
/// then builds it.
pub async fn load_menu(
    engine: &Arc<dyn Engine>,
    row: &RowSnapshot,
    caps: &MenuCapabilities,
) -> Vec<MenuEntry> {
    let data = match row.peer_id {
        Some(peer_id) => {
            let (filters, cached, app, sounds, peer_settings) = join5(
                engine.chat_list_filters(),
                engine.cached_peer_data(peer_id),
                engine.app_notification_settings(),
                engine.notification_sound_list(),
                engine.peer_notification_settings(peer_id, row.thread_id),
            )
            .await;
            MenuData {
                filters: or_default("filters", filters),
                cached_peer_data: or_default("cached peer data", cached),
                app_notification_settings: or_default("app notification settings", app),
                sounds: or_default("sounds", sounds),
                peer_notification_settings: or_default("notification settings", peer_settings),
            }
        }
        None => MenuData::default(),
    };
    build_menu(row, &data, caps)
}
