//! A row kept alive on screen, together with the subscriptions that feed it.

use listcore::types::{Presence, UiEntryId};
use listcore::{ChatListRow, RowSnapshot};
use log::{debug, warn};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use crate::disposable::DisposableSet;
use crate::engine::Engine;
use crate::presence::offline_delay;

/// What the list should do after a background update touched a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEvent {
    Redraw(UiEntryId),
    PhotosUpdated(UiEntryId),
}

pub struct RowController {
    entry_id: UiEntryId,
    row: Arc<Mutex<ChatListRow>>,
    subscriptions: DisposableSet,
}

impl RowController {
    /// Takes ownership of `row` and starts its presence and photo
    /// subscriptions. Must be called inside a runtime.
    pub fn spawn(
        mut row: ChatListRow,
        presence: Option<Presence>,
        engine: Arc<dyn Engine>,
        events: mpsc::Sender<RowEvent>,
    ) -> Self {
        let entry_id = row.entry_id();
        let photo_peer = row.wants_photo_history().then(|| row.peer_id()).flatten();
        if let Some(peer_id) = photo_peer {
            row.set_photos(engine.cached_peer_photos(peer_id));
        }

        let delay = match (row.is_online(), presence) {
            (Some(true), Some(presence)) => {
                let context = row.context();
                offline_delay(&presence, context.time_difference, context.unix_now())
            }
            _ => None,
        };

        let row = Arc::new(Mutex::new(row));
        let subscriptions = DisposableSet::new();

        if let Some(delay) = delay {
            let row = row.clone();
            let events = events.clone();
            subscriptions.add(tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let changed = row.lock().map(|mut r| r.set_offline()).unwrap_or(false);
                if changed {
                    debug!(target: "ChatList/Row", "Presence lapsed for {:?}", entry_id);
                    let _ = events.send(RowEvent::Redraw(entry_id)).await;
                }
            }));
        }

        if let Some(peer_id) = photo_peer {
            let row = row.clone();
            subscriptions.add(tokio::spawn(async move {
                match engine.peer_photos(peer_id).await {
                    Ok(photos) => {
                        let changed = row.lock().map(|mut r| r.set_photos(photos)).unwrap_or(false);
                        if changed {
                            let _ = events.send(RowEvent::PhotosUpdated(entry_id)).await;
                        }
                    }
                    Err(e) => {
                        warn!(target: "ChatList/Row", "Failed to fetch photos for {:?}: {e}", peer_id)
                    }
                }
            }));
        }

        Self {
            entry_id,
            row,
            subscriptions,
        }
    }

    pub fn entry_id(&self) -> UiEntryId {
        self.entry_id
    }

    /// Runs `f` against the current row state.
    pub fn with_row<R>(&self, f: impl FnOnce(&ChatListRow) -> R) -> Option<R> {
        self.row.lock().ok().map(|row| f(&row))
    }

    pub fn snapshot(&self) -> Option<RowSnapshot> {
        self.with_row(ChatListRow::snapshot)
    }

    /// Resizes the row; true when its layouts changed.
    pub fn make_size(&self, width: f32) -> bool {
        self.row
            .lock()
            .map(|mut row| {
                let old = row.width();
                row.make_size(width, old)
            })
            .unwrap_or(false)
    }

    pub fn live_subscriptions(&self) -> usize {
        self.subscriptions.live_count()
    }

    /// Stops every subscription; the row stays readable.
    pub fn cancel(&self) {
        self.subscriptions.dispose();
    }
}

impl Drop for RowController {
    fn drop(&mut self) {
        self.cancel();
    }
}
