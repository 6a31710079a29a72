//! Reaction sending and the available-reactions catalogue.

use listcore::types::{
    AvailableReactions, InteractiveReaction, MessageId, Peer, ReactionValue, ScreenRect,
    StickerFile, UpdateMessageReaction,
};
use log::{debug, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::watch;

use crate::disposable::{DisposableDict, DisposableSet, MetaDisposable};
use crate::engine::Engine;
use crate::slot::InteractiveSlot;

/// The emoji status the user just picked, kept for the set animation.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractiveStatus {
    pub file_id: i64,
    pub from_rect: Option<ScreenRect>,
}

pub struct Reactions {
    engine: Arc<dyn Engine>,
    state: watch::Receiver<Option<AvailableReactions>>,
    refresh: MetaDisposable,
    reactable: DisposableDict<MessageId>,
    requests: DisposableSet,
    interactive: InteractiveSlot<InteractiveReaction>,
    interactive_status: InteractiveSlot<InteractiveStatus>,
    is_premium: AtomicBool,
}

impl Reactions {
    /// Starts the catalogue refresh loop. Must be called inside a runtime.
    pub fn new(engine: Arc<dyn Engine>, refresh_every: Duration) -> Self {
        let (tx, rx) = watch::channel(None);
        let refresh = MetaDisposable::new();
        refresh.set(tokio::spawn(refresh_loop(engine.clone(), tx, refresh_every)));
        Self {
            engine,
            state: rx,
            refresh,
            reactable: DisposableDict::new(),
            requests: DisposableSet::new(),
            interactive: InteractiveSlot::new(),
            interactive_status: InteractiveSlot::new(),
            is_premium: AtomicBool::new(false),
        }
    }

    /// Latest catalogue, if one has arrived.
    pub fn available(&self) -> Option<AvailableReactions> {
        self.state.borrow().clone()
    }

    /// Receives every distinct catalogue.
    pub fn subscribe(&self) -> watch::Receiver<Option<AvailableReactions>> {
        self.state.clone()
    }

    pub fn is_premium(&self) -> bool {
        self.is_premium.load(Ordering::Relaxed)
    }

    pub fn set_premium(&self, is_premium: bool) {
        self.is_premium.store(is_premium, Ordering::Relaxed);
    }

    /// Applies `values` to a message. A newer call for the same message
    /// cancels the request still in flight.
    pub fn react(
        &self,
        message_id: MessageId,
        values: Vec<UpdateMessageReaction>,
        from_rect: Option<ScreenRect>,
        store_as_recently_used: bool,
    ) {
        self.interactive.put(InteractiveReaction {
            message_id,
            values: values.clone(),
            from_rect,
        });
        let engine = self.engine.clone();
        let handle = tokio::spawn(async move {
            if let Err(e) = engine
                .update_message_reactions(message_id, values, store_as_recently_used)
                .await
            {
                warn!(target: "Reactions", "Failed to update reactions on {:?}: {e}", message_id);
            }
        });
        if self.reactable.set(message_id, handle) {
            debug!(target: "Reactions", "Superseded pending reaction on {:?}", message_id);
        }
    }

    pub fn update_quick(&self, value: ReactionValue) {
        let engine = self.engine.clone();
        self.requests.add(tokio::spawn(async move {
            if let Err(e) = engine.update_quick_reaction(value).await {
                warn!(target: "Reactions", "Failed to update quick reaction: {e}");
            }
        }));
    }

    /// Sets or clears the account emoji status.
    ///
    /// A bundled file, or the file that is already the status, clears it.
    pub fn set_status(
        &self,
        file: StickerFile,
        peer: &Peer,
        timestamp: i32,
        timeout: Option<i32>,
        from_rect: Option<ScreenRect>,
    ) {
        let current = peer.emoji_status().map(|s| s.file_id);
        let expiration = timeout.map(|t| timestamp.saturating_add(t));

        let file = if file.is_bundled() || current == Some(file.file_id) {
            self.interactive_status.clear();
            None
        } else {
            self.interactive_status.put(InteractiveStatus {
                file_id: file.file_id,
                from_rect,
            });
            Some(file)
        };

        let engine = self.engine.clone();
        self.requests.add(tokio::spawn(async move {
            if let Err(e) = engine.set_emoji_status(file, expiration).await {
                warn!(target: "Reactions", "Failed to set emoji status: {e}");
            }
        }));
    }

    pub fn interactive(&self) -> Option<InteractiveReaction> {
        self.interactive.take()
    }

    pub fn interactive_status(&self) -> Option<InteractiveStatus> {
        self.interactive_status.take()
    }

    /// In-flight reaction requests.
    pub fn pending_reactions(&self) -> usize {
        self.reactable.live_count()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_live()
    }

    pub fn dispose(&self) {
        self.requests.dispose();
        self.refresh.dispose();
        self.reactable.dispose();
    }
}

impl Drop for Reactions {
    fn drop(&mut self) {
        self.dispose();
    }
}

async fn refresh_loop(
    engine: Arc<dyn Engine>,
    tx: watch::Sender<Option<AvailableReactions>>,
    every: Duration,
) {
    loop {
        match engine.available_reactions().await {
            Ok(fresh) => {
                tx.send_if_modified(|current| {
                    if *current != fresh {
                        *current = fresh;
                        true
                    } else {
                        false
                    }
                });
            }
            Err(e) => warn!(target: "Reactions", "Failed to fetch available reactions: {e}"),
        }
        tokio::time::sleep(every).await;
    }
}
