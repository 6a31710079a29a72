//! Applying a name color and background icon choice.

use listcore::appearance::{ColorSelectionState, SelectColorSource};
use log::info;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::dispatch::UiHost;
use crate::engine::Engine;
use crate::error::AppearanceError;

pub struct AppearanceController {
    engine: Arc<dyn Engine>,
    host: Arc<dyn UiHost>,
    config: Arc<ClientConfig>,
    source: SelectColorSource,
    state: ColorSelectionState,
}

impl AppearanceController {
    pub fn new(
        engine: Arc<dyn Engine>,
        host: Arc<dyn UiHost>,
        config: Arc<ClientConfig>,
        source: SelectColorSource,
    ) -> Self {
        let state = ColorSelectionState::initial(&source);
        Self {
            engine,
            host,
            config,
            source,
            state,
        }
    }

    pub fn state(&self) -> &ColorSelectionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ColorSelectionState {
        &mut self.state
    }

    /// Saves the current selection, or explains to the user why it can't
    /// be saved yet.
    pub async fn apply(&mut self) -> Result<(), AppearanceError> {
        let color = self.state.selected.raw();
        let icon = self.state.background_emoji_id;
        self.state.saving = true;
        let result = self.save(color, icon).await;
        self.state.saving = false;
        result
    }

    async fn save(&self, color: i32, icon: Option<i64>) -> Result<(), AppearanceError> {
        match &self.source {
            SelectColorSource::Channel(peer) => {
                let peer_id = peer.id();
                let status = self.engine.channel_boost_status(peer_id).await?;
                let required = self.config.channel_color_level_min;
                if status.level < required {
                    self.host.show_boost_prompt(peer_id, status, required).await;
                    return Err(AppearanceError::BoostRequired {
                        level: status.level,
                        required,
                    });
                }
                self.engine
                    .update_peer_name_color_and_emoji(peer_id, color, icon)
                    .await?;
                info!(target: "Appearance", "Updated channel color for {:?}", peer_id);
                self.host.toast("Channel color updated".to_string()).await;
            }
            SelectColorSource::Account(peer) => {
                if !peer.is_premium() {
                    self.host.show_premium_offer().await;
                    return Err(AppearanceError::PremiumRequired);
                }
                self.engine.update_name_color_and_emoji(color, icon).await?;
                self.host.toast("Your name color has been updated".to_string()).await;
            }
        }
        Ok(())
    }
}
