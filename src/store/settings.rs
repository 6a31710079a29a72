use listcore::StickerSettings;
use log::{debug, warn};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::{Mutex, watch};

use crate::store::error::{Result, StoreError};

const STICKER_SETTINGS_FILE: &str = "sticker_settings.bin";
const STICKER_SETTINGS_TMP: &str = "sticker_settings.bin.tmp";

/// Persists the sticker settings record in its keyed binary form.
///
/// The last saved record is kept in memory; the file is only read on open.
pub struct SettingsStore {
    base_path: PathBuf,
    write_lock: Mutex<()>,
    updates: watch::Sender<StickerSettings>,
}

impl SettingsStore {
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = path.into();
        fs::create_dir_all(&base_path).await?;
        let current = read_record(&base_path.join(STICKER_SETTINGS_FILE))
            .await?
            .unwrap_or_default();
        let (updates, _) = watch::channel(current);
        Ok(Self {
            base_path,
            write_lock: Mutex::new(()),
            updates,
        })
    }

    fn sticker_settings_path(&self) -> PathBuf {
        self.base_path.join(STICKER_SETTINGS_FILE)
    }

    /// The stored record, or the defaults when nothing was saved yet.
    pub fn sticker_settings(&self) -> StickerSettings {
        *self.updates.borrow()
    }

    /// Applies `f` to the current record and saves the result.
    pub async fn update_sticker_settings(
        &self,
        f: impl FnOnce(StickerSettings) -> StickerSettings,
    ) -> Result<StickerSettings> {
        let _guard = self.write_lock.lock().await;
        let updated = f(self.sticker_settings());
        // Replace the record in one rename so a concurrent open never sees a
        // truncated file.
        let tmp_path = self.base_path.join(STICKER_SETTINGS_TMP);
        fs::write(&tmp_path, updated.encode_keyed()).await?;
        fs::rename(&tmp_path, self.sticker_settings_path()).await?;
        debug!(target: "Settings", "Saved sticker settings: {:?}", updated);
        self.updates.send_replace(updated);
        Ok(updated)
    }

    pub fn subscribe(&self) -> watch::Receiver<StickerSettings> {
        self.updates.subscribe()
    }
}

async fn read_record(path: &Path) -> Result<Option<StickerSettings>> {
    match fs::read(path).await {
        Ok(data) => StickerSettings::decode_keyed(&data).map(Some).map_err(|e| {
            warn!(target: "Settings", "Unreadable sticker settings at {}: {e}", path.display());
            StoreError::from(e)
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Io(e)),
    }
}
