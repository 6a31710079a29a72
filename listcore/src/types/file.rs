use serde::{Deserialize, Serialize};

/// A sticker or custom-emoji file picked in an emoji panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StickerFile {
    pub file_id: i64,
    pub mime_type: String,
}

impl StickerFile {
    pub fn new(file_id: i64, mime_type: impl Into<String>) -> Self {
        Self {
            file_id,
            mime_type: mime_type.into(),
        }
    }

    /// Files shipped with the app stand for "no custom choice".
    pub fn is_bundled(&self) -> bool {
        self.mime_type.starts_with("bundle")
    }
}
