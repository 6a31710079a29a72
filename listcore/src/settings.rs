//! Sticker and emoji suggestion preferences.
//!
//! The record has two encodings. The keyed binary one is what the settings
//! store writes to disk: a sequence of `(key, typed value)` entries in any
//! order. The structured one is a JSON object with the same keys. Both omit
//! `t.c.o` when it is absent and read a missing `dpo` as `true`.

use bytes::{Buf, BufMut, BytesMut};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use thiserror::Error;

pub const KEY_SUGGESTION_MODE: &str = "emojiStickerSuggestionMode";
pub const KEY_TRENDING_CLOSED_ON: &str = "t.c.o";
pub const KEY_DYNAMIC_PACK_ORDER: &str = "dpo";

const TAG_I32: u8 = 0;
const TAG_I64: u8 = 1;
const TAG_BOOL: u8 = 2;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unexpected end of record")]
    Eof,
    #[error("invalid utf-8 in key: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("unknown value tag {0}")]
    UnknownTag(u8),
    #[error("key {key} holds the wrong value type")]
    TypeMismatch { key: String },
    #[error("suggestion mode {0} is out of range")]
    InvalidSuggestionMode(i32),
    #[error("structured encoding: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EmojiStickerSuggestionMode {
    None = 0,
    #[default]
    All = 1,
    Installed = 2,
}

impl EmojiStickerSuggestionMode {
    pub fn raw(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for EmojiStickerSuggestionMode {
    type Error = SettingsError;

    fn try_from(raw: i32) -> Result<Self> {
        match raw {
            0 => Ok(Self::None),
            1 => Ok(Self::All),
            2 => Ok(Self::Installed),
            other => Err(SettingsError::InvalidSuggestionMode(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickerSettings {
    pub emoji_sticker_suggestion_mode: EmojiStickerSuggestionMode,
    pub trending_closed_on: Option<i64>,
    pub dynamic_pack_order: bool,
}

impl Default for StickerSettings {
    fn default() -> Self {
        Self {
            emoji_sticker_suggestion_mode: EmojiStickerSuggestionMode::All,
            trending_closed_on: None,
            dynamic_pack_order: true,
        }
    }
}

impl StickerSettings {
    pub fn with_updated_suggestion_mode(self, mode: EmojiStickerSuggestionMode) -> Self {
        Self {
            emoji_sticker_suggestion_mode: mode,
            ..self
        }
    }

    pub fn with_updated_trending_closed_on(self, trending_closed_on: Option<i64>) -> Self {
        Self {
            trending_closed_on,
            ..self
        }
    }

    pub fn with_updated_dynamic_pack_order(self, dynamic_pack_order: bool) -> Self {
        Self {
            dynamic_pack_order,
            ..self
        }
    }

    pub fn encode_keyed(&self) -> Vec<u8> {
        let mut out = KeyedEncoder::new();
        out.put_i32(KEY_SUGGESTION_MODE, self.emoji_sticker_suggestion_mode.raw());
        if let Some(ts) = self.trending_closed_on {
            out.put_i64(KEY_TRENDING_CLOSED_ON, ts);
        }
        out.put_bool(KEY_DYNAMIC_PACK_ORDER, self.dynamic_pack_order);
        out.finish()
    }

    pub fn decode_keyed(data: &[u8]) -> Result<Self> {
        let mut mode = 0;
        let mut trending_closed_on = None;
        let mut dynamic_pack_order = None;

        let mut decoder = KeyedDecoder::new(data);
        while let Some((key, value)) = decoder.next_entry()? {
            match (key, value) {
                (KEY_SUGGESTION_MODE, KeyedValue::I32(v)) => mode = v,
                (KEY_TRENDING_CLOSED_ON, KeyedValue::I64(v)) => trending_closed_on = Some(v),
                (KEY_DYNAMIC_PACK_ORDER, KeyedValue::Bool(v)) => dynamic_pack_order = Some(v),
                (KEY_SUGGESTION_MODE | KEY_TRENDING_CLOSED_ON | KEY_DYNAMIC_PACK_ORDER, _) => {
                    return Err(SettingsError::TypeMismatch {
                        key: key.to_string(),
                    });
                }
                _ => {}
            }
        }

        Ok(Self {
            emoji_sticker_suggestion_mode: mode.try_into()?,
            trending_closed_on,
            dynamic_pack_order: dynamic_pack_order.unwrap_or(true),
        })
    }

    pub fn encode_structured(&self) -> Result<String> {
        Ok(serde_json::to_string(&StructuredSettings::from(*self))?)
    }

    pub fn decode_structured(json: &str) -> Result<Self> {
        serde_json::from_str::<StructuredSettings>(json)?.try_into()
    }
}

fn default_true() -> bool {
    true
}

#[derive(Serialize, Deserialize)]
struct StructuredSettings {
    #[serde(rename = "emojiStickerSuggestionMode")]
    mode: i32,
    #[serde(rename = "t.c.o", default, skip_serializing_if = "Option::is_none")]
    trending_closed_on: Option<i64>,
    #[serde(rename = "dpo", default = "default_true")]
    dynamic_pack_order: bool,
}

impl From<StickerSettings> for StructuredSettings {
    fn from(s: StickerSettings) -> Self {
        Self {
            mode: s.emoji_sticker_suggestion_mode.raw(),
            trending_closed_on: s.trending_closed_on,
            dynamic_pack_order: s.dynamic_pack_order,
        }
    }
}

impl TryFrom<StructuredSettings> for StickerSettings {
    type Error = SettingsError;

    fn try_from(s: StructuredSettings) -> Result<Self> {
        Ok(Self {
            emoji_sticker_suggestion_mode: s.mode.try_into()?,
            trending_closed_on: s.trending_closed_on,
            dynamic_pack_order: s.dynamic_pack_order,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyedValue {
    I32(i32),
    I64(i64),
    Bool(bool),
}

/// Writes `u8 key length, key bytes, u8 tag, big-endian value` entries.
struct KeyedEncoder {
    buf: BytesMut,
}

impl KeyedEncoder {
    fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(64),
        }
    }

    fn put_key(&mut self, key: &str, tag: u8) {
        self.buf.put_u8(key.len() as u8);
        self.buf.put_slice(key.as_bytes());
        self.buf.put_u8(tag);
    }

    fn put_i32(&mut self, key: &str, v: i32) {
        self.put_key(key, TAG_I32);
        self.buf.put_i32(v);
    }

    fn put_i64(&mut self, key: &str, v: i64) {
        self.put_key(key, TAG_I64);
        self.buf.put_i64(v);
    }

    fn put_bool(&mut self, key: &str, v: bool) {
        self.put_key(key, TAG_BOOL);
        self.buf.put_u8(u8::from(v));
    }

    fn finish(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}

struct KeyedDecoder<'a> {
    reader: Cursor<&'a [u8]>,
}

impl<'a> KeyedDecoder<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            reader: Cursor::new(data),
        }
    }

    fn check_eos(&self, len: usize) -> Result<()> {
        if self.reader.remaining() >= len {
            Ok(())
        } else {
            Err(SettingsError::Eof)
        }
    }

    fn read_key(&mut self) -> Result<&'a str> {
        self.check_eos(1)?;
        let len = self.reader.get_u8() as usize;
        self.check_eos(len)?;
        let start = self.reader.position() as usize;
        self.reader.advance(len);
        Ok(std::str::from_utf8(&self.reader.get_ref()[start..start + len])?)
    }

    fn next_entry(&mut self) -> Result<Option<(&'a str, KeyedValue)>> {
        if !self.reader.has_remaining() {
            return Ok(None);
        }
        let key = self.read_key()?;
        self.check_eos(1)?;
        let value = match self.reader.get_u8() {
            TAG_I32 => {
                self.check_eos(4)?;
                KeyedValue::I32(self.reader.get_i32())
            }
            TAG_I64 => {
                self.check_eos(8)?;
                KeyedValue::I64(self.reader.get_i64())
            }
            TAG_BOOL => {
                self.check_eos(1)?;
                KeyedValue::Bool(self.reader.get_u8() != 0)
            }
            tag => return Err(SettingsError::UnknownTag(tag)),
        };
        Ok(Some((key, value)))
    }
}
