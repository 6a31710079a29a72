//! Styled text and a small line-breaking measurer.
//!
//! Colors are theme roles rather than concrete values; the renderer maps
//! them onto its palette. Every row text comes in two variants, the plain
//! one and the "selected" one drawn on top of the selection background.

use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRole {
    Title,
    Peer,
    Text,
    Gray,
    Secret,
    Accent,
    UnderSelected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub role: TextRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledText {
    spans: Vec<Span>,
}

impl StyledText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(text: impl Into<String>, role: TextRole) -> Self {
        let mut styled = Self::new();
        styled.push(text, role);
        styled
    }

    pub fn push(&mut self, text: impl Into<String>, role: TextRole) -> &mut Self {
        let text = text.into();
        if !text.is_empty() {
            self.spans.push(Span { text, role });
        }
        self
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn string(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.text.is_empty())
    }

    /// Same text recolored for a selected row.
    pub fn selected(&self) -> Self {
        Self {
            spans: self
                .spans
                .iter()
                .map(|s| Span {
                    text: s.text.clone(),
                    role: TextRole::UnderSelected,
                })
                .collect(),
        }
    }
}

/// Glyph metrics used to break and size text.
pub trait TextMetrics: Send + Sync {
    fn advance(&self, c: char) -> f32;
    fn line_height(&self) -> f32;
}

/// Monospace-like metrics: one advance for narrow glyphs, another for
/// wide (CJK, emoji) ones.
#[derive(Debug, Clone, Copy)]
pub struct FixedMetrics {
    pub char_width: f32,
    pub wide_char_width: f32,
    pub line_height: f32,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            wide_char_width: 14.0,
            line_height: 17.0,
        }
    }
}

impl TextMetrics for FixedMetrics {
    fn advance(&self, c: char) -> f32 {
        if (c as u32) >= 0x2E80 {
            self.wide_char_width
        } else {
            self.char_width
        }
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

pub fn default_metrics() -> Arc<dyn TextMetrics> {
    Arc::new(FixedMetrics::default())
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutSize {
    pub width: f32,
    pub height: f32,
    pub lines: usize,
    /// The text did not fit and was cut with an ellipsis.
    pub truncated: bool,
}

/// Something a [`LayoutCache`] can hold.
pub trait CachedLayout {
    fn is_empty(&self) -> bool;
    /// A wider box could not change the result.
    fn is_perfect(&self) -> bool;
}

impl CachedLayout for LayoutSize {
    fn is_empty(&self) -> bool {
        self.lines == 0
    }

    fn is_perfect(&self) -> bool {
        !self.truncated
    }
}

/// Last measured width and result for one layout.
///
/// A layout is measured again when there is no result yet, the width shrank,
/// the previous result was empty, or the width grew past a truncated result.
#[derive(Debug, Clone, Default)]
pub struct LayoutCache<T> {
    last_width: Option<f32>,
    last_result: Option<T>,
    measurements: usize,
}

impl<T: CachedLayout + Clone> LayoutCache<T> {
    pub fn new() -> Self {
        Self {
            last_width: None,
            last_result: None,
            measurements: 0,
        }
    }

    pub fn needs_update(&self, width: f32) -> bool {
        match (&self.last_result, self.last_width) {
            (Some(result), Some(last_width)) => {
                width < last_width
                    || result.is_empty()
                    || (width > last_width && !result.is_perfect())
            }
            _ => true,
        }
    }

    /// Returns the cached result, measuring with `f` when stale.
    pub fn get_or_measure(&mut self, width: f32, f: impl FnOnce(f32) -> T) -> T {
        if self.needs_update(width) {
            let result = f(width);
            self.last_width = Some(width);
            self.last_result = Some(result.clone());
            self.measurements += 1;
            result
        } else {
            // needs_update is false only when a result exists
            self.last_result.clone().unwrap_or_else(|| f(width))
        }
    }

    pub fn last(&self) -> Option<&T> {
        self.last_result.as_ref()
    }

    pub fn last_width(&self) -> Option<f32> {
        self.last_width
    }

    pub fn measurements(&self) -> usize {
        self.measurements
    }

    pub fn invalidate(&mut self) {
        self.last_width = None;
        self.last_result = None;
    }
}

/// A block of styled text limited to `max_lines`, optionally flowing
/// around a reserved area in the top-left corner.
#[derive(Debug, Clone)]
pub struct TextLayout {
    text: StyledText,
    max_lines: usize,
    cutout_width: f32,
    cache: LayoutCache<LayoutSize>,
}

impl TextLayout {
    pub fn new(text: StyledText, max_lines: usize) -> Self {
        Self {
            text,
            max_lines: max_lines.max(1),
            cutout_width: 0.0,
            cache: LayoutCache::new(),
        }
    }

    pub fn with_cutout(mut self, cutout_width: f32) -> Self {
        self.cutout_width = cutout_width.max(0.0);
        self
    }

    pub fn text(&self) -> &StyledText {
        &self.text
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    pub fn cutout_width(&self) -> f32 {
        self.cutout_width
    }

    pub fn measure(&mut self, width: f32, metrics: &dyn TextMetrics) -> LayoutSize {
        let text = self.text.string();
        let max_lines = self.max_lines;
        let cutout = self.cutout_width;
        self.cache
            .get_or_measure(width, |w| break_lines(&text, w, cutout, max_lines, metrics))
    }

    /// Size from the last measurement; zero before the first one.
    pub fn size(&self) -> LayoutSize {
        self.cache.last().copied().unwrap_or_default()
    }

    pub fn measured_width(&self) -> Option<f32> {
        self.cache.last_width()
    }

    pub fn measurements(&self) -> usize {
        self.cache.measurements()
    }
}

fn break_lines(
    text: &str,
    width: f32,
    cutout: f32,
    max_lines: usize,
    metrics: &dyn TextMetrics,
) -> LayoutSize {
    if text.is_empty() || width <= 0.0 {
        return LayoutSize::default();
    }

    let mut lines = 1usize;
    let mut line_width = 0.0f32;
    let mut widest = 0.0f32;
    let mut truncated = false;

    for c in text.chars() {
        if c == '\n' {
            widest = widest.max(line_width);
            if lines == max_lines {
                truncated = true;
                break;
            }
            lines += 1;
            line_width = 0.0;
            continue;
        }
        let available = if lines == 1 { width - cutout } else { width };
        let advance = metrics.advance(c);
        if line_width + advance > available {
            widest = widest.max(line_width);
            if lines == max_lines {
                truncated = true;
                break;
            }
            lines += 1;
            line_width = 0.0;
        }
        line_width += advance;
    }
    widest = widest.max(line_width);

    let first_line_offset = if lines == 1 { cutout } else { 0.0 };
    LayoutSize {
        width: (widest + first_line_offset).min(width),
        height: lines as f32 * metrics.line_height(),
        lines,
        truncated,
    }
}
