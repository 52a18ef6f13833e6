use std::collections::HashMap;

use super::{TextMeasurer, TextMetrics, TextStyle, TextStyleKey};

/// Cache layer used for axis tick labels.
pub const AXIS_LABEL_LAYER: &str = "axis-labels";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TextCacheKey {
    layer: &'static str,
    style: TextStyleKey,
    text: String,
}

#[derive(Debug, Clone, Copy)]
struct TextCacheEntry {
    metrics: TextMetrics,
    active: bool,
}

/// Runtime metrics exposed by the measured-text cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Measured-text cache keyed by (layer, style, text).
///
/// Entries are created lazily on first measurement. A render pass brackets its
/// measurements with `begin_pass`/`end_pass`; entries not touched during the
/// pass are garbage-collected at `end_pass`. Style-affecting state changes
/// (e.g. a surface resize) call `invalidate_all`.
#[derive(Debug, Default)]
pub struct TextMeasureCache {
    entries: HashMap<TextCacheKey, TextCacheEntry>,
    hits: u64,
    misses: u64,
}

impl TextMeasureCache {
    /// Marks every entry inactive so `end_pass` can collect the untouched ones.
    pub fn begin_pass(&mut self) {
        for entry in self.entries.values_mut() {
            entry.active = false;
        }
    }

    /// Returns the cached measurement or computes it through `measurer`.
    pub fn measure<M: TextMeasurer + ?Sized>(
        &mut self,
        layer: &'static str,
        style: TextStyle,
        text: &str,
        measurer: &M,
    ) -> TextMetrics {
        let key = TextCacheKey {
            layer,
            style: style.cache_key(),
            text: text.to_owned(),
        };

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.active = true;
            self.hits = self.hits.saturating_add(1);
            return entry.metrics;
        }

        let metrics = measurer.measure_text(text, style);
        self.misses = self.misses.saturating_add(1);
        self.entries.insert(
            key,
            TextCacheEntry {
                metrics,
                active: true,
            },
        );
        metrics
    }

    /// Drops every entry that went a full pass without being measured.
    pub fn end_pass(&mut self) {
        self.entries.retain(|_, entry| entry.active);
    }

    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn stats(&self) -> TextCacheStats {
        TextCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
        }
    }
}
