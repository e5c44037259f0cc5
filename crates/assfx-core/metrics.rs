//! Font measurement seam between the object model and the platform.
//!
//! The core never touches font files or rasterizers; everything geometric is
//! derived from a caller-supplied [`FontMetrics`] implementation. Two
//! implementations ship with the crate: [`NullMetrics`] for callers that only
//! need timing and text segmentation, and [`MonospaceMetrics`] for tests and
//! examples that want predictable numbers.

use crate::model::Style;

/// Width and height of a measured text run, in script pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtents {
    /// Horizontal advance of the run, spacing and X scale applied.
    pub width: f64,
    /// Height of the run, Y scale applied.
    pub height: f64,
}

/// Vertical metrics of a styled font face, in script pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VerticalMetrics {
    /// Distance from baseline to the top of the tallest glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of the lowest glyphs.
    pub descent: f64,
    /// Leading included inside ascent.
    pub internal_leading: f64,
    /// Extra leading the face requests between rows.
    pub external_leading: f64,
}

/// Measurement capability the positioning pass depends on.
///
/// Implementations must be deterministic within a process run: the same
/// `(style, text)` pair always measures the same. The resolver measures every
/// hierarchy level (line, word, syllable, char) through one source, so mixed
/// sources would break the additivity the layout maths assumes. Caching is
/// the implementation's own concern.
pub trait FontMetrics {
    /// Measure a text run rendered with `style`.
    fn text_extents(&self, style: &Style, text: &str) -> TextExtents;

    /// Vertical metrics of the font face `style` selects.
    fn font_metrics(&self, style: &Style) -> VerticalMetrics;
}

/// Metrics source that measures everything as zero.
///
/// Parsing with it yields correct timing and segmentation with degenerate
/// (zero-sized) geometry; nothing errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMetrics;

impl FontMetrics for NullMetrics {
    fn text_extents(&self, _style: &Style, _text: &str) -> TextExtents {
        TextExtents::default()
    }

    fn font_metrics(&self, _style: &Style) -> VerticalMetrics {
        VerticalMetrics::default()
    }
}

/// Fixed-advance metrics source with predictable output.
///
/// Every character advances `advance` pixels and every run is `height`
/// pixels tall, before style scaling. Style spacing and `scale_x`/`scale_y`
/// are applied the same way a real adapter would, so layout tests exercise
/// the full formula with numbers that can be checked by hand.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMetrics {
    /// Unscaled horizontal advance per character.
    pub advance: f64,
    /// Unscaled height of a text run.
    pub height: f64,
}

impl MonospaceMetrics {
    /// Create a source with the given per-character advance and run height.
    #[must_use]
    pub const fn new(advance: f64, height: f64) -> Self {
        Self { advance, height }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new(10.0, 20.0)
    }
}

impl FontMetrics for MonospaceMetrics {
    fn text_extents(&self, style: &Style, text: &str) -> TextExtents {
        let count = text.chars().count();
        let spacing_slots = count.saturating_sub(1) as f64;
        TextExtents {
            width: (self.advance * count as f64 + style.spacing * spacing_slots)
                * (style.scale_x / 100.0),
            height: self.height * (style.scale_y / 100.0),
        }
    }

    fn font_metrics(&self, style: &Style) -> VerticalMetrics {
        let yscale = style.scale_y / 100.0;
        VerticalMetrics {
            ascent: self.height * 0.8 * yscale,
            descent: self.height * 0.2 * yscale,
            internal_leading: 0.0,
            external_leading: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Style;

    #[test]
    fn monospace_width_scales_with_text_length() {
        let style = Style::default();
        let metrics = MonospaceMetrics::default();
        assert_eq!(metrics.text_extents(&style, "").width, 0.0);
        assert_eq!(metrics.text_extents(&style, "Hello").width, 50.0);
        assert_eq!(metrics.text_extents(&style, "Hello").height, 20.0);
    }

    #[test]
    fn monospace_applies_spacing_between_characters() {
        let style = Style {
            spacing: 2.0,
            ..Style::default()
        };
        let metrics = MonospaceMetrics::default();
        // 3 chars, 2 inter-character gaps
        assert_eq!(metrics.text_extents(&style, "abc").width, 34.0);
    }

    #[test]
    fn monospace_applies_scale_percentages() {
        let style = Style {
            scale_x: 50.0,
            scale_y: 200.0,
            ..Style::default()
        };
        let metrics = MonospaceMetrics::default();
        let extents = metrics.text_extents(&style, "ab");
        assert_eq!(extents.width, 10.0);
        assert_eq!(extents.height, 40.0);
        assert_eq!(metrics.font_metrics(&style).ascent, 32.0);
    }

    #[test]
    fn null_metrics_measure_zero() {
        let style = Style::default();
        assert_eq!(NullMetrics.text_extents(&style, "anything").width, 0.0);
        assert_eq!(NullMetrics.font_metrics(&style).ascent, 0.0);
    }

    #[test]
    fn counts_chars_not_bytes() {
        let style = Style::default();
        let metrics = MonospaceMetrics::default();
        assert_eq!(metrics.text_extents(&style, "日本語").width, 30.0);
    }
}
