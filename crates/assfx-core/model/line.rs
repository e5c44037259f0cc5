//! Dialogue lines and their word/syllable/char decomposition.

use std::sync::Arc;

use super::Style;
use crate::utils::ms_to_timestamp;

/// Lead-time value marking the first/last line of a style group, where no
/// previous/next line exists to measure a gap against.
pub const LEAD_SENTINEL: f64 = 1000.1;

/// One event row from `[Events]`, with derived timing, text decomposition
/// and geometry filled in by the extended parse.
///
/// Geometry fields are `NaN` until the positioning pass has run (they stay
/// `NaN` when extended processing is disabled). `Line` is `Clone` so effect
/// code can clone a parsed line, mutate the copy and emit it.
#[derive(Debug, Clone)]
pub struct Line {
    /// True for `Comment:` rows.
    pub comment: bool,
    /// Layer the line renders on.
    pub layer: i32,
    /// Start time in milliseconds.
    pub start_time: i64,
    /// End time in milliseconds.
    pub end_time: i64,
    /// Referenced style name, as written in the script.
    pub style: String,
    /// Resolved style. Falls back to the default style when `style` names
    /// nothing, with a warning on the script.
    pub styleref: Arc<Style>,
    /// Actor field.
    pub actor: String,
    /// Left margin override; `0` defers to the style.
    pub margin_l: i32,
    /// Right margin override; `0` defers to the style.
    pub margin_r: i32,
    /// Vertical margin override; `0` defers to the style.
    pub margin_v: i32,
    /// Effect field.
    pub effect: String,
    /// Event text exactly as written, override tags included. Generated
    /// lines put their output payload here; [`Line::to_ass_string`] emits it.
    pub raw_text: String,
    /// Event text with override blocks stripped.
    pub text: String,
    /// Index of this line within the script's events.
    pub i: usize,
    /// `end_time - start_time`, milliseconds.
    pub duration: i64,
    /// Gap to the previous line of the same style, milliseconds;
    /// [`LEAD_SENTINEL`] for the first line of its group.
    pub leadin: f64,
    /// Gap to the next line of the same style, milliseconds;
    /// [`LEAD_SENTINEL`] for the last line of its group.
    pub leadout: f64,
    /// Width of the stripped text.
    pub width: f64,
    /// Height of the stripped text.
    pub height: f64,
    /// Font ascent for the line's style.
    pub ascent: f64,
    /// Font descent for the line's style.
    pub descent: f64,
    /// Internal leading for the line's style.
    pub internal_leading: f64,
    /// External leading for the line's style.
    pub external_leading: f64,
    /// X of the alignment anchor point.
    pub x: f64,
    /// Y of the alignment anchor point.
    pub y: f64,
    /// Left edge of the line box.
    pub left: f64,
    /// Horizontal center of the line box.
    pub center: f64,
    /// Right edge of the line box.
    pub right: f64,
    /// Top edge of the line box.
    pub top: f64,
    /// Vertical middle of the line box.
    pub middle: f64,
    /// Bottom edge of the line box.
    pub bottom: f64,
    /// Whitespace-delimited words of the stripped text.
    pub words: Vec<Word>,
    /// Karaoke syllables (one full-span syllable when the line carries no
    /// karaoke tags).
    pub syls: Vec<Syllable>,
    /// Individual characters of the syllable texts.
    pub chars: Vec<Char>,
}

impl Default for Line {
    /// An empty dialogue line: zero timing, default style, sentinel leads,
    /// `NaN` geometry.
    fn default() -> Self {
        Self {
            comment: false,
            layer: 0,
            start_time: 0,
            end_time: 0,
            style: String::new(),
            styleref: Arc::new(Style::default()),
            actor: String::new(),
            margin_l: 0,
            margin_r: 0,
            margin_v: 0,
            effect: String::new(),
            raw_text: String::new(),
            text: String::new(),
            i: 0,
            duration: 0,
            leadin: LEAD_SENTINEL,
            leadout: LEAD_SENTINEL,
            width: f64::NAN,
            height: f64::NAN,
            ascent: f64::NAN,
            descent: f64::NAN,
            internal_leading: f64::NAN,
            external_leading: f64::NAN,
            x: f64::NAN,
            y: f64::NAN,
            left: f64::NAN,
            center: f64::NAN,
            right: f64::NAN,
            top: f64::NAN,
            middle: f64::NAN,
            bottom: f64::NAN,
            words: Vec::new(),
            syls: Vec::new(),
            chars: Vec::new(),
        }
    }
}

impl Line {
    /// Render the line back into a `Dialogue:`/`Comment:` event row.
    ///
    /// Margins use the four-digit zero-padded form Aegisub writes.
    #[must_use]
    pub fn to_ass_string(&self) -> String {
        format!(
            "{}: {},{},{},{},{},{:04},{:04},{:04},{},{}",
            if self.comment { "Comment" } else { "Dialogue" },
            self.layer,
            ms_to_timestamp(self.start_time),
            ms_to_timestamp(self.end_time),
            self.style,
            self.actor,
            self.margin_l,
            self.margin_r,
            self.margin_v,
            self.effect,
            self.raw_text,
        )
    }

    /// Effective left margin: the line override when nonzero, else the
    /// style's.
    #[must_use]
    pub fn effective_margin_l(&self) -> i32 {
        if self.margin_l != 0 {
            self.margin_l
        } else {
            self.styleref.margin_l
        }
    }

    /// Effective right margin.
    #[must_use]
    pub fn effective_margin_r(&self) -> i32 {
        if self.margin_r != 0 {
            self.margin_r
        } else {
            self.styleref.margin_r
        }
    }

    /// Effective vertical margin.
    #[must_use]
    pub fn effective_margin_v(&self) -> i32 {
        if self.margin_v != 0 {
            self.margin_v
        } else {
            self.styleref.margin_v
        }
    }
}

/// One whitespace-delimited token of a line's stripped text.
#[derive(Debug, Clone)]
pub struct Word {
    /// Index within the line's words.
    pub i: usize,
    /// Start time, equal to the line's start (words carry no timing of
    /// their own).
    pub start_time: i64,
    /// End time, equal to the line's end.
    pub end_time: i64,
    /// `end_time - start_time`.
    pub duration: i64,
    /// Style of the owning line.
    pub styleref: Arc<Style>,
    /// The word itself, no surrounding whitespace.
    pub text: String,
    /// Spaces between the previous word (or line start) and this word.
    pub prespace: usize,
    /// Spaces between this word and the next (or line end).
    pub postspace: usize,
    /// Width of `text`.
    pub width: f64,
    /// Height of `text`.
    pub height: f64,
    /// X of the alignment anchor point.
    pub x: f64,
    /// Y of the alignment anchor point.
    pub y: f64,
    /// Left edge.
    pub left: f64,
    /// Horizontal center.
    pub center: f64,
    /// Right edge.
    pub right: f64,
    /// Top edge.
    pub top: f64,
    /// Vertical middle.
    pub middle: f64,
    /// Bottom edge.
    pub bottom: f64,
}

/// One karaoke syllable.
///
/// Times are relative to the line start: the first syllable of a line
/// starts at `0`.
#[derive(Debug, Clone)]
pub struct Syllable {
    /// Index within the line's syllables.
    pub i: usize,
    /// Index of the word this syllable belongs to.
    pub word_i: usize,
    /// Start offset from the line start, milliseconds.
    pub start_time: i64,
    /// End offset from the line start, milliseconds.
    pub end_time: i64,
    /// `end_time - start_time`.
    pub duration: i64,
    /// Syllable text with single leading/trailing spaces moved out into
    /// `prespace`/`postspace`.
    pub text: String,
    /// Raw override-tag text attached to the syllable, karaoke tag
    /// included.
    pub tags: String,
    /// Active inline effect (`\-name`), empty when none is in scope.
    pub inline_fx: String,
    /// Spaces preceding the syllable text.
    pub prespace: usize,
    /// Spaces following the syllable text.
    pub postspace: usize,
    /// Width of `text`.
    pub width: f64,
    /// Height of `text`.
    pub height: f64,
    /// X of the alignment anchor point.
    pub x: f64,
    /// Y of the alignment anchor point.
    pub y: f64,
    /// Left edge.
    pub left: f64,
    /// Horizontal center.
    pub center: f64,
    /// Right edge.
    pub right: f64,
    /// Top edge.
    pub top: f64,
    /// Vertical middle.
    pub middle: f64,
    /// Bottom edge.
    pub bottom: f64,
}

/// One character of a syllable's text, timing inherited from its syllable.
#[derive(Debug, Clone)]
pub struct Char {
    /// Index within the line's chars.
    pub i: usize,
    /// Index of the word this char belongs to.
    pub word_i: usize,
    /// Index of the syllable this char belongs to.
    pub syl_i: usize,
    /// Index of this char within its syllable's text.
    pub syl_char_i: usize,
    /// Start offset from the line start, milliseconds.
    pub start_time: i64,
    /// End offset from the line start, milliseconds.
    pub end_time: i64,
    /// `end_time - start_time`.
    pub duration: i64,
    /// The character itself.
    pub text: char,
    /// Inline effect inherited from the owning syllable.
    pub inline_fx: String,
    /// Width of the character.
    pub width: f64,
    /// Height of the character.
    pub height: f64,
    /// X of the alignment anchor point.
    pub x: f64,
    /// Y of the alignment anchor point.
    pub y: f64,
    /// Left edge.
    pub left: f64,
    /// Horizontal center.
    pub center: f64,
    /// Right edge.
    pub right: f64,
    /// Top edge.
    pub top: f64,
    /// Vertical middle.
    pub middle: f64,
    /// Bottom edge.
    pub bottom: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_line() -> Line {
        Line {
            end_time: 5000,
            style: "Default".to_string(),
            raw_text: "{\\k50}Hello".to_string(),
            text: "Hello".to_string(),
            duration: 5000,
            ..Line::default()
        }
    }

    #[test]
    fn renders_dialogue_row() {
        let line = sample_line();
        assert_eq!(
            line.to_ass_string(),
            "Dialogue: 0,0:00:00.00,0:00:05.00,Default,,0000,0000,0000,,{\\k50}Hello"
        );
    }

    #[test]
    fn renders_comment_row() {
        let mut line = sample_line();
        line.comment = true;
        line.margin_l = 20;
        assert!(line.to_ass_string().starts_with("Comment: 0,"));
        assert!(line.to_ass_string().contains(",0020,0000,"));
    }

    #[test]
    fn margin_overrides_fall_back_to_style() {
        let mut line = sample_line();
        assert_eq!(line.effective_margin_l(), 10);
        line.margin_l = 40;
        assert_eq!(line.effective_margin_l(), 40);
        assert_eq!(line.effective_margin_v(), 10);
    }
}
