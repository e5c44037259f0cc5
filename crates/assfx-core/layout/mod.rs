//! Geometry resolution for lines and their children.
//!
//! Anchors come from the numpad alignment: the column decides the
//! horizontal reference (left edge, center with the margin correction,
//! right edge) and the row decides the vertical one (top margin, play-res
//! middle, bottom margin). Children then flow from the line box: words and
//! syllables advance along x by their measured width plus space and style
//! spacing, chars advance inside their syllable.
//!
//! With the vertical-kanji option enabled, middle-row alignments (4-6)
//! stack children top to bottom instead, centered on the play-res midline,
//! and the line box is re-derived from the stacked chars.

use crate::model::{Line, Meta};

/// Horizontal anchor of an alignment column applied to a box.
fn anchor_x(alignment: u8, left: f64, center: f64, right: f64) -> f64 {
    if (alignment - 1) % 3 == 0 {
        left
    } else if (alignment - 2) % 3 == 0 {
        center
    } else {
        right
    }
}

const fn is_middle_row(alignment: u8) -> bool {
    alignment > 3 && alignment <= 6
}

/// Place the line box and anchor point from alignment, margins and the
/// play resolution.
pub(crate) fn position_line(line: &mut Line, meta: &Meta) {
    let play_res_x = f64::from(meta.play_res_x);
    let play_res_y = f64::from(meta.play_res_y);
    let alignment = line.styleref.alignment;
    let margin_l = f64::from(line.effective_margin_l());
    let margin_r = f64::from(line.effective_margin_r());
    let margin_v = f64::from(line.effective_margin_v());

    if (alignment - 1) % 3 == 0 {
        line.left = margin_l;
    } else if (alignment - 2) % 3 == 0 {
        line.left = play_res_x / 2.0 - line.width / 2.0 + margin_l / 2.0 - margin_r / 2.0;
    } else {
        line.left = play_res_x - margin_r - line.width;
    }
    line.center = line.left + line.width / 2.0;
    line.right = line.left + line.width;
    line.x = anchor_x(alignment, line.left, line.center, line.right);

    if alignment > 6 {
        line.top = margin_v;
        line.y = line.top;
    } else if alignment > 3 {
        line.top = play_res_y / 2.0 - line.height / 2.0;
    } else {
        line.top = play_res_y - margin_v - line.height;
    }
    line.middle = line.top + line.height / 2.0;
    line.bottom = line.top + line.height;
    if alignment <= 6 {
        line.y = if alignment > 3 { line.middle } else { line.bottom };
    }
}

/// Place the line's words.
pub(crate) fn position_words(line: &mut Line, space_width: f64, meta: &Meta, vertical: bool) {
    let alignment = line.styleref.alignment;
    let spacing = line.styleref.spacing;

    if !vertical || !is_middle_row(alignment) {
        let (left, top, middle, bottom, y) =
            (line.left, line.top, line.middle, line.bottom, line.y);
        let mut cur_x = left;
        for word in &mut line.words {
            cur_x += word.prespace as f64 * (space_width + spacing);
            word.left = cur_x;
            word.center = word.left + word.width / 2.0;
            word.right = word.left + word.width;
            word.x = anchor_x(alignment, word.left, word.center, word.right);
            word.top = top;
            word.middle = middle;
            word.bottom = bottom;
            word.y = y;
            cur_x += word.width + word.postspace as f64 * (space_width + spacing) + spacing;
        }
    } else {
        let max_width = line.words.iter().map(|w| w.width).fold(0.0, f64::max);
        let sum_height: f64 = line.words.iter().map(|w| w.height).sum();
        let (left, center, right) = (line.left, line.center, line.right);
        let play_res_y = f64::from(meta.play_res_y);

        let mut cur_y = play_res_y / 2.0 - sum_height / 2.0;
        for word in &mut line.words {
            let x_fix = (max_width - word.width) / 2.0;
            word.left = match alignment {
                4 => left + x_fix,
                5 => center - word.width / 2.0,
                _ => right - word.width - x_fix,
            };
            word.center = word.left + word.width / 2.0;
            word.right = word.left + word.width;
            word.x = anchor_x(alignment, word.left, word.center, word.right);
            word.top = cur_y;
            word.middle = word.top + word.height / 2.0;
            word.bottom = word.top + word.height;
            word.y = word.middle;
            cur_y += word.height;
        }
    }
}

/// Place the line's syllables.
pub(crate) fn position_syls(line: &mut Line, space_width: f64, meta: &Meta, vertical: bool) {
    let alignment = line.styleref.alignment;
    let spacing = line.styleref.spacing;

    if !vertical || !is_middle_row(alignment) {
        let (left, top, middle, bottom, y) =
            (line.left, line.top, line.middle, line.bottom, line.y);
        let mut cur_x = left;
        for syl in &mut line.syls {
            cur_x += syl.prespace as f64 * (space_width + spacing);
            syl.left = cur_x;
            syl.center = syl.left + syl.width / 2.0;
            syl.right = syl.left + syl.width;
            syl.x = anchor_x(alignment, syl.left, syl.center, syl.right);
            syl.top = top;
            syl.middle = middle;
            syl.bottom = bottom;
            syl.y = y;
            cur_x += syl.width + syl.postspace as f64 * (space_width + spacing) + spacing;
        }
    } else {
        let max_width = line.syls.iter().map(|s| s.width).fold(0.0, f64::max);
        let sum_height: f64 = line.syls.iter().map(|s| s.height).sum();
        let (left, center, right) = (line.left, line.center, line.right);
        let play_res_y = f64::from(meta.play_res_y);

        let mut cur_y = play_res_y / 2.0 - sum_height / 2.0;
        for syl in &mut line.syls {
            let x_fix = (max_width - syl.width) / 2.0;
            syl.left = match alignment {
                4 => left + x_fix,
                5 => center - syl.width / 2.0,
                _ => right - syl.width - x_fix,
            };
            syl.center = syl.left + syl.width / 2.0;
            syl.right = syl.left + syl.width;
            syl.x = anchor_x(alignment, syl.left, syl.center, syl.right);
            syl.top = cur_y;
            syl.middle = syl.top + syl.height / 2.0;
            syl.bottom = syl.top + syl.height;
            syl.y = syl.middle;
            cur_y += syl.height;
        }
    }
}

/// Place the line's chars. Space runs between syllable texts advance the
/// cursor without producing a char of their own.
///
/// In vertical mode the line box is re-derived from the stacked chars, so
/// this runs after the word and syllable passes.
pub(crate) fn position_chars(line: &mut Line, space_width: f64, meta: &Meta, vertical: bool) {
    let alignment = line.styleref.alignment;
    let spacing = line.styleref.spacing;
    let play_res_x = f64::from(meta.play_res_x);
    let play_res_y = f64::from(meta.play_res_y);

    if !vertical || !is_middle_row(alignment) {
        let (top, middle, bottom, y) = (line.top, line.middle, line.bottom, line.y);
        let mut cur_x = line.left;
        let mut char_iter = line.chars.iter_mut();
        for syl in &line.syls {
            cur_x += syl.prespace as f64 * (space_width + spacing);
            for char in char_iter.by_ref().take(syl.text.chars().count()) {
                char.left = cur_x;
                char.center = char.left + char.width / 2.0;
                char.right = char.left + char.width;
                char.x = anchor_x(alignment, char.left, char.center, char.right);
                char.top = top;
                char.middle = middle;
                char.bottom = bottom;
                char.y = y;
                cur_x += char.width + spacing;
            }
            cur_x += syl.postspace as f64 * (space_width + spacing);
        }
    } else {
        let max_width = line.chars.iter().map(|c| c.width).fold(0.0, f64::max);
        let sum_height: f64 = line.chars.iter().map(|c| c.height).sum();

        let mut cur_y = play_res_y / 2.0 - sum_height / 2.0;

        // The stacked flow defines the real line box
        line.top = cur_y;
        line.middle = play_res_y / 2.0;
        line.bottom = line.top + sum_height;
        line.width = max_width;
        line.height = sum_height;
        match alignment {
            4 => {
                line.center = line.left + max_width / 2.0;
                line.right = line.left + max_width;
            }
            5 => {
                line.left = line.center - max_width / 2.0;
                line.right = line.left + max_width;
            }
            _ => {
                line.left = line.right - max_width;
                line.center = line.left + max_width / 2.0;
            }
        }

        let (left, right) = (line.left, line.right);
        for char in &mut line.chars {
            let x_fix = (max_width - char.width) / 2.0;
            char.left = match alignment {
                4 => left + x_fix,
                5 => play_res_x / 2.0 - char.width / 2.0,
                _ => right - char.width - x_fix,
            };
            char.center = char.left + char.width / 2.0;
            char.right = char.left + char.width;
            char.x = anchor_x(alignment, char.left, char.center, char.right);
            char.top = cur_y;
            char.middle = char.top + char.height / 2.0;
            char.bottom = char.top + char.height;
            char.y = char.middle;
            cur_y += char.height;
        }
    }
}
