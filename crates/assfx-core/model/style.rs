//! Typed `[V4+ Styles]` entries.

/// A `Style:` definition with fields decoded into native types.
///
/// Colours are kept in override-tag notation, split into a colour and an
/// alpha component per slot (`&HBBGGRR&` / `&HAA&`), because that is the
/// form effect code splices back into generated tags.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Font family name.
    pub fontname: String,
    /// Font size in script pixels.
    pub fontsize: f64,
    /// Primary fill colour.
    pub color1: String,
    /// Primary fill alpha.
    pub alpha1: String,
    /// Secondary (karaoke) colour.
    pub color2: String,
    /// Secondary alpha.
    pub alpha2: String,
    /// Outline colour.
    pub color3: String,
    /// Outline alpha.
    pub alpha3: String,
    /// Shadow colour.
    pub color4: String,
    /// Shadow alpha.
    pub alpha4: String,
    /// Bold flag (ASS stores `-1` for true).
    pub bold: bool,
    /// Italic flag.
    pub italic: bool,
    /// Underline flag.
    pub underline: bool,
    /// Strikeout flag.
    pub strikeout: bool,
    /// Horizontal scale, percent.
    pub scale_x: f64,
    /// Vertical scale, percent.
    pub scale_y: f64,
    /// Extra space between characters, script pixels.
    pub spacing: f64,
    /// Z-axis rotation, degrees.
    pub angle: f64,
    /// True when `BorderStyle` is `3` (opaque box instead of outline).
    pub border_style: bool,
    /// Outline thickness.
    pub outline: f64,
    /// Shadow offset.
    pub shadow: f64,
    /// Numpad alignment (1-9).
    pub alignment: u8,
    /// Left margin, script pixels.
    pub margin_l: i32,
    /// Right margin, script pixels.
    pub margin_r: i32,
    /// Vertical margin, script pixels.
    pub margin_v: i32,
    /// Windows codepage identifier.
    pub encoding: i32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fontname: "Arial".to_string(),
            fontsize: 20.0,
            color1: "&HFFFFFF&".to_string(),
            alpha1: "&H00&".to_string(),
            color2: "&H0000FF&".to_string(),
            alpha2: "&H00&".to_string(),
            color3: "&H000000&".to_string(),
            alpha3: "&H00&".to_string(),
            color4: "&H000000&".to_string(),
            alpha4: "&H00&".to_string(),
            bold: false,
            italic: false,
            underline: false,
            strikeout: false,
            scale_x: 100.0,
            scale_y: 100.0,
            spacing: 0.0,
            angle: 0.0,
            border_style: false,
            outline: 2.0,
            shadow: 2.0,
            alignment: 2,
            margin_l: 10,
            margin_r: 10,
            margin_v: 10,
            encoding: 1,
        }
    }
}

impl Style {
    /// Column of the numpad alignment: `0` left, `1` center, `2` right.
    #[must_use]
    pub const fn alignment_column(&self) -> u8 {
        (self.alignment - 1) % 3
    }

    /// Row of the numpad alignment: `0` bottom, `1` middle, `2` top.
    #[must_use]
    pub const fn alignment_row(&self) -> u8 {
        (self.alignment - 1) / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_decomposition() {
        let mut style = Style::default();
        let expect = [
            (1, 0, 0),
            (2, 1, 0),
            (3, 2, 0),
            (4, 0, 1),
            (5, 1, 1),
            (6, 2, 1),
            (7, 0, 2),
            (8, 1, 2),
            (9, 2, 2),
        ];
        for (alignment, column, row) in expect {
            style.alignment = alignment;
            assert_eq!(style.alignment_column(), column, "an{alignment}");
            assert_eq!(style.alignment_row(), row, "an{alignment}");
        }
    }
}
