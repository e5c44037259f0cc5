//! `Style:` row parsing.

use crate::model::Style;
use crate::utils::errors::ParseWarning;
use crate::utils::split_style_color;

use super::{parse_field, FormatSpec};

/// Truth as ASS stores it in style rows: `-1` true, `0` false. Any nonzero
/// integer counts as true, matching permissive readers.
fn parse_flag(value: &str) -> bool {
    value.trim().parse::<i32>().is_ok_and(|v| v != 0)
}

/// Parse one `Style:` row into its name and a typed [`Style`].
///
/// Fields are matched by the `Format:` header name, so scripts with
/// reordered or truncated headers still parse; anything the row does not
/// supply keeps its default.
pub(crate) fn parse_style_row(
    data: &str,
    format: &FormatSpec,
    line_no: usize,
    warnings: &mut Vec<ParseWarning>,
) -> (String, Style) {
    let pairs = format.split(data);
    if pairs.len() < format.len() {
        warnings.push(ParseWarning::FieldCountMismatch {
            line: line_no,
            expected: format.len(),
            found: pairs.len(),
        });
    }

    let mut name = String::new();
    let mut style = Style::default();

    for (field, value) in pairs {
        match field {
            "Name" => name = value.trim().to_string(),
            "Fontname" => style.fontname = value.trim().to_string(),
            "Fontsize" => {
                style.fontsize = parse_field(value, "Fontsize", line_no, 20.0, warnings);
            }
            "PrimaryColour" => {
                (style.color1, style.alpha1) = split_style_color(value);
            }
            "SecondaryColour" => {
                (style.color2, style.alpha2) = split_style_color(value);
            }
            "OutlineColour" | "TertiaryColour" => {
                (style.color3, style.alpha3) = split_style_color(value);
            }
            "BackColour" => {
                (style.color4, style.alpha4) = split_style_color(value);
            }
            "Bold" => style.bold = parse_flag(value),
            "Italic" => style.italic = parse_flag(value),
            "Underline" => style.underline = parse_flag(value),
            "StrikeOut" => style.strikeout = parse_flag(value),
            "ScaleX" => style.scale_x = parse_field(value, "ScaleX", line_no, 100.0, warnings),
            "ScaleY" => style.scale_y = parse_field(value, "ScaleY", line_no, 100.0, warnings),
            "Spacing" => style.spacing = parse_field(value, "Spacing", line_no, 0.0, warnings),
            "Angle" => style.angle = parse_field(value, "Angle", line_no, 0.0, warnings),
            "BorderStyle" => style.border_style = value.trim() == "3",
            "Outline" => style.outline = parse_field(value, "Outline", line_no, 2.0, warnings),
            "Shadow" => style.shadow = parse_field(value, "Shadow", line_no, 2.0, warnings),
            "Alignment" => {
                let alignment: u8 = parse_field(value, "Alignment", line_no, 2, warnings);
                if (1..=9).contains(&alignment) {
                    style.alignment = alignment;
                } else {
                    warnings.push(ParseWarning::BadField {
                        line: line_no,
                        field: "Alignment",
                        value: value.trim().to_string(),
                    });
                }
            }
            "MarginL" => style.margin_l = parse_field(value, "MarginL", line_no, 10, warnings),
            "MarginR" => style.margin_r = parse_field(value, "MarginR", line_no, 10, warnings),
            "MarginV" => style.margin_v = parse_field(value, "MarginV", line_no, 10, warnings),
            "Encoding" => style.encoding = parse_field(value, "Encoding", line_no, 1, warnings),
            _ => {}
        }
    }

    (name, style)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = "Default,Noto Sans,48,&H00FFFFFF,&H000000FF,&H00101010,&H80000000,\
                       -1,0,0,0,100,100,1.5,0,1,2.5,1,8,30,30,40,1";

    #[test]
    fn parses_typed_fields() {
        let mut warnings = Vec::new();
        let (name, style) =
            parse_style_row(ROW, &FormatSpec::styles_default(), 5, &mut warnings);
        assert!(warnings.is_empty());
        assert_eq!(name, "Default");
        assert_eq!(style.fontname, "Noto Sans");
        assert_eq!(style.fontsize, 48.0);
        assert!(style.bold);
        assert!(!style.italic);
        assert_eq!(style.spacing, 1.5);
        assert_eq!(style.alignment, 8);
        assert_eq!((style.margin_l, style.margin_r, style.margin_v), (30, 30, 40));
        assert!(!style.border_style);
    }

    #[test]
    fn splits_colours_into_colour_and_alpha() {
        let mut warnings = Vec::new();
        let (_, style) = parse_style_row(ROW, &FormatSpec::styles_default(), 5, &mut warnings);
        assert_eq!(style.color1, "&HFFFFFF&");
        assert_eq!(style.alpha1, "&H00&");
        assert_eq!(style.color2, "&H0000FF&");
        assert_eq!(style.color4, "&H000000&");
        assert_eq!(style.alpha4, "&H80&");
    }

    #[test]
    fn short_row_warns_and_keeps_defaults() {
        let mut warnings = Vec::new();
        let (name, style) = parse_style_row(
            "Short,Arial,20",
            &FormatSpec::styles_default(),
            9,
            &mut warnings,
        );
        assert_eq!(name, "Short");
        assert_eq!(style.fontname, "Arial");
        assert_eq!(style.alignment, 2);
        assert!(matches!(
            warnings[0],
            ParseWarning::FieldCountMismatch { line: 9, expected: 23, found: 3 }
        ));
    }

    #[test]
    fn out_of_range_alignment_warns_and_defaults() {
        let mut warnings = Vec::new();
        let format = FormatSpec::parse("Name, Alignment");
        let (_, style) = parse_style_row("X,11", &format, 2, &mut warnings);
        assert_eq!(style.alignment, 2);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn border_style_three_is_opaque_box() {
        let mut warnings = Vec::new();
        let format = FormatSpec::parse("Name, BorderStyle");
        let (_, style) = parse_style_row("X,3", &format, 2, &mut warnings);
        assert!(style.border_style);
    }
}
