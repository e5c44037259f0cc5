//! `Dialogue:` / `Comment:` row parsing.

use std::sync::Arc;

use crate::model::{Line, Style};
use crate::utils::errors::ParseWarning;
use crate::utils::timestamp_to_ms;

use super::{parse_field, FormatSpec};

/// Parse one event row into a [`Line`] skeleton.
///
/// Timing, style name and margins are decoded here; the derived fields
/// (stripped text, children, geometry) stay at their unset values until the
/// extended pass runs. `styleref` is a placeholder resolved against the
/// style table once the whole script has been read, so section order does
/// not matter.
pub(crate) fn parse_event_row(
    comment: bool,
    data: &str,
    format: &FormatSpec,
    line_no: usize,
    index: usize,
    placeholder_style: &Arc<Style>,
    warnings: &mut Vec<ParseWarning>,
) -> Line {
    let pairs = format.split(data);
    if pairs.len() < format.len() {
        warnings.push(ParseWarning::FieldCountMismatch {
            line: line_no,
            expected: format.len(),
            found: pairs.len(),
        });
    }

    let mut line = Line {
        comment,
        styleref: Arc::clone(placeholder_style),
        i: index,
        ..Line::default()
    };

    for (field, value) in pairs {
        match field {
            "Layer" | "Marked" => {
                line.layer = parse_field(value, "Layer", line_no, 0, warnings);
            }
            "Start" => line.start_time = parse_time(value, "Start", line_no, warnings),
            "End" => line.end_time = parse_time(value, "End", line_no, warnings),
            "Style" => line.style = value.trim().to_string(),
            "Name" | "Actor" => line.actor = value.trim().to_string(),
            "MarginL" => line.margin_l = parse_field(value, "MarginL", line_no, 0, warnings),
            "MarginR" => line.margin_r = parse_field(value, "MarginR", line_no, 0, warnings),
            "MarginV" => line.margin_v = parse_field(value, "MarginV", line_no, 0, warnings),
            "Effect" => line.effect = value.trim().to_string(),
            // The text field is never trimmed: leading spaces are content
            "Text" => line.raw_text = value.to_string(),
            _ => {}
        }
    }

    line.duration = line.end_time - line.start_time;
    line
}

fn parse_time(
    value: &str,
    field: &'static str,
    line_no: usize,
    warnings: &mut Vec<ParseWarning>,
) -> i64 {
    timestamp_to_ms(value).unwrap_or_else(|| {
        warnings.push(ParseWarning::BadField {
            line: line_no,
            field,
            value: value.trim().to_string(),
        });
        0
    })
}
