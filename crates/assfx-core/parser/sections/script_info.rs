//! `[Script Info]` and `[Aegisub Project Garbage]` handling.

use crate::model::Meta;
use crate::timestamps::FpsTimestamps;
use crate::utils::errors::ParseWarning;

use super::parse_field;

/// Apply one `Key: Value` row to the metadata. Unknown keys are ignored;
/// both metadata sections share this handler because Aegisub splits the
/// audio/video references across them.
pub(crate) fn apply_meta_line(
    meta: &mut Meta,
    row: &str,
    line_no: usize,
    warnings: &mut Vec<ParseWarning>,
) {
    let Some((key, value)) = row.split_once(':') else {
        return;
    };
    let value = value.trim();

    match key.trim() {
        "WrapStyle" => {
            meta.wrap_style = parse_field(value, "WrapStyle", line_no, 0, warnings);
        }
        "ScaledBorderAndShadow" => {
            meta.scaled_border_and_shadow = matches!(value, "yes" | "Yes" | "1");
        }
        "PlayResX" => {
            meta.play_res_x = parse_field(value, "PlayResX", line_no, 0, warnings);
        }
        "PlayResY" => {
            meta.play_res_y = parse_field(value, "PlayResY", line_no, 0, warnings);
        }
        "Audio File" | "Audio URI" => {
            meta.audio = Some(value.to_string());
        }
        "Video File" => {
            meta.video = Some(value.to_string());
            if let Some(ts) = FpsTimestamps::from_dummy_video(value) {
                meta.timestamps = Some(ts);
            }
        }
        _ => {}
    }
}
