//! Section-level script parsing.
//!
//! The parser walks the script line by line, switching state at `[Section]`
//! headers and dispatching rows to the per-section parsers. Recoverable
//! problems are collected as warnings and never abort the walk; only a
//! structurally unusable script (missing `[Script Info]` or `[Events]`)
//! fails the parse.

pub(crate) mod sections;

use std::sync::Arc;

use ahash::AHashMap;

use crate::model::{Line, Meta, Style};
use crate::utils::errors::{ParseError, ParseWarning};
use self::sections::{events, script_info, styles, FormatSpec};

/// Raw parse output: the script skeleton before extended processing.
pub(crate) struct ParsedScript {
    pub meta: Meta,
    pub styles: AHashMap<String, Arc<Style>>,
    pub lines: Vec<Line>,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    ScriptInfo,
    Garbage,
    Styles,
    Events,
    Skipped,
}

/// Parse a script into its skeleton: metadata, style table and event rows.
pub(crate) fn parse_script(source: &str) -> Result<ParsedScript, ParseError> {
    let source = source.strip_prefix('\u{FEFF}').unwrap_or(source);

    let mut meta = Meta::default();
    let mut style_table: AHashMap<String, Arc<Style>> = AHashMap::new();
    let mut lines: Vec<Line> = Vec::new();
    let mut warnings: Vec<ParseWarning> = Vec::new();

    let mut section = Section::None;
    let mut styles_format = FormatSpec::styles_default();
    let mut events_format = FormatSpec::events_default();
    let placeholder_style = Arc::new(Style::default());
    let mut saw_script_info = false;
    let mut saw_events = false;

    for (idx, raw_row) in source.lines().enumerate() {
        let line_no = idx + 1;
        let row = raw_row.strip_suffix('\r').unwrap_or(raw_row);
        let trimmed = row.trim();

        if trimmed.is_empty() || trimmed.starts_with(';') {
            continue;
        }

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            let name = trimmed[1..trimmed.len() - 1].trim();
            section = match name {
                "Script Info" => {
                    saw_script_info = true;
                    Section::ScriptInfo
                }
                "Aegisub Project Garbage" => Section::Garbage,
                "V4+ Styles" | "V4 Styles" => Section::Styles,
                "Events" => {
                    saw_events = true;
                    Section::Events
                }
                "Aegisub Extradata" => Section::Skipped,
                _ => {
                    warnings.push(ParseWarning::UnknownSection {
                        name: name.to_string(),
                        line: line_no,
                    });
                    Section::Skipped
                }
            };
            continue;
        }

        match section {
            Section::ScriptInfo | Section::Garbage => {
                script_info::apply_meta_line(&mut meta, row, line_no, &mut warnings);
            }
            Section::Styles => {
                if let Some(data) = row_data(trimmed, "Format:") {
                    styles_format = FormatSpec::parse(data);
                } else if let Some(data) = row_data(trimmed, "Style:") {
                    let (name, style) =
                        styles::parse_style_row(data, &styles_format, line_no, &mut warnings);
                    style_table.insert(name, Arc::new(style));
                } else {
                    warnings.push(ParseWarning::UnparseableRow { line: line_no });
                }
            }
            Section::Events => {
                // The text field is the row remainder, so the untrimmed row
                // is split; only the prefix detection uses the trimmed form
                if let Some(data) = row_data(trimmed, "Format:") {
                    events_format = FormatSpec::parse(data);
                } else if let Some(data) = row_data(row.trim_start(), "Dialogue:") {
                    lines.push(events::parse_event_row(
                        false,
                        data,
                        &events_format,
                        line_no,
                        lines.len(),
                        &placeholder_style,
                        &mut warnings,
                    ));
                } else if let Some(data) = row_data(row.trim_start(), "Comment:") {
                    lines.push(events::parse_event_row(
                        true,
                        data,
                        &events_format,
                        line_no,
                        lines.len(),
                        &placeholder_style,
                        &mut warnings,
                    ));
                } else {
                    warnings.push(ParseWarning::UnparseableRow { line: line_no });
                }
            }
            Section::Skipped => {}
            Section::None => {
                warnings.push(ParseWarning::UnparseableRow { line: line_no });
            }
        }
    }

    if !saw_script_info {
        return Err(ParseError::MissingSection("Script Info"));
    }
    if !saw_events {
        return Err(ParseError::MissingSection("Events"));
    }

    if meta.play_res_x == 0 {
        meta.play_res_x = Meta::DEFAULT_PLAY_RES.0;
    }
    if meta.play_res_y == 0 {
        meta.play_res_y = Meta::DEFAULT_PLAY_RES.1;
    }

    // Resolve style references now that the whole table is known
    for line in &mut lines {
        if let Some(style) = style_table.get(&line.style) {
            line.styleref = Arc::clone(style);
        } else {
            warnings.push(ParseWarning::UnknownStyle {
                style: line.style.clone(),
                event: line.i,
            });
        }
    }

    Ok(ParsedScript {
        meta,
        styles: style_table,
        lines,
        warnings,
    })
}

/// Strip a row prefix like `Style:` and the single space Aegisub writes
/// after it.
fn row_data<'a>(row: &'a str, prefix: &str) -> Option<&'a str> {
    let data = row.strip_prefix(prefix)?;
    Some(data.strip_prefix(' ').unwrap_or(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "\
[Script Info]
PlayResX: 1280
PlayResY: 720

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Default,Arial,48,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,2,30,30,30,1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 0,0:00:00.00,0:00:05.00,Default,,0,0,0,,Hello
";

    #[test]
    fn parses_minimal_script() {
        let parsed = parse_script(MINIMAL).unwrap();
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.meta.play_res_x, 1280);
        assert_eq!(parsed.styles.len(), 1);
        assert_eq!(parsed.lines.len(), 1);
        assert_eq!(parsed.lines[0].raw_text, "Hello");
        assert_eq!(parsed.lines[0].styleref.fontsize, 48.0);
    }

    #[test]
    fn bom_is_tolerated() {
        let source = format!("\u{FEFF}{MINIMAL}");
        assert!(parse_script(&source).is_ok());
    }

    #[test]
    fn missing_events_section_is_fatal() {
        let source = "[Script Info]\nPlayResX: 640\n";
        assert_eq!(
            parse_script(source).err(),
            Some(ParseError::MissingSection("Events"))
        );
    }

    #[test]
    fn missing_script_info_is_fatal() {
        let source = "[Events]\nDialogue: 0,0:00:00.00,0:00:01.00,D,,0,0,0,,x\n";
        assert_eq!(
            parse_script(source).err(),
            Some(ParseError::MissingSection("Script Info"))
        );
    }

    #[test]
    fn unknown_section_warns_and_is_skipped() {
        let source = format!("{MINIMAL}\n[Whatever]\nKey: Value\n");
        let parsed = parse_script(&source).unwrap();
        assert!(matches!(
            parsed.warnings[0],
            ParseWarning::UnknownSection { .. }
        ));
        assert_eq!(parsed.lines.len(), 1);
    }

    #[test]
    fn unknown_style_warns_and_falls_back() {
        let source = MINIMAL.replace(",Default,,", ",Missing,,");
        let parsed = parse_script(&source).unwrap();
        assert!(matches!(
            parsed.warnings[0],
            ParseWarning::UnknownStyle { event: 0, .. }
        ));
        // fallback is the built-in default style
        assert_eq!(parsed.lines[0].styleref.fontname, "Arial");
        assert_eq!(parsed.lines[0].styleref.fontsize, 20.0);
    }

    #[test]
    fn comments_and_blank_rows_are_skipped() {
        let source = MINIMAL.replace(
            "[Events]",
            "; a comment\n\n[Events]",
        );
        let parsed = parse_script(&source).unwrap();
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn play_res_defaults_when_omitted() {
        let source = "[Script Info]\nTitle: x\n\n[Events]\nDialogue: 0,0:00:00.00,0:00:01.00,D,,0,0,0,,x\n";
        let parsed = parse_script(source).unwrap();
        assert_eq!(parsed.meta.play_res_x, 1280);
        assert_eq!(parsed.meta.play_res_y, 720);
    }

    #[test]
    fn default_format_is_assumed_when_header_missing() {
        let source = "\
[Script Info]
Title: x

[Events]
Dialogue: 0,0:00:00.00,0:00:01.00,D,,0,0,0,,text
";
        let parsed = parse_script(source).unwrap();
        assert_eq!(parsed.lines[0].raw_text, "text");
    }
}
