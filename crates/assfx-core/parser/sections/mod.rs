//! Per-section row parsers, driven by `Format:` headers.

pub(crate) mod events;
pub(crate) mod script_info;
pub(crate) mod styles;

use crate::utils::errors::ParseWarning;

/// Field order declared by a section's `Format:` header.
///
/// Rows split on commas into as many fields as the header declares; the
/// last field swallows any remaining commas, which is what lets event text
/// legally contain them.
#[derive(Debug, Clone)]
pub(crate) struct FormatSpec {
    fields: Vec<String>,
}

impl FormatSpec {
    /// Parse the value of a `Format:` header.
    pub fn parse(header: &str) -> Self {
        Self {
            fields: header.split(',').map(|f| f.trim().to_string()).collect(),
        }
    }

    /// The standard `[V4+ Styles]` field order, used when a script omits
    /// its `Format:` header.
    pub fn styles_default() -> Self {
        Self::parse(
            "Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, \
             BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, \
             BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding",
        )
    }

    /// The standard `[Events]` field order.
    pub fn events_default() -> Self {
        Self::parse("Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Split a row into `(field name, raw value)` pairs. Short rows yield
    /// fewer pairs; the caller decides whether that warrants a warning.
    pub fn split<'a>(&self, data: &'a str) -> Vec<(&str, &'a str)> {
        self.fields
            .iter()
            .map(String::as_str)
            .zip(data.splitn(self.fields.len(), ','))
            .collect()
    }
}

/// Parse a numeric field, warning and falling back on bad input.
pub(crate) fn parse_field<T: std::str::FromStr>(
    value: &str,
    field: &'static str,
    line: usize,
    default: T,
    warnings: &mut Vec<ParseWarning>,
) -> T {
    match value.trim().parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            warnings.push(ParseWarning::BadField {
                line,
                field,
                value: value.trim().to_string(),
            });
            default
        }
    }
}
