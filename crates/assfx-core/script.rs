//! The parsed-script façade: parsing entry point, extended per-line
//! processing and cross-line lead times.

use std::sync::Arc;

use ahash::AHashMap;

use crate::karaoke;
use crate::layout;
use crate::metrics::FontMetrics;
use crate::model::{Char, Line, Meta, Style, Syllable, Word, LEAD_SENTINEL};
use crate::parser;
use crate::timestamps::FpsTimestamps;
use crate::tokenizer;
use crate::utils::errors::{ParseError, ParseWarning};

/// Knobs for [`Ass::parse`].
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Compute words, syllables, chars and geometry. Disable to get only
    /// the raw skeleton (metadata, styles, event rows).
    pub extended: bool,
    /// Stack middle-row alignments (4-6) vertically, for kanji columns.
    pub vertical_kanji: bool,
    /// Frame timing for a real video the caller probed itself. A dummy
    /// video declared by the script takes precedence.
    pub timestamps: Option<FpsTimestamps>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            extended: true,
            vertical_kanji: false,
            timestamps: None,
        }
    }
}

/// A parsed ASS script: metadata, style table and fully decomposed lines.
///
/// # Examples
///
/// ```
/// use assfx_core::{Ass, MonospaceMetrics, ParseOptions};
///
/// let source = "\
/// [Script Info]
/// PlayResX: 1280
/// PlayResY: 720
///
/// [Events]
/// Dialogue: 0,0:00:00.00,0:00:01.50,Default,,0,0,0,,{\\k50}Hel{\\k50}lo {\\k50}world!
/// ";
/// let ass = Ass::parse(source, &MonospaceMetrics::default(), &ParseOptions::default())?;
/// let line = &ass.lines[0];
/// assert_eq!(line.text, "Hello world!");
/// assert_eq!(line.syls.len(), 3);
/// assert_eq!(line.syls[2].text, "world!");
/// # Ok::<(), assfx_core::ParseError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Ass {
    /// Script-wide metadata.
    pub meta: Meta,
    /// Styles by name, shared with the lines that reference them.
    pub styles: AHashMap<String, Arc<Style>>,
    /// Event lines in script order.
    pub lines: Vec<Line>,
    warnings: Vec<ParseWarning>,
}

impl Ass {
    /// Parse a script.
    ///
    /// Geometry is resolved through `metrics`; pass
    /// [`NullMetrics`](crate::metrics::NullMetrics) when only timing and
    /// segmentation matter. Recoverable problems become [`warnings`](Self::warnings)
    /// instead of errors.
    ///
    /// # Errors
    ///
    /// [`ParseError::MissingSection`] when the script lacks `[Script Info]`
    /// or `[Events]`.
    pub fn parse(
        source: &str,
        metrics: &dyn FontMetrics,
        options: &ParseOptions,
    ) -> Result<Self, ParseError> {
        let parsed = parser::parse_script(source)?;
        let mut ass = Self {
            meta: parsed.meta,
            styles: parsed.styles,
            lines: parsed.lines,
            warnings: parsed.warnings,
        };

        if ass.meta.timestamps.is_none() {
            ass.meta.timestamps = options.timestamps;
        }

        if options.extended {
            let mut warnings = std::mem::take(&mut ass.warnings);
            for line in &mut ass.lines {
                extend_line(line, &ass.meta, metrics, options, &mut warnings);
            }
            ass.warnings = warnings;
            compute_leads(&mut ass.lines);
        }

        Ok(ass)
    }

    /// Recoverable issues collected while parsing, in encounter order.
    #[must_use]
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }
}

/// Decompose one line: stripped text, words, syllables, chars, geometry.
fn extend_line(
    line: &mut Line,
    meta: &Meta,
    metrics: &dyn FontMetrics,
    options: &ParseOptions,
    warnings: &mut Vec<ParseWarning>,
) {
    let tokenized = tokenizer::tokenize(&line.raw_text);
    if tokenized.malformed {
        warnings.push(ParseWarning::MalformedTag { event: line.i });
    }
    line.text = tokenized.stripped_text();

    let style = Arc::clone(&line.styleref);
    let extents = metrics.text_extents(&style, &line.text);
    let vertical = metrics.font_metrics(&style);
    line.width = extents.width;
    line.height = extents.height;
    line.ascent = vertical.ascent;
    line.descent = vertical.descent;
    line.internal_leading = vertical.internal_leading;
    line.external_leading = vertical.external_leading;

    layout::position_line(line, meta);

    let space_width = metrics.text_extents(&style, " ").width;

    // Words
    let word_spans = karaoke::split_words(&line.text);
    line.words = word_spans
        .iter()
        .enumerate()
        .map(|(i, span)| {
            let extents = metrics.text_extents(&style, &span.text);
            Word {
                i,
                start_time: line.start_time,
                end_time: line.end_time,
                duration: line.duration,
                styleref: Arc::clone(&style),
                text: span.text.clone(),
                prespace: span.prespace,
                postspace: span.postspace,
                width: extents.width,
                height: extents.height,
                x: f64::NAN,
                y: f64::NAN,
                left: f64::NAN,
                center: f64::NAN,
                right: f64::NAN,
                top: f64::NAN,
                middle: f64::NAN,
                bottom: f64::NAN,
            }
        })
        .collect();
    layout::position_words(line, space_width, meta, options.vertical_kanji);

    // Syllables
    let chunks = karaoke::segment(&tokenized.tokens);
    let protos = karaoke::syllables(&chunks, &word_spans, line.duration);
    line.syls = protos
        .into_iter()
        .enumerate()
        .map(|(i, proto)| {
            let extents = metrics.text_extents(&style, &proto.text);
            Syllable {
                i,
                word_i: proto.word_i,
                start_time: proto.start_time,
                end_time: proto.end_time,
                duration: proto.end_time - proto.start_time,
                text: proto.text,
                tags: proto.tags,
                inline_fx: proto.inline_fx,
                prespace: proto.prespace,
                postspace: proto.postspace,
                width: extents.width,
                height: extents.height,
                x: f64::NAN,
                y: f64::NAN,
                left: f64::NAN,
                center: f64::NAN,
                right: f64::NAN,
                top: f64::NAN,
                middle: f64::NAN,
                bottom: f64::NAN,
            }
        })
        .collect();
    layout::position_syls(line, space_width, meta, options.vertical_kanji);

    // Chars
    line.chars = Vec::new();
    let mut char_index = 0;
    for syl in &line.syls {
        for (ci, ch) in syl.text.chars().enumerate() {
            let extents = metrics.text_extents(&style, ch.encode_utf8(&mut [0; 4]));
            line.chars.push(Char {
                i: char_index,
                word_i: syl.word_i,
                syl_i: syl.i,
                syl_char_i: ci,
                start_time: syl.start_time,
                end_time: syl.end_time,
                duration: syl.duration,
                text: ch,
                inline_fx: syl.inline_fx.clone(),
                width: extents.width,
                height: extents.height,
                x: f64::NAN,
                y: f64::NAN,
                left: f64::NAN,
                center: f64::NAN,
                right: f64::NAN,
                top: f64::NAN,
                middle: f64::NAN,
                bottom: f64::NAN,
            });
            char_index += 1;
        }
    }
    layout::position_chars(line, space_width, meta, options.vertical_kanji);

    debug_assert_eq!(
        line.chars
            .iter()
            .filter(|c| c.syl_i == line.syls.len().saturating_sub(1))
            .map(|c| c.text)
            .collect::<String>(),
        line.syls.last().map(|s| s.text.clone()).unwrap_or_default(),
        "char partition must reconstruct the last syllable"
    );
}

/// Fill `leadin`/`leadout` per style group.
///
/// Lines sharing a style are sorted by start time; each line's lead-in is
/// the gap to its predecessor and its lead-out the gap to its successor,
/// clamped to zero when lines overlap. Group edges keep the sentinel.
fn compute_leads(lines: &mut [Line]) {
    let mut groups: AHashMap<String, Vec<usize>> = AHashMap::new();
    for (i, line) in lines.iter().enumerate() {
        groups.entry(line.style.clone()).or_default().push(i);
    }

    for indices in groups.values_mut() {
        indices.sort_by_key(|&i| lines[i].start_time);
        for position in 0..indices.len() {
            let leadin = if position == 0 {
                LEAD_SENTINEL
            } else {
                let prev_end = lines[indices[position - 1]].end_time;
                (lines[indices[position]].start_time - prev_end).max(0) as f64
            };
            let leadout = if position + 1 == indices.len() {
                LEAD_SENTINEL
            } else {
                let next_start = lines[indices[position + 1]].start_time;
                (next_start - lines[indices[position]].end_time).max(0) as f64
            };
            let line = &mut lines[indices[position]];
            line.leadin = leadin;
            line.leadout = leadout;
        }
    }
}
