//! Karaoke segmentation: folding a token stream into timed syllables and
//! splitting stripped text into words.
//!
//! A karaoke tag (`\k`, `\K`, `\kf`, `\ko`) opens a syllable that closes at
//! the next karaoke tag or at the end of the line. The tag kind changes how
//! a renderer highlights the syllable but never how the text is segmented,
//! so segmentation only records the kind and the centisecond duration.

use crate::tokenizer::{Tag, Token};

/// Highlight style of a karaoke tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KaraokeKind {
    /// `\k`: the syllable fills instantly when its time comes.
    Fill,
    /// `\kf` / `\K`: the fill sweeps across the syllable.
    Sweep,
    /// `\ko`: the outline is highlighted instead of the fill.
    Outline,
}

impl KaraokeKind {
    /// Map a tag name to its kind; `None` for non-karaoke tags. The `k`
    /// may be capitalized (`\Kf`, `\Ko`), matching permissive renderers.
    #[must_use]
    pub fn from_tag_name(name: &str) -> Option<Self> {
        match name {
            "k" => Some(Self::Fill),
            "K" | "kf" | "Kf" => Some(Self::Sweep),
            "ko" | "Ko" => Some(Self::Outline),
            _ => None,
        }
    }

    /// The canonical tag spelling for this kind.
    #[must_use]
    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::Fill => "\\k",
            Self::Sweep => "\\kf",
            Self::Outline => "\\ko",
        }
    }
}

/// A parsed karaoke tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KaraokeTag {
    /// Highlight style.
    pub kind: KaraokeKind,
    /// Duration in centiseconds, as written in the tag.
    pub centis: i64,
}

impl KaraokeTag {
    /// Parse a karaoke tag out of a tag invocation. Tags whose argument is
    /// not a plain integer are not karaoke timing and return `None`.
    #[must_use]
    pub fn from_tag(tag: &Tag) -> Option<Self> {
        let kind = KaraokeKind::from_tag_name(&tag.name)?;
        let centis = tag.args.trim().parse().ok()?;
        Some(Self { kind, centis })
    }

    /// Duration in milliseconds (`centis * 10`).
    #[must_use]
    pub const fn duration_ms(&self) -> i64 {
        self.centis * 10
    }
}

/// One raw syllable chunk: the text claimed by a karaoke tag plus the
/// override tags riding along with it. Timing and word attribution are
/// resolved in a second pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SylChunk {
    /// Raw override-tag text, karaoke tag included.
    pub tags: String,
    /// The karaoke tag that opened the chunk; `None` for untagged
    /// leading/trailing text.
    pub kara: Option<KaraokeTag>,
    /// Chunk text, spaces still attached.
    pub text: String,
    /// Inline effect in scope for this chunk.
    pub inline_fx: String,
}

impl SylChunk {
    fn is_empty(&self) -> bool {
        self.kara.is_none() && self.text.is_empty() && self.tags.is_empty()
    }
}

/// Fold a token stream into syllable chunks.
///
/// Non-karaoke tags attach to the syllable whose text follows them: tags
/// preceding a karaoke tag in the same block belong to the syllable that
/// tag opens, and tags appearing after a syllable's text (but before the
/// next karaoke tag) attach to the next syllable. An inline-effect tag
/// (`\-name`) updates the effect in scope from the syllable it lands in
/// onward.
pub(crate) fn segment(tokens: &[Token]) -> Vec<SylChunk> {
    let mut chunks = Vec::new();
    let mut current = SylChunk {
        tags: String::new(),
        kara: None,
        text: String::new(),
        inline_fx: String::new(),
    };
    // Tags seen after the current chunk's text; they belong to whatever
    // comes next.
    let mut pending_tags = String::new();
    let mut active_fx = String::new();

    for token in tokens {
        match token {
            Token::Text(run) => {
                if !pending_tags.is_empty() {
                    current.tags.push_str(&pending_tags);
                    pending_tags.clear();
                    current.inline_fx = active_fx.clone();
                }
                current.text.push_str(run);
            }
            Token::Block { tags, .. } => {
                for tag in tags {
                    if let Some(kara) = KaraokeTag::from_tag(tag) {
                        if current.kara.is_some() || !current.text.is_empty() {
                            chunks.push(std::mem::replace(
                                &mut current,
                                SylChunk {
                                    tags: String::new(),
                                    kara: None,
                                    text: String::new(),
                                    inline_fx: String::new(),
                                },
                            ));
                        }
                        // Tags written before the karaoke tag (as in
                        // {\an5\k20}) stay on the syllable it opens
                        current.tags.push_str(&std::mem::take(&mut pending_tags));
                        current.tags.push('\\');
                        current.tags.push_str(&tag.name);
                        current.tags.push_str(&tag.args);
                        current.kara = Some(kara);
                        current.inline_fx = active_fx.clone();
                    } else {
                        let raw = format!("\\{}{}", tag.name, tag.args);
                        if tag.name == "-" {
                            active_fx = tag.args.clone();
                        }
                        if current.text.is_empty() {
                            current.tags.push_str(&raw);
                            current.inline_fx = active_fx.clone();
                        } else {
                            pending_tags.push_str(&raw);
                        }
                    }
                }
            }
        }
    }

    if !pending_tags.is_empty() {
        current.tags.push_str(&pending_tags);
        current.inline_fx = active_fx;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// A whitespace-delimited word of the stripped text, with the spaces
/// attributed around it. Positions are character counts, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WordSpan {
    /// Spaces before the word not claimed by a previous word.
    pub prespace: usize,
    /// The word text.
    pub text: String,
    /// Spaces following the word.
    pub postspace: usize,
    /// Character index of the word's first character in the stripped text.
    pub start: usize,
    /// Character index one past the word's last character.
    pub end: usize,
}

/// Split stripped text into words. Inter-word spaces attach to the
/// preceding word's `postspace`; only spaces before the first word count as
/// `prespace`.
pub(crate) fn split_words(text: &str) -> Vec<WordSpan> {
    let mut words = Vec::new();
    let mut chars = text.chars().peekable();
    let mut cursor = 0usize;
    let mut first = true;

    while chars.peek().is_some() {
        let mut prespace = 0;
        while chars.next_if(|c| c.is_whitespace()).is_some() {
            prespace += 1;
        }
        let mut word = String::new();
        while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
            word.push(c);
        }
        if word.is_empty() {
            break;
        }
        let mut postspace = 0;
        while chars.next_if(|c| c.is_whitespace()).is_some() {
            postspace += 1;
        }
        let prespace = if first { prespace } else { 0 };
        first = false;
        let start = cursor + prespace;
        let end = start + word.chars().count();
        cursor = end + postspace;
        words.push(WordSpan {
            prespace,
            text: word,
            postspace,
            start,
            end,
        });
    }
    words
}

/// A timed syllable before geometry resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProtoSyl {
    pub word_i: usize,
    pub start_time: i64,
    pub end_time: i64,
    pub text: String,
    pub tags: String,
    pub inline_fx: String,
    pub prespace: usize,
    pub postspace: usize,
}

/// Assign timing and word attribution to segmented chunks.
///
/// Karaoke durations accumulate from the line start. An untagged chunk is
/// zero-duration, except in trailing position where it absorbs whatever
/// line time the karaoke tags left unclaimed; a line without karaoke tags
/// degenerates to one syllable spanning the whole line.
pub(crate) fn syllables(
    chunks: &[SylChunk],
    words: &[WordSpan],
    line_duration: i64,
) -> Vec<ProtoSyl> {
    let mut syls = Vec::with_capacity(chunks.len());
    let mut clock = 0i64;
    let mut cursor = 0usize;

    for (i, chunk) in chunks.iter().enumerate() {
        let total = chunk.text.chars().count();
        let stripped = chunk.text.trim();
        let prespace = chunk.text.chars().count() - chunk.text.trim_start().chars().count();
        let postspace = total - stripped.chars().count() - prespace;

        let start_time = clock;
        let end_time = match chunk.kara {
            Some(tag) => start_time + tag.duration_ms(),
            // Trailing untagged text claims the rest of the line; untagged
            // text elsewhere is a zero-duration syllable.
            None if i + 1 == chunks.len() => line_duration.max(start_time),
            None => start_time,
        };
        clock = end_time;

        let text_start = cursor + prespace;
        let word_i = word_index_at(words, text_start);
        cursor += total;

        syls.push(ProtoSyl {
            word_i,
            start_time,
            end_time,
            text: stripped.to_string(),
            tags: chunk.tags.clone(),
            inline_fx: chunk.inline_fx.clone(),
            prespace,
            postspace,
        });
    }
    syls
}

/// Word containing the character at `position` in the stripped text.
fn word_index_at(words: &[WordSpan], position: usize) -> usize {
    if words.is_empty() {
        return 0;
    }
    words
        .iter()
        .position(|w| position >= w.start && position < w.end)
        .unwrap_or_else(|| {
            // At or past the end of the last word (empty chunk, trailing
            // spaces): attribute to the nearest preceding word.
            words
                .iter()
                .rposition(|w| w.start <= position)
                .unwrap_or(0)
        })
}
