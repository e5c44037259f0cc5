//! Override-tag tokenizer for event text.
//!
//! Event text interleaves plain text with `{...}` override blocks. The
//! tokenizer splits the text into [`Token`]s and decomposes each block into
//! its tag invocations, without interpreting tag arguments: arguments stay
//! raw so downstream consumers (and generated output) keep the exact
//! original spelling.
//!
//! Malformed input never fails: an unterminated `{` or a block with
//! unbalanced parentheses degrades to literal text, flagged through the
//! outcome so the caller can record a warning.

/// One tag invocation inside an override block.
///
/// `name` is the leading digit-prefixed alphabetic run (`k`, `kf`, `1c`,
/// `pos`, ...); everything after it is the raw, unparsed `args`
/// (`50`, `&HFF00FF&`, `(10,20)`). The inline-effect tag `\-fx` gets the
/// name `"-"` with the effect name as its args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Tag name without the leading backslash.
    pub name: String,
    /// Raw argument text, parentheses included for function-style tags.
    pub args: String,
}

/// A run of event text: either plain text or one override block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Plain text between blocks, escaped braces already unescaped.
    Text(String),
    /// An override block `{...}`.
    Block {
        /// Block payload without the surrounding braces.
        raw: String,
        /// Decomposed tag invocations, in source order.
        tags: Vec<Tag>,
    },
}

/// Result of tokenizing one event text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
    /// The token stream, in source order.
    pub tokens: Vec<Token>,
    /// True when at least one block was malformed and kept as literal text.
    pub malformed: bool,
}

impl Tokenized {
    /// Concatenation of all plain-text runs: the tag-stripped event text.
    #[must_use]
    pub fn stripped_text(&self) -> String {
        let mut text = String::new();
        for token in &self.tokens {
            if let Token::Text(run) = token {
                text.push_str(run);
            }
        }
        text
    }
}

/// Tokenize one event's raw text.
///
/// # Examples
///
/// ```
/// use assfx_core::tokenizer::tokenize;
///
/// let out = tokenize("{\\k50}Hel{\\k50}lo");
/// assert_eq!(out.tokens.len(), 4);
/// assert!(!out.malformed);
/// assert_eq!(out.stripped_text(), "Hello");
/// ```
#[must_use]
pub fn tokenize(raw: &str) -> Tokenized {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut malformed = false;
    let bytes = raw.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' if matches!(bytes.get(i + 1), Some(&b'{' | &b'}')) => {
                text.push(bytes[i + 1] as char);
                i += 2;
            }
            b'{' => match find_block_end(bytes, i) {
                Some(end) => {
                    let inner = &raw[i + 1..end];
                    if let Some(tags) = split_tags(inner) {
                        if !text.is_empty() {
                            tokens.push(Token::Text(std::mem::take(&mut text)));
                        }
                        tokens.push(Token::Block {
                            raw: inner.to_string(),
                            tags,
                        });
                    } else {
                        malformed = true;
                        text.push_str(&raw[i..=end]);
                    }
                    i = end + 1;
                }
                None => {
                    malformed = true;
                    text.push_str(&raw[i..]);
                    i = bytes.len();
                }
            },
            _ => {
                // i is on a char boundary: braces and backslashes are ASCII
                let ch = raw[i..].chars().next().unwrap_or('\0');
                text.push(ch);
                i += ch.len_utf8();
            }
        }
    }

    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }

    Tokenized { tokens, malformed }
}

/// Find the `}` closing the block opened at `open`, tracking nesting so a
/// brace inside drawing payloads does not end the block early.
fn find_block_end(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, &byte) in bytes[open..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split a block payload into tag invocations.
///
/// Tags are separated by `\` at parenthesis depth zero, so `\t(\k50)` stays
/// one tag. Returns `None` when parentheses do not balance.
fn split_tags(inner: &str) -> Option<Vec<Tag>> {
    let mut tags = Vec::new();
    let mut depth = 0i32;
    let mut start: Option<usize> = None;
    let bytes = inner.as_bytes();

    for (i, &byte) in bytes.iter().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            b'\\' if depth == 0 => {
                if let Some(tag_start) = start {
                    push_tag(&mut tags, &inner[tag_start..i]);
                }
                start = Some(i + 1);
            }
            _ => {}
        }
    }

    if depth != 0 {
        return None;
    }
    if let Some(tag_start) = start {
        push_tag(&mut tags, &inner[tag_start..]);
    }
    Some(tags)
}

fn push_tag(tags: &mut Vec<Tag>, raw: &str) {
    if raw.is_empty() {
        return;
    }
    if let Some(fx) = raw.strip_prefix('-') {
        tags.push(Tag {
            name: "-".to_string(),
            args: fx.to_string(),
        });
        return;
    }

    // Tag names are an optional digit prefix plus letters: k, kf, K, 1c, 3a
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let digits_end = i;
    while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
        i += 1;
    }

    let (name, args) = if i == digits_end {
        (raw, "")
    } else {
        (&raw[..i], &raw[i..])
    };
    tags.push(Tag {
        name: name.to_string(),
        args: args.to_string(),
    });
}
