//! Small shared helpers: timestamp conversion and style colour handling.

pub mod errors;

/// Parse an ASS timestamp (`H:MM:SS.CC`) into milliseconds.
///
/// Centiseconds are the native ASS resolution; the result is `cs * 10`.
/// Returns `None` when the text does not match the grammar.
///
/// # Examples
///
/// ```
/// use assfx_core::utils::timestamp_to_ms;
///
/// assert_eq!(timestamp_to_ms("0:00:01.50"), Some(1500));
/// assert_eq!(timestamp_to_ms("1:02:03.04"), Some(3_723_040));
/// assert_eq!(timestamp_to_ms("garbage"), None);
/// ```
#[must_use]
pub fn timestamp_to_ms(text: &str) -> Option<i64> {
    let text = text.trim();
    let (hours, rest) = text.split_once(':')?;
    let (minutes, rest) = rest.split_once(':')?;
    let (seconds, centis) = rest.split_once('.')?;

    let hours: i64 = hours.parse().ok()?;
    let minutes: i64 = minutes.parse().ok()?;
    let seconds: i64 = seconds.parse().ok()?;
    let centis: i64 = centis.parse().ok()?;

    if hours < 0 || !(0..60).contains(&minutes) || !(0..60).contains(&seconds) || centis < 0 {
        return None;
    }

    Some(hours * 3_600_000 + minutes * 60_000 + seconds * 1000 + centis * 10)
}

/// Render milliseconds as an ASS timestamp (`H:MM:SS.CC`).
///
/// Sub-centisecond precision is truncated, matching how ASS files store
/// times. Negative inputs clamp to zero.
///
/// # Examples
///
/// ```
/// use assfx_core::utils::ms_to_timestamp;
///
/// assert_eq!(ms_to_timestamp(1500), "0:00:01.50");
/// assert_eq!(ms_to_timestamp(3_723_040), "1:02:03.04");
/// ```
#[must_use]
pub fn ms_to_timestamp(ms: i64) -> String {
    let ms = ms.max(0);
    let hours = ms / 3_600_000;
    let minutes = ms % 3_600_000 / 60_000;
    let seconds = ms % 60_000 / 1000;
    let centis = ms % 1000 / 10;
    format!("{hours}:{minutes:02}:{seconds:02}.{centis:02}")
}

/// Split a style colour field (`&HAABBGGRR` or `&HBBGGRR`) into a
/// `(colour, alpha)` pair in override-tag notation (`&HBBGGRR&`, `&HAA&`).
///
/// Style rows pack alpha and colour into one value; override tags keep them
/// separate, so the model stores them separately too. Short values are
/// zero-padded and missing alpha defaults to opaque.
#[must_use]
pub fn split_style_color(field: &str) -> (String, String) {
    let hex = field.trim();
    let hex = hex.strip_prefix("&H").or_else(|| hex.strip_prefix("&h")).unwrap_or(hex);
    let hex = hex.trim_end_matches('&');

    if hex.len() > 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        let split = hex.len() - 6;
        (format!("&H{}&", &hex[split..]), format!("&H{:0>2}&", &hex[..split]))
    } else {
        (format!("&H{hex:0>6}&"), "&H00&".to_string())
    }
}
