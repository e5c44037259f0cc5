//! Script-level metadata from `[Script Info]` and the Aegisub garbage
//! section.

use crate::timestamps::FpsTimestamps;

/// Script-wide properties. Immutable once the script is parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Meta {
    /// Line wrapping mode (`WrapStyle`, 0-3).
    pub wrap_style: u8,
    /// Whether border and shadow scale with the script resolution
    /// (`ScaledBorderAndShadow`).
    pub scaled_border_and_shadow: bool,
    /// Script horizontal resolution (`PlayResX`).
    pub play_res_x: u32,
    /// Script vertical resolution (`PlayResY`).
    pub play_res_y: u32,
    /// Loaded audio path (`Audio File`/`Audio URI`), when present.
    pub audio: Option<String>,
    /// Loaded video path (`Video File`), when present.
    pub video: Option<String>,
    /// Frame timing, available when the script declares a dummy video or
    /// the caller injected a source through the parse options.
    pub timestamps: Option<FpsTimestamps>,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            wrap_style: 0,
            scaled_border_and_shadow: true,
            play_res_x: 0,
            play_res_y: 0,
            audio: None,
            video: None,
            timestamps: None,
        }
    }
}

impl Meta {
    /// Fallback resolution used when the script omits `PlayResX`/`PlayResY`.
    pub const DEFAULT_PLAY_RES: (u32, u32) = (1280, 720);
}
