//! Frame/time conversion for scripts synced to a video.
//!
//! The core cannot probe real video files; it parses the constant frame rate
//! out of Aegisub dummy-video declarations (`?dummy:fps:frames:...`) and lets
//! callers inject their own source for anything else.

/// Conversion between frame numbers and milliseconds.
pub trait TimestampSource {
    /// Milliseconds at which `frame` starts.
    fn frame_to_ms(&self, frame: u32) -> i64;

    /// Frame displayed at `ms`.
    fn ms_to_frame(&self, ms: i64) -> u32;
}

/// Constant-frame-rate timestamp source.
///
/// # Examples
///
/// ```
/// use assfx_core::timestamps::{FpsTimestamps, TimestampSource};
///
/// let ts = FpsTimestamps::from_fps(25.0).unwrap();
/// assert_eq!(ts.frame_to_ms(25), 1000);
/// assert_eq!(ts.ms_to_frame(1000), 25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsTimestamps {
    fps: f64,
}

impl FpsTimestamps {
    /// Create a source for a constant frame rate. Returns `None` for
    /// non-finite or non-positive rates.
    #[must_use]
    pub fn from_fps(fps: f64) -> Option<Self> {
        (fps.is_finite() && fps > 0.0).then_some(Self { fps })
    }

    /// Parse an Aegisub dummy-video declaration.
    ///
    /// The `Video File` header of a script synced to a dummy video looks
    /// like `?dummy:23.976000:40000:1280:720:47:163:254:`; the second field
    /// is the frame rate.
    #[must_use]
    pub fn from_dummy_video(spec: &str) -> Option<Self> {
        let rest = spec.trim().strip_prefix("?dummy:")?;
        let fps_field = rest.split(':').next()?;
        Self::from_fps(fps_field.parse().ok()?)
    }

    /// The frame rate this source was built from.
    #[must_use]
    pub const fn fps(&self) -> f64 {
        self.fps
    }
}

impl TimestampSource for FpsTimestamps {
    fn frame_to_ms(&self, frame: u32) -> i64 {
        (f64::from(frame) * 1000.0 / self.fps).round() as i64
    }

    fn ms_to_frame(&self, ms: i64) -> u32 {
        let frame = (ms as f64 * self.fps / 1000.0).round();
        if frame <= 0.0 {
            0
        } else {
            frame as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dummy_video_spec() {
        let ts = FpsTimestamps::from_dummy_video("?dummy:23.976000:40000:1280:720:47:163:254:")
            .expect("valid dummy spec");
        assert!((ts.fps() - 23.976).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_dummy_specs() {
        assert_eq!(FpsTimestamps::from_dummy_video("video.mkv"), None);
        assert_eq!(FpsTimestamps::from_dummy_video("?dummy:abc:1:"), None);
        assert_eq!(FpsTimestamps::from_fps(0.0), None);
        assert_eq!(FpsTimestamps::from_fps(f64::NAN), None);
    }

    #[test]
    fn frame_conversion_rounds_to_nearest() {
        let ts = FpsTimestamps::from_fps(23.976).unwrap();
        assert_eq!(ts.frame_to_ms(0), 0);
        // frame 1 at 41.708ms
        assert_eq!(ts.frame_to_ms(1), 42);
        assert_eq!(ts.ms_to_frame(42), 1);
        assert_eq!(ts.ms_to_frame(-10), 0);
    }
}
