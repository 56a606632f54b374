/*!
 * SMPTE timecode arithmetic for subtitle event stamping.
 *
 * Converts between total frame counts and `HH:MM:SS:FF` strings. Fractional
 * frame rates (23.976, 29.97, ...) are counted at their rounded-up whole rate,
 * so 24 frames at 23.976 fps is exactly one second of timecode.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::errors::TimecodeError;

// @const: Timecode string regex, accepts drop-frame separators
static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d\d)[:;](\d\d)[:;](\d\d)[:.](\d+)$").unwrap()
});

/// Whole-number rate used for frame arithmetic.
///
/// A rate with a fractional part is rounded up (pulldown), anything else is
/// used as is.
pub fn effective_rate(frame_rate: f64) -> u64 {
    if frame_rate.fract() != 0.0 {
        frame_rate.ceil() as u64
    } else {
        frame_rate as u64
    }
}

/// Parse a textual frame rate such as "24" or "23.976"
pub fn parse_frame_rate(value: &str) -> Result<f64, TimecodeError> {
    let frame_rate = value
        .trim()
        .parse::<f64>()
        .map_err(|_| TimecodeError::InvalidFrameRate(value.to_string()))?;
    if !frame_rate.is_finite() || frame_rate <= 0.0 {
        return Err(TimecodeError::InvalidFrameRate(value.to_string()));
    }
    Ok(frame_rate)
}

// Successive divmod by {rate, 60, 60}; hours are not wrapped.
fn decompose(total_frames: u64, rate: u64) -> (u64, u64, u64, u64) {
    let frames = total_frames % rate;
    let total_seconds = total_frames / rate;
    let seconds = total_seconds % 60;
    let total_minutes = total_seconds / 60;
    let minutes = total_minutes % 60;
    let hours = total_minutes / 60;
    (hours, minutes, seconds, frames)
}

/// A frame-accurate timecode at a fixed frame rate
#[derive(Debug, Clone, PartialEq)]
pub struct Timecode {
    frame_rate: f64,
    hours: u64,
    minutes: u64,
    seconds: u64,
    frames: u64,
    total_frames: u64,
}

impl Timecode {
    /// Create a zeroed timecode for the given frame rate
    pub fn new(frame_rate: f64) -> Result<Self, TimecodeError> {
        if !frame_rate.is_finite() || frame_rate <= 0.0 {
            return Err(TimecodeError::InvalidFrameRate(frame_rate.to_string()));
        }

        Ok(Self {
            frame_rate,
            hours: 0,
            minutes: 0,
            seconds: 0,
            frames: 0,
            total_frames: 0,
        })
    }

    /// Create a timecode positioned at a frame count
    pub fn from_frames(frame_rate: f64, frame_count: u64) -> Result<Self, TimecodeError> {
        let mut timecode = Self::new(frame_rate)?;
        timecode.set_frames(frame_count);
        Ok(timecode)
    }

    /// Parse `HH:MM:SS:FF` (`;` and `.` separators are accepted as well)
    pub fn parse(frame_rate: f64, value: &str) -> Result<Self, TimecodeError> {
        let mut timecode = Self::new(frame_rate)?;
        let caps = TIMECODE_REGEX
            .captures(value.trim())
            .ok_or_else(|| TimecodeError::InvalidFormat(value.to_string()))?;

        let field = |idx: usize| -> Result<u64, TimecodeError> {
            caps.get(idx)
                .and_then(|m| m.as_str().parse::<u64>().ok())
                .ok_or_else(|| TimecodeError::InvalidFormat(value.to_string()))
        };

        let (hours, minutes, seconds, frames) = (field(1)?, field(2)?, field(3)?, field(4)?);
        if minutes >= 60 || seconds >= 60 || frames >= timecode.effective_rate() {
            return Err(TimecodeError::InvalidFormat(value.to_string()));
        }

        timecode.hours = hours;
        timecode.minutes = minutes;
        timecode.seconds = seconds;
        timecode.frames = frames;
        timecode.total_frames = timecode.total_frames();
        Ok(timecode)
    }

    /// Nominal frame rate as given at construction
    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Whole-number rate used for all conversions
    pub fn effective_rate(&self) -> u64 {
        effective_rate(self.frame_rate)
    }

    /// Set the position from a total frame count
    pub fn set_frames(&mut self, frame_count: u64) {
        let (hours, minutes, seconds, frames) = decompose(frame_count, self.effective_rate());
        self.total_frames = frame_count;
        self.hours = hours;
        self.minutes = minutes;
        self.seconds = seconds;
        self.frames = frames;
    }

    /// Frame count given to the last `set_frames` (or parsed)
    pub fn frame_count(&self) -> u64 {
        self.total_frames
    }

    /// Frame count derived from the stored hours, minutes, seconds and frames
    pub fn total_frames(&self) -> u64 {
        (self.hours * 3600 + self.minutes * 60 + self.seconds) * self.effective_rate() + self.frames
    }

    /// Format as a zero-padded `HH:MM:SS:FF` string
    pub fn timecode(&self) -> String {
        let (hours, minutes, seconds, frames) = decompose(self.total_frames(), self.effective_rate());
        format!("{:02}:{:02}:{:02}:{:02}", hours, minutes, seconds, frames)
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.timecode())
    }
}
