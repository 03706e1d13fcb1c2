//! Date/time display utilities.
//!
//! Wrapper types for formatting timestamps in the system timezone and for
//! formatting time spent in a stage.

use std::fmt;

use jiff::{tz::TimeZone, SignedDuration, Timestamp};

/// A wrapper around `Timestamp` that provides system timezone formatting via
/// the `Display` trait.
///
/// The display format follows the pattern: `YYYY-MM-DD HH:MM:SS TZ`
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl<'a> fmt::Display for LocalDateTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Time spent in a stage, formatted compactly.
///
/// - at least a day: `"Xd Yh"`
/// - at least an hour: `"Xh Ym"`
/// - otherwise: `"Xm"`
///
/// Negative spans (clock skew between exit and entry) display as `0m`.
///
/// # Examples
///
/// ```rust
/// use jiff::SignedDuration;
/// use valveflow_core::display::Elapsed;
///
/// assert_eq!(Elapsed(SignedDuration::from_hours(30)).to_string(), "1d 6h");
/// assert_eq!(Elapsed(SignedDuration::from_mins(135)).to_string(), "2h 15m");
/// assert_eq!(Elapsed(SignedDuration::from_secs(59)).to_string(), "0m");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed(pub SignedDuration);

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.0.as_secs().max(0) / 60;
        let (days, hours) = (minutes / (24 * 60), minutes / 60);

        if days >= 1 {
            write!(f, "{days}d {}h", hours % 24)
        } else if hours >= 1 {
            write!(f, "{hours}h {}m", minutes % 60)
        } else {
            write!(f, "{minutes}m")
        }
    }
}
