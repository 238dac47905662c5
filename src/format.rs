//! Elapsed-time rendering.

use crate::elements::Badge;

/// Renders whole seconds as zero-padded `MM:SS`.
///
/// Minutes are not wrapped into hours, so an hour and a minute reads `61:01`.
///
/// ```rust
/// use quiztimer_widgets::format::format_elapsed;
///
/// assert_eq!(format_elapsed(0), "00:00");
/// assert_eq!(format_elapsed(65), "01:05");
/// assert_eq!(format_elapsed(3661), "61:01");
/// ```
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

impl Badge {
    /// Picks the badge for `seconds` elapsed against a warning threshold.
    pub fn for_elapsed(seconds: u64, warning_after: u64) -> Self {
        if seconds >= warning_after {
            Badge::Warning
        } else {
            Badge::Info
        }
    }
}
