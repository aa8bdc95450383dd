//! Remaining-time estimation and in-place progress rendering.
//!
//! The estimate is a pure function of counters; the spinner owns the
//! console line for the duration of a scan and is the only writer to
//! stdout while it is alive.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

/// Spinner frames cycled on each tick.
const FRAMES: &[char] = &['|', '/', '-', '\\'];

/// Estimates time remaining from counters and elapsed time.
///
/// Extrapolates the observed per-item rate over the items left. With
/// nothing processed yet there is no rate to extrapolate and the estimate
/// is zero.
#[must_use]
pub fn estimate_remaining(processed: usize, total: usize, elapsed: Duration) -> Duration {
    if processed == 0 {
        return Duration::ZERO;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = total.saturating_sub(processed) as f64 / processed as f64;
    elapsed.mul_f64(ratio)
}

/// Renders a duration as days, hours, minutes and seconds.
///
/// Zero-valued leading units are omitted and seconds are always shown,
/// with singular and plural forms selected per value:
/// "1 day, 2 hours, 3 minutes and 4 seconds", "0 seconds".
#[must_use]
pub fn format_remaining(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;

    let mut output = String::new();

    if days == 1 {
        output.push_str("1 day, ");
    } else if days > 1 {
        output.push_str(&format!("{days} days, "));
    }
    if hours == 1 {
        output.push_str("1 hour, ");
    } else if hours > 1 {
        output.push_str(&format!("{hours} hours, "));
    }
    if minutes == 1 {
        output.push_str("1 minute and ");
    } else if minutes > 1 {
        output.push_str(&format!("{minutes} minutes and "));
    }
    if seconds == 1 {
        output.push_str("1 second");
    } else {
        output.push_str(&format!("{seconds} seconds"));
    }

    output
}

/// A single console line overwritten in place.
///
/// Each tick redraws the line with the next spinner frame, padding with
/// blanks so a shorter line fully covers the previous one. `erase` blanks
/// the line out entirely, leaving no residue once the operation is done.
/// Rendering only happens on a TTY; state still advances so behavior is
/// testable.
pub struct SpinnerLine {
    /// Index of the next frame to draw.
    frame: usize,
    /// Length of the last rendered line, for padding and erasing.
    last_len: usize,
    /// Whether stdout is a terminal.
    is_tty: bool,
}

impl Default for SpinnerLine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinnerLine {
    /// Creates a spinner bound to stdout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame: 0,
            last_len: 0,
            is_tty: io::stdout().is_terminal(),
        }
    }

    /// Redraws the line as "<frame> <text>", advancing the spinner.
    pub fn tick(&mut self, text: &str) {
        let line = format!("{} {}", FRAMES[self.frame], text);
        let padding = self.last_len.saturating_sub(line.chars().count());

        if self.is_tty {
            print!("\r{}{}", line, " ".repeat(padding));
            let _ = io::stdout().flush();
        }

        self.last_len = line.chars().count();
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    /// Blanks out the line and returns the cursor to column zero.
    pub fn erase(&mut self) {
        if self.is_tty && self.last_len > 0 {
            print!("\r{}\r", " ".repeat(self.last_len));
            let _ = io::stdout().flush();
        }
        self.last_len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_zero_processed() {
        assert_eq!(
            estimate_remaining(0, 10, Duration::ZERO),
            Duration::ZERO
        );
        assert_eq!(
            estimate_remaining(0, 10, Duration::from_secs(100)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_estimate_halfway() {
        assert_eq!(
            estimate_remaining(5, 10, Duration::from_secs(10)),
            Duration::from_secs(10)
        );
    }

    #[test]
    fn test_estimate_complete() {
        assert_eq!(
            estimate_remaining(10, 10, Duration::from_secs(42)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_estimate_uneven_rate() {
        // 3 of 12 in 6s: 2s per item, 9 items left
        assert_eq!(
            estimate_remaining(3, 12, Duration::from_secs(6)),
            Duration::from_secs(18)
        );
    }

    #[test]
    fn test_format_all_units_singular() {
        assert_eq!(
            format_remaining(Duration::from_secs(90_061)),
            "1 day, 1 hour, 1 minute and 1 second"
        );
    }

    #[test]
    fn test_format_all_units_plural() {
        let duration = Duration::from_secs(2 * 86_400 + 3 * 3_600 + 10 * 60 + 30);
        assert_eq!(
            format_remaining(duration),
            "2 days, 3 hours, 10 minutes and 30 seconds"
        );
    }

    #[test]
    fn test_format_zero() {
        assert_eq!(format_remaining(Duration::ZERO), "0 seconds");
    }

    #[test]
    fn test_format_omits_zero_leading_units() {
        assert_eq!(format_remaining(Duration::from_secs(61)), "1 minute and 1 second");
        assert_eq!(format_remaining(Duration::from_secs(3_600)), "1 hour, 0 seconds");
        assert_eq!(format_remaining(Duration::from_secs(59)), "59 seconds");
    }

    #[test]
    fn test_spinner_cycles_frames_and_tracks_length() {
        let mut spinner = SpinnerLine {
            frame: 0,
            last_len: 0,
            is_tty: false,
        };

        spinner.tick("working");
        assert_eq!(spinner.frame, 1);
        assert_eq!(spinner.last_len, "| working".len());

        spinner.tick("x");
        spinner.tick("x");
        spinner.tick("x");
        assert_eq!(spinner.frame, 0);

        spinner.erase();
        assert_eq!(spinner.last_len, 0);
    }
}
