//! Reading-time pacing.
//!
//! After each turn the orchestrator pauses long enough for a human to read
//! what was just said. The estimate only counts characters a reader actually
//! processes, so punctuation-heavy text never reads slower than plain text of
//! the same length.

use std::time::Duration;

/// Reading rate in characters per second.
const CHARS_PER_SECOND: f64 = 4.0;

/// Pause bounds in seconds.
const MIN_SECS: f64 = 2.0;
const MAX_SECS: f64 = 10.0;

/// Estimate how long a human needs to read `text`.
///
/// Pure function: strips everything that is neither a word character nor
/// whitespace, counts what remains, divides by the reading rate, and clamps
/// to [2, 10] seconds.
pub fn reading_delay(text: &str) -> Duration {
    let readable_chars = text
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .count();
    let secs = (readable_chars as f64 / CHARS_PER_SECOND).clamp(MIN_SECS, MAX_SECS);
    Duration::from_secs_f64(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_hits_minimum() {
        assert_eq!(reading_delay("ok"), Duration::from_secs_f64(2.0));
        assert_eq!(reading_delay(""), Duration::from_secs_f64(2.0));
    }

    #[test]
    fn long_text_hits_maximum() {
        let text = "a".repeat(1000);
        assert_eq!(reading_delay(&text), Duration::from_secs_f64(10.0));
    }

    #[test]
    fn mid_range_scales_with_length() {
        // 20 readable chars at 4 chars/sec = 5 seconds.
        let text = "abcde".repeat(4);
        assert_eq!(reading_delay(&text), Duration::from_secs_f64(5.0));
    }

    #[test]
    fn always_within_bounds() {
        for text in ["", "x", "hello world", &"word ".repeat(500)] {
            let d = reading_delay(text);
            assert!(d >= Duration::from_secs_f64(2.0));
            assert!(d <= Duration::from_secs_f64(10.0));
        }
    }

    #[test]
    fn punctuation_never_increases_delay() {
        // Same alphanumeric content, increasing punctuation density.
        let base = "abcdefghij".repeat(3);
        let light = format!("{base}!");
        let heavy = format!("!!!{base}???...;;;");
        assert_eq!(reading_delay(&base), reading_delay(&light));
        assert_eq!(reading_delay(&base), reading_delay(&heavy));
        assert!(reading_delay(&heavy) <= reading_delay(&light));
    }
}
