//! Token estimation.
//!
//! Podium never truncates or budgets by tokens, so an exact tokenizer would
//! buy nothing over the standard ~4-characters-per-token heuristic. Counts
//! feed the per-turn `[n]` tally in the terminal and nothing else.

/// Characters per token for the estimate.
const CHARS_PER_TOKEN: usize = 4;

/// Estimate the token length of `text`.
///
/// Deterministic: the same string always yields the same count.
pub fn estimate_tokens(text: &str) -> u32 {
    (text.chars().count().div_ceil(CHARS_PER_TOKEN)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_zero_tokens() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn rounds_up_to_whole_tokens() {
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
    }

    #[test]
    fn counts_chars_not_bytes() {
        // Four CJK chars are one estimated token despite 12 bytes.
        assert_eq!(estimate_tokens("辩论主题"), 1);
    }

    #[test]
    fn deterministic() {
        let text = "The motion is carried.";
        assert_eq!(estimate_tokens(text), estimate_tokens(text));
    }
}
