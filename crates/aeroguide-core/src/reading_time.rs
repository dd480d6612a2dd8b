//! Reading-time estimation at an assumed 200 words per minute.

const WORDS_PER_MINUTE: u32 = 200;

/// Estimated reading time in whole minutes, rounded up. Non-empty text is
/// always at least one minute; empty or whitespace-only text is zero.
pub fn estimate(text: &str) -> u32 {
    let words = text.split_whitespace().count() as u32;
    if words == 0 {
        return 0;
    }
    words.div_ceil(WORDS_PER_MINUTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace_are_zero() {
        assert_eq!(estimate(""), 0);
        assert_eq!(estimate("   \n\t  "), 0);
    }

    #[test]
    fn test_short_text_is_one_minute() {
        assert_eq!(estimate("one"), 1);
        assert_eq!(estimate("a few short words here"), 1);
    }

    #[test]
    fn test_exact_multiple_does_not_round_up() {
        let text = vec!["word"; 400].join(" ");
        assert_eq!(estimate(&text), 2);
    }

    #[test]
    fn test_one_word_over_rounds_up() {
        let text = vec!["word"; 401].join(" ");
        assert_eq!(estimate(&text), 3);
    }
}
