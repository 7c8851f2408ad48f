use std::time::Duration;

/// Number of whitespace separated words in `text`.
///
/// Runs of whitespace never produce empty words, so blank text counts zero.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Words per minute over the whole seconds of `elapsed`, floored.
///
/// Returns `None` while less than a second has elapsed.
pub fn words_per_minute(words: usize, elapsed: Duration) -> Option<u64> {
    match elapsed.as_secs() {
        0 => None,
        secs => Some(words as u64 * 60 / secs),
    }
}

/// Render seconds as `MM:SS`. There is no hour field; minutes keep growing.
pub fn format_timestamp(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
