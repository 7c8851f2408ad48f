use url::Url;

use crate::error::ShareError;

/// Default base for share links: a prefilled tweet.
pub const DEFAULT_SHARE_URL: &str = "https://twitter.com/intent/tweet";

/// Build a link announcing `wpm` and how to take up the challenge.
pub fn share_link(base: &str, wpm: u64) -> Result<String, ShareError> {
    let mut url = Url::parse(base).map_err(|source| ShareError::InvalidUrl {
        url: base.to_string(),
        source,
    })?;
    url.query_pairs_mut().append_pair(
        "text",
        &format!("I typed the news at {wpm} wpm. Beat me: typehead --challenge {wpm}"),
    );
    Ok(url.into())
}

/// Leading integer of `s`, ignoring anything after the digits.
///
/// `" 42wpm"` is 42, `"-3"` is -3, `"wpm"` is `None`. Digits beyond the
/// range of `i64` saturate.
pub fn parse_score_to_beat(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    // Only digits remain, so the parse can fail on overflow alone
    let n = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * n)
}

/// Contents of the share / challenge dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareDialog {
    pub link: Option<String>,
    pub score_to_beat: Option<i64>,
}

impl ShareDialog {
    pub fn header(&self) -> &'static str {
        if self.link.is_some() {
            "Share your score"
        } else {
            "You've been challenged!"
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(link) = &self.link {
            lines.push("Challenge a friend by sending this link:".to_string());
            lines.push(link.clone());
        }
        if let Some(score) = self.score_to_beat {
            lines.push(format!(
                "The score to beat is {score} words per minute."
            ));
            lines.push("Good luck.".to_string());
        }
        lines
    }
}
