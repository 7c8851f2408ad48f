use crate::score::count_words;

/// Progress through a list of headlines.
///
/// The current target is always `targets[completed.len()]`; typing it exactly
/// moves it into `completed` and clears the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    targets: Vec<String>,
    completed: Vec<String>,
    current_input: String,
    stopped: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Session {
    pub fn new(targets: Vec<String>) -> Self {
        Self {
            targets,
            completed: Vec::new(),
            current_input: String::new(),
            stopped: true,
        }
    }

    /// Compare `input` with the current target and move on when they are equal.
    pub fn advance(self, input: &str) -> Self {
        if self.current_target() != Some(input) {
            return Self {
                current_input: input.to_string(),
                ..self
            };
        }
        let mut completed = self.completed;
        completed.push(input.to_string());
        Self {
            completed,
            current_input: String::new(),
            ..self
        }
    }

    pub fn with_stopped(self, stopped: bool) -> Self {
        Self { stopped, ..self }
    }

    /// Same targets, no progress.
    pub fn restart(self) -> Self {
        Self::new(self.targets)
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn completed(&self) -> &[String] {
        &self.completed
    }

    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    pub fn current_index(&self) -> usize {
        self.completed.len()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn current_target(&self) -> Option<&str> {
        self.targets.get(self.current_index()).map(String::as_str)
    }

    pub fn next_target(&self) -> Option<&str> {
        self.targets.get(self.current_index() + 1).map(String::as_str)
    }

    pub fn is_finished(&self) -> bool {
        !self.targets.is_empty() && self.current_index() >= self.targets.len()
    }

    /// Words in completed headlines plus the words of a non-blank input.
    pub fn word_count(&self) -> usize {
        let done: usize = self.completed.iter().map(|t| count_words(t)).sum();
        done + count_words(&self.current_input)
    }

    /// Number of leading characters of the input that agree with the target.
    pub fn matched_prefix_len(&self) -> usize {
        let Some(target) = self.current_target() else {
            return 0;
        };
        self.current_input
            .chars()
            .zip(target.chars())
            .take_while(|(typed, expected)| typed == expected)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(targets: &[&str]) -> Session {
        Session::new(targets.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn test_new_session() {
        let s = session(&["the cat", "sat down"]);
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.current_target(), Some("the cat"));
        assert_eq!(s.next_target(), Some("sat down"));
        assert!(s.completed().is_empty());
        assert!(s.is_stopped());
        assert!(!s.is_finished());
    }

    #[test]
    fn test_advance_on_match() {
        let s = session(&["the cat", "sat down"]).advance("the cat");
        assert_eq!(s.current_target(), Some("sat down"));
        assert_eq!(s.completed(), ["the cat".to_string()]);
        assert_eq!(s.current_input(), "");
        assert_eq!(s.current_index(), s.completed().len());
        assert_eq!(s.next_target(), None);
    }

    #[test]
    fn test_advance_on_mismatch() {
        let s = session(&["the cat", "sat down"]).advance("wrong");
        assert!(s.completed().is_empty());
        assert_eq!(s.current_input(), "wrong");
        assert_eq!(s.current_target(), Some("the cat"));
    }

    #[test]
    fn test_match_is_exact() {
        let s = session(&["the cat"]).advance("the cat ");
        assert!(s.completed().is_empty());
        let s = s.advance("The cat");
        assert!(s.completed().is_empty());
    }

    #[test]
    fn test_finish_all_targets() {
        let s = session(&["a", "b"]).advance("a").advance("b");
        assert!(s.is_finished());
        assert_eq!(s.current_target(), None);

        let s = s.advance("c");
        assert_eq!(s.completed().len(), 2);
        assert_eq!(s.current_input(), "c");
    }

    #[test]
    fn test_empty_session_never_finishes() {
        let s = Session::default().advance("anything");
        assert!(!s.is_finished());
        assert!(s.completed().is_empty());
    }

    #[test]
    fn test_word_count() {
        let s = session(&["the cat", "sat down"]).advance("the cat").advance("sat");
        assert_eq!(s.word_count(), 3);
    }

    #[test]
    fn test_word_count_ignores_blank_input() {
        let s = session(&["the cat", "sat down"]).advance("the cat").advance("   ");
        assert_eq!(s.word_count(), 2);
    }

    #[test]
    fn test_word_count_whitespace_runs() {
        let s = session(&[" two   words ", "x"]).advance(" two   words ");
        assert_eq!(s.word_count(), 2);
    }

    #[test]
    fn test_matched_prefix_len() {
        let s = session(&["hello world"]).advance("hello wx");
        assert_eq!(s.matched_prefix_len(), 7);
        let s = s.advance("");
        assert_eq!(s.matched_prefix_len(), 0);
    }

    #[test]
    fn test_restart_keeps_targets() {
        let s = session(&["a", "b"]).advance("a").with_stopped(false).restart();
        assert_eq!(s.targets().len(), 2);
        assert!(s.completed().is_empty());
        assert!(s.is_stopped());
    }
}
