use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

use crate::error::FeedError;
use crate::history::SessionResult;
use crate::score::words_per_minute;
use crate::session::Session;
use crate::share::{share_link, ShareDialog};
use crate::timer::Timer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    Loading,
    Ready,
    Empty,
    Failed(String),
}

/// Settings that stay fixed for the lifetime of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub share_url: String,
    pub score_to_beat: Option<i64>,
}

/// State transitions, applied with [`App::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    FeedLoaded(Vec<String>),
    FeedFailed(String),
    Start,
    Stop,
    Type(char),
    Backspace,
    Reset,
    OpenShare,
    CloseShare,
}

impl Action {
    /// Outcome of a feed load. A feed without headlines is loaded, not failed.
    pub fn from_feed(result: Result<Vec<String>, FeedError>) -> Self {
        match result {
            Ok(headlines) => Action::FeedLoaded(headlines),
            Err(FeedError::Empty) => Action::FeedLoaded(Vec::new()),
            Err(err) => Action::FeedFailed(err.to_string()),
        }
    }
}

/// Single state container: session, timer, feed status and share dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    pub session: Session,
    pub timer: Timer,
    pub feed: FeedState,
    pub dialog: Option<ShareDialog>,
    pub settings: AppSettings,
}

impl App {
    /// A challenge passed on startup is shown straight away.
    pub fn new(settings: AppSettings) -> Self {
        let dialog = settings.score_to_beat.map(|score| ShareDialog {
            link: None,
            score_to_beat: Some(score),
        });
        Self {
            session: Session::default(),
            timer: Timer::new(),
            feed: FeedState::Loading,
            dialog,
            settings,
        }
    }

    pub fn update(self, action: Action, now: Instant) -> Self {
        tracing::trace!(?action, "update");
        match action {
            Action::FeedLoaded(headlines) => {
                let feed = if headlines.is_empty() {
                    FeedState::Empty
                } else {
                    FeedState::Ready
                };
                Self {
                    session: Session::new(headlines),
                    timer: Timer::new(),
                    feed,
                    ..self
                }
            }
            Action::FeedFailed(message) => Self {
                feed: FeedState::Failed(message),
                ..self
            },
            Action::Start => {
                if !self.can_start() {
                    return self;
                }
                Self {
                    session: self.session.with_stopped(false),
                    timer: self.timer.start(now),
                    dialog: None,
                    ..self
                }
            }
            Action::Stop => self.stop(now),
            Action::Type(c) => {
                if !self.is_running() {
                    return self;
                }
                let mut input = self.session.current_input().to_string();
                input.push(c);
                self.with_input(&input, now)
            }
            Action::Backspace => {
                if !self.is_running() {
                    return self;
                }
                let mut input = self.session.current_input().to_string();
                input.pop();
                self.with_input(&input, now)
            }
            Action::Reset => Self {
                session: self.session.restart(),
                timer: self.timer.reset(),
                dialog: None,
                ..self
            },
            Action::OpenShare => {
                if self.is_running() {
                    return self;
                }
                let Some(wpm) = self.wpm(now).filter(|_| self.show_wpm()) else {
                    return self;
                };
                let link = match share_link(&self.settings.share_url, wpm) {
                    Ok(link) => Some(link),
                    Err(err) => {
                        tracing::warn!(%err, "could not build share link");
                        None
                    }
                };
                let dialog = ShareDialog {
                    link,
                    score_to_beat: self.settings.score_to_beat,
                };
                Self {
                    dialog: Some(dialog),
                    ..self
                }
            }
            Action::CloseShare => Self {
                dialog: None,
                ..self
            },
        }
    }

    fn stop(self, now: Instant) -> Self {
        if !self.is_running() {
            return self;
        }
        Self {
            session: self.session.with_stopped(true),
            timer: self.timer.stop(now),
            ..self
        }
    }

    /// Feed the new input to the session; the last headline ends the run.
    fn with_input(self, input: &str, now: Instant) -> Self {
        let session = self.session.advance(input);
        let finished = session.is_finished();
        let app = Self { session, ..self };
        if finished {
            tracing::info!(headlines = app.session.completed().len(), "all headlines typed");
            app.stop(now)
        } else {
            app
        }
    }

    pub fn can_start(&self) -> bool {
        self.feed == FeedState::Ready && !self.is_running() && !self.session.is_finished()
    }

    pub fn is_running(&self) -> bool {
        !self.session.is_stopped()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        self.timer.elapsed(now)
    }

    pub fn words(&self) -> usize {
        self.session.word_count()
    }

    pub fn wpm(&self, now: Instant) -> Option<u64> {
        words_per_minute(self.words(), self.elapsed(now))
    }

    /// WPM is only reported once stopped and after something was typed.
    pub fn show_wpm(&self) -> bool {
        !self.is_running()
            && (!self.session.completed().is_empty() || !self.session.current_input().is_empty())
    }

    pub fn result(&self, now: Instant, at: DateTime<Local>) -> SessionResult {
        SessionResult {
            date: at,
            headlines: self.session.completed().len(),
            words: self.words(),
            elapsed_secs: self.elapsed(now).as_secs(),
            wpm: self.wpm(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share::DEFAULT_SHARE_URL;
    use assert_matches::assert_matches;

    fn settings(score_to_beat: Option<i64>) -> AppSettings {
        AppSettings {
            share_url: DEFAULT_SHARE_URL.to_string(),
            score_to_beat,
        }
    }

    fn loaded(headlines: &[&str], t0: Instant) -> App {
        App::new(settings(None)).update(
            Action::FeedLoaded(headlines.iter().map(|h| h.to_string()).collect()),
            t0,
        )
    }

    fn type_str(mut app: App, text: &str, now: Instant) -> App {
        for c in text.chars() {
            app = app.update(Action::Type(c), now);
        }
        app
    }

    #[test]
    fn test_new_app_is_loading() {
        let app = App::new(settings(None));
        assert_eq!(app.feed, FeedState::Loading);
        assert!(app.dialog.is_none());
        assert!(!app.can_start());
    }

    #[test]
    fn test_challenge_opens_dialog() {
        let app = App::new(settings(Some(55)));
        let dialog = app.dialog.unwrap();
        assert_eq!(dialog.link, None);
        assert_eq!(dialog.score_to_beat, Some(55));
    }

    #[test]
    fn test_feed_states() {
        let t0 = Instant::now();
        let app = App::new(settings(None)).update(Action::FeedLoaded(vec![]), t0);
        assert_eq!(app.feed, FeedState::Empty);

        let app = App::new(settings(None)).update(Action::FeedFailed("offline".into()), t0);
        assert_matches!(app.feed, FeedState::Failed(ref m) if m == "offline");
        assert!(!app.can_start());
    }

    #[test]
    fn test_start_refused_without_headlines() {
        let t0 = Instant::now();
        let app = App::new(settings(None)).update(Action::Start, t0);
        assert!(!app.is_running());
        assert!(!app.timer.is_running());
    }

    #[test]
    fn test_typing_ignored_while_stopped() {
        let t0 = Instant::now();
        let app = type_str(loaded(&["the cat"], t0), "the", t0);
        assert_eq!(app.session.current_input(), "");
    }

    #[test]
    fn test_typing_advances_headlines() {
        let t0 = Instant::now();
        let app = loaded(&["the cat", "sat down"], t0).update(Action::Start, t0);
        assert!(app.is_running());

        let app = type_str(app, "the cat", t0);
        assert_eq!(app.session.completed(), ["the cat".to_string()]);
        assert_eq!(app.session.current_target(), Some("sat down"));

        let app = type_str(app, "sat", t0);
        assert_eq!(app.words(), 3);
    }

    #[test]
    fn test_backspace_edits_input() {
        let t0 = Instant::now();
        let app = loaded(&["the cat"], t0).update(Action::Start, t0);
        let app = type_str(app, "thx", t0).update(Action::Backspace, t0);
        assert_eq!(app.session.current_input(), "th");

        let app = app.update(Action::Backspace, t0).update(Action::Backspace, t0);
        let app = app.update(Action::Backspace, t0);
        assert_eq!(app.session.current_input(), "");
    }

    #[test]
    fn test_stop_and_wpm() {
        let t0 = Instant::now();
        let app = loaded(&["one two three four five", "six seven eight nine ten", "x"], t0)
            .update(Action::Start, t0);
        let app = type_str(app, "one two three four five", t0);
        let app = type_str(app, "six seven eight nine ten", t0);
        assert!(!app.show_wpm());

        let t1 = t0 + Duration::from_secs(30);
        let app = app.update(Action::Stop, t1);
        assert!(!app.is_running());
        assert!(app.show_wpm());
        assert_eq!(app.words(), 10);
        assert_eq!(app.wpm(t1 + Duration::from_secs(100)), Some(20));
    }

    #[test]
    fn test_stopped_time_not_counted() {
        let t0 = Instant::now();
        let secs = Duration::from_secs;
        let app = loaded(&["a b c"], t0)
            .update(Action::Start, t0)
            .update(Action::Stop, t0 + secs(10))
            .update(Action::Start, t0 + secs(100))
            .update(Action::Stop, t0 + secs(105));
        assert_eq!(app.elapsed(t0 + secs(500)), secs(15));
    }

    #[test]
    fn test_final_headline_stops_session() {
        let t0 = Instant::now();
        let app = loaded(&["hi"], t0).update(Action::Start, t0);
        let app = type_str(app, "hi", t0 + Duration::from_secs(2));
        assert!(app.session.is_finished());
        assert!(!app.is_running());
        assert!(!app.timer.is_running());
        assert!(!app.can_start());
        assert_eq!(app.wpm(t0 + Duration::from_secs(60)), Some(30));
    }

    #[test]
    fn test_zero_duration_has_no_wpm() {
        let t0 = Instant::now();
        let app = loaded(&["hi there"], t0).update(Action::Start, t0);
        let app = type_str(app, "hi", t0).update(Action::Stop, t0);
        assert!(app.show_wpm());
        assert_eq!(app.wpm(t0), None);
    }

    #[test]
    fn test_reset_keeps_headlines() {
        let t0 = Instant::now();
        let app = loaded(&["a", "b"], t0).update(Action::Start, t0);
        let app = type_str(app, "a", t0)
            .update(Action::Stop, t0 + Duration::from_secs(5))
            .update(Action::Reset, t0 + Duration::from_secs(6));
        assert!(app.session.completed().is_empty());
        assert_eq!(app.session.targets().len(), 2);
        assert_eq!(app.elapsed(t0 + Duration::from_secs(7)), Duration::ZERO);
        assert!(app.can_start());
    }

    #[test]
    fn test_share_dialog() {
        let t0 = Instant::now();
        let app = App::new(settings(Some(12)))
            .update(Action::FeedLoaded(vec!["go now".into(), "x".into()]), t0)
            .update(Action::Start, t0);
        assert!(app.dialog.is_none());

        let app = type_str(app, "go now", t0).update(Action::Stop, t0 + Duration::from_secs(6));
        let app = app.update(Action::OpenShare, t0 + Duration::from_secs(7));
        let dialog = app.dialog.clone().unwrap();
        assert!(dialog.link.unwrap().contains("20"));
        assert_eq!(dialog.score_to_beat, Some(12));

        let app = app.update(Action::CloseShare, t0);
        assert!(app.dialog.is_none());
    }

    #[test]
    fn test_share_needs_a_score() {
        let t0 = Instant::now();
        let app = loaded(&["a"], t0).update(Action::OpenShare, t0);
        assert!(app.dialog.is_none());
    }

    #[test]
    fn test_result_snapshot() {
        let t0 = Instant::now();
        let app = loaded(&["a b", "c"], t0).update(Action::Start, t0);
        let app = type_str(app, "a b", t0).update(Action::Stop, t0 + Duration::from_secs(12));
        let at = Local::now();
        let result = app.result(t0 + Duration::from_secs(12), at);
        assert_eq!(result.headlines, 1);
        assert_eq!(result.words, 2);
        assert_eq!(result.elapsed_secs, 12);
        assert_eq!(result.wpm, Some(10));
        assert_eq!(result.date, at);
    }
}
