use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;
use webbrowser::Browser;

use crate::app::{App, FeedState};
use crate::score::format_timestamp;
use crate::share::ShareDialog;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const DIALOG_MAX_WIDTH: u16 = 72;

/// The app as seen at a given instant; the instant drives the elapsed clock.
pub struct AppView<'a> {
    pub app: &'a App,
    pub now: Instant,
}

impl<'a> AppView<'a> {
    pub fn new(app: &'a App, now: Instant) -> Self {
        Self { app, now }
    }
}

impl Widget for AppView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let app = self.app;
        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(1), // status
                Constraint::Length(1), // padding
                Constraint::Length(6), // headlines
                Constraint::Min(3),    // input
                Constraint::Length(1), // stats
                Constraint::Length(1), // padding
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            "Typing Speed Test",
            Style::default().patch(bold_style).fg(Color::Magenta),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        let (status, status_style) = status_line(app);
        Paragraph::new(Span::styled(status, status_style))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let mut headline_lines = Vec::new();
        if let Some(current) = app.session.current_target() {
            headline_lines.push(Line::from(Span::styled(current.to_string(), bold_style)));
        }
        if let Some(next) = app.session.next_target() {
            headline_lines.push(Line::from(""));
            headline_lines.push(Line::from(Span::styled(next.to_string(), dim_style)));
        }
        Paragraph::new(headline_lines)
            .block(Block::default().borders(Borders::ALL).title("Headline"))
            .wrap(Wrap { trim: true })
            .render(chunks[3], buf);

        let input = app.session.current_input();
        let matched: String = input.chars().take(app.session.matched_prefix_len()).collect();
        let mismatched = &input[matched.len()..];
        let mut spans = vec![
            Span::styled(matched, green_bold_style),
            Span::styled(
                mismatched.replace(' ', "·"),
                red_bold_style,
            ),
        ];
        if app.is_running() {
            spans.push(Span::styled(
                "_",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        let input_block = Block::default()
            .borders(Borders::ALL)
            .title("Type here")
            .border_style(if app.is_running() { bold_style } else { dim_style });
        Paragraph::new(Line::from(spans))
            .block(input_block)
            .wrap(Wrap { trim: false })
            .render(chunks[4], buf);

        Paragraph::new(Span::styled(stats_line(app, self.now), bold_style))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);

        Paragraph::new(Span::styled(legend(app), italic_style))
            .alignment(Alignment::Center)
            .render(chunks[7], buf);

        if let Some(dialog) = &app.dialog {
            render_dialog(dialog, area, buf);
        }
    }
}

fn status_line(app: &App) -> (String, Style) {
    let gray = Style::default().fg(Color::Gray);
    match &app.feed {
        FeedState::Loading => ("Loading headlines...".to_string(), gray),
        FeedState::Empty => (
            "The feed has no headlines right now.".to_string(),
            Style::default().fg(Color::Yellow),
        ),
        FeedState::Failed(message) => (
            format!("Could not load headlines: {message}"),
            Style::default().fg(Color::Red),
        ),
        FeedState::Ready if app.session.is_finished() => (
            "All headlines typed!".to_string(),
            Style::default().fg(Color::Green),
        ),
        FeedState::Ready if app.is_running() => {
            ("Type the headline exactly as shown.".to_string(), gray)
        }
        FeedState::Ready => (
            "Type what appears below. Press Enter to begin.".to_string(),
            gray,
        ),
    }
}

pub fn stats_line(app: &App, now: Instant) -> String {
    let elapsed = app.elapsed(now).as_secs();
    let mut line = format!(
        "Time elapsed: {}   Words typed: {}",
        format_timestamp(elapsed),
        app.words()
    );
    if app.show_wpm() {
        let wpm = app
            .wpm(now)
            .map_or_else(|| "--".to_string(), |wpm| wpm.to_string());
        line.push_str(&format!("   Words per minute: {wpm}"));
    }
    line
}

fn legend(app: &App) -> &'static str {
    if app.dialog.is_some() {
        ""
    } else if app.is_running() {
        "(esc) stop"
    } else if app.show_wpm() {
        "(enter) resume / (r)eset / (s)hare / (q)uit"
    } else {
        "(enter) start / (q)uit"
    }
}

fn render_dialog(dialog: &ShareDialog, area: Rect, buf: &mut Buffer) {
    let width = DIALOG_MAX_WIDTH.min(area.width.saturating_sub(4)).max(10);
    let inner_width = width.saturating_sub(2).max(1) as usize;

    let mut lines: Vec<Line> = dialog.lines().into_iter().map(Line::from).collect();
    lines.push(Line::from(""));
    let keys = if dialog.link.is_some() && Browser::is_available() {
        "(o)pen link / (esc) close"
    } else {
        "(esc) close"
    };
    lines.push(Line::from(Span::styled(
        keys,
        Style::default().add_modifier(Modifier::ITALIC),
    )));

    let content_height: usize = lines
        .iter()
        .map(|line| line.to_string().width().max(1).div_ceil(inner_width))
        .sum();
    let height = (content_height as u16 + 2).min(area.height);

    let [dialog_area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [dialog_area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(dialog_area);

    Clear.render(dialog_area, buf);
    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(Span::styled(
                    dialog.header(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
        )
        .wrap(Wrap { trim: false })
        .render(dialog_area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Action, AppSettings};
    use std::time::Duration;

    fn app(headlines: &[&str]) -> App {
        App::new(AppSettings {
            share_url: "https://example.org/share".into(),
            score_to_beat: None,
        })
        .update(
            Action::FeedLoaded(headlines.iter().map(|h| h.to_string()).collect()),
            Instant::now(),
        )
    }

    fn render(app: &App, now: Instant) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        AppView::new(app, now).render(area, &mut buffer);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_render_loading() {
        let app = App::new(AppSettings {
            share_url: String::new(),
            score_to_beat: None,
        });
        let rendered = render(&app, Instant::now());
        assert!(rendered.contains("Loading headlines"));
        assert!(rendered.contains("Time elapsed: 00:00"));
    }

    #[test]
    fn test_render_failed_feed() {
        let app = app(&[]).update(Action::FeedFailed("timed out".into()), Instant::now());
        let rendered = render(&app, Instant::now());
        assert!(rendered.contains("Could not load headlines: timed out"));
    }

    #[test]
    fn test_render_headlines() {
        let app = app(&["Markets rally", "Storm heads north"]);
        let rendered = render(&app, Instant::now());
        assert!(rendered.contains("Markets rally"));
        assert!(rendered.contains("Storm heads north"));
        assert!(rendered.contains("Press Enter to begin"));
        assert!(!rendered.contains("Words per minute"));
    }

    #[test]
    fn test_render_stats_after_stop() {
        let t0 = Instant::now();
        let mut app = app(&["one two", "three"]).update(Action::Start, t0);
        for c in "one two".chars() {
            app = app.update(Action::Type(c), t0);
        }
        let t1 = t0 + Duration::from_secs(125);
        let app = app.update(Action::Stop, t1);
        let rendered = render(&app, t1);
        assert!(rendered.contains("Time elapsed: 02:05"));
        assert!(rendered.contains("Words typed: 2"));
        assert!(rendered.contains("Words per minute: 0"));
    }

    #[test]
    fn test_stats_line_zero_duration() {
        let t0 = Instant::now();
        let app = app(&["abc"])
            .update(Action::Start, t0)
            .update(Action::Type('a'), t0)
            .update(Action::Stop, t0);
        assert!(stats_line(&app, t0).ends_with("Words per minute: --"));
    }

    #[test]
    fn test_render_dialog() {
        let app = App::new(AppSettings {
            share_url: String::new(),
            score_to_beat: Some(61),
        });
        let rendered = render(&app, Instant::now());
        assert!(rendered.contains("You've been challenged!"));
        assert!(rendered.contains("The score to beat is 61 words per minute."));
    }
}
