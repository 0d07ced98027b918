pub mod charting;
pub mod history;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;
use webbrowser::Browser;

use crate::{hints, session::CharClass, App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);

        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);

        let underlined_dim_bold_style = Style::default()
            .patch(dim_bold_style)
            .add_modifier(Modifier::UNDERLINED);

        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let magenta_style = Style::default().fg(Color::Magenta);

        // The history screen has its own renderer; this widget only ever
        // sees the typing and results states.
        match self.state {
            AppState::Typing | AppState::History => {
                let passage = &session.passage().text;
                let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
                let mut prompt_occupied_lines =
                    ((passage.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16;

                if passage.width() <= max_chars_per_line as usize {
                    prompt_occupied_lines = 1;
                }

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .horizontal_margin(HORIZONTAL_MARGIN)
                    .constraints(
                        [
                            Constraint::Length(
                                (area.height.saturating_sub(prompt_occupied_lines + 2) / 2).max(1),
                            ),
                            Constraint::Length(prompt_occupied_lines),
                            Constraint::Length(1), // stats line
                            Constraint::Length(1), // finger hint line
                            Constraint::Min(1),
                        ]
                        .as_ref(),
                    )
                    .split(area);

                let spans = passage
                    .chars()
                    .enumerate()
                    .map(|(idx, c)| match session.char_class(idx) {
                        CharClass::Typed => Span::styled(c.to_string(), bold_style),
                        CharClass::Current => {
                            Span::styled(c.to_string(), underlined_dim_bold_style)
                        }
                        CharClass::Upcoming => Span::styled(c.to_string(), dim_bold_style),
                    })
                    .collect::<Vec<Span>>();

                let widget = Paragraph::new(Line::from(spans))
                    .alignment(if prompt_occupied_lines == 1 {
                        // when the passage is small enough to fit on one line
                        // centering the text gives a nice zen feeling
                        Alignment::Center
                    } else {
                        Alignment::Left
                    })
                    .wrap(Wrap { trim: true });

                widget.render(chunks[1], buf);

                let stats_line = Paragraph::new(Span::styled(
                    format!(
                        "{}   {}   {} wpm   {}% acc   {} err   {} bksp",
                        session.passage().title,
                        session.formatted_elapsed(),
                        session.wpm(),
                        session.accuracy(),
                        session.error_count(),
                        session.backspace_count(),
                    ),
                    dim_bold_style,
                ))
                .alignment(Alignment::Center);

                stats_line.render(chunks[2], buf);

                if self.show_hints {
                    if let Some(next) = session.next_char() {
                        let shown = if next == ' ' {
                            "space".to_string()
                        } else {
                            next.to_string()
                        };
                        let hint_line = Paragraph::new(Span::styled(
                            format!("next: {} ({})", shown, hints::hint_label(next)),
                            italic_style,
                        ))
                        .alignment(Alignment::Center);

                        hint_line.render(chunks[3], buf);
                    }
                }
            }
            AppState::Results => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .horizontal_margin(HORIZONTAL_MARGIN)
                    .vertical_margin(VERTICAL_MARGIN)
                    .constraints(
                        [
                            Constraint::Min(1),    // chart
                            Constraint::Length(1), // stats
                            Constraint::Length(1), // padding
                            Constraint::Length(1), // legend
                        ]
                        .as_ref(),
                    )
                    .split(area);

                let (overall_duration, highest_wpm) =
                    charting::compute_chart_params(self.wpm_series.points());

                let tuples = self.wpm_series.as_tuples();
                let datasets = vec![Dataset::default()
                    .marker(ratatui::symbols::Marker::Braille)
                    .style(magenta_style)
                    .graph_type(GraphType::Line)
                    .data(&tuples)];

                let chart = Chart::new(datasets)
                    .x_axis(
                        Axis::default()
                            .title("seconds")
                            .bounds([1.0, overall_duration])
                            .labels(vec![
                                Span::styled("1", bold_style),
                                Span::styled(charting::format_label(overall_duration), bold_style),
                            ]),
                    )
                    .y_axis(
                        Axis::default()
                            .title("wpm")
                            .bounds([0.0, highest_wpm])
                            .labels(vec![
                                Span::styled("0", bold_style),
                                Span::styled(charting::format_label(highest_wpm), bold_style),
                            ]),
                    );

                chart.render(chunks[0], buf);

                // The latest log entry is the completed session; a session
                // abandoned onto this screen falls back to live counters.
                let stats_text = match self.log.latest() {
                    Some(s) => format!(
                        "{} wpm   {}% acc   {}   {} err   {} bksp",
                        s.wpm,
                        s.accuracy,
                        crate::stats::format_time(s.elapsed_secs),
                        s.error_count,
                        s.backspace_count,
                    ),
                    None => format!(
                        "{} wpm   {}% acc   {}",
                        session.wpm(),
                        session.accuracy(),
                        session.formatted_elapsed(),
                    ),
                };

                let stats_line = Paragraph::new(Span::styled(stats_text, bold_style))
                    .alignment(Alignment::Center);

                stats_line.render(chunks[1], buf);

                let legend = Paragraph::new(Span::styled(
                    String::from(if Browser::is_available() {
                        "(r)etry / (n)ext / (h)istory / (t)weet / (esc)ape"
                    } else {
                        "(r)etry / (n)ext / (h)istory / (esc)ape"
                    }),
                    italic_style,
                ));

                legend.render(chunks[3], buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{buffer::Buffer, layout::Rect};

    fn create_test_app() -> App {
        App::new(Catalog::load(), 0, true)
    }

    fn press(app: &mut App, c: char) {
        app.on_typing_key(&KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }

    fn rendered_text(app: &App, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_typing_screen_shows_passage_and_stats() {
        let app = create_test_app();
        let rendered = rendered_text(&app, 120, 24);

        assert!(rendered.contains("quick"));
        assert!(rendered.contains("00:00"));
        assert!(rendered.contains("0 err"));
    }

    #[test]
    fn test_typing_screen_shows_finger_hint() {
        let app = create_test_app();
        let rendered = rendered_text(&app, 120, 24);

        // First passage starts with 't': left index
        assert!(rendered.contains("next: t"));
        assert!(rendered.contains("left index"));
    }

    #[test]
    fn test_hint_line_hidden_when_disabled() {
        let app = App::new(Catalog::load(), 0, false);
        let rendered = rendered_text(&app, 120, 24);

        assert!(!rendered.contains("next:"));
    }

    #[test]
    fn test_space_hint_is_spelled_out() {
        let mut app = create_test_app();
        // Type up to the first space of "the quick ..."
        for c in "the".chars() {
            press(&mut app, c);
        }

        let rendered = rendered_text(&app, 120, 24);
        assert!(rendered.contains("next: space"));
        assert!(rendered.contains("either thumb"));
    }

    #[test]
    fn test_results_screen_renders_summary_stats() {
        let mut app = create_test_app();
        let text = app.session.passage().text.clone();
        for c in text.chars() {
            press(&mut app, c);
        }
        assert_eq!(app.state, AppState::Results);

        let rendered = rendered_text(&app, 120, 24);
        assert!(rendered.contains("wpm"));
        assert!(rendered.contains("acc"));
        assert!(rendered.contains("(r)etry"));
    }

    #[test]
    fn test_results_screen_without_summary_falls_back() {
        let mut app = create_test_app();
        app.state = AppState::Results;

        let rendered = rendered_text(&app, 120, 24);
        assert!(rendered.contains("wpm"));
    }

    #[test]
    fn test_render_survives_small_and_large_areas() {
        let app = create_test_app();

        for (w, h) in [(10, 3), (20, 5), (80, 24), (250, 80)] {
            let area = Rect::new(0, 0, w, h);
            let mut buffer = Buffer::empty(area);
            (&app).render(area, &mut buffer);
            assert_eq!(*buffer.area(), area);
        }
    }

    #[test]
    fn test_ui_constants() {
        assert_eq!(HORIZONTAL_MARGIN, 5);
        assert_eq!(VERTICAL_MARGIN, 2);
    }
}
