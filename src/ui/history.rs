use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use time_humanize::{Accuracy, HumanTime, Tense};

use crate::{results::SessionSummary, App};

const PASSAGE_PREVIEW_CHARS: usize = 24;

/// Shorten the passage text for its table cell.
pub fn truncate_passage(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

/// "2 minutes ago" style label for a completion timestamp.
pub fn humanized_completed_at(summary: &SessionSummary) -> String {
    let age_secs = (Local::now().timestamp() - summary.completed_at.timestamp()).max(0) as u64;
    HumanTime::from(std::time::Duration::from_secs(age_secs))
        .to_text_en(Accuracy::Rough, Tense::Past)
}

/// Pure presenter for a single history row
pub fn present_row(summary: &SessionSummary) -> Row<'static> {
    let acc_color = if summary.accuracy >= 95 {
        Color::Green
    } else if summary.accuracy >= 80 {
        Color::Yellow
    } else {
        Color::Red
    };

    Row::new(vec![
        Cell::from(humanized_completed_at(summary)),
        Cell::from(format!(
            "{}: {}",
            summary.passage_title,
            truncate_passage(&summary.passage_text, PASSAGE_PREVIEW_CHARS)
        )),
        Cell::from(crate::stats::format_time(summary.elapsed_secs)),
        Cell::from(summary.wpm.to_string()),
        Cell::from(format!("{}%", summary.accuracy)).style(Style::default().fg(acc_color)),
        Cell::from(summary.error_count.to_string()),
        Cell::from(summary.backspace_count.to_string()),
    ])
}

pub fn render_history(app: &mut App, f: &mut Frame) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // History table
            Constraint::Length(3), // Instructions
        ])
        .split(area);

    let title = Paragraph::new(format!("Session History ({} completed)", app.log.len()))
        .block(Block::default().borders(Borders::ALL).title("History"))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    if app.log.is_empty() {
        let no_data = Paragraph::new("No sessions logged yet.\nFinish a passage to see it here!")
            .block(Block::default().borders(Borders::ALL).title("No Data"))
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        f.render_widget(no_data, chunks[1]);
    } else {
        // Account for borders and header
        let table_height = chunks[1].height.saturating_sub(3) as usize;
        let total_rows = app.log.len();
        let max_scroll = total_rows.saturating_sub(table_height);

        if app.history_state.scroll_offset > max_scroll {
            app.history_state.scroll_offset = max_scroll;
        }

        let header = Row::new(vec![
            Cell::from("When"),
            Cell::from("Passage"),
            Cell::from("Time"),
            Cell::from("WPM"),
            Cell::from("Acc"),
            Cell::from("Err"),
            Cell::from("Bksp"),
        ])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let visible_rows: Vec<Row> = app
            .log
            .all()
            .skip(app.history_state.scroll_offset)
            .take(table_height)
            .map(present_row)
            .collect();

        let scroll_info = if total_rows > table_height {
            format!(
                " ({}/{} rows)",
                app.history_state.scroll_offset + visible_rows.len().min(table_height),
                total_rows
            )
        } else {
            String::new()
        };

        let table = Table::new(
            visible_rows,
            &[
                Constraint::Length(18), // When
                Constraint::Min(28),    // Passage
                Constraint::Length(7),  // Time
                Constraint::Length(5),  // WPM
                Constraint::Length(5),  // Acc
                Constraint::Length(5),  // Err
                Constraint::Length(5),  // Bksp
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Completed Sessions{}", scroll_info)),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray));

        f.render_widget(table, chunks[1]);
    }

    let instructions =
        Paragraph::new("Newest first | up/down PgUp/PgDn Home to scroll | (b)ack (r)etry (n)ext (esc)ape")
            .block(Block::default().borders(Borders::ALL))
            .style(
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            )
            .alignment(Alignment::Center);
    f.render_widget(instructions, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use chrono::Duration;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn summary(id: u64) -> SessionSummary {
        SessionSummary {
            id,
            passage_title: "pangram".into(),
            passage_text: "the quick brown fox jumps over the lazy dog".into(),
            elapsed_secs: 65,
            wpm: 40,
            accuracy: 96,
            error_count: 2,
            backspace_count: 1,
            completed_at: Local::now() - Duration::minutes(2),
        }
    }

    #[test]
    fn test_truncate_passage_short_text_untouched() {
        assert_eq!(truncate_passage("short", 24), "short");
    }

    #[test]
    fn test_truncate_passage_long_text_gets_ellipsis() {
        let truncated = truncate_passage("the quick brown fox jumps over the lazy dog", 24);
        assert_eq!(truncated.chars().count(), 24);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_humanized_completed_at_reads_as_past() {
        let label = humanized_completed_at(&summary(1));
        assert!(label.contains("ago"), "got: {label}");
    }

    #[test]
    fn test_present_row_is_pure() {
        // Same summary, same row
        let s = summary(1);
        let a = present_row(&s);
        let b = present_row(&s);
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_history_empty_log() {
        let mut app = App::new(Catalog::load(), 0, true);
        app.state = crate::AppState::History;

        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_history(&mut app, f)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("No sessions logged yet"));
    }

    #[test]
    fn test_render_history_with_entries() {
        let mut app = App::new(Catalog::load(), 0, true);
        for id in 0..3 {
            app.log.append(summary(id));
        }
        app.state = crate::AppState::History;

        let backend = TestBackend::new(110, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_history(&mut app, f)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("pangram"));
        assert!(content.contains("01:05"));
        assert!(content.contains("96%"));
    }

    #[test]
    fn test_render_history_clamps_scroll() {
        let mut app = App::new(Catalog::load(), 0, true);
        app.log.append(summary(1));
        app.history_state.scroll_offset = 10_000;
        app.state = crate::AppState::History;

        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_history(&mut app, f)).unwrap();

        assert!(app.history_state.scroll_offset <= 1);
    }

    #[test]
    fn test_history_reachable_after_completion() {
        // End-to-end through the app: finish a passage, log fills, render
        let mut app = App::new(Catalog::load(), 0, true);
        let text = app.session.passage().text.clone();
        for c in text.chars() {
            app.on_typing_key(&KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        app.state = crate::AppState::History;

        let backend = TestBackend::new(110, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_history(&mut app, f)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("1 completed"));
    }
}
