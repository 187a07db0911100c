use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use shortlink_core::{AppViewModel, NoticeKind};

use super::constants::*;
use super::layout::{form_areas, input_scroll, text_width};

pub fn render(frame: &mut Frame, view: &AppViewModel, endpoint: &str) {
    let areas = form_areas(frame.area());

    let title = Line::from(vec![
        Span::styled(
            TITLE,
            Style::default()
                .fg(ACCENT_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  ({endpoint})")),
    ]);
    frame.render_widget(Paragraph::new(title), areas.title);

    let scroll = input_scroll(&view.input, areas.input.width);
    let input = Paragraph::new(view.input.as_str())
        .scroll((0, scroll))
        .block(Block::default().borders(Borders::ALL).title(INPUT_TITLE));
    frame.render_widget(input, areas.input);
    let cursor_offset = text_width(&view.input).saturating_sub(scroll);
    frame.set_cursor_position((
        areas.input.x + 1 + cursor_offset.min(areas.input.width.saturating_sub(2)),
        areas.input.y + 1,
    ));

    let action = if view.submitting {
        Paragraph::new(ACTION_BUSY).style(Style::default().add_modifier(Modifier::ITALIC))
    } else {
        Paragraph::new(ACTION_IDLE).style(Style::default().fg(ACCENT_COLOR))
    };
    frame.render_widget(action, areas.action);

    // Hidden entirely until a shorten succeeds.
    if let Some(short_url) = &view.short_url {
        let output = Paragraph::new(short_url.as_str())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).title(OUTPUT_TITLE));
        frame.render_widget(output, areas.output);
    }

    if let Some(notice) = &view.notice {
        let color = match notice.kind {
            NoticeKind::Success => SUCCESS_COLOR,
            NoticeKind::Error => ERROR_COLOR,
        };
        let banner = Paragraph::new(notice.text.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(color))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        frame.render_widget(banner, areas.notice);
    }

    frame.render_widget(
        Paragraph::new(KEY_HINTS).style(Style::default().add_modifier(Modifier::DIM)),
        areas.hints,
    );
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use shortlink_core::NoticeView;

    use super::*;

    fn screen(view: &AppViewModel) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| render(frame, view, "http://127.0.0.1:8000"))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn output_is_hidden_without_result() {
        let text = screen(&AppViewModel::default());
        assert!(text.contains("Long URL"));
        assert!(!text.contains("Short URL"));
    }

    #[test]
    fn result_and_notice_are_drawn() {
        let view = AppViewModel {
            input: "https://example.com".to_string(),
            short_url: Some("https://s.ly/x1".to_string()),
            notice: Some(NoticeView {
                text: "URL shortened successfully!".to_string(),
                kind: NoticeKind::Success,
            }),
            ..AppViewModel::default()
        };
        let text = screen(&view);
        assert!(text.contains("https://s.ly/x1"));
        assert!(text.contains("URL shortened successfully!"));
    }

    #[test]
    fn cursor_follows_display_width_of_wide_input() {
        let view = AppViewModel {
            input: "日本".to_string(),
            ..AppViewModel::default()
        };
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| render(frame, &view, "http://127.0.0.1:8000"))
            .unwrap();

        // Input box starts at column 2, row 3; text begins inside the border.
        let cursor = terminal.get_cursor_position().unwrap();
        assert_eq!((cursor.x, cursor.y), (2 + 1 + 4, 3 + 1));
    }

    #[test]
    fn busy_label_while_submitting() {
        let view = AppViewModel {
            submitting: true,
            ..AppViewModel::default()
        };
        assert!(screen(&view).contains(ACTION_BUSY));
    }
}
