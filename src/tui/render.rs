use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::model::task::Status;
use crate::view::{Parity, Row};

use super::app::{App, MessageKind, Mode};

/// Rows above the list: title row + column headings
pub(super) const HEADER_ROWS: usize = 2;
pub(super) const STAR_WIDTH: usize = 3;
const PRIORITY_WIDTH: usize = 9;
const DATE_WIDTH: usize = 17;
const STATUS_WIDTH: usize = 10;

/// Main render function
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header | list | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_list(frame, app, chunks[1]);
    render_status_row(frame, app, chunks[2]);

    match app.mode {
        Mode::Add | Mode::Edit => render_input_popup(frame, app, area),
        Mode::Confirm => render_confirm_popup(frame, app, area),
        Mode::Navigate => {}
    }

    if app.show_help {
        render_help_overlay(frame, app, area);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let title_style = Style::default()
        .fg(theme.primary)
        .bg(theme.background)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![Span::styled(" Tasks", title_style)];
    if app.favorites_only {
        spans.push(Span::styled(
            "  ★ favorites only",
            Style::default().fg(theme.star).bg(theme.background),
        ));
    }
    let count = app.rows().len();
    spans.push(Span::styled(
        format!("  ({count})"),
        Style::default().fg(theme.dim).bg(theme.background),
    ));

    let header = Line::from(spans);
    let columns = Line::from(Span::styled(
        format!(
            " {:<star$}{:<text$}{:<prio$}{:<date$}{:<status$}",
            "",
            "Task",
            "Priority",
            "Created",
            "Status",
            star = STAR_WIDTH,
            text = text_column_width(area),
            prio = PRIORITY_WIDTH,
            date = DATE_WIDTH,
            status = STATUS_WIDTH,
        ),
        Style::default()
            .fg(theme.text)
            .bg(theme.background)
            .add_modifier(Modifier::BOLD),
    ));

    frame.render_widget(Paragraph::new(vec![header, columns]), area);
}

fn text_column_width(area: Rect) -> usize {
    (area.width as usize)
        .saturating_sub(1 + STAR_WIDTH + PRIORITY_WIDTH + DATE_WIDTH + STATUS_WIDTH)
        .max(8)
}

fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = app.rows();
    let height = area.height as usize;

    // Keep the cursor on screen
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if height > 0 && app.cursor >= app.scroll_offset + height {
        app.scroll_offset = app.cursor + 1 - height;
    }

    let text_width = text_column_width(area);
    let mut lines = Vec::with_capacity(height);
    for (i, row) in rows.iter().enumerate().skip(app.scroll_offset).take(height) {
        lines.push(render_row(app, row, text_width, i == app.cursor));
    }
    if rows.is_empty() {
        lines.push(Line::from(Span::styled(
            " no tasks yet — press 'a' to add one",
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_row(app: &App, row: &Row, text_width: usize, selected: bool) -> Line<'static> {
    let theme = &app.theme;

    // Priority sets the row background, parity the fallback stripe;
    // selection wins over both.
    let bg = if selected {
        theme.selection_bg
    } else if row.status == Status::Completed {
        match row.parity {
            Parity::Even => theme.row_even,
            Parity::Odd => theme.row_odd,
        }
    } else {
        theme.priority_color(row.priority)
    };

    let fg = if selected {
        theme.selection_fg
    } else if row.status == Status::Completed {
        theme.completed
    } else {
        theme.text
    };

    let mut base = Style::default().fg(fg).bg(bg);
    if row.status == Status::Completed && !selected {
        base = base.add_modifier(Modifier::ITALIC);
    }

    let star_fg = if selected {
        theme.selection_fg
    } else if row.favorite {
        theme.star
    } else {
        theme.star_dim
    };

    let star = format!(" {:<width$}", row.star(), width = STAR_WIDTH - 1);
    let text = format!("{:<width$}", fit_width(&row.text, text_width), width = text_width);
    let rest = format!(
        "{:<prio$}{:<date$}{:<status$}",
        row.priority.as_str(),
        row.date,
        row.status.as_str(),
        prio = PRIORITY_WIDTH,
        date = DATE_WIDTH,
        status = STATUS_WIDTH,
    );

    Line::from(vec![
        Span::styled(star, Style::default().fg(star_fg).bg(bg)),
        Span::styled(text, base),
        Span::styled(rest, base),
    ])
}

/// Truncate to a display width, appending an ellipsis when cut
fn fit_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.to_string().width();
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let width = area.width as usize;

    let (message, fg) = match &app.status {
        Some((MessageKind::Warn, text)) => (text.clone(), theme.warn),
        Some((MessageKind::Info, text)) => (text.clone(), theme.primary),
        None => (String::new(), theme.dim),
    };

    let hint = if !app.config.ui.show_key_hints {
        ""
    } else {
        match app.mode {
            Mode::Navigate => "a add  e edit  space done  f fav  v filter  d delete  ? help  q quit",
            Mode::Add | Mode::Edit => "Enter save  Tab priority  Esc cancel",
            Mode::Confirm => "y delete  n cancel",
        }
    };

    let mut spans = vec![Span::styled(
        format!(" {message}"),
        Style::default().fg(fg).bg(bg),
    )];
    let used = 1 + message.width();
    let hint_width = hint.width();
    if used + hint_width < width {
        spans.push(Span::styled(
            " ".repeat(width - used - hint_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(hint, Style::default().fg(theme.dim).bg(bg)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_input_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(input) = &app.input else { return };
    let theme = &app.theme;
    let title = match app.mode {
        Mode::Edit => " Edit Task ",
        _ => " New Task ",
    };

    let popup = centered_rect(area, 50, 5);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.primary).bg(theme.background))
        .title(Span::styled(
            title,
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.background));

    let (before, after) = input.text.split_at(input.cursor.min(input.text.len()));
    let text_line = Line::from(vec![
        Span::styled("Task: ", Style::default().fg(theme.dim).bg(theme.background)),
        Span::styled(
            before.to_string(),
            Style::default().fg(theme.text).bg(theme.background),
        ),
        Span::styled("\u{258C}", Style::default().fg(theme.primary).bg(theme.background)),
        Span::styled(
            after.to_string(),
            Style::default().fg(theme.text).bg(theme.background),
        ),
    ]);
    let priority_line = Line::from(vec![
        Span::styled(
            "Priority: ",
            Style::default().fg(theme.dim).bg(theme.background),
        ),
        Span::styled(
            input.priority.as_str(),
            Style::default()
                .fg(theme.text)
                .bg(app.theme.priority_color(input.priority)),
        ),
    ]);

    frame.render_widget(
        Paragraph::new(vec![text_line, priority_line]).block(block),
        popup,
    );
}

fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let text = app
        .confirm_delete
        .and_then(|id| app.store.get(id))
        .map(|t| t.text.clone())
        .unwrap_or_default();

    let popup = centered_rect(area, 46, 4);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent).bg(theme.background))
        .title(Span::styled(
            " Confirm ",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.background));

    let lines = vec![
        Line::from(Span::styled(
            format!("Delete '{}'?", fit_width(&text, 38)),
            Style::default().fg(theme.text).bg(theme.background),
        )),
        Line::from(Span::styled(
            "y yes   n no",
            Style::default().fg(theme.dim).bg(theme.background),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let popup = centered_rect(area, 44, 14);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.primary).bg(theme.background))
        .title(Span::styled(
            " Keys ",
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.background));

    let entries = [
        ("j/k, arrows", "move"),
        ("a", "add task"),
        ("e", "edit task"),
        ("space, c", "toggle completed"),
        ("f", "toggle favorite"),
        ("v", "favorites only"),
        ("d", "delete task"),
        ("g/G", "first/last"),
        ("q", "quit"),
    ];
    let lines: Vec<Line> = entries
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(
                    format!(" {keys:<14}"),
                    Style::default().fg(theme.primary).bg(theme.background),
                ),
                Span::styled(
                    what.to_string(),
                    Style::default().fg(theme.text).bg(theme.background),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// A centered rect of the given size, clamped to the frame
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_width_passes_short_text() {
        assert_eq!(fit_width("short", 10), "short");
    }

    #[test]
    fn fit_width_truncates_with_ellipsis() {
        let out = fit_width("a very long task title", 10);
        assert!(out.ends_with('…'));
        assert!(out.width() <= 10);
    }

    #[test]
    fn centered_rect_stays_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let popup = centered_rect(area, 50, 5);
        assert!(popup.x + popup.width <= 80);
        assert!(popup.y + popup.height <= 24);

        let tiny = Rect::new(0, 0, 10, 3);
        let clamped = centered_rect(tiny, 50, 5);
        assert!(clamped.width <= 10);
        assert!(clamped.height <= 3);
    }
}
