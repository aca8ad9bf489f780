use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use unicode_segmentation::UnicodeSegmentation;

use crate::ops::task_ops::{self, TaskError};

use super::app::{App, InputState, Mode};
use super::render::{HEADER_ROWS, STAR_WIDTH};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Bare modifier presses carry no action
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // A previous notice stays up until the next interaction
    app.status = None;

    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Add | Mode::Edit => handle_input(app, key),
        Mode::Confirm => handle_confirm(app, key),
    }
}

/// Handle a mouse click. A click on the favorite star toggles that row's
/// favorite flag, resolved through the row's display key; a click anywhere
/// else in a row moves the cursor there. Clicks that land on no row are
/// ignored.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.mode != Mode::Navigate {
        return;
    }
    if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
        return;
    }
    app.status = None;

    let Some(offset) = (mouse.row as usize).checked_sub(HEADER_ROWS) else {
        return;
    };
    let index = app.scroll_offset + offset;
    let rows = app.rows();
    let Some(row) = rows.get(index) else {
        return;
    };

    if (mouse.column as usize) < STAR_WIDTH + 1 {
        // star column: same key resolution a display surface would use;
        // keep the current selection visible across the re-sort
        let key = row.key();
        let selected = app.selected_id();
        match task_ops::toggle_favorite_by_key(&mut app.store, &key) {
            Ok(_) => match selected {
                Some(id) => app.reselect(id),
                None => app.clamp_cursor(),
            },
            Err(TaskError::Store(e)) => app.warn(e.to_string()),
            Err(_) => {}
        }
    } else {
        app.cursor = index;
    }
}

fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            app.should_quit = true;
        }
        (_, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
            let count = app.rows().len();
            if count > 0 && app.cursor + 1 < count {
                app.cursor += 1;
            }
        }
        (_, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        (_, KeyCode::Home) | (KeyModifiers::NONE, KeyCode::Char('g')) => {
            app.cursor = 0;
        }
        (_, KeyCode::End) | (KeyModifiers::SHIFT, KeyCode::Char('G')) => {
            app.cursor = app.rows().len().saturating_sub(1);
        }
        (KeyModifiers::NONE, KeyCode::Char('a')) => {
            app.input = Some(InputState::new(app.default_priority()));
            app.mode = Mode::Add;
        }
        (KeyModifiers::NONE, KeyCode::Char('e')) => start_edit(app),
        (KeyModifiers::NONE, KeyCode::Char(' ') | KeyCode::Char('c')) => toggle_completion(app),
        (KeyModifiers::NONE, KeyCode::Char('f')) => toggle_favorite(app),
        (KeyModifiers::NONE, KeyCode::Char('v')) => toggle_filter(app),
        (KeyModifiers::NONE, KeyCode::Char('d')) => request_delete(app),
        // '?' arrives shifted on most layouts
        (_, KeyCode::Char('?')) => app.show_help = true,
        _ => {}
    }
}

fn start_edit(app: &mut App) {
    let Some(row) = app.selected_row() else {
        app.info("select a task");
        return;
    };
    let text = row.text.clone();
    app.input = Some(InputState {
        cursor: text.len(),
        text,
        priority: row.priority,
        target: Some(row.id),
    });
    app.mode = Mode::Edit;
}

fn toggle_completion(app: &mut App) {
    if app.selected_row().is_none() {
        app.info("select a task");
        return;
    }
    let cursor = app.cursor;
    match task_ops::toggle_completion_at(&mut app.store, app.favorites_only, cursor) {
        Ok(id) => app.reselect(id),
        Err(TaskError::Store(e)) => app.warn(e.to_string()),
        Err(e) => app.info(e.to_string()),
    }
}

/// Favorite toggling goes through the display key, the same resolution a
/// star click uses; an unmatched key is silently ignored.
fn toggle_favorite(app: &mut App) {
    let Some(row) = app.selected_row() else {
        return;
    };
    let key = row.key();
    match task_ops::toggle_favorite_by_key(&mut app.store, &key) {
        Ok(id) => app.reselect(id),
        Err(TaskError::Store(e)) => app.warn(e.to_string()),
        Err(_) => {}
    }
}

fn toggle_filter(app: &mut App) {
    let selected = app.selected_id();
    app.favorites_only = !app.favorites_only;
    match selected {
        Some(id) => app.reselect(id),
        None => app.clamp_cursor(),
    }
}

fn request_delete(app: &mut App) {
    let Some(id) = app.selected_id() else {
        app.info("select a task");
        return;
    };
    if app.config.confirm_delete {
        app.confirm_delete = Some(id);
        app.mode = Mode::Confirm;
    } else {
        delete_selected(app);
    }
}

fn delete_selected(app: &mut App) {
    let cursor = app.cursor;
    match task_ops::delete_at(&mut app.store, app.favorites_only, cursor) {
        Ok(()) => app.clamp_cursor(),
        Err(TaskError::Store(e)) => app.warn(e.to_string()),
        Err(e) => app.info(e.to_string()),
    }
}

fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('y')) => {
            app.confirm_delete = None;
            app.mode = Mode::Navigate;
            delete_selected(app);
        }
        // Declining aborts silently
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.confirm_delete = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

fn handle_input(app: &mut App, key: KeyEvent) {
    let Some(mut input) = app.input.take() else {
        app.mode = Mode::Navigate;
        return;
    };

    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.mode = Mode::Navigate;
            return;
        }
        (_, KeyCode::Enter) => {
            commit_input(app, input);
            return;
        }
        (_, KeyCode::Tab) => input.priority = input.priority.cycle(),
        (_, KeyCode::Left) => input.cursor = prev_boundary(&input.text, input.cursor),
        (_, KeyCode::Right) => input.cursor = next_boundary(&input.text, input.cursor),
        (_, KeyCode::Home) => input.cursor = 0,
        (_, KeyCode::End) => input.cursor = input.text.len(),
        (_, KeyCode::Backspace) => {
            let start = prev_boundary(&input.text, input.cursor);
            input.text.replace_range(start..input.cursor, "");
            input.cursor = start;
        }
        (_, KeyCode::Delete) => {
            let end = next_boundary(&input.text, input.cursor);
            input.text.replace_range(input.cursor..end, "");
        }
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            input.text.insert(input.cursor, c);
            input.cursor += c.len_utf8();
        }
        _ => {}
    }

    app.input = Some(input);
}

fn commit_input(app: &mut App, input: InputState) {
    match app.mode {
        Mode::Add => {
            match task_ops::add_task(&mut app.store, &input.text, input.priority) {
                Ok(id) => {
                    app.mode = Mode::Navigate;
                    app.reselect(id);
                }
                Err(TaskError::EmptyText) => {
                    // Warn and keep the prompt open, input cleared
                    app.warn(TaskError::EmptyText.to_string());
                    app.input = Some(InputState::new(input.priority));
                }
                Err(e) => {
                    app.mode = Mode::Navigate;
                    app.warn(e.to_string());
                }
            }
        }
        Mode::Edit => {
            let cursor = app.cursor;
            let target = input.target;
            match task_ops::edit_at(
                &mut app.store,
                app.favorites_only,
                cursor,
                input.text,
                input.priority,
            ) {
                Ok(()) => {
                    app.mode = Mode::Navigate;
                    if let Some(id) = target {
                        app.reselect(id);
                    }
                }
                Err(e) => {
                    app.mode = Mode::Navigate;
                    app.warn(e.to_string());
                }
            }
        }
        _ => app.mode = Mode::Navigate,
    }
}

/// Byte offset of the previous grapheme boundary
fn prev_boundary(text: &str, cursor: usize) -> usize {
    text.grapheme_indices(true)
        .map(|(i, _)| i)
        .take_while(|&i| i < cursor)
        .last()
        .unwrap_or(0)
}

/// Byte offset of the next grapheme boundary
fn next_boundary(text: &str, cursor: usize) -> usize {
    text.grapheme_indices(true)
        .map(|(i, g)| i + g.len())
        .find(|&end| end > cursor)
        .unwrap_or(text.len())
}
