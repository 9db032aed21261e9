use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{AddField, App};

use super::common;

/// Add form: a text field, a priority selector, and an optional due
/// date. Tab moves between fields, Enter submits, Esc closes the form.
pub(super) fn handle_add(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.submit_add();
            return;
        }
        KeyCode::Esc => {
            app.cancel_add();
            return;
        }
        KeyCode::Tab => {
            app.add_form.field = app.add_form.field.next();
            return;
        }
        KeyCode::BackTab => {
            app.add_form.field = app.add_form.field.prev();
            return;
        }
        _ => {}
    }

    let form = &mut app.add_form;
    match form.field {
        AddField::Text => match key.code {
            KeyCode::Char(c) => common::insert_char(&mut form.text, &mut form.text_cursor, c),
            KeyCode::Backspace => common::delete_back(&mut form.text, &mut form.text_cursor),
            KeyCode::Delete => common::delete_forward(&mut form.text, &mut form.text_cursor),
            KeyCode::Left => form.text_cursor = common::prev_boundary(&form.text, form.text_cursor),
            KeyCode::Right => {
                form.text_cursor = common::next_boundary(&form.text, form.text_cursor);
            }
            KeyCode::Home => form.text_cursor = 0,
            KeyCode::End => form.text_cursor = form.text.len(),
            _ => {}
        },
        AddField::Priority => match key.code {
            KeyCode::Left => form.priority = form.priority.prev(),
            KeyCode::Right | KeyCode::Char(' ') => form.priority = form.priority.next(),
            _ => {}
        },
        AddField::Due => match key.code {
            // The date field only ever holds YYYY-MM-DD characters
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                common::insert_char(&mut form.due, &mut form.due_cursor, c);
            }
            KeyCode::Backspace => common::delete_back(&mut form.due, &mut form.due_cursor),
            KeyCode::Delete => common::delete_forward(&mut form.due, &mut form.due_cursor),
            KeyCode::Left => form.due_cursor = common::prev_boundary(&form.due, form.due_cursor),
            KeyCode::Right => form.due_cursor = common::next_boundary(&form.due, form.due_cursor),
            _ => {}
        },
    }
}
