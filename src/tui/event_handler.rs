use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Focus};
use crate::output::Osc52Clipboard;

/// Handle a key press on the form
pub async fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let command = is_command(key.modifiers);

    // Global shortcuts
    match key.code {
        KeyCode::Char('c') if command => {
            app.should_quit = true;
            return;
        }
        KeyCode::Esc => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('g') if command => {
            app.submit();
            return;
        }
        KeyCode::Char('y') if command => {
            app.copy_prompt(&mut Osc52Clipboard::stdout());
            return;
        }
        KeyCode::Char('s') if command => {
            app.download().await;
            return;
        }
        // AltGr arrives as Ctrl+Alt and is plain text input
        KeyCode::Char(c) if alt && !ctrl => {
            if let Some(n) = c.to_digit(10).filter(|n| *n > 0) {
                app.apply_suggestion(n as usize - 1);
            }
            return;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.focus_next();
            return;
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.focus_previous();
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::Field(_) => handle_field_input(app, key),
        Focus::AspectRatio => handle_ratio_input(app, key),
        Focus::Generate => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                app.submit();
            }
        }
    }
}

/// Text editing in the focused field
fn handle_field_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.focus_next(),
        KeyCode::Char(c) if !is_command(key.modifiers) => app.insert_char(c),
        KeyCode::Backspace => app.delete_before_cursor(),
        KeyCode::Delete => app.delete_at_cursor(),
        KeyCode::Left => app.move_cursor(-1),
        KeyCode::Right => app.move_cursor(1),
        KeyCode::Home => app.cursor_home(),
        KeyCode::End => app.cursor_end(),
        _ => {}
    }
}

/// Ctrl alone marks a shortcut; Ctrl+Alt is AltGr on many layouts
fn is_command(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL) && !modifiers.contains(KeyModifiers::ALT)
}

/// Ratio selector: arrows cycle, digits pick directly
fn handle_ratio_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.form.cycle_aspect_ratio(false),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            app.form.cycle_aspect_ratio(true)
        }
        KeyCode::Char(c) => {
            let ratios = crate::core::AspectRatio::all();
            if let Some(ar) = c
                .to_digit(10)
                .and_then(|n| (n as usize).checked_sub(1))
                .and_then(|i| ratios.get(i))
            {
                app.form.set_aspect_ratio(*ar);
            }
        }
        KeyCode::Enter => app.focus_next(),
        _ => {}
    }
}
