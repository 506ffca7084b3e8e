use crate::ui::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'c') || matches!(key.code, KeyCode::Char('q')) {
        app.request_quit();
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => app.back(),
        KeyCode::Char(ch) => {
            if let Some(digit) = ch.to_digit(10) {
                if digit > 0 {
                    app.perform(digit as usize - 1);
                }
            }
        }
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
