use crate::application::{App, AppView, FormFocus};
use crate::domain::{Field, Size};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            app.quit();
            return;
        }

        if app.show_help {
            Self::handle_help_mode(app, key);
            return;
        }

        match app.view {
            AppView::Home => Self::handle_home_view(app, key),
            AppView::Order => Self::handle_order_view(app, key, modifiers),
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        if matches!(key, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.toggle_help();
        }
    }

    fn handle_home_view(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char('o') => app.open_order_form(),
            KeyCode::F(1) | KeyCode::Char('?') => app.toggle_help(),
            KeyCode::Char('q') | KeyCode::Esc => app.quit(),
            _ => {}
        }
    }

    fn handle_order_view(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        // Keys shared by every control
        match key {
            KeyCode::Esc => {
                app.go_home();
                return;
            }
            KeyCode::F(1) => {
                app.toggle_help();
                return;
            }
            KeyCode::Enter => {
                app.submit_order();
                return;
            }
            KeyCode::Tab | KeyCode::Down => {
                app.order_form.focus_next();
                return;
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.order_form.focus_previous();
                return;
            }
            _ => {}
        }

        // Chorded letters are shortcuts, never text
        if matches!(key, KeyCode::Char(_))
            && modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return;
        }

        match app.order_form.focus {
            FormFocus::FullName => Self::handle_name_input(app, key),
            FormFocus::Size => Self::handle_size_select(app, key),
            FormFocus::Topping(_) => {
                if key == KeyCode::Char(' ') {
                    app.order_form.toggle_focused_topping();
                }
            }
            FormFocus::Submit => {
                if key == KeyCode::Char(' ') {
                    app.submit_order();
                }
            }
        }
    }

    fn handle_name_input(app: &mut App, key: KeyCode) {
        let form = &mut app.order_form;
        match key {
            KeyCode::Backspace => form.backspace(),
            KeyCode::Delete => form.delete(),
            KeyCode::Left => form.cursor_left(),
            KeyCode::Right => form.cursor_right(),
            KeyCode::Home => form.cursor_home(),
            KeyCode::End => form.cursor_end(),
            KeyCode::Char(c) => form.insert_char(c),
            _ => {}
        }
    }

    fn handle_size_select(app: &mut App, key: KeyCode) {
        let form = &mut app.order_form;
        match key {
            KeyCode::Right | KeyCode::Char(' ') => form.cycle_size(true),
            KeyCode::Left => form.cycle_size(false),
            KeyCode::Backspace | KeyCode::Delete => form.set_text(Field::Size, ""),
            KeyCode::Char(c) => {
                let code = c.to_ascii_uppercase().to_string();
                if let Some(size) = Size::from_code(&code) {
                    form.set_text(Field::Size, size.code());
                }
            }
            _ => {}
        }
    }
}
