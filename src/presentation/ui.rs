use crate::application::{App, AppView, FormFocus, OrderForm};
use crate::domain::{Field, Size, TOPPINGS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const PIZZA_ART: &str = include_str!("../../assets/pizza.txt");
const NAME_PLACEHOLDER: &str = "Type full name";
const SIZE_PLACEHOLDER: &str = "----Choose Size----";

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_nav(f, app, chunks[0]);
    match app.view {
        AppView::Home => render_home(f, chunks[1]),
        AppView::Order => render_order_form(f, &app.order_form, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);

    if app.show_help {
        render_help_popup(f);
    }
}

fn render_nav(f: &mut Frame, app: &App, area: Rect) {
    let link = |label: &'static str, active: bool| {
        if active {
            Span::styled(label, Style::default().fg(Color::Black).bg(Color::Cyan))
        } else {
            Span::styled(label, Style::default().fg(Color::Cyan))
        }
    };

    let nav = Line::from(vec![
        Span::styled("Bloom Pizza | ", Style::default().fg(Color::Cyan)),
        link(" Home ", app.view == AppView::Home),
        Span::raw(" "),
        link(" Order ", app.view == AppView::Order),
    ]);
    f.render_widget(Paragraph::new(nav), area);
}

fn render_home(f: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Welcome to Bloom Pizza!",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    let art_width = PIZZA_ART.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    lines.extend(PIZZA_ART.lines().map(|l| {
        Line::from(Span::styled(format!("{l:<art_width$}"), Style::default().fg(Color::LightRed)))
    }));
    lines.push(Line::from(""));
    lines.push(Line::from("Press Enter to order a pizza"));

    let home = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Home"));
    f.render_widget(home, area);
}

fn focus_marker(focused: bool) -> Span<'static> {
    if focused {
        Span::styled("> ", Style::default().fg(Color::Yellow))
    } else {
        Span::raw("  ")
    }
}

fn error_line(form: &OrderForm, field: Field) -> Option<Line<'static>> {
    let message = form.errors.get(field);
    if message.is_empty() {
        return None;
    }
    Some(Line::from(Span::styled(
        format!("  {message}"),
        Style::default().fg(Color::Red),
    )))
}

fn render_order_form(f: &mut Frame, form: &OrderForm, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(message) = &form.message {
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
    }
    if let Some(fault) = &form.fault {
        lines.push(Line::from(Span::styled(
            format!("{fault} (press Enter to retry)"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));

    lines.push(Line::from("Full Name"));
    let name_focused = form.focus == FormFocus::FullName;
    let name_line = lines.len();
    let name_span = if form.values.full_name.is_empty() {
        Span::styled(NAME_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(form.values.full_name.clone())
    };
    lines.push(Line::from(vec![focus_marker(name_focused), name_span]));
    lines.extend(error_line(form, Field::FullName));
    lines.push(Line::from(""));

    lines.push(Line::from("Size"));
    let size_label = Size::from_code(&form.values.size)
        .map(Size::label)
        .unwrap_or(SIZE_PLACEHOLDER);
    lines.push(Line::from(vec![
        focus_marker(form.focus == FormFocus::Size),
        Span::raw(format!("< {size_label} >")),
    ]));
    lines.extend(error_line(form, Field::Size));
    lines.push(Line::from(""));

    for (index, topping) in TOPPINGS.iter().enumerate() {
        let checked = if form.values.has_topping(topping.id) { "[x]" } else { "[ ]" };
        lines.push(Line::from(vec![
            focus_marker(form.focus == FormFocus::Topping(index)),
            Span::raw(format!("{checked} {}", topping.text)),
        ]));
    }
    lines.push(Line::from(""));

    let (submit_label, submit_style) = if form.is_submitting() {
        ("[ Submitting... ]", Style::default().fg(Color::Yellow))
    } else if form.submit_enabled {
        ("[ Submit ]", Style::default().fg(Color::Black).bg(Color::Green))
    } else {
        ("[ Submit ]", Style::default().fg(Color::DarkGray))
    };
    lines.push(Line::from(vec![
        focus_marker(form.focus == FormFocus::Submit),
        Span::styled(submit_label, submit_style),
    ]));

    let block = Block::default().borders(Borders::ALL).title("Order Your Pizza");
    f.render_widget(Paragraph::new(lines).block(block), area);

    if name_focused {
        let before_cursor: String = form.values.full_name.chars().take(form.cursor_position).collect();
        let prefix_width = u16::try_from(before_cursor.width()).unwrap_or(u16::MAX);
        let x = area.x.saturating_add(1 + 2).saturating_add(prefix_width);
        let y = area.y.saturating_add(1).saturating_add(u16::try_from(name_line).unwrap_or(u16::MAX));
        if x < area.right() && y < area.bottom() {
            f.set_cursor_position((x, y));
        }
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match app.view {
        AppView::Home => (
            "Enter/o: order | F1/?: help | q: quit".to_string(),
            Style::default(),
        ),
        AppView::Order if app.order_form.is_submitting() => (
            "Sending your order...".to_string(),
            Style::default().fg(Color::Yellow),
        ),
        AppView::Order => {
            let hint = match app.order_form.focus {
                FormFocus::FullName => "Type your name",
                FormFocus::Size => "←/→ or Space: choose size, S/M/L: pick directly",
                FormFocus::Topping(_) => "Space: toggle topping",
                FormFocus::Submit => "Space/Enter: place order",
            };
            (
                format!("{hint} | Tab/↑↓: move | Enter: submit | Esc: home | F1: help"),
                Style::default().fg(Color::Green),
            )
        }
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);
    let help_widget = Paragraph::new(HELP_TEXT)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Bloom Pizza Help")
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));
    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"HOME
Enter / o       Open the order form
q / Esc         Quit

ORDER FORM
Tab / ↓         Next control
Shift+Tab / ↑   Previous control
Enter           Submit the order (when enabled)
Esc             Back to home (the form starts over next time)

Full name       Type to edit, ←/→ Home/End move the cursor
Size            ←/→ or Space cycle, S/M/L choose, Backspace clears
Toppings        Space toggles the focused topping

A name of 3 to 20 characters and a size are required.

F1              Toggle this help (? also works on the home page)
Ctrl+C          Quit from anywhere"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::gateway::testing::FakeGateway;
    use ratatui::{backend::TestBackend, layout::Position, Terminal};
    use std::sync::Arc;

    fn draw(app: &App) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(90, 36)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        terminal
    }

    fn render_to_string(app: &App) -> String {
        let terminal = draw(app);

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app() -> App {
        App::new(Arc::new(FakeGateway::accepting("order placed")))
    }

    #[test]
    fn test_home_view() {
        let screen = render_to_string(&app());
        assert!(screen.contains("Welcome to Bloom Pizza!"));
        assert!(screen.contains("Press Enter to order a pizza"));
        assert!(screen.contains("q: quit"));
    }

    #[test]
    fn test_empty_order_form() {
        let mut app = app();
        app.open_order_form();
        let screen = render_to_string(&app);
        assert!(screen.contains("Order Your Pizza"));
        assert!(screen.contains(NAME_PLACEHOLDER));
        assert!(screen.contains(SIZE_PLACEHOLDER));
        assert!(screen.contains("[ ] Pepperoni"));
        assert!(screen.contains("[ ] Ham"));
        assert!(screen.contains("[ Submit ]"));
    }

    #[test]
    fn test_order_form_shows_values_and_errors() {
        let mut app = app();
        app.open_order_form();
        app.order_form.set_text(Field::FullName, "Al");
        app.order_form.set_text(Field::Size, "L");
        app.order_form.toggle_topping("3");

        let screen = render_to_string(&app);
        assert!(screen.contains("full name must be at least 3 characters"));
        assert!(screen.contains("< Large >"));
        assert!(screen.contains("[x] Pineapple"));
        assert!(screen.contains("[ ] Mushrooms"));
    }

    #[test]
    fn test_order_form_shows_message_and_fault() {
        let mut app = app();
        app.open_order_form();
        app.order_form.message = Some("order placed".to_string());
        assert!(render_to_string(&app).contains("order placed"));

        app.order_form.message = None;
        app.order_form.fault = Some("order service responded with status 502".to_string());
        let screen = render_to_string(&app);
        assert!(screen.contains("status 502 (press Enter to retry)"));
    }

    #[test]
    fn test_name_cursor_position() {
        let mut app = app();
        app.open_order_form();
        for c in "Jo".chars() {
            app.order_form.insert_char(c);
        }
        // body starts on row 1; border, blank line and label put the name on row 4
        let mut terminal = draw(&app);
        assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(3 + 2, 4));

        app.order_form.cursor_home();
        let mut terminal = draw(&app);
        assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(3, 4));
    }

    #[test]
    fn test_name_cursor_counts_display_width() {
        let mut app = app();
        app.open_order_form();
        for c in "山田太郎".chars() {
            app.order_form.insert_char(c);
        }
        app.order_form.cursor_left();

        // three double-width characters sit before the cursor
        let mut terminal = draw(&app);
        assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(3 + 6, 4));
    }

    #[test]
    fn test_help_popup() {
        let mut app = app();
        app.toggle_help();
        assert!(render_to_string(&app).contains("Bloom Pizza Help"));
    }
}
