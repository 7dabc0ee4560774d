use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Focus};
use super::preview::ImagePreview;
use crate::core::locale::Texts;
use crate::core::{AspectRatio, Field, Phase};

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title
            Constraint::Min(10),   // Form + result
            Constraint::Length(3), // Status bar
            Constraint::Length(1), // Help line
        ])
        .split(frame.area());

    draw_title(frame, app.texts(), chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    draw_form(frame, app, body[0]);
    draw_result(frame, app, body[1]);
    draw_status(frame, app, chunks[2]);
    draw_help(frame, app, chunks[3]);
}

fn draw_title(frame: &mut Frame, texts: &Texts, area: Rect) {
    let title = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("✨ ", Style::default()),
            Span::styled(
                "Imajinasi AI",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            texts.subtitle,
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(title, area);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Rows a field block needs, borders included
fn field_height(texts: &Texts, field: Field) -> u16 {
    let mut height = 2 + if field.is_multiline() { 2 } else { 1 };
    if !field.suggestions().is_empty() {
        // chips wrap onto a second row on narrow terminals
        height += 2;
    }
    if texts.helper_text(field).is_some() {
        height += 1;
    }
    height
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            app.texts().form_title,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = Field::all()
        .iter()
        .map(|f| Constraint::Length(field_height(app.texts(), *f)))
        .collect();
    constraints.push(Constraint::Length(3)); // Aspect ratio
    constraints.push(Constraint::Length(3)); // Generate button
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in Field::all().iter().enumerate() {
        draw_field(frame, app, *field, rows[i]);
    }
    let n = Field::all().len();
    draw_aspect_ratio(frame, app, rows[n]);
    draw_generate_button(frame, app, rows[n + 1]);
}

fn draw_field(frame: &mut Frame, app: &App, field: Field, area: Rect) {
    let focused = app.focus == Focus::Field(field);
    let value = app.form.params().get(field);
    let texts = app.texts();

    let mut lines = Vec::new();
    if value.is_empty() {
        lines.push(Line::from(Span::styled(
            texts.placeholder(field),
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(Span::styled(value, Style::default().fg(Color::White))));
    }
    if field.is_multiline() {
        lines.push(Line::from(""));
    }

    let suggestions = field.suggestions();
    if !suggestions.is_empty() {
        let mut chips = Vec::new();
        for (i, suggestion) in suggestions.iter().enumerate() {
            let selected = value == *suggestion;
            chips.push(Span::styled(
                format!("[{} {}]", i + 1, suggestion),
                if selected {
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                },
            ));
            chips.push(Span::raw(" "));
        }
        lines.push(Line::from(chips));
    }
    if let Some(helper) = texts.helper_text(field) {
        lines.push(Line::from(Span::styled(
            helper,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(texts.field_label(field));
    let inner = block.inner(area);
    let widget = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(widget, area);

    if focused && inner.width > 0 {
        let width = inner.width as usize;
        let (row, col) = if field.is_multiline() {
            (app.cursor_pos / width, app.cursor_pos % width)
        } else {
            (0, app.cursor_pos.min(width - 1))
        };
        let max_row = if field.is_multiline() { 1 } else { 0 };
        frame.set_cursor_position((inner.x + col as u16, inner.y + row.min(max_row) as u16));
    }
}

fn draw_aspect_ratio(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::AspectRatio;
    let current = app.form.params().aspect_ratio;

    let mut spans = Vec::new();
    for ar in AspectRatio::all() {
        let style = if *ar == current {
            Style::default()
                .fg(Color::White)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", ar.as_str()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        current.name(),
        Style::default().fg(Color::DarkGray),
    ));

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(focused))
            .title(app.texts().aspect_ratio_title),
    );
    frame.render_widget(widget, area);
}

fn draw_generate_button(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Generate;
    let texts = app.texts();
    let (label, style) = if app.form.is_submitting() {
        (
            format!("{} {}", SPINNER[app.tick % SPINNER.len()], texts.generating_button),
            Style::default().fg(Color::DarkGray),
        )
    } else if focused {
        (
            texts.generate_button.to_string(),
            Style::default()
                .fg(Color::White)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            texts.generate_button.to_string(),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )
    };

    let button = Paragraph::new(Span::styled(label, style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(focused && !app.form.is_submitting())),
        );
    frame.render_widget(button, area);
}

fn draw_result(frame: &mut Frame, app: &mut App, area: Rect) {
    let texts = app.texts();
    let mut title = vec![Span::styled(
        texts.result_title,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];
    if app.form.image().is_some() {
        title.push(Span::styled(texts.download_hint, Style::default().fg(Color::Gray)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Line::from(title));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let show_prompt = app.form.show_prompt();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(if show_prompt { 10 } else { 0 }),
        ])
        .split(inner);

    match (app.form.phase(), app.form.error()) {
        (Phase::Submitting, _) => draw_centered(
            frame,
            chunks[0],
            vec![
                Line::from(Span::styled(
                    SPINNER[app.tick % SPINNER.len()],
                    Style::default().fg(Color::Magenta),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    texts.painting,
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    texts.painting_detail,
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        ),
        (_, Some(error)) => draw_centered(
            frame,
            chunks[0],
            vec![
                Line::from(Span::styled(
                    texts.failed_title,
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(error, Style::default().fg(Color::Gray))),
            ],
        ),
        (Phase::Succeeded(_), None) => match app.preview.as_mut() {
            Some(preview) => frame.render_stateful_widget(ImagePreview, chunks[0], preview),
            None => draw_centered(
                frame,
                chunks[0],
                vec![Line::from(Span::styled(
                    texts.preview_unavailable,
                    Style::default().fg(Color::Gray),
                ))],
            ),
        },
        _ => draw_centered(
            frame,
            chunks[0],
            vec![Line::from(Span::styled(
                texts.empty_hint,
                Style::default().fg(Color::DarkGray),
            ))],
        ),
    }

    if show_prompt {
        draw_prompt_box(frame, app, chunks[1]);
    }
}

fn draw_centered(frame: &mut Frame, area: Rect, lines: Vec<Line>) {
    let height = (lines.len() as u16).min(area.height);
    let top = area.y + (area.height - height) / 2;
    let area = Rect::new(area.x, top, area.width, area.height - (top - area.y));
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn draw_prompt_box(frame: &mut Frame, app: &App, area: Rect) {
    let prompt = Paragraph::new(app.form.compact_prompt())
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Line::from(vec![
                    Span::styled(
                        app.texts().prompt_title,
                        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(app.texts().copy_hint, Style::default().fg(Color::Gray)),
                ])),
        );
    frame.render_widget(prompt, area);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let texts = app.texts();
    let (message, style) = if let Some(err) = &app.error_message {
        (err.as_str(), Style::default().fg(Color::Red))
    } else if let Some(status) = &app.status_message {
        (status.as_str(), Style::default().fg(Color::Green))
    } else if app.config.api_key().is_none() {
        (texts.no_api_key, Style::default().fg(Color::Yellow))
    } else {
        (texts.ready, Style::default().fg(Color::Gray))
    };

    let status = Paragraph::new(message).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Status · {}", app.config.api.model)),
    );
    frame.render_widget(status, area);
}

fn draw_help(frame: &mut Frame, app: &App, area: Rect) {
    let texts = app.texts();
    let mut parts = match app.focus {
        Focus::Field(field) if !field.suggestions().is_empty() => {
            vec![texts.help_move, texts.help_suggestion, texts.help_generate]
        }
        Focus::Field(_) => vec![texts.help_move, texts.help_next_field, texts.help_generate],
        Focus::AspectRatio => vec![texts.help_ratio, texts.help_move, texts.help_generate],
        Focus::Generate => vec![texts.help_generate_enter, texts.help_move],
    };
    if app.form.show_prompt() {
        parts.extend([texts.help_copy, texts.help_download]);
    }
    parts.push(texts.help_quit);

    let help = Paragraph::new(parts.join(" | ")).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
