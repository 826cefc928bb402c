use crate::ai::DEFAULT_MODEL;
use crate::session::{App, SourceTab};
use crate::ui::layout::calculate_input_chunks;
use crate::utils::wrapped_cursor_position;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const TABS: [SourceTab; 3] = [SourceTab::Text, SourceTab::File, SourceTab::Url];

pub fn draw_input(f: &mut Frame, app: &mut App) {
    let layout = calculate_input_chunks(f.area());

    let title = Paragraph::new("AI MCQ Generator v0.1.0")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.title_area);

    let mut tab_spans = Vec::new();
    for tab in TABS {
        let style = if tab == app.input.tab {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        tab_spans.push(Span::styled(format!(" {} ", tab.title()), style));
        tab_spans.push(Span::from(" "));
    }
    let tabs = Paragraph::new(Line::from(tab_spans)).alignment(Alignment::Left);
    f.render_widget(tabs, layout.tabs_area);

    match app.input.tab {
        SourceTab::Text => draw_text_area(f, app, &layout),
        SourceTab::File => draw_line_editor(
            f,
            &layout,
            "File Path",
            &app.input.file_buffer,
            "[Path to a .txt file...]",
        ),
        SourceTab::Url => draw_line_editor(
            f,
            &layout,
            "URL",
            &app.input.url_buffer,
            "[https://...]",
        ),
    }

    let settings = &app.input.settings;
    let settings_text = vec![
        Line::from(format!("Questions:     {}", settings.question_count)),
        Line::from(format!("Difficulty:    {}", settings.difficulty.as_str())),
        Line::from(format!(
            "Explanations:  {}",
            if settings.include_explanations {
                "on"
            } else {
                "off"
            }
        )),
    ];
    let settings_panel = Paragraph::new(settings_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Generation Settings"),
    );
    f.render_widget(settings_panel, layout.settings_area);

    let ai_status_content = if app.ai_ready {
        vec![
            Line::from("AI: Ready"),
            Line::from(format!("Model: {}", DEFAULT_MODEL)),
        ]
    } else {
        vec![
            Line::from("AI: Not configured"),
            Line::from("Set OPENROUTER_API_KEY"),
        ]
    };
    let ai_status = Paragraph::new(ai_status_content)
        .style(
            Style::default()
                .fg(if app.ai_ready {
                    Color::Green
                } else {
                    Color::Yellow
                })
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title("AI Status"));
    f.render_widget(ai_status, layout.ai_status_area);

    let status = if let Some(error) = &app.last_error {
        Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).title("Error (Esc to dismiss)"))
    } else if app.generation_in_progress {
        let elapsed = app
            .generation_start
            .map(|t| t.elapsed().as_secs())
            .unwrap_or(0);
        Paragraph::new(format!("Generating questions... ({}s)", elapsed))
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL))
    } else if let Some(message) = &app.status_line {
        Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::Green))
            .block(Block::default().borders(Borders::ALL))
    } else {
        Paragraph::new("Provide at least 100 characters of source text, then generate.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL))
    };
    f.render_widget(status, layout.status_area);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "Tab",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Source  "),
        Span::styled(
            "Ctrl+G",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Generate  "),
        Span::styled(
            "Ctrl+↑/↓",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Count  "),
        Span::styled(
            "Ctrl+D",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Difficulty  "),
        Span::styled(
            "Ctrl+E",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Explanations  "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

fn draw_text_area(f: &mut Frame, app: &mut App, layout: &crate::ui::layout::InputLayout) {
    let area = layout.source_area;
    let content = if app.input.text_buffer.is_empty() {
        Text::from("[Paste or type your source text here...]")
    } else {
        Text::from(app.input.text_buffer.as_str())
    };

    // Cursor-follow scrolling: keep the cursor line inside the visible
    // window as the buffer grows.
    let visible_height = area.height.saturating_sub(2) as usize;
    let text_width = area.width.saturating_sub(2) as usize;
    let (cursor_line, cursor_col) =
        wrapped_cursor_position(&app.input.text_buffer, app.input.cursor_position, text_width);

    let mut scroll = app.input.text_scroll_y as usize;
    if cursor_line < scroll {
        scroll = cursor_line;
    } else if visible_height > 0 && cursor_line >= scroll + visible_height {
        scroll = cursor_line - visible_height + 1;
    }
    app.input.text_scroll_y = scroll as u16;

    let chars = app.input.text_buffer.chars().count();
    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .scroll((scroll as u16, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Source Text ({} chars)", chars)),
        );
    f.render_widget(paragraph, area);

    let cursor_x = area.x + 1 + cursor_col as u16;
    let cursor_y = area.y + 1 + (cursor_line as u16).saturating_sub(scroll as u16);
    f.set_cursor_position((cursor_x, cursor_y));
}

fn draw_line_editor(
    f: &mut Frame,
    layout: &crate::ui::layout::InputLayout,
    title: &str,
    buffer: &str,
    placeholder: &str,
) {
    let area = layout.source_area;
    let content = if buffer.is_empty() { placeholder } else { buffer };
    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(paragraph, area);

    let width = area.width.saturating_sub(2) as usize;
    if width > 0 {
        let len = buffer.chars().count();
        let cursor_x = area.x + 1 + (len % width) as u16;
        let cursor_y = area.y + 1 + (len / width) as u16;
        f.set_cursor_position((cursor_x, cursor_y));
    }
}
