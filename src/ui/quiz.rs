use crate::export::option_letter;
use crate::session::{option_mark, OptionMark, QuizState};
use crate::ui::layout::calculate_quiz_chunks;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_quiz(f: &mut Frame, quiz: &QuizState, status_line: Option<&str>) {
    let layout = calculate_quiz_chunks(f.area());

    let question = &quiz.questions[quiz.current_index];
    let selected = quiz.selected();

    let progress = format!(
        "Question {} / {} - {}",
        quiz.current_index + 1,
        quiz.questions.len(),
        quiz.source_label
    );
    let header = Paragraph::new(progress)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let question_text = Paragraph::new(question.question.as_str())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question_text, layout.question_area);

    let mut option_lines = Vec::new();
    for (i, option) in question.options.iter().enumerate() {
        let style = match option_mark(selected, i, question.correct_answer) {
            OptionMark::Neutral => Style::default(),
            OptionMark::Correct => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            OptionMark::Incorrect => {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            }
        };
        let marker = if selected == Some(i) { "▶" } else { " " };
        option_lines.push(Line::from(Span::styled(
            format!("{} {}) {}", marker, option_letter(i), option),
            style,
        )));
    }
    let options_title = if selected.is_some() {
        "Options (answered)"
    } else {
        "Options (press 1-4)"
    };
    let options = Paragraph::new(Text::from(option_lines))
        .block(Block::default().borders(Borders::ALL).title(options_title));
    f.render_widget(options, layout.options_area);

    // Explanation stays hidden until the question has been answered.
    let explanation_content = match (&selected, &question.explanation) {
        (Some(_), Some(explanation)) => Text::from(explanation.as_str()),
        (Some(_), None) => Text::default(),
        (None, _) => Text::from(Span::styled(
            "[Select an answer to continue]",
            Style::default().fg(Color::DarkGray),
        )),
    };
    let explanation = Paragraph::new(explanation_content)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Explanation"));
    f.render_widget(explanation, layout.explanation_area);

    let mut help_lines = Vec::new();
    if let Some(message) = status_line {
        help_lines.push(Line::from(Span::styled(
            message,
            Style::default().fg(Color::Green),
        )));
    }
    help_lines.push(Line::from(vec![
        Span::styled(
            "1-4",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Select  "),
        Span::styled(
            "↑/↓",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Navigate  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Next  "),
        Span::styled(
            "c",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Copy  "),
        Span::styled(
            "x",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Export  "),
        Span::styled(
            "r",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Regenerate  "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Leave"),
    ]));
    let help = Paragraph::new(help_lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_leave_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Leave Quiz")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Discard these questions and return to the input screen?")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Back to Input)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue)  "),
        Span::styled(
            "Ctrl+C",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
