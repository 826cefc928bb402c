use crate::export::option_letter;
use crate::session::QuizState;
use crate::ui::layout::calculate_summary_chunks;
use crate::utils::truncate_string;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_summary(f: &mut Frame, quiz: &QuizState, status_line: Option<&str>) {
    let layout = calculate_summary_chunks(f.area());

    let title_text = format!("Quiz Summary - {}", quiz.source_label);
    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let mut summary_text = Text::default();
    summary_text.push_line(Line::from(format!(
        "Score: {} / {} ({} answered)",
        quiz.score(),
        quiz.questions.len(),
        quiz.answered()
    )));
    if let Some(message) = status_line {
        summary_text.push_line(Line::from(Span::styled(
            message,
            Style::default().fg(Color::Green),
        )));
    }
    summary_text.push_line(Line::from(""));

    for (i, question) in quiz.questions.iter().enumerate() {
        let selected = quiz.selections[i];
        let (mark, style) = match selected {
            Some(choice) if choice == question.correct_answer => {
                ("[✓]", Style::default().fg(Color::Green))
            }
            Some(_) => ("[✗]", Style::default().fg(Color::Red)),
            None => ("[ ]", Style::default()),
        };
        summary_text.push_line(Line::from(Span::styled(
            format!(
                "{} {}. {}",
                mark,
                i + 1,
                truncate_string(&question.question, 60)
            ),
            style,
        )));
        let detail = match selected {
            Some(choice) => format!(
                "    Your Answer: {}  Correct: {}",
                option_letter(choice),
                option_letter(question.correct_answer)
            ),
            None => format!(
                "    Not answered  Correct: {}",
                option_letter(question.correct_answer)
            ),
        };
        summary_text.push_line(Line::from(detail));
        summary_text.push_line(Line::from(""));
    }

    let summary = Paragraph::new(summary_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, layout.content_area);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "b",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Back to Questions  "),
        Span::styled(
            "r",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Regenerate  "),
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
            "n",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" New Input  "),
        Span::styled(
            "q",
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
