use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct InputLayout {
    pub title_area: Rect,
    pub tabs_area: Rect,
    pub source_area: Rect,
    pub settings_area: Rect,
    pub ai_status_area: Rect,
    pub status_area: Rect,
    pub help_area: Rect,
}

pub struct QuizLayout {
    pub header_area: Rect,
    pub question_area: Rect,
    pub options_area: Rect,
    pub explanation_area: Rect,
    pub help_area: Rect,
}

pub struct SummaryLayout {
    pub header_area: Rect,
    pub content_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_input_chunks(area: Rect) -> InputLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    let panel_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[3]);

    InputLayout {
        title_area: chunks[0],
        tabs_area: chunks[1],
        source_area: chunks[2],
        settings_area: panel_chunks[0],
        ai_status_area: panel_chunks[1],
        status_area: chunks[4],
        help_area: chunks[5],
    }
}

pub fn calculate_quiz_chunks(area: Rect) -> QuizLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(6),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    QuizLayout {
        header_area: chunks[0],
        question_area: chunks[1],
        options_area: chunks[2],
        explanation_area: chunks[3],
        help_area: chunks[4],
    }
}

pub fn calculate_summary_chunks(area: Rect) -> SummaryLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(area);

    SummaryLayout {
        header_area: chunks[0],
        content_area: chunks[1],
        help_area: chunks[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_layout() {
        let layout = calculate_input_chunks(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.title_area.height, 3);
        assert_eq!(layout.tabs_area.height, 1);
        assert_eq!(layout.settings_area.height, 5);
        assert_eq!(layout.status_area.height, 3);
        assert_eq!(layout.help_area.height, 3);
        assert!(layout.source_area.height >= 6);
        assert!(layout.settings_area.width > layout.ai_status_area.width);
    }

    #[test]
    fn test_quiz_layout() {
        let layout = calculate_quiz_chunks(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.options_area.height, 6);
        assert_eq!(layout.help_area.height, 3);
        assert!(layout.question_area.height > 0);
        assert!(layout.explanation_area.height > 0);
    }

    #[test]
    fn test_summary_layout() {
        let layout = calculate_summary_chunks(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.help_area.height, 3);
        assert!(layout.content_area.height >= 10);
    }
}
