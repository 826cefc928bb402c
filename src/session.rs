use crate::error::GenerateError;
use crate::export::{copy_to_clipboard, export_to_file};
use crate::input::MIN_TEXT_LEN;
use crate::logger;
use crate::models::{
    AppState, GenRequest, GenResponse, GenerationSettings, InputSource, QuestionSet,
    MAX_QUESTION_COUNT, MIN_QUESTION_COUNT, OPTION_COUNT,
};
use crate::utils::byte_index;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTab {
    Text,
    File,
    Url,
}

impl SourceTab {
    pub fn title(&self) -> &'static str {
        match self {
            SourceTab::Text => "Paste Text",
            SourceTab::File => "File",
            SourceTab::Url => "URL",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            SourceTab::Text => SourceTab::File,
            SourceTab::File => SourceTab::Url,
            SourceTab::Url => SourceTab::Text,
        }
    }
}

/// State of the input screen: the three source buffers, the cursor into
/// the paste area, and the generation settings.
#[derive(Debug)]
pub struct InputState {
    pub tab: SourceTab,
    pub text_buffer: String,
    pub cursor_position: usize,
    pub text_scroll_y: u16,
    pub file_buffer: String,
    pub url_buffer: String,
    pub settings: GenerationSettings,
}

impl InputState {
    fn new() -> Self {
        Self {
            tab: SourceTab::Text,
            text_buffer: String::new(),
            cursor_position: 0,
            text_scroll_y: 0,
            file_buffer: String::new(),
            url_buffer: String::new(),
            settings: GenerationSettings::default(),
        }
    }
}

/// How one option should be rendered once the user has (or has not)
/// made a selection on its question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Neutral,
    Correct,
    Incorrect,
}

/// Display state for option `option` given the locked selection and the
/// correct index: the chosen option turns green or red, and a wrong
/// choice additionally highlights the true answer.
pub fn option_mark(selected: Option<usize>, option: usize, correct_answer: usize) -> OptionMark {
    let Some(selected) = selected else {
        return OptionMark::Neutral;
    };
    if selected == option {
        if selected == correct_answer {
            OptionMark::Correct
        } else {
            OptionMark::Incorrect
        }
    } else if selected != correct_answer && option == correct_answer {
        OptionMark::Correct
    } else {
        OptionMark::Neutral
    }
}

/// A validated question set plus the per-question selection state that
/// lives and dies with it.
#[derive(Debug)]
pub struct QuizState {
    pub questions: QuestionSet,
    pub selections: Vec<Option<usize>>,
    pub current_index: usize,
    pub source_label: String,
}

impl QuizState {
    pub fn new(questions: QuestionSet, source_label: String) -> Self {
        let selections = vec![None; questions.len()];
        Self {
            questions,
            selections,
            current_index: 0,
            source_label,
        }
    }

    /// Records a selection for the current question. The first choice
    /// sticks; later key presses on an answered question are ignored.
    pub fn select_option(&mut self, option: usize) {
        if option >= OPTION_COUNT {
            return;
        }
        let slot = &mut self.selections[self.current_index];
        if slot.is_none() {
            *slot = Some(option);
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selections[self.current_index]
    }

    pub fn answered(&self) -> usize {
        self.selections.iter().filter(|s| s.is_some()).count()
    }

    pub fn score(&self) -> usize {
        self.questions
            .iter()
            .zip(&self.selections)
            .filter(|(q, s)| **s == Some(q.correct_answer))
            .count()
    }
}

/// Top-level application state and the channel pair to the generation
/// worker.
pub struct App {
    pub state: AppState,
    pub input: InputState,
    pub quiz: Option<QuizState>,
    pub last_source: Option<InputSource>,
    pub last_error: Option<String>,
    pub status_line: Option<String>,
    pub generation_in_progress: bool,
    pub generation_start: Option<Instant>,
    pub ai_ready: bool,
    pub should_quit: bool,
    pub gen_tx: Sender<GenRequest>,
    pub gen_rx: Receiver<GenResponse>,
}

impl App {
    pub fn new(gen_tx: Sender<GenRequest>, gen_rx: Receiver<GenResponse>) -> Self {
        Self {
            state: AppState::Input,
            input: InputState::new(),
            quiz: None,
            last_source: None,
            last_error: None,
            status_line: None,
            generation_in_progress: false,
            generation_start: None,
            ai_ready: std::env::var("OPENROUTER_API_KEY").is_ok(),
            should_quit: false,
            gen_tx,
            gen_rx,
        }
    }

    /// Builds an InputSource from the active tab and dispatches it.
    /// Input that can be rejected without touching the worker (short
    /// text, empty path, empty URL) is rejected here so the request
    /// never leaves the UI.
    pub fn submit(&mut self) {
        let source = match self.input.tab {
            SourceTab::Text => {
                if self.input.text_buffer.chars().count() < MIN_TEXT_LEN {
                    self.last_error = Some(GenerateError::TextTooShort.to_string());
                    return;
                }
                InputSource::Text(self.input.text_buffer.clone())
            }
            SourceTab::File => {
                if self.input.file_buffer.trim().is_empty() {
                    self.last_error = Some(GenerateError::NoFileSelected.to_string());
                    return;
                }
                InputSource::File(PathBuf::from(self.input.file_buffer.trim()))
            }
            SourceTab::Url => {
                if self.input.url_buffer.trim().is_empty() {
                    self.last_error = Some(GenerateError::EmptyUrl.to_string());
                    return;
                }
                InputSource::Url(self.input.url_buffer.trim().to_string())
            }
        };
        self.dispatch(source);
    }

    /// Re-runs the pipeline with the last submitted source.
    pub fn regenerate(&mut self) {
        if let Some(source) = self.last_source.clone() {
            self.state = AppState::Input;
            self.quiz = None;
            self.dispatch(source);
        }
    }

    fn dispatch(&mut self, source: InputSource) {
        // One generation in flight at a time; extra submissions are
        // dropped until the worker answers.
        if self.generation_in_progress {
            logger::log("Ignoring submission while a generation is in flight");
            return;
        }

        self.last_error = None;
        self.status_line = None;
        self.last_source = Some(source.clone());

        let request = GenRequest::Generate {
            source,
            settings: self.input.settings,
        };
        if self.gen_tx.send(request).is_ok() {
            self.generation_in_progress = true;
            self.generation_start = Some(Instant::now());
        } else {
            self.last_error = Some(GenerateError::Unexpected.to_string());
        }
    }

    /// Applies a worker reply. A new set replaces the old one wholesale
    /// and clears every selection; an error drops back to the input
    /// screen with nothing but the message on display.
    pub fn process_gen_response(&mut self, response: GenResponse) {
        self.generation_in_progress = false;
        self.generation_start = None;
        match response {
            GenResponse::Questions(questions) => {
                let label = self
                    .last_source
                    .as_ref()
                    .map(|s| s.label())
                    .unwrap_or_default();
                self.quiz = Some(QuizState::new(questions, label));
                self.last_error = None;
                self.state = AppState::Quiz;
            }
            GenResponse::Error(error) => {
                self.quiz = None;
                self.last_error = Some(error.to_string());
                self.state = AppState::Input;
            }
        }
    }

    pub fn handle_input_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('g') => self.submit(),
                KeyCode::Up => {
                    let count = &mut self.input.settings.question_count;
                    *count = (*count + 1).min(MAX_QUESTION_COUNT);
                }
                KeyCode::Down => {
                    let count = &mut self.input.settings.question_count;
                    *count = count.saturating_sub(1).max(MIN_QUESTION_COUNT);
                }
                KeyCode::Char('d') => {
                    self.input.settings.difficulty = self.input.settings.difficulty.next();
                }
                KeyCode::Char('e') => {
                    self.input.settings.include_explanations =
                        !self.input.settings.include_explanations;
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                if self.last_error.is_some() {
                    self.last_error = None;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Tab => {
                self.input.tab = self.input.tab.next();
            }
            KeyCode::Enter => match self.input.tab {
                SourceTab::Text => self.insert_char('\n'),
                SourceTab::File | SourceTab::Url => self.submit(),
            },
            KeyCode::Left => {
                if self.input.tab == SourceTab::Text && self.input.cursor_position > 0 {
                    self.input.cursor_position -= 1;
                }
            }
            KeyCode::Right => {
                if self.input.tab == SourceTab::Text
                    && self.input.cursor_position < self.input.text_buffer.chars().count()
                {
                    self.input.cursor_position += 1;
                }
            }
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Char(c) => self.insert_char(c),
            _ => {}
        }
    }

    fn insert_char(&mut self, c: char) {
        match self.input.tab {
            SourceTab::Text => {
                let at = byte_index(&self.input.text_buffer, self.input.cursor_position);
                self.input.text_buffer.insert(at, c);
                self.input.cursor_position += 1;
            }
            SourceTab::File => self.input.file_buffer.push(c),
            SourceTab::Url => self.input.url_buffer.push(c),
        }
    }

    fn delete_char(&mut self) {
        match self.input.tab {
            SourceTab::Text => {
                if self.input.cursor_position > 0 {
                    let at = byte_index(&self.input.text_buffer, self.input.cursor_position - 1);
                    self.input.text_buffer.remove(at);
                    self.input.cursor_position -= 1;
                }
            }
            SourceTab::File => {
                self.input.file_buffer.pop();
            }
            SourceTab::Url => {
                self.input.url_buffer.pop();
            }
        }
    }

    pub fn handle_quiz_key(&mut self, key: KeyEvent) {
        if self.quiz.is_none() {
            return;
        }
        match key.code {
            KeyCode::Char('c') => {
                self.copy_set();
                return;
            }
            KeyCode::Char('x') => {
                self.export_set();
                return;
            }
            KeyCode::Char('r') => {
                self.regenerate();
                return;
            }
            KeyCode::Esc => {
                self.state = AppState::QuizLeaveConfirm;
                return;
            }
            _ => {}
        }

        let mut finished = false;
        if let Some(quiz) = self.quiz.as_mut() {
            let last_index = quiz.questions.len().saturating_sub(1);
            match key.code {
                KeyCode::Char(c @ '1'..='4') => {
                    quiz.select_option(c as usize - '1' as usize);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if quiz.current_index < last_index {
                        quiz.current_index += 1;
                    }
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    if quiz.current_index > 0 {
                        quiz.current_index -= 1;
                    }
                }
                KeyCode::Enter => {
                    if quiz.current_index < last_index {
                        quiz.current_index += 1;
                    } else {
                        finished = true;
                    }
                }
                _ => {}
            }
        }
        if finished {
            self.state = AppState::Summary;
        }
    }

    pub fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') => {
                self.quiz = None;
                self.state = AppState::Input;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.state = AppState::Quiz;
            }
            _ => {}
        }
    }

    pub fn handle_summary_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('n') | KeyCode::Esc => {
                self.quiz = None;
                self.state = AppState::Input;
            }
            KeyCode::Char('b') => {
                self.state = AppState::Quiz;
            }
            KeyCode::Char('c') => self.copy_set(),
            KeyCode::Char('x') => self.export_set(),
            KeyCode::Char('r') => self.regenerate(),
            _ => {}
        }
    }

    fn copy_set(&mut self) {
        if let Some(quiz) = &self.quiz {
            match copy_to_clipboard(&quiz.questions) {
                Ok(()) => self.status_line = Some("Copied to clipboard".to_string()),
                Err(e) => {
                    logger::log(&format!("Clipboard write failed: {}", e));
                    self.status_line = Some("Copy failed".to_string());
                }
            }
        }
    }

    fn export_set(&mut self) {
        if let Some(quiz) = &self.quiz {
            match export_to_file(&quiz.questions) {
                Ok(path) => {
                    self.status_line = Some(format!("Exported to {}", path.display()));
                }
                Err(e) => {
                    logger::log(&format!("Export failed: {}", e));
                    self.status_line = Some("Export failed".to_string());
                }
            }
        }
    }
}
