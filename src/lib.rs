pub mod ai;
pub mod ai_worker;
pub mod error;
pub mod export;
pub mod input;
pub mod logger;
pub mod models;
pub mod session;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use ai::{build_prompt, parse_questions, CompletionClient, ModelConfig, DEFAULT_MODEL};
pub use ai_worker::spawn_gen_worker;
pub use error::GenerateError;
pub use export::{copy_to_clipboard, export_to_file, format_question_set};
pub use input::normalize_source;
pub use models::{AppState, GenerationSettings, InputSource, Question, QuestionSet};
pub use session::App;
pub use ui::{draw_input, draw_leave_confirmation, draw_quiz, draw_summary};
pub use utils::wrapped_cursor_position;
