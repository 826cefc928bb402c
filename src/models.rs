use crate::error::GenerateError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const MIN_QUESTION_COUNT: usize = 1;
pub const MAX_QUESTION_COUNT: usize = 20;
pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub question_count: usize,
    pub difficulty: Difficulty,
    pub include_explanations: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            question_count: 10,
            difficulty: Difficulty::Medium,
            include_explanations: true,
        }
    }
}

/// One source of raw text per submission: pasted text, a local file, or
/// a remote page.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    Text(String),
    File(PathBuf),
    Url(String),
}

impl InputSource {
    /// Short label shown in the quiz header.
    pub fn label(&self) -> String {
        match self {
            InputSource::Text(_) => "pasted text".to_string(),
            InputSource::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "file".to_string()),
            InputSource::Url(url) => url.clone(),
        }
    }
}

/// A validated multiple-choice question. Field names follow the wire
/// contract with the completion provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

pub type QuestionSet = Vec<Question>;

#[derive(Debug)]
pub enum GenRequest {
    Generate {
        source: InputSource,
        settings: GenerationSettings,
    },
}

#[derive(Debug)]
pub enum GenResponse {
    Questions(QuestionSet),
    Error(GenerateError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Input,
    Quiz,
    QuizLeaveConfirm,
    Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_cycle() {
        assert_eq!(Difficulty::Easy.next(), Difficulty::Medium);
        assert_eq!(Difficulty::Medium.next(), Difficulty::Hard);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
    }

    #[test]
    fn test_default_settings() {
        let settings = GenerationSettings::default();
        assert_eq!(settings.question_count, 10);
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert!(settings.include_explanations);
    }

    #[test]
    fn test_question_wire_names() {
        let question = Question {
            question: "Q?".to_string(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer: 2,
            explanation: None,
        };
        let json = serde_json::to_string(&question).unwrap();
        assert!(json.contains("\"correctAnswer\":2"));
        assert!(!json.contains("explanation"));
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(InputSource::Text("abc".into()).label(), "pasted text");
        assert_eq!(
            InputSource::File(PathBuf::from("notes/lecture.txt")).label(),
            "lecture.txt"
        );
        assert_eq!(
            InputSource::Url("https://example.com".into()).label(),
            "https://example.com"
        );
    }
}
