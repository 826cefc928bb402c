use crate::models::Question;
use base64::{engine::general_purpose, Engine as _};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

pub const EXPORT_FILE_NAME: &str = "mcq-questions.txt";

pub fn option_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

/// Human-readable rendering of the whole set: numbered question,
/// lettered options, correct letter, optional explanation.
pub fn format_question_set(questions: &[Question]) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let mut entry = format!("Question {}: {}\n\n", i + 1, q.question);
            for (j, option) in q.options.iter().enumerate() {
                entry.push_str(&format!("{}) {}\n", option_letter(j), option));
            }
            entry.push_str(&format!("\nCorrect Answer: {}", option_letter(q.correct_answer)));
            if let Some(explanation) = &q.explanation {
                entry.push_str(&format!("\nExplanation: {}", explanation));
            }
            entry
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Writes the formatted set to mcq-questions.txt in the working
/// directory and returns the path.
pub fn export_to_file(questions: &[Question]) -> io::Result<PathBuf> {
    let path = PathBuf::from(EXPORT_FILE_NAME);
    write_question_file(questions, &path)?;
    Ok(path)
}

pub fn write_question_file(questions: &[Question], path: &std::path::Path) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(format_question_set(questions).as_bytes())
}

/// Puts the formatted set on the terminal clipboard via an OSC 52
/// sequence. Works in any terminal that honors clipboard escapes.
pub fn copy_to_clipboard(questions: &[Question]) -> io::Result<()> {
    let payload = general_purpose::STANDARD.encode(format_question_set(questions));
    let mut stdout = io::stdout();
    write!(stdout, "\x1b]52;c;{}\x07", payload)?;
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_questions() -> Vec<Question> {
        vec![
            Question {
                question: "First?".to_string(),
                options: vec!["one".into(), "two".into(), "three".into(), "four".into()],
                correct_answer: 1,
                explanation: Some("two is right".to_string()),
            },
            Question {
                question: "Second?".to_string(),
                options: vec!["w".into(), "x".into(), "y".into(), "z".into()],
                correct_answer: 3,
                explanation: None,
            },
        ]
    }

    #[test]
    fn test_option_letters() {
        assert_eq!(option_letter(0), 'A');
        assert_eq!(option_letter(3), 'D');
    }

    #[test]
    fn test_format_layout() {
        let text = format_question_set(&sample_questions());

        assert!(text.starts_with("Question 1: First?\n\nA) one\nB) two\nC) three\nD) four\n\nCorrect Answer: B\nExplanation: two is right"));
        assert!(text.contains("\n\nQuestion 2: Second?"));
        assert!(text.contains("Correct Answer: D"));
    }

    #[test]
    fn test_format_without_explanation() {
        let questions = sample_questions();
        let text = format_question_set(&questions[1..]);
        assert!(!text.contains("Explanation:"));
        assert!(text.ends_with("Correct Answer: D"));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);

        write_question_file(&sample_questions(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, format_question_set(&sample_questions()));
    }
}
