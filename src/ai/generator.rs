use crate::ai::client::CompletionClient;
use crate::error::GenerateError;
use crate::input::MIN_TEXT_LEN;
use crate::logger;
use crate::models::{
    GenerationSettings, Question, QuestionSet, MAX_QUESTION_COUNT, MIN_QUESTION_COUNT,
    OPTION_COUNT,
};
use serde_json::Value;

/// Instruction string sent to the model. Demands a bare JSON array with
/// a fixed shape; the model is not guaranteed to comply, which is why
/// `parse_questions` cleans up before validating.
pub fn build_prompt(text: &str, settings: &GenerationSettings) -> String {
    let explanation_key = if settings.include_explanations {
        ", \"explanation\": string"
    } else {
        ""
    };
    format!(
        r#"Generate {count} multiple choice questions from the following text:
{text}

Requirements:
- Difficulty level: {difficulty}
- Each question must have exactly 4 options.
- Output exactly a valid JSON array. Each element in the array must be an object with exactly the following keys and no others:
  "question": string,
  "options": array of exactly 4 strings,
  "correctAnswer": a number between 0 and 3 (randomly chosen for each question){explanation_key}
- Do not output any additional text, comments, or formatting. The output must start with [ and end with ].
"#,
        count = settings.question_count,
        text = text,
        difficulty = settings.difficulty.as_str(),
        explanation_key = explanation_key,
    )
}

/// Full pipeline behind one generation request: length and count gates,
/// prompt build, completion call, response validation.
pub async fn generate_questions(
    client: &CompletionClient,
    text: &str,
    settings: &GenerationSettings,
) -> Result<QuestionSet, GenerateError> {
    if text.chars().count() < MIN_TEXT_LEN {
        return Err(GenerateError::TextTooShort);
    }
    if !(MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(&settings.question_count) {
        return Err(GenerateError::QuestionCountOutOfRange);
    }

    let prompt = build_prompt(text, settings);
    let raw = client.complete(&prompt).await?;
    logger::log(&format!("Raw AI response: {}", raw));

    parse_questions(&raw, settings.include_explanations)
}

/// Validates raw completion text into a QuestionSet. Lenient about the
/// wrapping (fences, typographic quotes), strict about the shape: the
/// first element that violates the schema rejects the whole batch.
pub fn parse_questions(
    content: &str,
    include_explanations: bool,
) -> Result<QuestionSet, GenerateError> {
    let cleaned = strip_code_fence(content);

    // Parse as-is first; quote normalization would corrupt valid JSON
    // that merely contains typographic quotes inside string values.
    let parsed: Value = match serde_json::from_str(&cleaned) {
        Ok(value) => value,
        Err(first_err) => {
            let normalized = normalize_quotes(&cleaned);
            match serde_json::from_str(&normalized) {
                Ok(value) => value,
                Err(_) => {
                    logger::log(&format!(
                        "Failed to parse AI response ({}): {}",
                        first_err, cleaned
                    ));
                    return Err(GenerateError::ResponseParse);
                }
            }
        }
    };

    let Some(items) = parsed.as_array() else {
        return Err(GenerateError::NotAnArray);
    };

    let mut questions = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        questions.push(validate_question(item, index, include_explanations)?);
    }
    Ok(questions)
}

fn validate_question(
    item: &Value,
    index: usize,
    include_explanations: bool,
) -> Result<Question, GenerateError> {
    let invalid = || GenerateError::InvalidQuestion(index);

    let question = item
        .get("question")
        .and_then(Value::as_str)
        .ok_or_else(invalid)?;

    let options = item
        .get("options")
        .and_then(Value::as_array)
        .ok_or_else(invalid)?;
    if options.len() != OPTION_COUNT {
        return Err(invalid());
    }
    let options: Vec<String> = options
        .iter()
        .map(|v| v.as_str().map(str::to_string).ok_or_else(invalid))
        .collect::<Result<_, _>>()?;

    let correct_answer = item
        .get("correctAnswer")
        .and_then(Value::as_u64)
        .ok_or_else(invalid)?;
    if correct_answer as usize >= OPTION_COUNT {
        return Err(invalid());
    }

    let explanation = if include_explanations {
        let text = item
            .get("explanation")
            .and_then(Value::as_str)
            .ok_or_else(invalid)?;
        Some(text.to_string())
    } else {
        // Presence must match the request; an uninvited explanation is
        // dropped rather than surfaced.
        None
    };

    Ok(Question {
        question: question.to_string(),
        options,
        correct_answer: correct_answer as usize,
        explanation,
    })
}

/// Strips a surrounding markdown code fence (with or without a language
/// tag) by dropping the fence lines.
fn strip_code_fence(response: &str) -> String {
    let trimmed = response.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }
    let lines: Vec<&str> = trimmed.lines().collect();
    if lines.len() < 2 {
        return trimmed.to_string();
    }
    let mut body = &lines[1..];
    if body.last().map(|l| l.trim()) == Some("```") {
        body = &body[..body.len() - 1];
    }
    body.join("\n").trim().to_string()
}

/// Replaces curly double and single quotes with their ASCII forms;
/// models frequently emit typographic quotes where JSON needs plain ones.
fn normalize_quotes(text: &str) -> String {
    text.replace('\u{201c}', "\"")
        .replace('\u{201d}', "\"")
        .replace('\u{2018}', "'")
        .replace('\u{2019}', "'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    fn sample_question_json(correct: i64) -> String {
        format!(
            r#"{{"question": "Q?", "options": ["a", "b", "c", "d"], "correctAnswer": {}, "explanation": "because"}}"#,
            correct
        )
    }

    #[test]
    fn test_prompt_requests_exact_shape() {
        let settings = GenerationSettings {
            question_count: 10,
            difficulty: Difficulty::Medium,
            include_explanations: true,
        };
        let text = "x".repeat(150);
        let prompt = build_prompt(&text, &settings);

        assert!(prompt.contains("Generate 10 multiple choice questions"));
        assert!(prompt.contains("Difficulty level: Medium"));
        assert!(prompt.contains("exactly 4 options"));
        assert!(prompt.contains("\"explanation\": string"));
        assert!(prompt.contains("must start with [ and end with ]"));
        assert!(prompt.contains(&text));
    }

    #[test]
    fn test_prompt_omits_explanation_key_when_disabled() {
        let settings = GenerationSettings {
            include_explanations: false,
            ..GenerationSettings::default()
        };
        let prompt = build_prompt("some text", &settings);
        assert!(!prompt.contains("\"explanation\""));
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let json = format!(
            "[{}, {}, {}]",
            sample_question_json(0),
            sample_question_json(3),
            sample_question_json(1)
        );
        let questions = parse_questions(&json, true).unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].correct_answer, 0);
        assert_eq!(questions[1].correct_answer, 3);
        assert_eq!(questions[2].correct_answer, 1);
        assert_eq!(questions[0].explanation.as_deref(), Some("because"));
    }

    #[test]
    fn test_fenced_response_parses_like_unfenced() {
        let bare = format!("[{}]", sample_question_json(2));
        let fenced = format!("```json\n{}\n```", bare);
        assert_eq!(
            parse_questions(&fenced, true).unwrap(),
            parse_questions(&bare, true).unwrap()
        );
    }

    #[test]
    fn test_fence_without_language_tag() {
        let fenced = format!("```\n[{}]\n```", sample_question_json(1));
        assert_eq!(parse_questions(&fenced, true).unwrap().len(), 1);
    }

    #[test]
    fn test_typographic_quotes_as_delimiters_are_normalized() {
        let json = "[{\u{201c}question\u{201d}: \u{201c}Q?\u{201d}, \u{201c}options\u{201d}: [\u{201c}a\u{201d}, \u{201c}b\u{201d}, \u{201c}c\u{201d}, \u{201c}d\u{201d}], \u{201c}correctAnswer\u{201d}: 1}]";
        let questions = parse_questions(json, false).unwrap();
        assert_eq!(questions[0].correct_answer, 1);
    }

    #[test]
    fn test_typographic_quotes_inside_values_survive() {
        let json = "[{\"question\": \"What does \u{201c}idiomatic\u{201d} mean?\", \"options\": [\"a\", \"b\", \"c\", \"d\"], \"correctAnswer\": 0}]";
        let questions = parse_questions(json, false).unwrap();
        assert_eq!(
            questions[0].question,
            "What does \u{201c}idiomatic\u{201d} mean?"
        );
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        assert_eq!(
            parse_questions("Sure! Here are your questions:", false),
            Err(GenerateError::ResponseParse)
        );
    }

    #[test]
    fn test_object_response_is_not_an_array() {
        let json = format!("{{\"items\": [{}]}}", sample_question_json(0));
        assert_eq!(parse_questions(&json, true), Err(GenerateError::NotAnArray));
    }

    #[test]
    fn test_out_of_range_answer_rejects_whole_batch() {
        let json = format!(
            "[{}, {}, {}, {}, {}]",
            sample_question_json(0),
            sample_question_json(1),
            sample_question_json(4),
            sample_question_json(2),
            sample_question_json(3)
        );
        assert_eq!(
            parse_questions(&json, true),
            Err(GenerateError::InvalidQuestion(2))
        );
    }

    #[test]
    fn test_wrong_option_count_rejected() {
        let json = r#"[{"question": "Q?", "options": ["a", "b", "c"], "correctAnswer": 0}]"#;
        assert_eq!(
            parse_questions(json, false),
            Err(GenerateError::InvalidQuestion(0))
        );
    }

    #[test]
    fn test_missing_explanation_rejected_when_required() {
        let json = r#"[{"question": "Q?", "options": ["a", "b", "c", "d"], "correctAnswer": 0}]"#;
        assert_eq!(
            parse_questions(json, true),
            Err(GenerateError::InvalidQuestion(0))
        );
    }

    #[test]
    fn test_uninvited_explanation_is_dropped() {
        let json = format!("[{}]", sample_question_json(0));
        let questions = parse_questions(&json, false).unwrap();
        assert_eq!(questions[0].explanation, None);
    }

    #[test]
    fn test_negative_answer_rejected() {
        let json = r#"[{"question": "Q?", "options": ["a", "b", "c", "d"], "correctAnswer": -1}]"#;
        assert_eq!(
            parse_questions(json, false),
            Err(GenerateError::InvalidQuestion(0))
        );
    }

    #[test]
    fn test_strip_code_fence_passthrough() {
        assert_eq!(strip_code_fence("  [1, 2]  "), "[1, 2]");
    }

    #[test]
    fn test_normalize_quotes() {
        assert_eq!(
            normalize_quotes("\u{201c}a\u{201d} \u{2018}b\u{2019}"),
            "\"a\" 'b'"
        );
    }
}
