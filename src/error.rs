use thiserror::Error;

/// Everything that can abort a generation request. Each variant carries
/// the exact message shown in the UI; diagnostic detail goes to the
/// debug log instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Please provide at least 100 characters of text.")]
    TextTooShort,

    #[error("Please select between 1 and 20 questions.")]
    QuestionCountOutOfRange,

    #[error("No file selected")]
    NoFileSelected,

    #[error("File size exceeds 10MB limit")]
    FileTooLarge,

    #[error("Invalid file type. Please upload a TXT, PDF, or DOCX file.")]
    InvalidFileType,

    #[error("PDF and DOCX support coming soon. Please paste text directly or use a TXT file.")]
    UnsupportedDocument,

    #[error("Please enter a valid URL")]
    EmptyUrl,

    #[error("Failed to extract content from URL. Please try pasting the text directly.")]
    UrlExtraction,

    #[error("AI service error: {0}")]
    Provider(String),

    #[error("No valid response from AI service")]
    EmptyChoices,

    #[error("No response received from AI service")]
    EmptyContent,

    #[error("Failed to parse AI response. Please try again.")]
    ResponseParse,

    #[error("Invalid response format: not an array")]
    NotAnArray,

    #[error("Invalid question format at index {0}")]
    InvalidQuestion(usize),

    #[error("Authentication failed. Please check your API key.")]
    AuthenticationFailed,

    #[error("Rate limit exceeded. Please try again in a few moments.")]
    RateLimited,

    #[error("An unexpected error occurred. Please try again.")]
    Unexpected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_ui_copy() {
        assert_eq!(
            GenerateError::TextTooShort.to_string(),
            "Please provide at least 100 characters of text."
        );
        assert_eq!(
            GenerateError::AuthenticationFailed.to_string(),
            "Authentication failed. Please check your API key."
        );
        assert_eq!(
            GenerateError::InvalidQuestion(2).to_string(),
            "Invalid question format at index 2"
        );
    }

    #[test]
    fn test_provider_message_is_wrapped() {
        let err = GenerateError::Provider("model overloaded".into());
        assert_eq!(err.to_string(), "AI service error: model overloaded");
    }
}
