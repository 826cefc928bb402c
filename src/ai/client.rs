use crate::error::GenerateError;
use openrouter_api::types::chat::{ChatCompletionRequest, Message};

pub const DEFAULT_MODEL: &str = "deepseek/deepseek-r1:free";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;
pub const DEFAULT_PRESENCE_PENALTY: f32 = 0.2;
pub const DEFAULT_FREQUENCY_PENALTY: f32 = 0.3;

/// Sampling configuration sent with every completion request.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            presence_penalty: DEFAULT_PRESENCE_PENALTY,
            frequency_penalty: DEFAULT_FREQUENCY_PENALTY,
        }
    }
}

/// Completion client owning its provider connection and sampling
/// configuration. Constructed where it is used, never shared globally.
#[derive(Debug)]
pub struct CompletionClient {
    client: openrouter_api::OpenRouterClient<openrouter_api::Ready>,
    config: ModelConfig,
}

impl CompletionClient {
    /// Reads the API key from OPENROUTER_API_KEY. A missing or malformed
    /// key is reported as the authentication failure the UI knows about.
    pub fn new(config: ModelConfig) -> Result<Self, GenerateError> {
        let client = openrouter_api::OpenRouterClient::quick()
            .map_err(|_| GenerateError::AuthenticationFailed)?;
        Ok(Self { client, config })
    }

    /// One chat-completion round trip: the prompt goes out as a single
    /// user message, the first choice's text comes back. No retries.
    pub async fn complete(&self, prompt: &str) -> Result<String, GenerateError> {
        let messages = vec![Message::text("user", prompt)];

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            provider: None,
            stream: None,
            response_format: None,
            tools: None,
            tool_choice: None,
            models: None,
            transforms: None,
            route: None,
            user: None,
            max_tokens: Some(self.config.max_tokens),
            temperature: Some(self.config.temperature),
            top_p: None,
            top_k: None,
            frequency_penalty: Some(self.config.frequency_penalty),
            presence_penalty: Some(self.config.presence_penalty),
            repetition_penalty: None,
            min_p: None,
            top_a: None,
            seed: None,
            stop: None,
            logit_bias: None,
            logprobs: None,
            top_logprobs: None,
            prediction: None,
            parallel_tool_calls: None,
            verbosity: None,
        };

        let response = self
            .client
            .chat()
            .map_err(|e| classify_api_error(&e.to_string()))?
            .chat_completion(request)
            .await
            .map_err(|e| classify_api_error(&e.to_string()))?;

        let Some(choice) = response.choices.first() else {
            return Err(GenerateError::EmptyChoices);
        };

        let content = match &choice.message.content {
            openrouter_api::MessageContent::Text(text) => text.clone(),
            openrouter_api::MessageContent::Parts(parts) => {
                let text_parts: Vec<String> = parts
                    .iter()
                    .filter_map(|p| {
                        if let openrouter_api::ContentPart::Text(tc) = p {
                            Some(tc.text.clone())
                        } else {
                            None
                        }
                    })
                    .collect();
                text_parts.join("\n")
            }
        };

        if content.is_empty() {
            return Err(GenerateError::EmptyContent);
        }
        Ok(content)
    }
}

/// Maps a provider error message onto the error taxonomy. HTTP status
/// codes only reach us embedded in the message text, so 401/429 are
/// detected by substring.
fn classify_api_error(message: &str) -> GenerateError {
    if message.contains("401") {
        GenerateError::AuthenticationFailed
    } else if message.contains("429") {
        GenerateError::RateLimited
    } else {
        GenerateError::Provider(message.to_string())
    }
}
