use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::AiSettings;
use crate::error::GenerateError;
use crate::models::{Question, QuizConfig};

pub const TOOL_NAME: &str = "create_mcqs";

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    fn new(role: &str, content: String) -> Self {
        ChatMessage { role: role.to_string(), content }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: ToolFunction,
}

#[derive(Debug, Deserialize)]
struct ToolFunction {
    name: String,
    /// JSON object encoded as a string.
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct QuestionList {
    questions: Vec<Question>,
}

/// Calls the chat-completion gateway with a forced `create_mcqs` tool call.
#[derive(Clone)]
pub struct QuestionGenerator {
    client: Client,
    settings: AiSettings,
}

impl QuestionGenerator {
    pub fn new(settings: AiSettings) -> Self {
        QuestionGenerator {
            client: Client::new(),
            settings,
        }
    }

    pub async fn generate(&self, config: &QuizConfig) -> Result<Vec<Question>, GenerateError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(GenerateError::MissingApiKey)?;

        let body = json!({
            "model": self.settings.model,
            "messages": build_messages(config),
            "tools": [tool_definition()],
            "tool_choice": { "type": "function", "function": { "name": TOOL_NAME } },
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.settings.base_url.trim_end_matches('/')))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => GenerateError::RateLimited,
                StatusCode::PAYMENT_REQUIRED => GenerateError::PaymentRequired,
                _ => {
                    let body = response.text().await.unwrap_or_default();
                    log::error!("AI gateway error: {} {}", status, body);
                    GenerateError::Upstream { status: status.as_u16(), body }
                }
            });
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|_| GenerateError::InvalidResponse)?;
        let questions = extract_questions(completion)?;
        log::info!(
            "Generated {} questions about {:?} ({})",
            questions.len(),
            config.topic,
            config.difficulty
        );
        Ok(questions)
    }
}

pub fn system_prompt(config: &QuizConfig) -> String {
    format!(
        "You are an expert quiz creator. Generate exactly {count} multiple choice questions about \"{topic}\" at {difficulty} difficulty level.\n\
         \n\
         For {difficulty} difficulty:\n\
         - Easy: Basic concepts, straightforward questions, commonly known facts\n\
         - Medium: Requires understanding of concepts, some analysis needed\n\
         - Hard: Complex scenarios, requires deep knowledge, tricky distractors\n\
         \n\
         Each question must have exactly 4 options with only one correct answer.",
        count = config.count,
        topic = config.topic,
        difficulty = config.difficulty,
    )
}

pub fn build_messages(config: &QuizConfig) -> Vec<ChatMessage> {
    vec![
        ChatMessage::new("system", system_prompt(config)),
        ChatMessage::new(
            "user",
            format!("Generate {} MCQs about {}.", config.count, config.topic),
        ),
    ]
}

/// Function-calling schema forcing the Question shape.
pub fn tool_definition() -> Value {
    json!({
        "type": "function",
        "function": {
            "name": TOOL_NAME,
            "description": "Create multiple choice questions",
            "parameters": {
                "type": "object",
                "properties": {
                    "questions": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "question": { "type": "string", "description": "The question text" },
                                "options": {
                                    "type": "array",
                                    "items": { "type": "string" },
                                    "description": "Exactly 4 answer options"
                                },
                                "correctAnswer": {
                                    "type": "number",
                                    "description": "Index of correct answer (0-3)"
                                },
                                "explanation": {
                                    "type": "string",
                                    "description": "Brief explanation of why the answer is correct"
                                }
                            },
                            "required": ["question", "options", "correctAnswer", "explanation"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["questions"],
                "additionalProperties": false
            }
        }
    })
}

fn extract_questions(completion: ChatCompletion) -> Result<Vec<Question>, GenerateError> {
    let call = completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.tool_calls)
        .and_then(|calls| calls.into_iter().next())
        .filter(|call| call.function.name == TOOL_NAME)
        .ok_or(GenerateError::InvalidResponse)?;

    let list: QuestionList = serde_json::from_str(&call.function.arguments)
        .map_err(|e| GenerateError::MalformedQuestions(e.to_string()))?;

    for (index, question) in list.questions.iter().enumerate() {
        question
            .validate()
            .map_err(|source| GenerateError::InvalidQuestion { number: index + 1, source })?;
    }

    Ok(list.questions)
}
