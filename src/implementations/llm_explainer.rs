use async_trait::async_trait;
use log::{ debug, info, warn };
use serde::{ Deserialize, Serialize };

use crate::errors::ExplanationError;
use crate::implementations::config::ExplainerConfig;
use crate::implementations::explanation::format_clause_value;
use crate::models::assessment::RiskAssessment;
use crate::traits::explanation_strategy::ExplanationStrategy;

const ANTHROPIC_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_MODEL: &str = "claude-3-haiku-20240307";
const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str =
    "You are a leveraged finance credit analyst reviewing facility agreements against LMA standard terms.";

const EXPLANATION_PROMPT: &str = r#"A facility agreement sets the {{clause}} at {{value}}.
The LMA market standard is {{standard}}. Our scoring rates this {{level}} risk ({{severity}}).

In at most two sentences, explain to a lender what this means for their credit protection.
Do not repeat the numbers more than once and do not give a recommendation."#;

/// OpenAI chat request and response types
#[derive(Debug, Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: usize,
}

/// Explanation strategy backed by a hosted LLM.
///
/// # API Keys
/// The key comes from `ExplainerConfig::api_key` or, when unset, from
/// `ANTHROPIC_API_KEY` / `OPENAI_API_KEY`. Construction fails without one,
/// which is how the engine decides AI explanations are unavailable.
#[derive(Clone)]
pub struct LlmExplanationStrategy {
    config: ExplainerConfig,
    provider: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl LlmExplanationStrategy {
    pub fn new(config: &ExplainerConfig) -> Result<Self, ExplanationError> {
        let (provider, api_key) = config.get_api_key()?;

        let http_client = reqwest::Client
            ::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ExplanationError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config: config.clone(),
            provider,
            api_key,
            http_client,
        })
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    fn build_prompt(&self, assessment: &RiskAssessment) -> String {
        let params = [
            ("clause", assessment.clause_type.name().to_string()),
            ("value", format_clause_value(assessment.clause_type, assessment.extracted_value)),
            ("standard", format_clause_value(assessment.clause_type, assessment.standard_value)),
            ("level", assessment.risk_level.to_string()),
            ("severity", assessment.severity.clone()),
        ];

        let mut result = EXPLANATION_PROMPT.to_string();
        for (key, value) in params.iter() {
            let placeholder = format!("{{{{{}}}}}", key);
            result = result.replace(&placeholder, value);
        }
        result
    }

    fn endpoint_and_model(&self) -> (String, String) {
        let (default_endpoint, default_model) = match self.provider.as_str() {
            "openai" => (OPENAI_ENDPOINT, OPENAI_MODEL),
            _ => (ANTHROPIC_ENDPOINT, ANTHROPIC_MODEL),
        };
        (
            self.config.api_endpoint.clone().unwrap_or_else(|| default_endpoint.to_string()),
            self.config.model.clone().unwrap_or_else(|| default_model.to_string()),
        )
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<serde_json::Value, ExplanationError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                warn!("Explanation request timed out");
            }
            if e.is_connect() {
                warn!("Connection error - check network connectivity");
            }
            ExplanationError::NetworkError(e.to_string())
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text().await
                .unwrap_or_else(|_| "Failed to get error message".to_string());
            return Err(ExplanationError::HttpError { status, message });
        }

        let response_text = response
            .text().await
            .map_err(|e| ExplanationError::ParseError(e.to_string()))?;
        debug!("Response length: {} characters", response_text.len());

        serde_json::from_str(&response_text).map_err(|e| ExplanationError::ParseError(format!("Invalid JSON response: {}", e)))
    }

    async fn call_anthropic(&self, prompt: &str) -> Result<String, ExplanationError> {
        let (endpoint, model) = self.endpoint_and_model();
        let request =
            serde_json::json!({
            "model": model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "system": SYSTEM_PROMPT,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let response_json = self.send(
            self.http_client
                .post(&endpoint)
                .header("Content-Type", "application/json")
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", "2023-06-01")
                .json(&request)
        ).await?;

        response_json["content"]
            .as_array()
            .and_then(|items| items.first())
            .and_then(|item| item["text"].as_str())
            .map(str::to_string)
            .ok_or_else(|| ExplanationError::ParseError("Missing text in Anthropic response content".to_string()))
    }

    async fn call_openai(&self, prompt: &str) -> Result<String, ExplanationError> {
        let (endpoint, model) = self.endpoint_and_model();
        let request = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                }
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response_json = self.send(
            self.http_client
                .post(&endpoint)
                .header("Content-Type", "application/json")
                .header("Authorization", format!("Bearer {}", self.api_key))
                .json(&request)
        ).await?;

        response_json["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .and_then(|choice| choice["message"]["content"].as_str())
            .map(str::to_string)
            .ok_or_else(|| ExplanationError::ParseError("No choices in API response".to_string()))
    }
}

#[async_trait]
impl ExplanationStrategy for LlmExplanationStrategy {
    fn name(&self) -> &str {
        "llm"
    }

    async fn explain(&self, assessment: &RiskAssessment) -> Result<String, ExplanationError> {
        let prompt = self.build_prompt(assessment);
        info!("Requesting {} explanation from {}", assessment.clause_type, self.provider);
        debug!("Prompt length: {} characters", prompt.len());

        match self.provider.as_str() {
            "openai" => self.call_openai(&prompt).await,
            _ => self.call_anthropic(&prompt).await,
        }
    }
}
