//! OpenAI-compatible chat completion client

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::base::{Message, Responder, ResponderError, ResponderResult};

use async_trait::async_trait;

/// Chat completion API request format
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f64,
}

/// Chat completion API response format
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint
pub struct ChatClient {
    client: Client,
    api_base: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl ChatClient {
    /// Create a new chat completion client
    pub fn new(
        api_key: Option<String>,
        api_base: Option<String>,
        model: String,
        max_tokens: u32,
        temperature: f64,
    ) -> Self {
        let api_base = api_base
            .and_then(|base| {
                let base = base.trim().trim_end_matches('/').to_string();
                if base.is_empty() {
                    None
                } else {
                    Some(base)
                }
            })
            .unwrap_or_else(|| "http://localhost:4000".to_string());

        Self {
            client: Client::builder()
                .http1_only() // Force HTTP/1.1 to avoid issues with some local servers
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_base,
            api_key,
            model,
            max_tokens,
            temperature,
        }
    }

    fn apply_headers(&self, mut req_builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(api_key) = &self.api_key {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", api_key));
        }
        req_builder
    }

    /// Extract the reply text from a parsed API response
    fn parse_response(response: ChatCompletionResponse) -> ResponderResult<String> {
        let choice = response
            .choices
            .first()
            .ok_or_else(|| ResponderError::InvalidResponse("No choices in response".to_string()))?;

        choice
            .message
            .content
            .clone()
            .ok_or_else(|| ResponderError::InvalidResponse("No content in response".to_string()))
    }
}

#[async_trait]
impl Responder for ChatClient {
    async fn respond(&self, messages: Vec<Message>) -> ResponderResult<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!(
            "Sending chat request to {} with model {}",
            self.api_base, self.model
        );

        let url = format!("{}/chat/completions", self.api_base);
        let req_builder = self.apply_headers(self.client.post(&url).json(&request));

        let response = req_builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ResponderError::ApiError(format!("{}: {}", status, body)));
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        Self::parse_response(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::ServerGuard) -> ChatClient {
        ChatClient::new(
            Some("test-key".to_string()),
            Some(server.url()),
            "test-model".to_string(),
            256,
            0.7,
        )
    }

    #[test]
    fn test_parse_response_extracts_content() {
        let response = ChatCompletionResponse {
            choices: vec![Choice {
                message: ResponseMessage {
                    content: Some("hello there".to_string()),
                },
            }],
        };
        assert_eq!(ChatClient::parse_response(response).unwrap(), "hello there");
    }

    #[test]
    fn test_parse_response_rejects_empty_choices() {
        let response = ChatCompletionResponse { choices: vec![] };
        assert!(matches!(
            ChatClient::parse_response(response),
            Err(ResponderError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_response_rejects_missing_content() {
        let response = ChatCompletionResponse {
            choices: vec![Choice {
                message: ResponseMessage { content: None },
            }],
        };
        assert!(matches!(
            ChatClient::parse_response(response),
            Err(ResponderError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_respond_round_trip() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"I'm listening."}}]}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let reply = client
            .respond(vec![Message::user("I feel anxious today")])
            .await
            .unwrap();

        assert_eq!(reply, "I'm listening.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_respond_surfaces_api_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .respond(vec![Message::user("hello")])
            .await
            .unwrap_err();

        assert!(matches!(err, ResponderError::ApiError(_)));
        assert!(err.to_string().contains("upstream exploded"));
    }
}
