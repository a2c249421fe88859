//! Cohere-backed website classifier.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::service::{Classifier, ClassifierError, ClassifierResult};
use crate::domain::entities::Classification;

/// Default Cohere v2 chat endpoint.
pub const DEFAULT_API_URL: &str = "https://api.cohere.com/v2/chat";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "command-a-03-2025";

/// Maximum number of response body bytes kept in error messages.
const ERROR_BODY_LIMIT: usize = 200;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: String,
}

/// Classifier that asks a Cohere chat model to describe a website.
///
/// The model is prompted to answer with a JSON object shaped like a catalog
/// entry; the object between the first `{` and the last `}` of the reply is
/// parsed into a [`Classification`].
pub struct CohereClassifier {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl CohereClassifier {
    /// Builds a classifier with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::RequestError`] if the HTTP client cannot be
    /// constructed.
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        temperature: f32,
        timeout: Duration,
    ) -> ClassifierResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ClassifierError::RequestError(format!("Failed to build HTTP client: {}", e))
            })?;

        info!("Classifier enabled (Cohere model {})", model);

        Ok(Self {
            client,
            api_url,
            api_key,
            model,
            temperature,
        })
    }
}

/// Builds the classification prompt for `url`.
pub fn build_prompt(url: &str) -> String {
    format!(
        r#"Act as a website classifier and OSINT metadata formatter. Analyze this website: {url}

Return a structured JSON object with these rules:
1. Replace spaces in values with dashes.
2. rating_count must be 0.
3. cost must be "free", "paid", or "paid,free".
4. api_available must be true or false.
5. Use lowercase for all values.
6. Include relevant user roles.

Format:
```json
{{
  "link": "{url}",
  "name": "<name>",
  "description": "<description>",
  "type": "<main-type>",
  "subtypes": ["subtype1"],
  "tags": ["tag1"],
  "roles": ["role1"],
  "language": "en",
  "cost": "free",
  "requires_account": true,
  "data_types": ["data-type"],
  "api_available": false,
  "metrics": {{"rating": 0.0, "rating_count": 0}}
}}
```"#
    )
}

/// Returns the text between the first `{` and the last `}`, inclusive.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Parses a model reply (possibly wrapped in prose or a code fence).
///
/// # Errors
///
/// Returns [`ClassifierError::ResponseError`] if the reply has no JSON object
/// or the object does not match the [`Classification`] shape.
pub fn parse_classification(reply: &str) -> ClassifierResult<Classification> {
    let object = extract_json_object(reply)
        .ok_or_else(|| ClassifierError::ResponseError("No JSON object in reply".to_string()))?;

    serde_json::from_str(object)
        .map_err(|e| ClassifierError::ResponseError(format!("Invalid classification JSON: {}", e)))
}

fn truncate_body(body: &str) -> String {
    body.chars().take(ERROR_BODY_LIMIT).collect()
}

#[async_trait]
impl Classifier for CohereClassifier {
    async fn classify(&self, url: &str) -> ClassifierResult<Classification> {
        let prompt = build_prompt(url);
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: self.temperature,
        };

        debug!(url, model = %self.model, "Requesting classification");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClassifierError::RequestError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::StatusError {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::ResponseError(e.to_string()))?;

        let reply: String = chat
            .message
            .content
            .into_iter()
            .map(|part| part.text)
            .collect();

        let classification = parse_classification(&reply)?;
        debug!(url, entry_type = %classification.entry_type, "Classification received");

        Ok(classification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_mentions_url_and_shape() {
        let prompt = build_prompt("https://example.com");
        assert!(prompt.contains("Analyze this website: https://example.com"));
        assert!(prompt.contains("\"link\": \"https://example.com\""));
        assert!(prompt.contains("\"metrics\": {\"rating\": 0.0, \"rating_count\": 0}"));
    }

    #[test]
    fn test_extract_json_object_from_code_fence() {
        let reply = "Here you go:\n```json\n{\"name\": \"x\", \"metrics\": {\"rating\": 1}}\n```";
        assert_eq!(
            extract_json_object(reply),
            Some("{\"name\": \"x\", \"metrics\": {\"rating\": 1}}")
        );
    }

    #[test]
    fn test_extract_json_object_missing() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn test_parse_classification_success() {
        let reply = r#"```json
{
  "link": "https://shodan.io",
  "name": "shodan",
  "description": "search-engine-for-devices",
  "type": "search-engine",
  "subtypes": ["iot"],
  "tags": ["scanning"],
  "roles": ["pentester"],
  "language": "en",
  "cost": "paid,free",
  "requires_account": true,
  "data_types": ["banners"],
  "api_available": true,
  "metrics": {"rating": 4.6, "rating_count": 0}
}
```"#;

        let c = parse_classification(reply).unwrap();

        assert_eq!(c.name, "shodan");
        assert_eq!(c.entry_type, "search-engine");
        assert_eq!(c.cost, "paid,free");
        assert!(c.requires_account);
        assert_eq!(c.metrics.rating, 4.6);
    }

    #[test]
    fn test_parse_classification_wrong_shape() {
        let result = parse_classification("{\"tags\": \"not-a-list\"}");
        assert!(matches!(result, Err(ClassifierError::ResponseError(_))));
    }

    #[test]
    fn test_parse_classification_no_object() {
        let result = parse_classification("I cannot access websites.");
        assert!(matches!(result, Err(ClassifierError::ResponseError(_))));
    }

    #[test]
    fn test_truncate_body() {
        let body = "x".repeat(1000);
        assert_eq!(truncate_body(&body).len(), ERROR_BODY_LIMIT);
        assert_eq!(truncate_body("short"), "short");
    }

    #[tokio::test]
    async fn test_classify_invalid_endpoint_is_request_error() {
        let classifier = CohereClassifier::new(
            "key".to_string(),
            "not a url".to_string(),
            DEFAULT_MODEL.to_string(),
            0.3,
            Duration::from_secs(1),
        )
        .unwrap();

        let result = classifier.classify("https://example.com").await;

        assert!(matches!(result, Err(ClassifierError::RequestError(_))));
    }
}
