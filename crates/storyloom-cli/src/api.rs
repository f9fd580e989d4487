//! Storyloom API Client

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::{multipart, Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storyloom::{
    ExpandOutlineRequest, ExpandedStory, Language, StoryFeedback, StoryFeedbackRequest, StoryIdea,
    StoryIdeasRequest, StoryOutline, RATE_LIMIT_MESSAGE,
};

/// API Client for Storyloom
pub struct StoryloomClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

// ============================================
// API Request/Response Types
// ============================================

#[derive(Debug, Serialize)]
pub struct SaveStoryRequest<'a> {
    pub title_zh: &'a str,
    pub title_en: &'a str,
    pub content_zh: &'a str,
    pub content_en: &'a str,
    pub outline: &'a StoryOutline,
}

#[derive(Debug, Serialize)]
pub struct SaveFeedbackRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<&'a str>,
    pub feedback: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct SavedStoriesResponse {
    pub zh_id: Uuid,
    pub en_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct StorySummary {
    pub id: Uuid,
    pub title: String,
    pub snippet: String,
    pub language: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct StoryResponse {
    pub id: Uuid,
    pub title: String,
    pub outline: StoryOutline,
    pub content: String,
    pub language: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CollectedStory {
    pub id: Uuid,
    pub source_story_id: Option<Uuid>,
    pub title: String,
    pub snippet: String,
    pub language: String,
    pub copied_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ImageUploadResponse {
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
pub struct DiagnosticResponse {
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
    pub diagnostic: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    message: String,
}

/// Human readable message for a failed API response
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<ErrorBody>(body) {
        tracing::debug!("API error code: {}", err.error);
        return err.message;
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return RATE_LIMIT_MESSAGE.to_string();
    }
    if status == StatusCode::UNAUTHORIZED {
        return "Unauthorized. Run 'storyloom login' to set your API key.".to_string();
    }
    format!("API error ({}): {}", status, body)
}

impl StoryloomClient {
    /// Create a new API client
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(|k| k.to_string()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let resp = self
            .authorized(request)
            .send()
            .await
            .context("Failed to connect to Storyloom API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("{}", error_message(status, &body));
        }

        Ok(resp)
    }

    async fn send_json<T: serde::de::DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        self.send(request)
            .await?
            .json()
            .await
            .context("Failed to parse response")
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    // ---- Flows ----

    pub async fn story_ideas(
        &self,
        themes: &str,
        keywords: &str,
        language: Language,
    ) -> Result<StoryIdea> {
        let request = StoryIdeasRequest {
            themes: themes.to_string(),
            keywords: keywords.to_string(),
            language,
        };
        self.send_json(self.client.post(self.url("/api/flows/story-ideas")).json(&request))
            .await
    }

    pub async fn expand_outline(&self, outline: &str) -> Result<ExpandedStory> {
        let request = ExpandOutlineRequest::new(outline);
        self.send_json(
            self.client
                .post(self.url("/api/flows/expand-outline"))
                .json(&request),
        )
        .await
    }

    pub async fn story_feedback(&self, story_draft: &str) -> Result<StoryFeedback> {
        let request = StoryFeedbackRequest::new(story_draft);
        self.send_json(
            self.client
                .post(self.url("/api/flows/story-feedback"))
                .json(&request),
        )
        .await
    }

    pub async fn check_generation(&self) -> Result<DiagnosticResponse> {
        self.send_json(self.client.get(self.url("/api/diagnostics/generation")))
            .await
    }

    // ---- Stories ----

    pub async fn list_stories(&self, language: Option<Language>) -> Result<Vec<StorySummary>> {
        let mut request = self.client.get(self.url("/api/stories"));
        if let Some(language) = language {
            request = request.query(&[("language", language.code())]);
        }
        self.send_json(request).await
    }

    pub async fn get_story(&self, id: Uuid) -> Result<StoryResponse> {
        self.send_json(self.client.get(self.url(&format!("/api/stories/{}", id))))
            .await
    }

    pub async fn save_story(&self, request: &SaveStoryRequest<'_>) -> Result<SavedStoriesResponse> {
        self.send_json(self.client.post(self.url("/api/stories")).json(request))
            .await
    }

    pub async fn save_feedback(
        &self,
        request: &SaveFeedbackRequest<'_>,
    ) -> Result<SavedStoriesResponse> {
        self.send_json(
            self.client
                .post(self.url("/api/stories/feedback"))
                .json(request),
        )
        .await
    }

    pub async fn delete_story(&self, id: Uuid) -> Result<()> {
        self.send(self.client.delete(self.url(&format!("/api/stories/{}", id))))
            .await?;
        Ok(())
    }

    pub async fn collect_story(&self, id: Uuid) -> Result<CollectedStory> {
        self.send_json(
            self.client
                .post(self.url(&format!("/api/stories/{}/collect", id))),
        )
        .await
    }

    pub async fn upload_image(
        &self,
        id: Uuid,
        file_name: String,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<ImageUploadResponse> {
        let part = multipart::Part::bytes(data)
            .file_name(file_name)
            .mime_str(content_type)
            .context("Invalid content type")?;
        let form = multipart::Form::new().part("file", part);

        self.send_json(
            self.client
                .put(self.url(&format!("/api/stories/{}/image", id)))
                .multipart(form),
        )
        .await
    }

    pub async fn list_collection(&self) -> Result<Vec<CollectedStory>> {
        self.send_json(self.client.get(self.url("/api/collections")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_server_message() {
        let body = r#"{"error": "rate_limited", "message": "You have hit the API rate limit. Please wait a moment and try again."}"#;
        assert_eq!(
            error_message(StatusCode::TOO_MANY_REQUESTS, body),
            RATE_LIMIT_MESSAGE
        );

        let body = r#"{"error": "invalid_input", "message": "'outline' is required."}"#;
        assert_eq!(
            error_message(StatusCode::UNPROCESSABLE_ENTITY, body),
            "'outline' is required."
        );
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(
            error_message(StatusCode::TOO_MANY_REQUESTS, "slow down"),
            RATE_LIMIT_MESSAGE
        );
        assert!(error_message(StatusCode::UNAUTHORIZED, "").contains("storyloom login"));
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, "Story not found"),
            "API error (404 Not Found): Story not found"
        );
    }
}
