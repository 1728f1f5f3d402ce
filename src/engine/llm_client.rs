use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::engine::prompt_builder::PromptBuilder;
use crate::error::RequestError;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        }
    }
}

impl GenerateContentResponse {
    pub fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()
            .map(|p| p.text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// The single outbound call. Swapped for a fake in tests.
pub trait HttpTransport: Send {
    fn post_json(&self, url: &Url, body: &GenerateContentRequest) -> Result<HttpResponse, RequestError>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, RequestError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RequestError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn post_json(&self, url: &Url, body: &GenerateContentRequest) -> Result<HttpResponse, RequestError> {
        let resp = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .map_err(|e| RequestError::Transport(e.without_url().to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| RequestError::Transport(e.without_url().to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

pub struct StoryRequester<T> {
    transport: T,
    endpoint: String,
    api_key: Option<String>,
}

impl StoryRequester<ReqwestTransport> {
    pub fn from_config(config: &AppConfig) -> Result<Self, RequestError> {
        let transport = ReqwestTransport::new(config.timeout_secs.map(Duration::from_secs))?;
        Ok(Self::new(transport, config.endpoint.clone(), config.api_key.clone()))
    }
}

impl<T: HttpTransport> StoryRequester<T> {
    pub fn new(transport: T, endpoint: String, api_key: Option<String>) -> Self {
        Self {
            transport,
            endpoint,
            api_key,
        }
    }

    /// `{endpoint}?key={api_key}`, key left out when none is configured.
    pub fn request_url(&self) -> Result<Url, RequestError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| RequestError::Transport(format!("invalid endpoint: {e}")))?;
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }

    pub fn generate_story(&self, keywords: &str) -> Result<String, RequestError> {
        let words = keywords.trim();
        if words.is_empty() {
            return Err(RequestError::Validation);
        }

        let url = self.request_url()?;
        let request = GenerateContentRequest::from_prompt(PromptBuilder::story(words));

        debug!(endpoint = %self.endpoint, "requesting story");
        let resp = self.transport.post_json(&url, &request)?;

        if !(200..300).contains(&resp.status) {
            return Err(RequestError::Status { status: resp.status });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&resp.body)
            .map_err(|e| RequestError::MalformedResponse(e.to_string()))?;

        let story = parsed
            .first_text()
            .ok_or_else(|| RequestError::MalformedResponse("no candidate text".into()))?;

        info!(chars = story.len(), "story generated");
        Ok(story)
    }
}
