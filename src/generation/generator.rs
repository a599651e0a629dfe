use std::ops::{Deref, DerefMut};
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::config::ServicesConfig;
use crate::generation::error::{GenerationError, Result};
use crate::generation::payload::{ContextData, build_payload};

/// Text returned to the caller whenever generation fails.
pub const FALLBACK_MESSAGE: &str = "Извините, произошла ошибка при генерации ответа.";

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

/// Chat-completions client that answers product questions.
///
/// The generator owns at most one HTTP client (its session). The session is
/// created lazily by [`TextGenerator::generate_text`] or eagerly by
/// [`TextGenerator::session`], and dropped by [`TextGenerator::close`]. A
/// closed session is never reused: the next call builds a new client.
#[derive(Debug)]
pub struct TextGenerator {
    url: String,
    model: String,
    headers: HeaderMap,
    timeout: Option<Duration>,
    session: Option<reqwest::Client>,
}

impl TextGenerator {
    /// Prepares the fixed header set. Performs no network activity.
    pub fn new(config: &ServicesConfig) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| GenerationError::InvalidApiKey)?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, authorization);

        Ok(Self {
            url: config.api_url.clone(),
            model: config.model.clone(),
            headers,
            timeout: config.timeout_secs.map(Duration::from_secs),
            session: None,
        })
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Opens a session unless one is already open.
    pub fn open(&mut self) -> Result<()> {
        self.ensure_session().map(|_| ())
    }

    /// Opens a session scoped to the returned guard.
    ///
    /// The session is closed when the guard is dropped, on every exit path.
    pub fn session(&mut self) -> Result<GeneratorSession<'_>> {
        self.open()?;
        Ok(GeneratorSession { generator: self })
    }

    /// Drops the session if there is one. Safe to call repeatedly.
    pub fn close(&mut self) {
        if self.session.take().is_some() {
            debug!(url = %self.url, "generation session closed");
        }
    }

    /// Answers `query` using `data`, or returns [`FALLBACK_MESSAGE`].
    ///
    /// Every failure is logged at error level and never reaches the caller.
    pub async fn generate_text(&mut self, query: &str, data: impl Into<ContextData>) -> String {
        match self.try_generate_text(query, data).await {
            Ok(content) => content,
            Err(GenerationError::Api { status, body }) => {
                error!(status = status.as_u16(), body = %body, "generation API returned an error");
                FALLBACK_MESSAGE.to_string()
            }
            Err(err) => {
                error!(error = %err, "text generation failed");
                FALLBACK_MESSAGE.to_string()
            }
        }
    }

    /// Fallible form of [`TextGenerator::generate_text`].
    pub async fn try_generate_text(
        &mut self,
        query: &str,
        data: impl Into<ContextData>,
    ) -> Result<String> {
        let context_data = data.into().normalize();

        info!(url = %self.url, "sending generation request");
        debug!(query, "generation query");
        debug!(data = %context_data, "generation data");

        let payload = build_payload(&self.model, query, &context_data);

        let client = self.ensure_session()?.clone();
        let response = client
            .post(&self.url)
            .headers(self.headers.clone())
            .json(&payload)
            .send()
            .await
            .map_err(GenerationError::Request)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api { status, body });
        }

        let text = response.text().await.map_err(GenerationError::Request)?;
        parse_content(&text)
    }

    fn ensure_session(&mut self) -> Result<&reqwest::Client> {
        let client = match self.session.take() {
            Some(client) => client,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                let client = builder.build().map_err(GenerationError::Client)?;
                debug!(url = %self.url, "generation session opened");
                client
            }
        };
        Ok(&*self.session.insert(client))
    }
}

fn parse_content(body: &str) -> Result<String> {
    let response: ChatCompletionResponse =
        serde_json::from_str(body).map_err(GenerationError::Decode)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(GenerationError::MissingContent)
}

/// Scope guard returned by [`TextGenerator::session`].
#[derive(Debug)]
pub struct GeneratorSession<'a> {
    generator: &'a mut TextGenerator,
}

impl Deref for GeneratorSession<'_> {
    type Target = TextGenerator;

    fn deref(&self) -> &Self::Target {
        self.generator
    }
}

impl DerefMut for GeneratorSession<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.generator
    }
}

impl Drop for GeneratorSession<'_> {
    fn drop(&mut self) {
        self.generator.close();
    }
}
