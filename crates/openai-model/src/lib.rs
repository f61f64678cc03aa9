//! A model provider for OpenAI-compatible APIs.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod config;
mod embedding;
mod error;
mod proto;
mod response;
mod retry;

use std::sync::Arc;

use reloop_model::{CompletionRequest, CompletionResponse, ModelProvider};
use reqwest::{Client, header};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub use config::{OpenAIConfig, OpenAIConfigBuilder};
pub use embedding::{EmbeddingObject, EmbeddingRequest, EmbeddingResponse};
pub use error::Error;

/// OpenAI-compatible model provider.
#[derive(Clone, Debug)]
pub struct OpenAIProvider {
    client: Client,
    config: Arc<OpenAIConfig>,
}

impl OpenAIProvider {
    /// Creates a new `OpenAIProvider` with the given configuration.
    #[inline]
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Returns the configuration of this provider.
    #[inline]
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    /// Fetches the embedding vector of `req.input`.
    pub async fn get_embedding(
        &self,
        req: &EmbeddingRequest,
    ) -> Result<Vec<f64>, Error> {
        let mut req = req.clone();
        if req.model.is_empty() {
            req.model = self.config.model.clone();
        }

        let url = self.config.endpoint("/embeddings");
        let resp: EmbeddingResponse = retry::with_retry(
            self.config.max_retries,
            self.config.retry_interval,
            || post_json(&self.client, &self.config, &url, &req),
        )
        .await?;

        let Some(first) = resp.data.into_iter().next() else {
            return Err(Error::malformed("no embedding data in response"));
        };
        Ok(first.embedding)
    }
}

impl ModelProvider for OpenAIProvider {
    type Error = Error;

    fn send_completion(
        &self,
        req: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, Self::Error>> + Send + 'static
    {
        let openai_req = proto::create_request(req, &self.config);
        let client = self.client.clone();
        let config = Arc::clone(&self.config);

        async move {
            let url = config.endpoint("/chat/completions");
            let resp: proto::ChatCompletionResponse = retry::with_retry(
                config.max_retries,
                config.retry_interval,
                || post_json(&client, &config, &url, &openai_req),
            )
            .await?;
            trace!(
                "got completion {:?} with {} choice(s)",
                resp.id,
                resp.choices.len()
            );
            Ok(resp.into())
        }
    }
}

async fn post_json<B, R>(
    client: &Client,
    config: &OpenAIConfig,
    url: &str,
    body: &B,
) -> Result<R, Error>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let resp = client
        .post(url)
        .header(header::AUTHORIZATION, format!("Bearer {}", config.api_key))
        .header(header::CONTENT_TYPE, "application/json")
        .json(body)
        .send()
        .await
        .map_err(Error::transport)?;
    response::decode_json(resp).await
}
