use reloop_model::Usage;
use serde::{Deserialize, Serialize};

/// A request for the embedding of a single input text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// The embedding model. Falls back to the configured model when empty.
    pub model: String,
    /// The text to embed.
    pub input: String,
}

impl EmbeddingRequest {
    /// Creates a request.
    #[inline]
    pub fn new<M: Into<String>, I: Into<String>>(model: M, input: I) -> Self {
        Self {
            model: model.into(),
            input: input.into(),
        }
    }
}

/// The response of the embeddings endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// The object type tag, `"list"` for OpenAI.
    #[serde(default)]
    pub object: String,
    /// One entry per input.
    #[serde(default)]
    pub data: Vec<EmbeddingObject>,
    /// Token accounting.
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// A single embedding vector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingObject {
    /// The object type tag, `"embedding"` for OpenAI.
    #[serde(default)]
    pub object: String,
    /// Position of the input this vector belongs to.
    #[serde(default)]
    pub index: u32,
    /// The vector.
    pub embedding: Vec<f64>,
    /// The model that produced it, not every server reports it.
    #[serde(default)]
    pub model: Option<String>,
}
