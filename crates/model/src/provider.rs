use std::error::Error;

use crate::error::ErrorKind;
use crate::request::CompletionRequest;
use crate::response::CompletionResponse;

/// The error type for a model provider.
pub trait ModelProviderError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that represents a model provider, the entry for sending
/// completion requests to a remote model.
///
/// Once the provider is created, it should behave like a stateless object.
/// It can still have internal state, but callers should not rely on it,
/// and the provider should be prepared for being dropped anytime.
pub trait ModelProvider: Send + Sync {
    /// The error type that may be returned by the provider.
    type Error: ModelProviderError;

    /// Sends one completion request and waits for the complete response.
    ///
    /// Retrying, if any, happens inside this call. Callers treat every
    /// returned error as final.
    fn send_completion(
        &self,
        req: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, Self::Error>> + Send + 'static;
}
