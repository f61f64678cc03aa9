use std::pin::Pin;
use std::sync::Arc;

use reloop_model::{
    CompletionRequest, CompletionResponse, ModelProvider, ModelProviderError,
    Usage,
};
use tracing::Instrument;

use crate::Error;
use crate::payload::CompletionRequestPayload;

type SendCompletionResult =
    Result<CompletionResponse, Box<dyn ModelProviderError>>;
type BoxedSendCompletionFuture =
    Pin<Box<dyn Future<Output = SendCompletionResult> + Send>>;
#[rustfmt::skip]
type HandlerFn = Arc<
    dyn Fn(CompletionRequest) -> BoxedSendCompletionFuture + Send + Sync
>;

/// A wrapper around a model provider that provides a type-erased interface
/// for the loop.
#[derive(Clone)]
pub struct ModelClient {
    handler_fn: HandlerFn,
}

impl ModelClient {
    #[inline]
    pub fn new<P: ModelProvider + 'static>(provider: P) -> Self {
        // We have to erase the type `P`, since `ModelClient` doesn't have a
        // generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = provider.send_completion(&req);
            Box::pin(
                async move {
                    trace!("got a request: {:?}", req);
                    match fut.await {
                        Ok(resp) => {
                            trace!("got a response: {resp:?}");
                            Ok(resp)
                        }
                        Err(err) => {
                            error!("got an error: {err:?}");
                            Err(Box::new(err) as Box<dyn ModelProviderError>)
                        }
                    }
                }
                .instrument(trace_span!("model client req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends the payload's history and appends the first choice's message
    /// to it.
    ///
    /// On failure the payload is left untouched.
    pub async fn send_completion(
        &self,
        payload: &mut CompletionRequestPayload,
    ) -> Result<Option<Usage>, Error> {
        let resp = (self.handler_fn)(payload.to_request())
            .await
            .map_err(Error::Provider)?;

        let usage = resp.usage;
        let Some(choice) = resp.choices.into_iter().next() else {
            return Err(Error::MalformedResponse(
                "no choices in response".to_owned(),
            ));
        };
        let Some(message) = choice.message else {
            return Err(Error::MalformedResponse(
                "no message in the first choice".to_owned(),
            ));
        };
        payload.add_message(message);
        Ok(usage)
    }
}
