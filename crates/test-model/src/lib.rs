//! A local fake model for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use reloop_model::{
    CompletionRequest, CompletionResponse, ErrorKind, ModelProvider,
    ModelProviderError,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct Script {
    responses: VecDeque<PresetResponse>,
    fallback: Option<PresetResponse>,
    requests: Vec<CompletionRequest>,
}

/// A local fake model for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how the
/// model should respond to each request. Responses are consumed in order,
/// one per request. Once the script runs out, the repeated response (if
/// any) is used, otherwise a transport error is returned.
///
/// Clones share the same script and request log, so a test can keep a clone
/// around for inspection after handing the provider to a client.
///
/// # Note
///
/// This type is not optimized for production use, every request is copied
/// into the log. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestModelProvider {
    script: Arc<Mutex<Script>>,
    delay: Option<Duration>,
}

impl TestModelProvider {
    /// Appends a response to the script.
    #[inline]
    pub fn add_response(&mut self, preset: PresetResponse) {
        self.lock().responses.push_back(preset);
    }

    /// Uses `preset` for every request after the script runs out.
    #[inline]
    pub fn repeat_response(&mut self, preset: PresetResponse) {
        self.lock().fallback = Some(preset);
    }

    /// Delays every response by `duration`.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns how many requests have been sent.
    #[inline]
    pub fn call_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Returns a copy of every request sent so far.
    #[inline]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.lock().requests.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        // A panicking test may poison the lock, the script is still usable.
        self.script.lock().unwrap_or_else(|err| err.into_inner())
    }

    fn next_response(&self, req: &CompletionRequest) -> Option<PresetResponse> {
        let mut script = self.lock();
        script.requests.push(req.clone());
        script
            .responses
            .pop_front()
            .or_else(|| script.fallback.clone())
    }
}

impl ModelProvider for TestModelProvider {
    type Error = crate::Error;

    fn send_completion(
        &self,
        req: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, Self::Error>> + Send + 'static
    {
        let preset = self.next_response(req);
        let delay = self.delay;
        async move {
            if let Some(delay) = delay {
                sleep(delay).await;
            }
            match preset {
                Some(PresetResponse::Message { message, usage }) => {
                    let mut resp = CompletionResponse::with_message(message);
                    resp.usage = usage;
                    Ok(resp)
                }
                Some(PresetResponse::NoChoices) => {
                    Ok(CompletionResponse::default())
                }
                Some(PresetResponse::Failure(failure)) => Err(Error {
                    message: "preset failure",
                    kind: failure.kind(),
                }),
                None => Err(Error {
                    message: "no more responses",
                    kind: ErrorKind::Transport,
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use reloop_model::{Message, ToolCall};

    use super::*;

    fn request(messages: Vec<Message>) -> CompletionRequest {
        CompletionRequest {
            messages,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_send_completion() {
        let mut provider = TestModelProvider::default();
        provider.add_response(PresetResponse::tool_calls([
            ToolCall::function("tool:1", "read_file", r#"{"path":"todo.txt"}"#),
        ]));
        provider.add_response(PresetResponse::text("Hello, world!"));

        let req = request(vec![Message::user("Hi")]);
        let resp = provider.send_completion(&req).await.unwrap();
        let message = resp.choices[0].message.as_ref().unwrap();
        assert_eq!(message.tool_calls[0].function.name, "read_file");

        let resp = provider.send_completion(&req).await.unwrap();
        let message = resp.choices[0].message.as_ref().unwrap();
        assert_eq!(message.content, "Hello, world!");
        assert!(!message.has_tool_calls());

        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_script() {
        let provider = TestModelProvider::default();
        let err = provider
            .send_completion(&request(vec![Message::user("Hi")]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_repeat_and_shared_log() {
        let mut provider = TestModelProvider::default();
        provider.repeat_response(PresetResponse::NoChoices);
        let observer = provider.clone();

        for i in 0..3 {
            let req = request(vec![Message::user(format!("#{i}"))]);
            let resp = provider.send_completion(&req).await.unwrap();
            assert!(resp.choices.is_empty());
        }

        let requests = observer.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[2].messages[0].content, "#2");
    }

    #[tokio::test]
    async fn test_failure_preset() {
        let mut provider = TestModelProvider::default();
        provider.add_response(PresetResponse::failure(
            PresetFailure::ServiceUnavailable,
        ));
        let err = provider
            .send_completion(&request(vec![Message::user("Hi")]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
    }
}
