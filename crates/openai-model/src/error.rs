use std::error::Error as StdError;
use std::fmt::{self, Display};

use reloop_model::{ErrorKind, ModelProviderError};
use serde::Deserialize;
use serde_json::Value;

/// Error type for [`OpenAIProvider`](crate::OpenAIProvider).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    message: String,
    kind: ErrorKind,
    error_type: Option<String>,
    code: Option<String>,
    param: Option<String>,
    status: Option<u16>,
}

impl Error {
    pub(crate) fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
            error_type: None,
            code: None,
            param: None,
            status: None,
        }
    }

    pub(crate) fn transport(err: reqwest::Error) -> Self {
        Self::new(format!("error making request: {err}"), ErrorKind::Transport)
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::new(message, ErrorKind::MalformedResponse)
    }

    /// Builds a classified error from a non-success response.
    ///
    /// Both the `{"error": {...}}` envelope and a bare error object are
    /// accepted. When the body carries no error type, the status code
    /// decides the kind.
    pub fn from_response(status: u16, body: &str) -> Self {
        let Some(api_err) = parse_error_body(body) else {
            let mut err = Self::new(
                format!("request failed with status {status}: {body}"),
                ErrorKind::Unknown,
            );
            err.status = Some(status);
            return err;
        };

        let error_type = api_err.error_type.filter(|ty| !ty.is_empty());
        let kind = match &error_type {
            Some(ty) => ErrorKind::from_type_str(ty),
            None => ErrorKind::from_status(status),
        };
        Self {
            message: api_err.message,
            kind,
            error_type: Some(
                error_type.unwrap_or_else(|| kind.as_str().to_owned()),
            ),
            code: api_err.code.and_then(value_to_string),
            param: api_err.param,
            status: Some(status),
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the error type string reported by the remote side, if any.
    #[inline]
    pub fn error_type(&self) -> Option<&str> {
        self.error_type.as_deref()
    }

    /// Returns the machine-readable error code, if any.
    #[inline]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Returns the request parameter the error refers to, if any.
    #[inline]
    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }

    /// Returns the HTTP status code, if a response was received.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(error_type) = &self.error_type else {
            return write!(f, "{}", self.message);
        };
        match &self.code {
            Some(code) => {
                write!(f, "{error_type}: {} (code: {code})", self.message)
            }
            None => write!(f, "{error_type}: {}", self.message),
        }
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default, rename = "type")]
    error_type: Option<String>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    param: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

fn parse_error_body(body: &str) -> Option<ApiErrorBody> {
    if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(body) {
        return Some(envelope.error);
    }
    serde_json::from_str::<ApiErrorBody>(body).ok()
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
