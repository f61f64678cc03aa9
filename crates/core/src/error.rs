use std::error::Error as StdError;
use std::fmt::{self, Display};

use reloop_model::{ErrorKind, ModelProviderError};

/// The error type of a loop run.
#[derive(Debug)]
pub enum Error {
    /// The payload or the iteration ceiling violates a precondition. No
    /// request was sent.
    InvalidPayload(String),
    /// The provider failed: transport errors, classified API errors and
    /// undecodable bodies all end up here, unchanged.
    Provider(Box<dyn ModelProviderError>),
    /// The provider answered, but without a usable message.
    MalformedResponse(String),
    /// The model kept asking for tools until the iteration ceiling.
    BudgetExceeded {
        /// The ceiling that was hit.
        max_iterations: usize,
    },
}

impl Error {
    /// Returns the provider-level classification of this error.
    ///
    /// Errors raised by the loop itself (`InvalidPayload` and
    /// `BudgetExceeded`) have no such classification.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Provider(err) => Some(err.kind()),
            Error::MalformedResponse(_) => Some(ErrorKind::MalformedResponse),
            Error::InvalidPayload(_) | Error::BudgetExceeded { .. } => None,
        }
    }

    /// Returns `true` if the iteration ceiling was hit.
    #[inline]
    pub fn is_budget_exceeded(&self) -> bool {
        matches!(self, Error::BudgetExceeded { .. })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPayload(reason) => {
                write!(f, "invalid payload: {reason}")
            }
            Error::Provider(err) => write!(f, "{err}"),
            Error::MalformedResponse(reason) => {
                write!(f, "malformed response: {reason}")
            }
            Error::BudgetExceeded { max_iterations } => write!(
                f,
                "reached max iterations ({max_iterations}) without finalizing an answer"
            ),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Provider(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct RateLimited;

    impl Display for RateLimited {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("rate_limit_error: slow down")
        }
    }

    impl StdError for RateLimited {}

    impl ModelProviderError for RateLimited {
        fn kind(&self) -> ErrorKind {
            ErrorKind::RateLimit
        }
    }

    #[test]
    fn test_provider_error_is_transparent() {
        let err = Error::Provider(Box::new(RateLimited));
        assert_eq!(err.kind(), Some(ErrorKind::RateLimit));
        assert_eq!(err.to_string(), "rate_limit_error: slow down");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_loop_errors_have_no_kind() {
        let err = Error::BudgetExceeded { max_iterations: 3 };
        assert!(err.is_budget_exceeded());
        assert_eq!(err.kind(), None);
        assert_eq!(
            err.to_string(),
            "reached max iterations (3) without finalizing an answer"
        );
        assert_eq!(
            Error::MalformedResponse("no choices".to_owned()).kind(),
            Some(ErrorKind::MalformedResponse)
        );
    }
}
