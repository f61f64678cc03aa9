use std::fmt::{self, Display};

/// The kind of error that occurred while talking to a model provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request was rejected as invalid.
    InvalidRequest,
    /// The credentials were missing or rejected.
    Authentication,
    /// The model provider is rate limited.
    RateLimit,
    /// The service is temporarily unavailable.
    ServiceUnavailable,
    /// The requested resource (usually the model) does not exist.
    NotFound,
    /// The provider reported an error that could not be classified.
    Unknown,
    /// The request never produced an HTTP response.
    Transport,
    /// The response could not be understood.
    MalformedResponse,
}

impl ErrorKind {
    /// Classifies an error type string reported by the remote side.
    ///
    /// Unrecognized strings map to [`ErrorKind::Unknown`].
    pub fn from_type_str(ty: &str) -> Self {
        match ty {
            "invalid_request_error" => ErrorKind::InvalidRequest,
            "authentication_error" => ErrorKind::Authentication,
            "rate_limit_error" => ErrorKind::RateLimit,
            "service_unavailable" => ErrorKind::ServiceUnavailable,
            "not_found" => ErrorKind::NotFound,
            _ => ErrorKind::Unknown,
        }
    }

    /// Classifies a non-success HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::InvalidRequest,
            401 => ErrorKind::Authentication,
            404 => ErrorKind::NotFound,
            429 => ErrorKind::RateLimit,
            503 => ErrorKind::ServiceUnavailable,
            _ => ErrorKind::Unknown,
        }
    }

    /// Returns the error type string used on the wire for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidRequest => "invalid_request_error",
            ErrorKind::Authentication => "authentication_error",
            ErrorKind::RateLimit => "rate_limit_error",
            ErrorKind::ServiceUnavailable => "service_unavailable",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Unknown => "unknown_error",
            ErrorKind::Transport => "transport_error",
            ErrorKind::MalformedResponse => "malformed_response",
        }
    }

    /// Returns `true` if sending the same request again may succeed.
    ///
    /// Only providers consult this. The loop engine never retries.
    #[inline]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ErrorKind::RateLimit
                | ErrorKind::ServiceUnavailable
                | ErrorKind::Transport
        )
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(ErrorKind::from_status(400), ErrorKind::InvalidRequest);
        assert_eq!(ErrorKind::from_status(401), ErrorKind::Authentication);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(429), ErrorKind::RateLimit);
        assert_eq!(ErrorKind::from_status(503), ErrorKind::ServiceUnavailable);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::Unknown);
    }

    #[test]
    fn test_type_str_matches_wire_names() {
        for kind in [
            ErrorKind::InvalidRequest,
            ErrorKind::Authentication,
            ErrorKind::RateLimit,
            ErrorKind::ServiceUnavailable,
            ErrorKind::NotFound,
        ] {
            assert_eq!(ErrorKind::from_type_str(kind.as_str()), kind);
        }
        assert_eq!(ErrorKind::from_type_str("server_error"), ErrorKind::Unknown);
    }

    #[test]
    fn test_transient_kinds() {
        assert!(ErrorKind::RateLimit.is_transient());
        assert!(ErrorKind::Transport.is_transient());
        assert!(!ErrorKind::Authentication.is_transient());
        assert!(!ErrorKind::MalformedResponse.is_transient());
    }
}
