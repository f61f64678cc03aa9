use mime::Mime;
use reqwest::{Response, header};
use serde::de::DeserializeOwned;

use crate::Error;

/// Reads the whole body of `resp` and decodes it as `T`.
///
/// Non-success statuses are turned into classified API errors before any
/// decoding happens.
pub async fn decode_json<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned);

    let body = resp.text().await.map_err(|err| {
        Error::new(
            format!("error reading response body: {err}"),
            reloop_model::ErrorKind::Transport,
        )
    })?;
    trace!("got response ({status}): {body}");

    if !status.is_success() {
        return Err(Error::from_response(status.as_u16(), &body));
    }

    if !is_json_content_type(content_type.as_deref()) {
        // Some compatible servers mislabel their responses, so only note it.
        debug!("unexpected content type: {content_type:?}");
    }

    serde_json::from_str(&body).map_err(|err| {
        Error::malformed(format!("error unmarshaling response body: {err}"))
    })
}

fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|v| v.parse().ok())
        .map(|m: Mime| {
            m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON)
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_content_types() {
        assert!(is_json_content_type(Some("application/json")));
        assert!(is_json_content_type(Some(
            "application/json; charset=utf-8"
        )));
        assert!(is_json_content_type(Some("application/problem+json")));
        assert!(!is_json_content_type(Some("text/event-stream")));
        assert!(!is_json_content_type(None));
    }
}
