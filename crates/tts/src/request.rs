use axum::body::Body;
use serde::de::DeserializeOwned;

use crate::error::TtsError;

/// Body limit for speech requests (1 MiB)
const BODY_LIMIT_BYTES: usize = 1 << 20;

/// Extractor for JSON request bodies
///
/// A body without a content type is parsed as JSON. Rejections use the same
/// `{"detail": ...}` body as every other error.
pub struct ExtractPayload<T>(pub T);

impl<S, T: DeserializeOwned> axum::extract::FromRequest<S> for ExtractPayload<T>
where
    S: Send + Sync,
{
    type Rejection = TtsError;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        if let Some(content_type) = parts.headers.get(http::header::CONTENT_TYPE)
            && !is_json(content_type)
        {
            return Err(TtsError::UnsupportedMediaType);
        }

        let bytes = axum::body::to_bytes(body, BODY_LIMIT_BYTES).await.map_err(|err| {
            if std::error::Error::source(&err).is_some_and(|source| source.is::<http_body_util::LengthLimitError>()) {
                TtsError::PayloadTooLarge(BODY_LIMIT_BYTES)
            } else {
                TtsError::InvalidRequest(format!("Failed to read request body: {err}"))
            }
        })?;

        serde_json::from_slice::<T>(&bytes)
            .map(Self)
            .map_err(|e| TtsError::InvalidRequest(format!("Failed to parse request body: {e}")))
    }
}

/// `application/json`, with or without parameters such as `charset`
fn is_json(value: &http::HeaderValue) -> bool {
    value
        .to_str()
        .ok()
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}
