use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("missing `location` query parameter")]
    MissingLocation,
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    UpstreamStatus(StatusCode),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProxyError::MissingLocation => StatusCode::BAD_REQUEST,
            ProxyError::Upstream(_) | ProxyError::UpstreamStatus(_) => StatusCode::BAD_GATEWAY,
        };
        tracing::warn!(error = %self, "request failed");
        (status, self.to_string()).into_response()
    }
}
