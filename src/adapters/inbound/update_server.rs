//! Metric Update HTTP Server
//!
//! Accepts `POST /update/{kind}/{name}/{value}` with a `text/plain` content
//! type and applies the update through the [`UpdateService`].

use crate::application::UpdateService;
use crate::domain::errors::UpdateError;
use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Path prefix every update request must carry.
pub const UPDATE_PREFIX: &str = "/update/";

const REQUIRED_CONTENT_TYPE: &str = "text/plain";

/// The path did not decompose into an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("Invalid URL format")]
    MalformedPath,
    #[error("Metric name is required")]
    MissingName,
}

/// Reasons an update request is rejected.
///
/// Each variant maps to exactly one status code; the display text is sent
/// back as the plain-text response body.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Only POST requests are allowed!")]
    MethodNotAllowed,

    #[error("Only text/plain headers are allowed!")]
    UnsupportedMediaType,

    #[error("Invalid URL escape")]
    InvalidPathEncoding,

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Update(#[from] UpdateError),
}

impl RequestError {
    /// Raw value text when the rejection was a value parse failure.
    pub fn raw_value(&self) -> Option<&str> {
        match self {
            Self::Update(UpdateError::Parse(err)) => Some(err.raw()),
            _ => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::InvalidPathEncoding => StatusCode::BAD_REQUEST,
            Self::Route(_) => StatusCode::NOT_FOUND,
            Self::Update(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Percent-decode a request path before it is routed or split.
///
/// `%2F` decodes to `/` and therefore adds a segment. Malformed escapes and
/// escapes that decode to invalid UTF-8 are rejected.
pub fn decode_request_path(raw: &str) -> Result<Cow<'_, str>, RequestError> {
    if !has_valid_escapes(raw) {
        return Err(RequestError::InvalidPathEncoding);
    }

    percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| RequestError::InvalidPathEncoding)
}

fn has_valid_escapes(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        match bytes.get(i + 1..i + 3) {
            Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
            _ => return false,
        }
    }
    true
}

/// Segments of an update path, borrowed from the request URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdatePath<'a> {
    pub kind: &'a str,
    pub name: &'a str,
    pub value: &'a str,
}

/// Split `/update/{kind}/{name}/{value}` into its three segments.
///
/// Kind and value may be empty here; they are rejected later by the update
/// service. An empty name is a routing failure.
pub fn parse_update_path(path: &str) -> Result<UpdatePath<'_>, RouteError> {
    let rest = path.strip_prefix(UPDATE_PREFIX).unwrap_or(path);
    let mut segments = rest.split('/');

    let (Some(kind), Some(name), Some(value), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(RouteError::MalformedPath);
    };

    if name.is_empty() {
        return Err(RouteError::MissingName);
    }

    Ok(UpdatePath { kind, name, value })
}

/// Run the full validation chain for one request and apply the update.
///
/// `path` must already be percent-decoded.
///
/// Checks run in a fixed order (method, content type, path, name, kind and
/// value) and the first failure wins. Nothing is written unless every check
/// passes.
pub fn handle_update(
    service: &UpdateService,
    method: &Method,
    headers: &HeaderMap,
    path: &str,
) -> Result<(), RequestError> {
    if *method != Method::POST {
        return Err(RequestError::MethodNotAllowed);
    }

    let content_type = headers.get(CONTENT_TYPE).map(|v| v.as_bytes());
    if content_type != Some(REQUIRED_CONTENT_TYPE.as_bytes()) {
        return Err(RequestError::UnsupportedMediaType);
    }

    let update = parse_update_path(path)?;
    service.apply(update.kind, update.name, update.value)?;
    Ok(())
}

/// Update server state.
#[derive(Clone)]
pub struct UpdateState {
    pub service: Arc<UpdateService>,
}

impl UpdateState {
    pub fn new(service: Arc<UpdateService>) -> Self {
        Self { service }
    }
}

/// Build the router serving the `/update/` prefix.
///
/// The handler is installed as the fallback for every method and path so
/// that method and content-type checks run before the path segments are
/// inspected. The path is percent-decoded first; paths outside the prefix
/// get a bare 404.
pub fn build_router(state: UpdateState) -> Router {
    Router::new()
        .fallback(update_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// HTTP server accepting metric updates.
pub struct UpdateServer {
    listen_addr: String,
    state: UpdateState,
}

impl UpdateServer {
    pub fn new(listen_addr: String, service: Arc<UpdateService>) -> Self {
        Self {
            listen_addr,
            state: UpdateState::new(service),
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Bind the configured address and serve until the process exits.
    ///
    /// A bind failure is returned to the caller, which treats it as fatal.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run(&self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.listen_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve(&self, listener: TcpListener) -> anyhow::Result<()> {
        tracing::info!("metrics update endpoint listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

async fn update_handler(
    State(state): State<UpdateState>,
    method: Method,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let path = match decode_request_path(uri.path()) {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(%method, path = uri.path(), error = %e, "update rejected");
            return e.into_response();
        }
    };

    if !path.starts_with(UPDATE_PREFIX) {
        return StatusCode::NOT_FOUND.into_response();
    }

    match handle_update(&state.service, &method, &headers, &path) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => {
            tracing::debug!(
                %method,
                path = %path,
                error = %e,
                raw_value = e.raw_value(),
                "update rejected"
            );
            e.into_response()
        }
    }
}
