//! The Opsdeck HTTP client
//!
//! [`ApiClient`] wraps a `reqwest::Client` with the behavior every
//! console request shares: resolution of resource routes against the
//! configured base URL, CSRF token capture and injection, URL-encoded
//! and multipart request bodies, and normalization of every reply into
//! an [`ApiOutcome`](crate::response::ApiOutcome).
//!
//! The client never retries and never queues; concurrent calls are
//! independent and may resolve in any order.

use std::path::PathBuf;
use std::sync::RwLock;

use reqwest::header::SET_COOKIE;
use reqwest::Url;

use opsdeck_core::{ColumnSpec, HttpMethod, RecordMap};

use crate::csrf::{same_origin, token_from_set_cookie, CSRF_HEADER};
use crate::grid::{GridPage, GridQuery};
use crate::response::ApiOutcome;

// ============================================================================
// Request Bodies
// ============================================================================

/// One file part of a multipart submit
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    /// Form field name
    pub name: String,
    /// Local file to upload
    pub path: PathBuf,
}

/// Payload of a multipart submit.
///
/// The wire protocol tunnels the logical method through a POST with a
/// `_method` override part, so multipart updates stay expressible.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultipartBody {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
    pub method_override: Option<HttpMethod>,
}

/// Body of an outgoing request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body (GET, DELETE, bare PATCH)
    Empty,
    /// URL-encoded form pairs
    Form(Vec<(String, String)>),
    /// Multipart payload with file parts
    Multipart(MultipartBody),
}

// ============================================================================
// Errors
// ============================================================================

/// Transport-level failures of the HTTP layer.
///
/// Protocol-level failures (validation errors, flat server errors) are
/// not errors here; they come back inside a normalized `ApiOutcome`.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The base URL or a resolved route is not a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request never produced an HTTP reply
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A file part could not be read before upload
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// A list endpoint replied with a body that is not a grid page
    #[error("Unexpected list response: {0}")]
    UnexpectedBody(String),
}

/// Result type alias using ClientError
pub type ClientResult<T> = Result<T, ClientError>;

// ============================================================================
// ApiClient
// ============================================================================

/// CSRF-aware HTTP client bound to one backend origin.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    csrf_token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a client for the given backend base URL.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(concat!("opsdeck/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url,
            csrf_token: RwLock::new(None),
        })
    }

    /// The backend base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a route against the base URL. Absolute URLs pass through.
    pub fn resolve(&self, route: &str) -> ClientResult<Url> {
        if route.starts_with("http://") || route.starts_with("https://") {
            return Url::parse(route).map_err(|e| ClientError::InvalidUrl(format!("{route}: {e}")));
        }
        self.base_url
            .join(route)
            .map_err(|e| ClientError::InvalidUrl(format!("{route}: {e}")))
    }

    /// Absolute form of a server-relative path, for loading images and
    /// other assets referenced by record payloads.
    pub fn absolute_url(&self, path: &str) -> String {
        match self.resolve(path) {
            Ok(url) => url.to_string(),
            Err(_) => path.to_string(),
        }
    }

    /// The CSRF token captured from the backend, if any
    pub fn csrf_token(&self) -> Option<String> {
        self.csrf_token.read().ok().and_then(|t| t.clone())
    }

    /// Issue a request and normalize its reply.
    ///
    /// Resolves with an outcome on any HTTP status; only transport
    /// failures surface as errors.
    pub async fn request(
        &self,
        method: HttpMethod,
        route: &str,
        body: RequestBody,
    ) -> ClientResult<ApiOutcome> {
        let url = self.resolve(route)?;
        let mut builder = self.http.request(to_reqwest_method(method), url.clone());

        // Unsafe methods echo the CSRF token back, same-origin only.
        // A missing token is omitted, not an error.
        if !method.is_safe() && same_origin(&self.base_url, &url) {
            if let Some(token) = self.csrf_token() {
                builder = builder.header(CSRF_HEADER, token);
            }
        }

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Form(pairs) => builder.form(&pairs),
            RequestBody::Multipart(payload) => builder.multipart(build_multipart(payload).await?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        self.capture_csrf_token(response.headers());
        let text = response.text().await.unwrap_or_default();

        let outcome = ApiOutcome::from_response(status, &text);
        tracing::debug!(
            method = %method,
            url = %url,
            status,
            ok = outcome.ok,
            "request completed"
        );
        Ok(outcome)
    }

    /// GET a single record for form population.
    ///
    /// Returns the outcome as-is; callers only apply `data` when the
    /// outcome is ok.
    pub async fn fetch_record(&self, route: &str) -> ClientResult<ApiOutcome> {
        self.request(HttpMethod::Get, route, RequestBody::Empty).await
    }

    /// Fetch one grid page from a list endpoint.
    pub async fn fetch_grid_page(
        &self,
        route: &str,
        query: &GridQuery,
        columns: &[ColumnSpec],
    ) -> ClientResult<GridPage> {
        let url = self.resolve(route)?;
        let response = self
            .http
            .get(url)
            .query(&query.to_params(columns))
            .send()
            .await?;
        let status = response.status().as_u16();
        self.capture_csrf_token(response.headers());
        let text = response.text().await.unwrap_or_default();

        serde_json::from_str(&text).map_err(|e| {
            ClientError::UnexpectedBody(format!("HTTP {status}: {e}"))
        })
    }

    /// Remember the CSRF token whenever the backend (re)sets it.
    fn capture_csrf_token(&self, headers: &reqwest::header::HeaderMap) {
        for value in headers.get_all(SET_COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            if let Some(token) = token_from_set_cookie(raw) {
                if let Ok(mut slot) = self.csrf_token.write() {
                    *slot = Some(token);
                }
            }
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("has_csrf_token", &self.csrf_token().is_some())
            .finish()
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

/// Assemble a `reqwest` multipart form, reading file parts from disk.
async fn build_multipart(payload: MultipartBody) -> ClientResult<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();

    if let Some(method) = payload.method_override {
        form = form.text("_method", method.as_str());
    }
    for (name, value) in payload.fields {
        form = form.text(name, value);
    }
    for file in payload.files {
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| ClientError::FileRead {
                path: file.path.clone(),
                message: e.to_string(),
            })?;
        let file_name = file
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        form = form.part(
            file.name,
            reqwest::multipart::Part::bytes(bytes).file_name(file_name),
        );
    }

    Ok(form)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_rejects_invalid_base_url() {
        assert!(ApiClient::new("not a url").is_err());
        assert!(ApiClient::new("http://127.0.0.1:8000").is_ok());
    }

    #[test]
    fn test_resolve_relative_and_absolute_routes() {
        let client = ApiClient::new("http://127.0.0.1:8000").unwrap();

        let url = client.resolve("/panel/users/data/").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/panel/users/data/");

        let url = client.resolve("https://cdn.example.com/media/a.png").unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/media/a.png");
    }

    #[test]
    fn test_absolute_url_for_media_paths() {
        let client = ApiClient::new("http://127.0.0.1:8000").unwrap();
        assert_eq!(
            client.absolute_url("/media/avatars/ana.png"),
            "http://127.0.0.1:8000/media/avatars/ana.png"
        );
    }

    #[test]
    fn test_csrf_token_starts_absent() {
        let client = ApiClient::new("http://127.0.0.1:8000").unwrap();
        assert!(client.csrf_token().is_none());
    }

    #[test]
    fn test_capture_csrf_token_from_headers() {
        let client = ApiClient::new("http://127.0.0.1:8000").unwrap();
        let mut headers = reqwest::header::HeaderMap::new();
        headers.append(SET_COOKIE, "sessionid=s1; Path=/".parse().unwrap());
        headers.append(SET_COOKIE, "csrftoken=tok123; Path=/; SameSite=Lax".parse().unwrap());

        client.capture_csrf_token(&headers);
        assert_eq!(client.csrf_token().as_deref(), Some("tok123"));
    }

    #[tokio::test]
    async fn test_build_multipart_with_method_override() {
        // text-only payload; file parts are covered by the FileRead error path
        let payload = MultipartBody {
            fields: vec![("name".to_string(), "Ana".to_string())],
            files: vec![],
            method_override: Some(HttpMethod::Put),
        };
        assert!(build_multipart(payload).await.is_ok());
    }

    #[tokio::test]
    async fn test_build_multipart_missing_file_fails() {
        let payload = MultipartBody {
            fields: vec![],
            files: vec![FilePart {
                name: "avatar".to_string(),
                path: PathBuf::from("/definitely/not/here.png"),
            }],
            method_override: None,
        };
        let err = build_multipart(payload).await.unwrap_err();
        assert!(matches!(err, ClientError::FileRead { .. }));
    }
}
