//! Main Melodia API client.

use crate::admin::AdminClient;
use crate::auth::AuthClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, HttpError, Result};
use crate::favorites::FavoritesClient;
use crate::songs::SongsClient;
use crate::token::TokenStore;
use crate::users::UserClient;
use melodia_core::HealthStatus;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Client for the Melodia backend.
///
/// Every request reads the bearer token from the [`TokenStore`] at send
/// time, so a login performed through one clone is seen by all clones.
/// The client never logs out on its own; a 401 is returned to the caller.
///
/// # Example
///
/// ```ignore
/// use melodia_client::{ClientConfig, MemoryTokenStore, MusicClient};
/// use std::sync::Arc;
///
/// let client = MusicClient::new(&ClientConfig::default(), Arc::new(MemoryTokenStore::new()))?;
/// let songs = client.songs().list().await?;
/// println!("{} songs", songs.len());
/// ```
#[derive(Clone)]
pub struct MusicClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl MusicClient {
    /// Create a new client with the given configuration and token storage.
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let base_url = normalize_base_url(&config.api_base_url)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(format!("Melodia/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    /// Get the backend base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token storage shared by this client.
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Whether a bearer token is currently stored.
    pub fn has_token(&self) -> bool {
        self.tokens.load().is_some()
    }

    /// Absolute URL for `path`. Absolute URLs pass through unchanged.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Issue a request.
    ///
    /// Attaches the bearer token when one is stored and JSON headers when a
    /// body is present. Any non-2xx response becomes [`HttpError`].
    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Response> {
        let mut builder = self.builder(method, path);
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        self.send(builder).await
    }

    /// `GET` and decode a JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path, None).await?;
        decode_json(response, path).await
    }

    /// `GET` a resource that may legitimately be unavailable to anonymous
    /// callers: 401 reads as `None` instead of an error.
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        match self.request(Method::GET, path, None).await {
            Ok(response) => decode_json(response, path).await.map(Some),
            Err(ClientError::Http(e)) if e.status == 401 => {
                debug!(path = %path, "Unauthorized optional read; treating as no data");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Send a JSON body and decode a JSON response.
    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|e| ClientError::ParseError(e.to_string()))?;
        let response = self.request(method, path, Some(body)).await?;
        decode_json(response, path).await
    }

    /// Send a request whose response body is irrelevant.
    pub async fn send_empty(&self, method: Method, path: &str, body: Option<Value>) -> Result<()> {
        self.request(method, path, body).await.map(|_| ())
    }

    /// Liveness of the backend and its dependencies.
    pub async fn health(&self) -> Result<HealthStatus> {
        self.get_json("/api/health").await
    }

    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(self)
    }

    pub fn songs(&self) -> SongsClient<'_> {
        SongsClient::new(self)
    }

    pub fn favorites(&self) -> FavoritesClient<'_> {
        FavoritesClient::new(self)
    }

    pub fn users(&self) -> UserClient<'_> {
        UserClient::new(self)
    }

    pub fn admin(&self) -> AdminClient<'_> {
        AdminClient::new(self)
    }

    /// Request builder with the bearer token attached when present.
    pub(crate) fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!(method = %method, url = %url, "Sending request");

        let builder = self.http.request(method, &url);
        match self.tokens.load() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and turn non-2xx responses into [`HttpError`].
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!(status = %status, "Request failed");
            Err(HttpError::new(status, body).into())
        }
    }
}

/// Decode a JSON response body, naming the path in parse errors.
pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response, path: &str) -> Result<T> {
    let text = response.text().await?;
    serde_json::from_str(&text)
        .map_err(|e| ClientError::ParseError(format!("Failed to parse response of {}: {}", path, e)))
}

/// Percent-encode a single path segment.
pub(crate) fn segment(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Percent-encode a query value.
pub(crate) fn query_value(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn normalize_base_url(raw: &str) -> Result<String> {
    if raw.trim().is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let trimmed = raw.trim().trim_end_matches('/');
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    url::Url::parse(trimmed).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MemoryTokenStore;

    fn client(url: &str) -> Result<MusicClient> {
        MusicClient::new(&ClientConfig::new(url), Arc::new(MemoryTokenStore::new()))
    }

    #[test]
    fn test_url_validation() {
        assert!(client("https://example.com").is_ok());
        assert!(client("http://localhost:8080").is_ok());

        assert!(matches!(client(""), Err(ClientError::InvalidUrl(_))));
        assert!(matches!(client("not-a-url"), Err(ClientError::InvalidUrl(_))));
        assert!(matches!(client("ftp://example.com"), Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_url_normalization() {
        let client = client("https://example.com///").unwrap();
        assert_eq!(client.base_url(), "https://example.com");
    }

    #[test]
    fn test_path_joining() {
        let client = client("http://localhost:8080/").unwrap();
        assert_eq!(client.url("/api/songs"), "http://localhost:8080/api/songs");
        assert_eq!(client.url("api/songs"), "http://localhost:8080/api/songs");
        assert_eq!(
            client.url("https://cdn.example.com/a.mp3"),
            "https://cdn.example.com/a.mp3"
        );
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("42"), "42");
        assert_eq!(segment("a b/c"), "a%20b%2Fc");
        assert_eq!(query_value("rock & roll"), "rock+%26+roll");
    }
}
