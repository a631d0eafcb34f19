//! API client for communicating with the foliosync REST backend.
//!
//! This module provides the `ApiClient` struct for making authenticated
//! requests against the portfolio-governance API. The collection
//! synchronizers drive it through the generic JSON verbs; `login` is the
//! one endpoint with its own shape.

use std::time::Duration;

use reqwest::{header, Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::auth::SessionData;

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Token endpoint path, relative to the API base URL.
const TOKEN_PATH: &str = "auth/token";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

/// API client for the foliosync backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client pointed at the given base URL
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Exchange credentials for a bearer token and return the session.
    ///
    /// Sends form-encoded `username`/`password` to the token endpoint; the
    /// response carries `{"access_token": ..., "token_type": "bearer"}`.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionData, ApiError> {
        let url = self.endpoint(TOKEN_PATH);
        debug!(username, "authenticating");

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let token: TokenResponse = Self::read_json(response, TOKEN_PATH).await?;

        if let Some(ref kind) = token.token_type {
            if !kind.eq_ignore_ascii_case("bearer") {
                warn!(token_type = %kind, "unexpected token type from auth endpoint");
            }
        }

        Ok(SessionData::new(token.access_token, username))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token {
            Some(ref token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Check if a response is successful, converting a non-2xx status and
    /// its body into a `ServerRejected`.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "request rejected");
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Read a 2xx body as text and validate it against the expected shape.
    /// A shape mismatch is a first-class `MalformedResponse`, not a silent
    /// rendering gap.
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        path: &str,
    ) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::MalformedResponse(format!("{}: {}", path, e)))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        debug!(%url, "GET");

        let response = self.authorized(self.client.get(&url)).send().await?;
        let response = Self::check_response(response).await?;
        Self::read_json(response, path).await
    }

    pub(crate) async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        debug!(%url, "POST");

        let response = self
            .authorized(self.client.post(&url))
            .json(body)
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        Self::read_json(response, path).await
    }

    pub(crate) async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        debug!(%url, "PUT");

        let response = self
            .authorized(self.client.put(&url))
            .json(body)
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        Self::read_json(response, path).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.endpoint(path);
        debug!(%url, "DELETE");

        let response = self.authorized(self.client.delete(&url)).send().await?;
        Self::check_response(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(Url::parse(base).unwrap()).unwrap()
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let api = client("https://api.example.com");
        assert_eq!(
            api.endpoint("initiatives"),
            "https://api.example.com/initiatives"
        );

        let api = client("https://api.example.com/v1/");
        assert_eq!(
            api.endpoint("initiatives/7"),
            "https://api.example.com/v1/initiatives/7"
        );
    }

    #[test]
    fn test_parse_token_response() {
        let json = r#"{"access_token": "abc.def.ghi", "token_type": "bearer"}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "abc.def.ghi");
        assert_eq!(token.token_type.as_deref(), Some("bearer"));

        // token_type is optional
        let json = r#"{"access_token": "abc"}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert!(token.token_type.is_none());
    }
}
