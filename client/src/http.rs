//! HTTP implementation of the remote favorites store.
//!
//! Talks to the casa-server API: `GET /favorites`, `POST /favorites/{id}`,
//! `DELETE /favorites/{id}`, authenticated with a bearer token. No retries
//! and no client-side timeout beyond reqwest defaults; error recovery is
//! the controller's job.

use crate::remote::{RemoteError, RemoteResult, RemoteStore};
use async_trait::async_trait;
use casa_engine::{FavoriteProperty, PropertyId, UserId};
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::RwLock;

/// Body of a successful list response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    properties: Vec<FavoriteProperty>,
}

/// Body the server sends with error statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Remote store client backed by reqwest.
pub struct HttpRemoteStore {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpRemoteStore {
    /// Create a client against a base URL, with no token yet.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing reqwest client.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            token: RwLock::new(None),
        }
    }

    /// Install or clear the bearer token. The auth layer owns token
    /// lifecycle; this client only attaches it.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap() = token;
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.read().unwrap().as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Map an error status plus optional body into a typed error.
    ///
    /// `removing` disambiguates 404: on remove it means the pair is absent,
    /// on add it means the property itself does not exist.
    fn map_failure(
        status: StatusCode,
        body: Option<ErrorBody>,
        id: Option<PropertyId>,
        removing: bool,
    ) -> RemoteError {
        match status {
            StatusCode::UNAUTHORIZED => RemoteError::Unauthorized,
            StatusCode::CONFLICT => RemoteError::AlreadyFavorited,
            StatusCode::NOT_FOUND if removing => RemoteError::NotFavorited,
            StatusCode::NOT_FOUND => match id {
                Some(id) => RemoteError::PropertyNotFound(id),
                None => RemoteError::Network(format!("unexpected status {status}")),
            },
            _ => {
                let detail = body
                    .map(|b| b.error)
                    .unwrap_or_else(|| "no error detail".to_string());
                RemoteError::Network(format!("status {status}: {detail}"))
            }
        }
    }

    async fn fail(
        response: reqwest::Response,
        id: Option<PropertyId>,
        removing: bool,
    ) -> RemoteError {
        let status = response.status();
        let body = response.json::<ErrorBody>().await.ok();
        Self::map_failure(status, body, id, removing)
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn list(&self, _user: UserId) -> RemoteResult<Vec<FavoriteProperty>> {
        let request = self.authorize(self.http.get(self.endpoint("/favorites")));
        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::fail(response, None, false).await);
        }

        let body: ListResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::MalformedResponse(e.to_string()))?;
        Ok(body.properties)
    }

    async fn add(&self, _user: UserId, id: PropertyId) -> RemoteResult<()> {
        let url = self.endpoint(&format!("/favorites/{id}"));
        let response = self
            .authorize(self.http.post(url))
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::fail(response, Some(id), false).await);
        }
        Ok(())
    }

    async fn remove(&self, _user: UserId, id: PropertyId) -> RemoteResult<()> {
        let url = self.endpoint(&format!("/favorites/{id}"));
        let response = self
            .authorize(self.http.delete(url))
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::fail(response, Some(id), true).await);
        }
        Ok(())
    }
}
