use crate::config::Config;
use crate::error::{Error, Result};
use parking_lot::RwLock;
use reqwest::{multipart::Form, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Shared HTTP client for the marketplace REST API.
///
/// Clones share the connection pool and the default `Authorization` header,
/// so setting a token through one handle applies to every service built from
/// the same client.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    bearer: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.http_timeout).build()?;

        let mut base_url = config.api_base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            bearer: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn set_bearer(&self, token: &str) {
        *self.bearer.write() = Some(token.to_string());
    }

    pub fn clear_bearer(&self) {
        *self.bearer.write() = None;
    }

    pub fn bearer(&self) -> Option<String> {
        self.bearer.read().clone()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.execute(Method::GET, path, |req| req).await?;
        decode(response).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self.execute(Method::POST, path, |req| req.json(body)).await?;
        decode(response).await
    }

    /// POST whose response body is irrelevant (the backend answers some
    /// actions with a bare message string).
    pub async fn post_unit<B: Serialize>(&self, path: &str, body: Option<&B>) -> Result<()> {
        self.execute(Method::POST, path, |req| match body {
            Some(body) => req.json(body),
            None => req,
        })
        .await?;
        Ok(())
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self.execute(Method::PUT, path, |req| req.json(body)).await?;
        decode(response).await
    }

    pub async fn put_unit(&self, path: &str) -> Result<()> {
        self.execute(Method::PUT, path, |req| req).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute(Method::DELETE, path, |req| req).await?;
        Ok(())
    }

    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<()> {
        self.execute(Method::POST, path, |req| req.multipart(form)).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Internal(format!("Invalid request path {}: {}", path, e)))
    }

    async fn execute<F>(&self, method: Method, path: &str, build: F) -> Result<Response>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url(path)?;
        let mut request = self.client.request(method.clone(), url);
        if let Some(token) = self.bearer() {
            request = request.bearer_auth(token);
        }

        let response = build(request).send().await?;
        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "API call");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::from_status(status, &body));
        }
        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
