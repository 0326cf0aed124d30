use crate::app::ports::{CatalogProvider, SubmissionSink};
use crate::config::{AppProfile, Config, HttpMethod};
use crate::error::{PicksError, Result};
use crate::payload::SubmissionPayload;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Thin wrapper around `reqwest::Client` for the pick API.
///
/// Serves both as the catalog provider and the submission sink. The bearer
/// token, if any, is fixed at construction.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
    catalog_path: String,
    catalog_method: HttpMethod,
    submit_path: String,
    token: Option<String>,
}

impl HttpApi {
    pub fn new(base_url: &str, profile: &AppProfile, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            catalog_path: profile.catalog_path.clone(),
            catalog_method: profile.catalog_method,
            submit_path: profile.submit_path.clone(),
            token: None,
        })
    }

    pub fn from_config(config: &Config, profile: &AppProfile) -> Result<Self> {
        let api = Self::new(
            &config.api.base_url,
            profile,
            config.api.timeout_seconds.map(Duration::from_secs),
        )?;
        Ok(api.with_token(config.api.token.clone()))
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: HttpMethod, path: &str) -> RequestBuilder {
        let url = self.url(path);
        let builder = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };
        let builder = builder.header(ACCEPT, "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            body
        };
        Err(PicksError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl<T> CatalogProvider<T> for HttpApi
where
    T: DeserializeOwned + Send + 'static,
{
    #[instrument(skip(self), fields(path = %self.catalog_path))]
    async fn fetch_catalog(&self) -> Result<Vec<T>> {
        let request = self.request(self.catalog_method, &self.catalog_path);
        let response = Self::check(request.send().await?).await?;
        let bytes = response.bytes().await?;
        let items: Vec<T> = serde_json::from_slice(&bytes)?;
        info!("Fetched {} catalog items", items.len());
        Ok(items)
    }
}

#[async_trait]
impl SubmissionSink for HttpApi {
    #[instrument(skip(self, payload), fields(path = %self.submit_path, selections = payload.len()))]
    async fn submit(&self, payload: &SubmissionPayload) -> Result<()> {
        let response = self
            .request(HttpMethod::Post, &self.submit_path)
            .json(payload)
            .send()
            .await?;
        let response = Self::check(response).await?;
        debug!("Submission accepted with status {}", response.status());
        Ok(())
    }
}
