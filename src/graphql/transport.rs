//! HTTP Transport
//!
//! JSON-over-POST to the hosted GraphQL endpoint with static headers.

use async_trait::async_trait;
use graphql_client::{QueryBody, Response};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::Value;

use super::{ClientError, Transport};
use crate::config::Config;

pub const ADMIN_SECRET_HEADER: &str = "x-hasura-admin-secret";

pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        reqwest::Url::parse(&config.endpoint)
            .map_err(|e| ClientError::Config(format!("endpoint {:?}: {}", config.endpoint, e)))?;

        let http = reqwest::Client::builder()
            .default_headers(default_headers(config))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn default_headers(config: &Config) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    match config.admin_secret.as_deref().map(HeaderValue::from_str) {
        Some(Ok(mut secret)) => {
            secret.set_sensitive(true);
            headers.insert(ADMIN_SECRET_HEADER, secret);
        }
        Some(Err(_)) => log::warn!("[GRAPHQL] admin secret is not a valid header value, sending without it"),
        None => log::warn!("[GRAPHQL] no admin secret configured, sending without it"),
    }
    headers
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn execute(&self, body: &QueryBody<Value>) -> Result<Response<Value>, ClientError> {
        let response = self.http.post(&self.endpoint).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }
        Ok(response.json::<Response<Value>>().await?)
    }
}
