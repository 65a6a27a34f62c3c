/*
[INPUT]:  API token and client configuration
[OUTPUT]: Result tables from blocking queries
[POS]:    HTTP layer - synchronous client
[UPDATE]: When changing the blocking query path
*/

use reqwest::Url;
use reqwest::blocking::Client;
use std::time::Duration;

use crate::http::client::{decode_response, log_request};
use crate::http::{ClientConfig, Credentials, Result};
use crate::types::{ApiName, DataFrame, Params, Query};

/// Blocking client for Tushare Pro.
///
/// Each query blocks the calling thread for one round trip. Do not use it
/// from inside an async runtime; use [`AsyncDataApi`](crate::AsyncDataApi)
/// there.
#[derive(Debug)]
pub struct DataApi {
    http_client: Client,
    credentials: Credentials,
    endpoint: Url,
    timeout: Duration,
}

impl DataApi {
    /// Create a client with default configuration
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_config(token, ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(token: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let endpoint = config.endpoint()?;
        let http_client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http_client,
            credentials: Credentials::new(token),
            endpoint,
            timeout: config.timeout,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Query `api_name`, optionally restricted to the comma-delimited `fields`
    pub fn query(&self, api_name: &str, fields: &str, params: Params) -> Result<DataFrame> {
        let query = Query::new(api_name).fields(fields).params(params);
        self.execute(&query)
    }

    /// Send a prepared query
    pub fn execute(&self, query: &Query) -> Result<DataFrame> {
        let envelope = self.credentials.envelope(query);
        log_request(&envelope);

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(&envelope)
            .send()?;
        let body = response.text()?;
        decode_response(query.api_name(), &body)
    }

    /// Start a call to any endpoint by name
    pub fn call(&self, api_name: impl Into<String>) -> BlockingCall<'_> {
        BlockingCall {
            api: self,
            query: Query::new(api_name),
        }
    }

    /// Start a call to a well-known endpoint
    pub fn endpoint(&self, api_name: ApiName) -> BlockingCall<'_> {
        self.call(api_name.as_str())
    }
}

/// Pending call built from [`DataApi::call`]; finish it with `send`.
#[derive(Debug)]
#[must_use = "a call does nothing until sent"]
pub struct BlockingCall<'a> {
    api: &'a DataApi,
    query: Query,
}

impl BlockingCall<'_> {
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.query = self.query.fields(fields);
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.query = self.query.param(key, value);
        self
    }

    pub fn params(mut self, params: Params) -> Self {
        self.query = self.query.params(params);
        self
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn send(self) -> Result<DataFrame> {
        self.api.execute(&self.query)
    }
}
