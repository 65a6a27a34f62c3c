/*
[INPUT]:  Request envelopes and a per-session timeout
[OUTPUT]: Response bodies over a reusable, closable connection pool
[POS]:    HTTP layer - transport seam for the async client
[UPDATE]: When changing how sessions are created, shared or released
*/

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::fmt::Debug;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::http::{Result, TushareError};
use crate::types::RequestEnvelope;

/// Reusable transport handle owned by one async client.
///
/// Implementations return the raw response body whatever the HTTP status;
/// the envelope's `code` decides success.
#[async_trait]
pub trait Session: Send + Sync + Debug {
    /// POST the envelope as JSON and return the body text
    async fn post_json(&self, url: Url, envelope: &RequestEnvelope) -> Result<String>;

    /// Release pooled connections. Synchronous so a dropped scope can run it.
    fn close(&self);

    fn is_closed(&self) -> bool;
}

/// reqwest-backed session. Closing drops the pooled client.
#[derive(Debug)]
pub struct HttpSession {
    client: Mutex<Option<Client>>,
}

impl HttpSession {
    /// Create a session whose requests all use `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::from_client(client))
    }

    pub fn from_client(client: Client) -> Self {
        Self {
            client: Mutex::new(Some(client)),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<Client>> {
        self.client.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Session for HttpSession {
    async fn post_json(&self, url: Url, envelope: &RequestEnvelope) -> Result<String> {
        let client = self.slot().clone().ok_or(TushareError::SessionClosed)?;
        let response = client.post(url).json(envelope).send().await?;
        Ok(response.text().await?)
    }

    fn close(&self) {
        self.slot().take();
    }

    fn is_closed(&self) -> bool {
        self.slot().is_none()
    }
}
