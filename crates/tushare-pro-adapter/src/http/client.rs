/*
[INPUT]:  HTTP configuration (base URL, timeout) and the API token
[OUTPUT]: Shared client configuration, credentials and response decoding
[POS]:    HTTP layer - pieces common to the blocking and async clients
[UPDATE]: When adding connection options or changing response handling
*/

use reqwest::Url;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

use crate::http::Result;
use crate::types::{DataFrame, Query, RequestEnvelope, ResponseEnvelope};

/// Base URL for Tushare Pro API
pub const DEFAULT_BASE_URL: &str = "http://api.tushare.pro";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub(crate) fn endpoint(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }
}

/// API token sent with every request
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub(crate) fn envelope(&self, query: &Query) -> RequestEnvelope {
        query.to_envelope(&self.token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .finish()
    }
}

pub(crate) fn log_request(envelope: &RequestEnvelope) {
    debug!(
        api_name = %envelope.api_name,
        fields = %envelope.fields,
        param_count = envelope.params.len(),
        "sending query"
    );
}

/// Parse a response body and materialize its table.
pub(crate) fn decode_response(api_name: &str, body: &str) -> Result<DataFrame> {
    let envelope: ResponseEnvelope = serde_json::from_str(body)?;
    if !envelope.is_success() {
        warn!(
            api_name,
            code = envelope.code,
            msg = envelope.msg.as_deref().unwrap_or_default(),
            request_id = envelope.request_id.as_deref(),
            "query rejected by server"
        );
    }

    let request_id = envelope.request_id.clone();
    let table = envelope.into_table()?;
    debug!(
        api_name,
        rows = table.len(),
        columns = table.width(),
        request_id = request_id.as_deref(),
        "query completed"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::TushareError;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.base_url, "http://api.tushare.pro");
        assert!(config.endpoint().is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ClientConfig::default().with_base_url("not a url");
        assert!(matches!(config.endpoint(), Err(TushareError::UrlParse(_))));
    }

    #[test]
    fn test_credentials_debug_hides_token() {
        let credentials = Credentials::new("secret-token");
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("secret-token"));
        assert_eq!(credentials.token(), "secret-token");
    }

    #[test]
    fn test_decode_response_parse_error() {
        let err = decode_response("daily", "<html>502</html>").unwrap_err();
        assert!(matches!(err, TushareError::Serialization(_)));
    }

    #[test]
    fn test_decode_response_api_error() {
        let err = decode_response("daily", r#"{"code":40203,"msg":"bad token"}"#).unwrap_err();
        assert_eq!(err.to_string(), "bad token");
    }
}
