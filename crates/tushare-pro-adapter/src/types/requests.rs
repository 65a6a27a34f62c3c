/*
[INPUT]:  Endpoint name, column filter and endpoint parameters
[OUTPUT]: Query values and the serialized request envelope
[POS]:    Data layer - request side of the wire protocol
[UPDATE]: When the request envelope layout changes
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Endpoint-specific filters, forwarded verbatim. Keys serialize sorted.
pub type Params = BTreeMap<String, Value>;

/// Body POSTed for every call.
///
/// Field order is part of the wire contract: `api_name`, `token`, `params`,
/// `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub api_name: String,
    pub token: String,
    pub params: Params,
    pub fields: String,
}

/// A call to one endpoint, independent of the client that sends it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    api_name: String,
    fields: String,
    params: Params,
}

impl Query {
    pub fn new(api_name: impl Into<String>) -> Self {
        Self {
            api_name: api_name.into(),
            fields: String::new(),
            params: Params::new(),
        }
    }

    /// Comma-delimited column filter; empty selects all columns.
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = fields.into();
        self
    }

    /// Add one endpoint parameter, replacing an earlier value for the same key.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Merge a whole parameter map.
    pub fn params(mut self, params: Params) -> Self {
        self.params.extend(params);
        self
    }

    pub fn api_name(&self) -> &str {
        &self.api_name
    }

    pub fn field_filter(&self) -> &str {
        &self.fields
    }

    pub fn param_map(&self) -> &Params {
        &self.params
    }

    /// Build the envelope for this query with the given token.
    pub fn to_envelope(&self, token: &str) -> RequestEnvelope {
        RequestEnvelope {
            api_name: self.api_name.clone(),
            token: token.to_string(),
            params: self.params.clone(),
            fields: self.fields.clone(),
        }
    }
}
