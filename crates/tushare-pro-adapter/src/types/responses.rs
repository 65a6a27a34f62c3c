/*
[INPUT]:  JSON response body returned by the Tushare Pro endpoint
[OUTPUT]: Typed response envelope and the table it carries
[POS]:    Data layer - response side of the wire protocol
[UPDATE]: When the response envelope layout changes
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::table::DataFrame;
use crate::http::{Result, TushareError};

/// Top-level response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<ResponseData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Tabular payload: column names plus positional rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseData {
    pub fields: Vec<String>,
    pub items: Vec<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
}

impl ResponseEnvelope {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Turn the envelope into a table, or the server's rejection into an error.
    pub fn into_table(self) -> Result<DataFrame> {
        if !self.is_success() {
            return Err(TushareError::Api {
                code: self.code,
                message: self.msg.unwrap_or_default(),
            });
        }

        let data = self.data.ok_or_else(|| {
            TushareError::InvalidResponse("response has code 0 but no data".to_string())
        })?;
        DataFrame::from_parts(data.fields, data.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_into_table() {
        let envelope: ResponseEnvelope = serde_json::from_value(json!({
            "request_id": "f1c2",
            "code": 0,
            "msg": "",
            "data": {
                "fields": ["ts_code", "close"],
                "items": [["000001.SZ", 10.5], ["600000.SH", null]],
                "has_more": false
            }
        }))
        .unwrap();

        assert_eq!(envelope.request_id.as_deref(), Some("f1c2"));
        let table = envelope.into_table().unwrap();
        assert_eq!(table.columns(), ["ts_code", "close"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1, "close"), Some(&Value::Null));
    }

    #[test]
    fn test_failure_envelope_carries_message() {
        let envelope: ResponseEnvelope =
            serde_json::from_value(json!({"code": 40101, "msg": "bad token"})).unwrap();

        let err = envelope.into_table().unwrap_err();
        assert_eq!(err.to_string(), "bad token");
        assert_eq!(err.api_code(), Some(40101));
    }

    #[test]
    fn test_failure_with_null_message() {
        let envelope: ResponseEnvelope =
            serde_json::from_value(json!({"code": -1, "msg": null, "data": null})).unwrap();

        let err = envelope.into_table().unwrap_err();
        assert_eq!(err.to_string(), "");
        assert!(err.is_api_error());
    }

    #[test]
    fn test_success_without_data_is_invalid() {
        let envelope: ResponseEnvelope = serde_json::from_value(json!({"code": 0})).unwrap();

        assert!(matches!(
            envelope.into_table(),
            Err(TushareError::InvalidResponse(_))
        ));
    }
}
