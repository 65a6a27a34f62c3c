/*
[INPUT]:  `-p` command-line arguments
[OUTPUT]: Endpoint parameter key/value pairs
[POS]:    CLI layer - parameter parsing
[UPDATE]: When changing parameter syntax
*/

use serde_json::Value;

/// Parse `key=value` (string) or `key:=json` (raw JSON value).
///
/// Dates such as `20240101` stay strings unless written with `:=`.
pub fn parse_param(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value or key:=json, got `{raw}`"))?;

    let (key, value) = match key.strip_suffix(':') {
        Some(key) => {
            let value = serde_json::from_str(value)
                .map_err(|err| format!("invalid JSON for `{key}`: {err}"))?;
            (key, value)
        }
        None => (key, Value::String(value.to_string())),
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing parameter name in `{raw}`"));
    }
    Ok((key.to_string(), value))
}
