use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ClientError;

/// Decodes a JSON body into `T`, or turns a non-2xx status into
/// `ClientError::Api` with the best message the server provided.
pub async fn parse_json<T: DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> Result<T, ClientError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    if !status.is_success() {
        return Err(api_error(status, &bytes, fallback));
    }
    Ok(serde_json::from_slice(&bytes)?)
}

/// Like `parse_json` for calls whose success body is irrelevant (e.g. DELETE).
pub async fn expect_success(response: Response, fallback: &str) -> Result<(), ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let bytes = response.bytes().await?;
    Err(api_error(status, &bytes, fallback))
}

pub(crate) fn api_error(status: StatusCode, body: &[u8], fallback: &str) -> ClientError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|body| error_message(&body))
        .unwrap_or_else(|| fallback.to_string());
    ClientError::Api { status, message }
}

/// First string among the `detail`, `message` and `error` fields.
pub fn error_message(body: &Value) -> Option<String> {
    ["detail", "message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}
