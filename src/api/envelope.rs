/// Response envelope shared by every JSON endpoint of the ad server:
/// `{"success": bool, "error": "...", ...payload}`
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::state::data::{Asset, StatusSummary};

/// Payload of `GET /api/ads`
#[derive(Debug, Deserialize)]
pub struct AdsPayload {
    pub ads: Vec<Asset>,
}

/// Payload of `GET /api/status`
#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: StatusSummary,
}

/// Decode an envelope body.
///
/// - not JSON: `Malformed`
/// - `success` missing or false: `Server` with the `error` string, or `fallback`
/// - otherwise the payload, `Malformed` if it does not have the expected shape
///
/// The HTTP status code plays no part; the server always answers with an envelope.
pub fn decode<T: DeserializeOwned>(body: &[u8], fallback: &str) -> Result<T, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(ApiError::malformed)?;

    let success = value
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if !success {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .unwrap_or(fallback);
        return Err(ApiError::Server(message.to_string()));
    }

    serde_json::from_value(value).map_err(ApiError::malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::UploadReceipt;

    #[test]
    fn test_success_payload() {
        let body = br#"{"success": true, "status": {"total_ads": 4, "total_size_mb": 10.25}}"#;
        let payload: StatusPayload = decode(body, "Unknown error").unwrap();
        assert_eq!(payload.status.total_ads, 4);
    }

    #[test]
    fn test_server_error_uses_message() {
        let body = br#"{"success": false, "error": "Invalid file"}"#;
        let err = decode::<UploadReceipt>(body, "Upload failed").unwrap_err();
        assert_eq!(err, ApiError::Server("Invalid file".into()));
    }

    #[test]
    fn test_server_error_without_message_uses_fallback() {
        let err = decode::<UploadReceipt>(br#"{"success": false}"#, "Upload failed").unwrap_err();
        assert_eq!(err, ApiError::Server("Upload failed".into()));

        // No success flag at all counts as failure too
        let err = decode::<UploadReceipt>(br#"{"message": "hi"}"#, "Upload failed").unwrap_err();
        assert_eq!(err, ApiError::Server("Upload failed".into()));
    }

    #[test]
    fn test_not_json_is_malformed() {
        let err =
            decode::<AdsPayload>(b"<html>502 Bad Gateway</html>", "Unknown error").unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[test]
    fn test_wrong_payload_shape_is_malformed() {
        let err =
            decode::<AdsPayload>(br#"{"success": true, "ads": 3}"#, "Unknown error").unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
    }
}
