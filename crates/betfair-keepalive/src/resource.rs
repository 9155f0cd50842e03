//! Typed keep-alive result

use serde::Serialize;
use serde_json::{Map, Value};

/// Decoded keep-alive payload with the call's elapsed time attached.
///
/// Known fields are lifted out; everything else the service sent stays in
/// `extra`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeepAliveResource {
    pub status: String,
    pub token: Option<String>,
    pub product: Option<String>,
    pub error: Option<String>,
    /// Seconds from send to full response receipt
    pub elapsed_time: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl KeepAliveResource {
    /// Build from a decoded payload. Non-string values of known fields read as `None`.
    pub fn from_response(mut response: Map<String, Value>, elapsed_time: f64) -> Self {
        let mut take = |key: &str| match response.remove(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };
        let status = take("status").unwrap_or_default();
        let token = take("token");
        let product = take("product");
        let error = take("error");
        Self {
            status,
            token,
            product,
            error,
            elapsed_time,
            extra: response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lifts_known_fields() {
        let payload = json!({
            "status": "SUCCESS",
            "token": "abc123",
            "product": "my-app",
            "error": "",
        });
        let resource =
            KeepAliveResource::from_response(payload.as_object().cloned().unwrap(), 0.25);
        assert_eq!(resource.status, "SUCCESS");
        assert_eq!(resource.token.as_deref(), Some("abc123"));
        assert_eq!(resource.product.as_deref(), Some("my-app"));
        assert_eq!(resource.error.as_deref(), Some(""));
        assert_eq!(resource.elapsed_time, 0.25);
        assert!(resource.extra.is_empty());
    }

    #[test]
    fn keeps_unknown_fields_and_tolerates_nulls() {
        let payload = json!({"status": "SUCCESS", "token": null, "region": "eu"});
        let resource =
            KeepAliveResource::from_response(payload.as_object().cloned().unwrap(), 0.0);
        assert_eq!(resource.token, None);
        assert_eq!(resource.extra["region"], "eu");
    }

    #[test]
    fn serializes_flat() {
        let payload = json!({"status": "SUCCESS", "token": "t", "region": "eu"});
        let resource =
            KeepAliveResource::from_response(payload.as_object().cloned().unwrap(), 1.5);
        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json["token"], "t");
        assert_eq!(json["region"], "eu");
        assert_eq!(json["elapsed_time"], 1.5);
    }
}
