//! Response envelope shared by every JSON endpoint
//!
//! `meta` is only present when a handler has something to say about the
//! payload: a row count for list endpoints and the currency for endpoints
//! that return money figures.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    pub error: Option<ErrorBody>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// ISO code the money fields in `data` are denominated in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            meta: None,
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            meta: None,
            error: Some(ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
            }),
            timestamp: Utc::now(),
        }
    }

    /// Tags the money figures in `data` with their currency.
    pub fn in_currency(mut self, currency: &str) -> Self {
        self.meta.get_or_insert_with(ResponseMeta::default).currency = Some(currency.to_string());
        self
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    pub fn list(items: Vec<T>) -> Self {
        let count = items.len();
        let mut response = Self::success(items);
        response.meta = Some(ResponseMeta {
            count: Some(count),
            currency: None,
        });
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_carries_count_and_currency() {
        let response = ApiResponse::list(vec![1500, 2500]).in_currency("KES");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["data"], json!([1500, 2500]));
        assert_eq!(value["meta"], json!({ "count": 2, "currency": "KES" }));
    }

    #[test]
    fn test_plain_success_omits_meta() {
        let value = serde_json::to_value(ApiResponse::success("ok")).unwrap();
        assert!(value.get("meta").is_none());
        assert!(value["error"].is_null());
    }

    #[test]
    fn test_error_envelope() {
        let value = serde_json::to_value(ApiResponse::<()>::error("NOT_FOUND", "Tenant not found")).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], json!({ "code": "NOT_FOUND", "message": "Tenant not found" }));
    }
}
