/// HTTP形式のレスポンス
///
/// Lambda関数の戻り値として`{statusCode, headers, body}`の形でシリアライズされる。
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 成功時のステータスコード
pub const STATUS_OK: u16 = 200;

/// 失敗時のステータスコード
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Lambda関数のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// HTTPステータスコード
    pub status_code: u16,
    /// レスポンスヘッダー（常に空）
    pub headers: BTreeMap<String, String>,
    /// レスポンスボディ
    pub body: String,
}

impl ResponseEnvelope {
    /// 200レスポンスを作成
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(STATUS_OK, body)
    }

    /// 400レスポンスを作成
    pub fn bad_request(body: impl Into<String>) -> Self {
        Self::new(STATUS_BAD_REQUEST, body)
    }

    fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// 成功レスポンスかどうか
    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_response() {
        let response = ResponseEnvelope::ok(r#"{"records":{}}"#);
        assert_eq!(response.status_code, 200);
        assert!(response.headers.is_empty());
        assert_eq!(response.body, r#"{"records":{}}"#);
        assert!(response.is_success());
    }

    #[test]
    fn test_bad_request_response() {
        let response = ResponseEnvelope::bad_request("Error creating table");
        assert_eq!(response.status_code, 400);
        assert!(response.headers.is_empty());
        assert!(!response.is_success());
    }

    #[test]
    fn test_serializes_with_lambda_field_names() {
        let response = ResponseEnvelope::bad_request("Error creating table");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "statusCode": 400,
                "headers": {},
                "body": "Error creating table"
            })
        );
    }
}
