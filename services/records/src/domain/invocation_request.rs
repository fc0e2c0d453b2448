/// Lambda呼び出しリクエスト
///
/// ペイロードの中身は処理に使用しないため、フィールドを持たない型として扱う。
/// オブジェクト、null、スカラー値など任意のJSONを受け付ける。
use serde::de::{Deserialize, Deserializer, IgnoredAny};

/// 内容を参照しない呼び出しリクエスト
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvocationRequest;

impl<'de> Deserialize<'de> for InvocationRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // ペイロードを読み捨てる
        IgnoredAny::deserialize(deserializer)?;
        Ok(InvocationRequest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_object_payload() {
        let request: InvocationRequest =
            serde_json::from_str(r#"{"httpMethod":"GET","path":"/","body":null}"#).unwrap();
        assert_eq!(request, InvocationRequest);
    }

    #[test]
    fn test_accepts_empty_object() {
        let request: InvocationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, InvocationRequest);
    }

    #[test]
    fn test_accepts_null_and_scalars() {
        assert!(serde_json::from_str::<InvocationRequest>("null").is_ok());
        assert!(serde_json::from_str::<InvocationRequest>("42").is_ok());
        assert!(serde_json::from_str::<InvocationRequest>(r#""ping""#).is_ok());
        assert!(serde_json::from_str::<InvocationRequest>("[1, 2, 3]").is_ok());
    }

    #[test]
    fn test_accepts_value() {
        let value = serde_json::json!({"nested": {"deep": [true, false]}});
        let request: InvocationRequest = serde_json::from_value(value).unwrap();
        assert_eq!(request, InvocationRequest);
    }
}
