/// SQL実行結果
///
/// データベース呼び出しが返した結果をそのまま保持する。
/// 形式はData APIクライアントの結果オブジェクトに合わせる:
/// - 結果セットがある場合は`records`（カラム名をキーとする行オブジェクトの配列）
/// - 結果セットがない場合は`numberOfRecordsUpdated`
/// - キーが生成された場合は`insertId`
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// SQL実行結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementResult {
    /// 結果セットの行
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<Map<String, Value>>>,
    /// 更新された行数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_records_updated: Option<i64>,
    /// 生成されたキー
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_id: Option<Value>,
}

impl StatementResult {
    /// 結果セットを持つ結果を作成
    pub fn with_records(records: Vec<Map<String, Value>>) -> Self {
        Self {
            records: Some(records),
            ..Self::default()
        }
    }

    /// 更新行数のみを持つ結果を作成
    pub fn updated(number_of_records_updated: i64) -> Self {
        Self {
            number_of_records_updated: Some(number_of_records_updated),
            ..Self::default()
        }
    }

    /// 生成されたキーを設定
    pub fn with_insert_id(mut self, insert_id: impl Into<Value>) -> Self {
        self.insert_id = Some(insert_id.into());
        self
    }
}
