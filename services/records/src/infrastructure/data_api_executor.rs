//! RDS Data APIによるSQL実行
//!
//! ExecuteStatement APIでSQLを1文実行し、返却された`Field`を
//! JSON値に変換して`StatementResult`にまとめる。
//! 行はカラムメタデータのラベル（なければ名前）をキーとするオブジェクトになる。

use async_trait::async_trait;
use aws_sdk_rdsdata::error::DisplayErrorContext;
use aws_sdk_rdsdata::types::{ArrayValue, ColumnMetadata, Field};
use aws_sdk_rdsdata::Client as RdsDataClient;
use serde_json::{Map, Number, Value};
use tracing::{info, warn};

use super::data_api_config::DataApiConfig;
use super::statement_executor::{StatementError, StatementExecutor};
use crate::domain::StatementResult;

/// RDS Data APIを使用したSQL実行実装
#[derive(Debug, Clone)]
pub struct DataApiExecutor {
    client: RdsDataClient,
    config: DataApiConfig,
}

impl DataApiExecutor {
    /// 新しいDataApiExecutorを作成
    pub fn new(client: RdsDataClient, config: DataApiConfig) -> Self {
        Self { client, config }
    }

    /// AWS設定からデフォルトのクライアントを作成
    pub async fn from_config(config: DataApiConfig) -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = RdsDataClient::new(&aws_config);
        Self::new(client, config)
    }

    /// 接続設定を取得
    pub fn config(&self) -> &DataApiConfig {
        &self.config
    }
}

#[async_trait]
impl StatementExecutor for DataApiExecutor {
    async fn execute(&self, sql: &str) -> Result<StatementResult, StatementError> {
        info!(
            resource_arn = %self.config.resource_arn(),
            database = %self.config.database(),
            "ExecuteStatement実行開始"
        );

        let output = self
            .client
            .execute_statement()
            .resource_arn(self.config.resource_arn())
            .secret_arn(self.config.secret_arn())
            .database(self.config.database())
            .sql(sql)
            .include_result_metadata(true)
            .send()
            .await
            .map_err(|err| {
                let message = DisplayErrorContext(&err).to_string();
                warn!(
                    resource_arn = %self.config.resource_arn(),
                    error = %message,
                    "ExecuteStatementエラー"
                );
                StatementError::DataApi(message)
            })?;

        info!(
            number_of_records_updated = output.number_of_records_updated(),
            record_count = output.records().len(),
            "ExecuteStatement成功"
        );

        format_result(
            output.column_metadata(),
            output.records(),
            output.number_of_records_updated(),
            output.generated_fields(),
        )
    }
}

/// ExecuteStatementの返却値をStatementResultに変換する
///
/// - カラムメタデータまたは行がある場合は`records`を設定
/// - それ以外は`numberOfRecordsUpdated`を設定
/// - 生成フィールドがある場合は先頭の値を`insertId`に設定
pub fn format_result(
    columns: &[ColumnMetadata],
    records: &[Vec<Field>],
    number_of_records_updated: i64,
    generated_fields: &[Field],
) -> Result<StatementResult, StatementError> {
    let mut result = if !columns.is_empty() || !records.is_empty() {
        let rows = records
            .iter()
            .map(|row| hydrate_row(columns, row))
            .collect::<Result<Vec<_>, _>>()?;
        StatementResult::with_records(rows)
    } else {
        StatementResult::updated(number_of_records_updated)
    };

    if let Some(first) = generated_fields.first() {
        result = result.with_insert_id(field_to_value(first)?);
    }

    Ok(result)
}

/// 1行分のFieldをカラム名をキーとするオブジェクトに変換
fn hydrate_row(columns: &[ColumnMetadata], row: &[Field]) -> Result<Map<String, Value>, StatementError> {
    row.iter()
        .enumerate()
        .map(|(index, field)| {
            field_to_value(field).map(|value| (column_key(columns.get(index), index), value))
        })
        .collect()
}

/// カラムのキー名（ラベル、名前、インデックスの順に採用）
fn column_key(column: Option<&ColumnMetadata>, index: usize) -> String {
    column
        .and_then(|c| c.label().filter(|l| !l.is_empty()).or(c.name()))
        .map(str::to_string)
        .unwrap_or_else(|| index.to_string())
}

/// FieldをJSON値に変換
pub fn field_to_value(field: &Field) -> Result<Value, StatementError> {
    let value = match field {
        Field::IsNull(_) => Value::Null,
        Field::BooleanValue(b) => Value::Bool(*b),
        Field::LongValue(n) => Value::from(*n),
        Field::DoubleValue(d) => double_to_value(*d),
        Field::StringValue(s) => Value::String(s.clone()),
        Field::BlobValue(blob) => Value::from(blob.as_ref().to_vec()),
        Field::ArrayValue(array) => array_to_value(array)?,
        other => {
            return Err(StatementError::ResultDecoding(format!(
                "未対応のフィールド型: {:?}",
                other
            )));
        }
    };
    Ok(value)
}

fn array_to_value(array: &ArrayValue) -> Result<Value, StatementError> {
    let value = match array {
        ArrayValue::BooleanValues(values) => Value::from(values.clone()),
        ArrayValue::LongValues(values) => Value::from(values.clone()),
        ArrayValue::DoubleValues(values) => {
            Value::Array(values.iter().copied().map(double_to_value).collect())
        }
        ArrayValue::StringValues(values) => Value::from(values.clone()),
        ArrayValue::ArrayValues(values) => Value::Array(
            values
                .iter()
                .map(array_to_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        other => {
            return Err(StatementError::ResultDecoding(format!(
                "未対応の配列型: {:?}",
                other
            )));
        }
    };
    Ok(value)
}

// NaNと無限大はJSONで表現できないためnullにする
fn double_to_value(d: f64) -> Value {
    Number::from_f64(d).map(Value::Number).unwrap_or(Value::Null)
}
