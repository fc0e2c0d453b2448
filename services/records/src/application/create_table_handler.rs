/// recordsテーブル作成ハンドラー
///
/// 呼び出しごとに`CREATE TABLE IF NOT EXISTS records ...`を1回実行し、
/// 結果をHTTP形式のレスポンスに変換する。
/// 失敗時はエラーをログに出力し、原因によらず同じ400レスポンスを返す。
use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;
use tracing::{error, info, Instrument};

use crate::domain::{CREATE_RECORDS_TABLE_SQL, InvocationRequest, ResponseEnvelope, StatementResult};
use crate::infrastructure::{StatementError, StatementExecutor};

/// 失敗時のレスポンスボディ
pub const ERROR_BODY: &str = "Error creating table";

/// 成功時のレスポンスボディ
#[derive(Serialize)]
struct RecordsBody<'a> {
    records: &'a StatementResult,
}

/// recordsテーブル作成リクエストを処理するハンドラー
///
/// SQL実行の実装は起動時に一度だけ構築して注入する。
pub struct CreateTableHandler<E>
where
    E: StatementExecutor,
{
    /// SQL実行実装
    executor: E,
}

impl<E> CreateTableHandler<E>
where
    E: StatementExecutor,
{
    /// 新しいCreateTableHandlerを作成
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Lambdaイベントを処理
    ///
    /// コンテキストのリクエストIDをspanに設定して`handle`を実行する。
    /// ハンドラーの失敗はレスポンスで表現するため、常に`Ok`を返す。
    pub async fn handle_event(
        &self,
        event: LambdaEvent<InvocationRequest>,
    ) -> Result<ResponseEnvelope, Error> {
        let span = tracing::info_span!("invocation", request_id = %event.context.request_id);
        Ok(self.handle(&event.payload).instrument(span).await)
    }

    /// recordsテーブル作成リクエストを処理
    ///
    /// # 処理フロー
    /// 1. CREATE TABLE IF NOT EXISTSを実行
    /// 2. 成功時は結果を`records`キーに格納して200を返却
    /// 3. 失敗時はエラーをログ出力して400を返却
    pub async fn handle(&self, _request: &InvocationRequest) -> ResponseEnvelope {
        info!("recordsテーブル作成開始");

        match self.executor.execute(CREATE_RECORDS_TABLE_SQL).await {
            Ok(result) => {
                info!("recordsテーブル作成完了");
                Self::success_response(&result)
            }
            Err(err) => {
                error!(error_kind = err.kind(), error = %err, "recordsテーブルの作成に失敗");
                Self::error_response(&err)
            }
        }
    }

    /// 成功レスポンスを生成
    ///
    /// ボディは`{"records": <実行結果>}`のJSON文字列。
    pub fn success_response(result: &StatementResult) -> ResponseEnvelope {
        match serde_json::to_string(&RecordsBody { records: result }) {
            Ok(body) => ResponseEnvelope::ok(body),
            Err(err) => {
                error!(error = %err, "レスポンスボディのシリアライズに失敗");
                ResponseEnvelope::bad_request(ERROR_BODY)
            }
        }
    }

    /// エラーをレスポンスに変換
    ///
    /// 新しいエラー種別を追加した場合はここで対応を決める。
    pub fn error_response(err: &StatementError) -> ResponseEnvelope {
        match err {
            StatementError::Configuration(_)
            | StatementError::DataApi(_)
            | StatementError::Driver(_)
            | StatementError::ResultDecoding(_) => ResponseEnvelope::bad_request(ERROR_BODY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::logging::init_test_logging;
    use crate::infrastructure::statement_executor::tests::{InMemoryDatabase, MockStatementExecutor};
    use crate::infrastructure::UnconfiguredExecutor;
    use lambda_runtime::Context;
    use serde_json::{json, Map, Value};

    fn all_errors() -> Vec<StatementError> {
        vec![
            StatementError::Configuration("環境変数が設定されていません: CLUSTER_ARN".to_string()),
            StatementError::DataApi("BadRequestException: Database returned SQL exception".to_string()),
            StatementError::Driver("error communicating with database: Connection refused".to_string()),
            StatementError::ResultDecoding("未対応のフィールド型".to_string()),
        ]
    }

    // ==================== 成功ケース ====================

    #[tokio::test]
    async fn test_executes_create_table_statement() {
        init_test_logging();
        let mock = MockStatementExecutor::succeeding(StatementResult::updated(0));
        let handler = CreateTableHandler::new(mock.clone());

        handler.handle(&InvocationRequest).await;

        assert_eq!(
            mock.executed_sql(),
            vec![
                "CREATE TABLE IF NOT EXISTS records (recordid INT PRIMARY KEY, title VARCHAR(255) NOT NULL, release_date DATE)"
            ]
        );
    }

    #[tokio::test]
    async fn test_success_response() {
        let handler =
            CreateTableHandler::new(MockStatementExecutor::succeeding(StatementResult::updated(0)));

        let response = handler.handle(&InvocationRequest).await;

        assert_eq!(response.status_code, 200);
        assert!(response.headers.is_empty());
        assert_eq!(response.body, r#"{"records":{"numberOfRecordsUpdated":0}}"#);
    }

    #[tokio::test]
    async fn test_success_body_has_only_records_key() {
        let mut row = Map::new();
        row.insert("recordid".to_string(), json!(7));
        let raw = StatementResult::with_records(vec![row]);
        let handler = CreateTableHandler::new(MockStatementExecutor::succeeding(raw.clone()));

        let response = handler.handle(&InvocationRequest).await;
        let body: Value = serde_json::from_str(&response.body).unwrap();
        let object = body.as_object().unwrap();

        assert_eq!(object.len(), 1);
        assert_eq!(object["records"], serde_json::to_value(&raw).unwrap());
    }

    #[tokio::test]
    async fn test_sequential_invocations_are_idempotent() {
        let db = InMemoryDatabase::new();
        let handler = CreateTableHandler::new(db.clone());

        let first = handler.handle(&InvocationRequest).await;
        assert_eq!(first.status_code, 200);
        assert!(db.table_exists());

        let second = handler.handle(&InvocationRequest).await;
        assert_eq!(second, first);
        assert_eq!(db.create_count(), 1);
        assert_eq!(db.call_count(), 2);
    }

    // ==================== 失敗ケース ====================

    #[tokio::test]
    async fn test_any_failure_returns_same_bad_request() {
        init_test_logging();

        for err in all_errors() {
            let handler = CreateTableHandler::new(MockStatementExecutor::failing(err.clone()));
            let response = handler.handle(&InvocationRequest).await;

            assert_eq!(response.status_code, 400, "{:?}", err);
            assert!(response.headers.is_empty());
            assert_eq!(response.body, "Error creating table");
        }
    }

    #[test]
    fn test_error_response_mapping() {
        for err in all_errors() {
            let response = CreateTableHandler::<MockStatementExecutor>::error_response(&err);
            assert_eq!(response, ResponseEnvelope::bad_request(ERROR_BODY));
        }
    }

    #[tokio::test]
    async fn test_unconfigured_executor_returns_bad_request() {
        let handler = CreateTableHandler::new(UnconfiguredExecutor::new("環境変数が空です: CLUSTER_ARN"));

        let response = handler.handle(&InvocationRequest).await;

        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, ERROR_BODY);
    }

    // ==================== Lambdaイベント ====================

    #[tokio::test]
    async fn test_handle_event() {
        let handler =
            CreateTableHandler::new(MockStatementExecutor::succeeding(StatementResult::updated(0)));
        let event = LambdaEvent::new(InvocationRequest, Context::default());

        let response = handler.handle_event(event).await.unwrap();

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "statusCode": 200,
                "headers": {},
                "body": "{\"records\":{\"numberOfRecordsUpdated\":0}}"
            })
        );
    }

    #[tokio::test]
    async fn test_handle_event_failure_is_not_runtime_error() {
        let handler = CreateTableHandler::new(MockStatementExecutor::failing(
            StatementError::DataApi("AccessDeniedException".to_string()),
        ));
        let event = LambdaEvent::new(InvocationRequest, Context::default());

        let response = handler.handle_event(event).await.unwrap();

        assert_eq!(response, ResponseEnvelope::bad_request("Error creating table"));
    }
}
