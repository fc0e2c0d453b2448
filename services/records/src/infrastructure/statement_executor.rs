//! SQL実行の抽象化
//!
//! ハンドラーが依存する唯一の外部呼び出しをトレイトとして定義する。
//! 実装は以下の3種類:
//! - `DataApiExecutor`: RDS Data API経由
//! - `MySqlExecutor`: MySQLドライバーによる直接接続
//! - `UnconfiguredExecutor`: 起動時の設定読み込みに失敗した場合の代替

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::StatementResult;

/// SQL実行のエラー型
///
/// 呼び出し先で発生した失敗はすべてこの型に変換される。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    /// 起動時の設定が不正なため実行できない
    #[error("設定エラー: {0}")]
    Configuration(String),
    /// RDS Data API呼び出しの失敗（認証、ネットワーク、SQLエラーを含む）
    #[error("RDS Data APIエラー: {0}")]
    DataApi(String),
    /// MySQLドライバーの失敗（接続、認証、SQLエラーを含む）
    #[error("MySQLドライバーエラー: {0}")]
    Driver(String),
    /// 結果の変換に失敗
    #[error("結果の変換に失敗: {0}")]
    ResultDecoding(String),
}

impl StatementError {
    /// ログ出力用のエラー種別名
    pub fn kind(&self) -> &'static str {
        match self {
            StatementError::Configuration(_) => "configuration",
            StatementError::DataApi(_) => "data_api",
            StatementError::Driver(_) => "driver",
            StatementError::ResultDecoding(_) => "result_decoding",
        }
    }
}

/// SQL実行トレイト（テスト用の抽象化）
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// SQL文を1つ実行する
    ///
    /// # 引数
    /// * `sql` - 実行するSQL文
    ///
    /// # 戻り値
    /// * `Ok(StatementResult)` - データベースが返した結果
    /// * `Err(StatementError)` - 呼び出しの失敗
    async fn execute(&self, sql: &str) -> Result<StatementResult, StatementError>;
}

#[async_trait]
impl<T> StatementExecutor for Box<T>
where
    T: StatementExecutor + ?Sized,
{
    async fn execute(&self, sql: &str) -> Result<StatementResult, StatementError> {
        (**self).execute(sql).await
    }
}

/// 設定が不正な場合に使用するSQL実行実装
///
/// 呼び出しのたびに設定エラーを返す。起動時に検出した問題を
/// 各呼び出しの400レスポンスとして返すために使用する。
#[derive(Debug, Clone)]
pub struct UnconfiguredExecutor {
    /// 起動時に検出した設定エラーの内容
    reason: String,
}

impl UnconfiguredExecutor {
    /// 新しいUnconfiguredExecutorを作成
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// 設定エラーの内容を取得
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[async_trait]
impl StatementExecutor for UnconfiguredExecutor {
    async fn execute(&self, _sql: &str) -> Result<StatementResult, StatementError> {
        Err(StatementError::Configuration(self.reason.clone()))
    }
}
