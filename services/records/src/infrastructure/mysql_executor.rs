//! MySQLドライバーによるSQL実行
//!
//! クラスターエンドポイントへ直接接続してSQLを実行する。
//! 接続は最初の実行時に確立し、以降の呼び出しで再利用する。

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use tracing::{info, warn};

use super::instance_credentials::InstanceCredentials;
use super::statement_executor::{StatementError, StatementExecutor};
use crate::domain::StatementResult;

/// 接続取得のデフォルトタイムアウト秒数
const DEFAULT_ACQUIRE_TIMEOUT_SECONDS: u64 = 10;

/// MySQLドライバーを使用したSQL実行実装
#[derive(Debug, Clone)]
pub struct MySqlExecutor {
    pool: MySqlPool,
    host: String,
    database: String,
}

impl MySqlExecutor {
    /// 接続を遅延確立するMySqlExecutorを作成
    ///
    /// この時点ではネットワーク接続を行わない。
    pub fn connect_lazy(credentials: &InstanceCredentials) -> Self {
        Self::connect_lazy_with_timeout(
            credentials,
            Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECONDS),
        )
    }

    /// 接続取得タイムアウトを指定して作成
    pub fn connect_lazy_with_timeout(credentials: &InstanceCredentials, acquire_timeout: Duration) -> Self {
        let options = MySqlConnectOptions::new()
            .host(credentials.host())
            .port(credentials.port())
            .username(credentials.username())
            .password(credentials.password())
            .database(credentials.database());

        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(acquire_timeout)
            .connect_lazy_with(options);

        Self {
            pool,
            host: credentials.host().to_string(),
            database: credentials.database().to_string(),
        }
    }
}

#[async_trait]
impl StatementExecutor for MySqlExecutor {
    async fn execute(&self, sql: &str) -> Result<StatementResult, StatementError> {
        info!(host = %self.host, database = %self.database, "MySQLでSQL実行開始");

        let done = sqlx::query(sql).execute(&self.pool).await.map_err(|err| {
            warn!(host = %self.host, error = %err, "MySQL実行エラー");
            StatementError::Driver(err.to_string())
        })?;

        let rows_affected = i64::try_from(done.rows_affected())
            .map_err(|e| StatementError::ResultDecoding(e.to_string()))?;

        info!(rows_affected = rows_affected, "MySQLでSQL実行成功");

        let result = StatementResult::updated(rows_affected);
        Ok(match done.last_insert_id() {
            0 => result,
            id => result.with_insert_id(id),
        })
    }
}
