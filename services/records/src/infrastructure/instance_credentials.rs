/// クラスター認証情報（直接接続用）
///
/// デプロイ時にシークレットの値がそのままINSTANCE_CREDENTIALS環境変数に
/// 展開される。値はRDSのシークレット形式のJSON:
/// `{"username": "...", "password": "...", "host": "...", "port": 3306, "dbname": "..."}`
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// 認証情報の環境変数名
pub const INSTANCE_CREDENTIALS_VAR: &str = "INSTANCE_CREDENTIALS";

/// デフォルトのポート番号
pub const DEFAULT_MYSQL_PORT: u16 = 3306;

/// デフォルトのデータベース名
pub const DEFAULT_DIRECT_DATABASE_NAME: &str = "mysqldb";

/// 認証情報読み込みのエラー型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceCredentialsError {
    #[error("環境変数が設定されていません: {0}")]
    MissingEnvVar(String),
    #[error("認証情報のJSONが不正です: {0}")]
    InvalidJson(String),
    #[error("認証情報に必須項目がありません: {0}")]
    MissingField(String),
}

/// シークレット値のJSON表現
#[derive(Debug, Deserialize)]
struct RawSecret {
    host: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<String>,
    dbname: Option<String>,
}

/// MySQL直接接続の認証情報
#[derive(Clone, PartialEq, Eq)]
pub struct InstanceCredentials {
    host: String,
    port: u16,
    username: String,
    password: String,
    database: String,
}

impl InstanceCredentials {
    /// INSTANCE_CREDENTIALS環境変数から読み込む
    pub fn from_env() -> Result<Self, InstanceCredentialsError> {
        let json = std::env::var(INSTANCE_CREDENTIALS_VAR).map_err(|_| {
            InstanceCredentialsError::MissingEnvVar(INSTANCE_CREDENTIALS_VAR.to_string())
        })?;
        Self::from_json(&json)
    }

    /// シークレット値のJSONから読み込む
    ///
    /// host、username、passwordは必須。portとdbnameは省略時にデフォルト値を使う。
    pub fn from_json(json: &str) -> Result<Self, InstanceCredentialsError> {
        let raw: RawSecret = serde_json::from_str(json)
            .map_err(|e| InstanceCredentialsError::InvalidJson(e.to_string()))?;

        Ok(Self {
            host: non_empty(raw.host, "host")?,
            port: raw.port.unwrap_or(DEFAULT_MYSQL_PORT),
            username: non_empty(raw.username, "username")?,
            password: non_empty(raw.password, "password")?,
            database: raw
                .dbname
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_DIRECT_DATABASE_NAME.to_string()),
        })
    }

    /// 明示的な値で認証情報を作成（テスト用）
    pub fn new(host: String, port: u16, username: String, password: String, database: String) -> Self {
        Self {
            host,
            port,
            username,
            password,
            database,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

// パスワードをログに出さない
impl fmt::Debug for InstanceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceCredentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

fn non_empty(value: Option<String>, field: &str) -> Result<String, InstanceCredentialsError> {
    value
        .filter(|s| !s.is_empty())
        .ok_or_else(|| InstanceCredentialsError::MissingField(field.to_string()))
}
