/// RDS Data API接続設定
///
/// Data API経由でSQLを実行するために必要なクラスターARN、シークレットARN、
/// データベース名を環境変数から読み込む。
use thiserror::Error;

/// クラスターARNの環境変数名
pub const CLUSTER_ARN_VAR: &str = "CLUSTER_ARN";

/// シークレットARNの環境変数名
pub const SECRET_ARN_VAR: &str = "SECRET_ARN";

/// データベース名の環境変数名
pub const DATABASE_NAME_VAR: &str = "DATABASE_NAME";

/// デフォルトのデータベース名
pub const DEFAULT_DATABASE_NAME: &str = "mydb";

/// Data API設定のエラー型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataApiConfigError {
    #[error("環境変数が設定されていません: {0}")]
    MissingEnvVar(String),
    #[error("環境変数が空です: {0}")]
    EmptyEnvVar(String),
}

/// RDS Data API接続設定
///
/// 以下の環境変数から読み込む:
/// - CLUSTER_ARN: Aurora ServerlessクラスターARN（必須）
/// - SECRET_ARN: クラスター認証情報のシークレットARN（必須）
/// - DATABASE_NAME: 接続先データベース名（デフォルト: mydb）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataApiConfig {
    /// クラスターARN
    resource_arn: String,
    /// シークレットARN
    secret_arn: String,
    /// データベース名
    database: String,
}

impl DataApiConfig {
    /// 環境変数から設定を読み込む
    ///
    /// # エラー
    /// CLUSTER_ARNまたはSECRET_ARNが未設定、または空の場合はエラーを返す
    pub fn from_env() -> Result<Self, DataApiConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の取得関数から設定を読み込む
    ///
    /// コマンドライン引数による上書きなど、環境変数以外の値を
    /// 組み合わせる場合に使用する。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DataApiConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let resource_arn = required(&lookup, CLUSTER_ARN_VAR)?;
        let secret_arn = required(&lookup, SECRET_ARN_VAR)?;

        let database = lookup(DATABASE_NAME_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string());

        Ok(Self {
            resource_arn,
            secret_arn,
            database,
        })
    }

    /// 明示的な値で設定を作成（テスト用）
    pub fn new(resource_arn: String, secret_arn: String, database: String) -> Self {
        Self {
            resource_arn,
            secret_arn,
            database,
        }
    }

    /// クラスターARNを取得
    pub fn resource_arn(&self) -> &str {
        &self.resource_arn
    }

    /// シークレットARNを取得
    pub fn secret_arn(&self) -> &str {
        &self.secret_arn
    }

    /// データベース名を取得
    pub fn database(&self) -> &str {
        &self.database
    }
}

/// 必須の値を取得し、未設定と空文字を区別してエラーにする
fn required<F>(lookup: &F, name: &str) -> Result<String, DataApiConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).ok_or_else(|| DataApiConfigError::MissingEnvVar(name.to_string()))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(DataApiConfigError::EmptyEnvVar(name.to_string()));
    }
    Ok(value.to_string())
}
