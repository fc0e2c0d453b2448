/// RDS Data API経由のrecordsテーブル作成Lambda関数
///
/// 起動時にCLUSTER_ARN、SECRET_ARN、DATABASE_NAMEを読み込み、
/// 呼び出しごとにData APIでCREATE TABLE IF NOT EXISTSを実行する。
/// Lambda関数としても、ローカルスクリプトとしても実行可能。
///
/// # 環境変数
/// - CLUSTER_ARN: Aurora ServerlessクラスターARN（必須）
/// - SECRET_ARN: クラスター認証情報のシークレットARN（必須）
/// - DATABASE_NAME: データベース名（デフォルト: mydb）
///
/// # ローカル実行
/// ```bash
/// cargo run --bin data_api_records -- \
///     --cluster-arn arn:aws:rds:us-east-1:123456789012:cluster:records-db \
///     --secret-arn arn:aws:secretsmanager:us-east-1:123456789012:secret:records-db
/// ```
use clap::Parser;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use records::application::CreateTableHandler;
use records::domain::InvocationRequest;
use records::infrastructure::data_api_config::{CLUSTER_ARN_VAR, DATABASE_NAME_VAR, SECRET_ARN_VAR};
use records::infrastructure::{
    init_logging, is_lambda_environment, DataApiConfig, DataApiConfigError, DataApiExecutor,
    StatementExecutor, UnconfiguredExecutor,
};
use tracing::{error, info};

/// コマンドライン引数（ローカル実行用）
///
/// 指定した値は環境変数より優先される。
#[derive(Parser, Debug, Default)]
#[command(name = "data_api_records")]
#[command(about = "RDS Data API経由でrecordsテーブルを作成")]
struct CliArgs {
    /// Aurora ServerlessクラスターARN
    #[arg(long)]
    cluster_arn: Option<String>,

    /// クラスター認証情報のシークレットARN
    #[arg(long)]
    secret_arn: Option<String>,

    /// データベース名
    #[arg(long, short = 'd')]
    database: Option<String>,
}

impl CliArgs {
    /// 引数、環境変数の順に値を取得する
    fn lookup(&self, name: &str) -> Option<String> {
        let arg = match name {
            CLUSTER_ARN_VAR => self.cluster_arn.clone(),
            SECRET_ARN_VAR => self.secret_arn.clone(),
            DATABASE_NAME_VAR => self.database.clone(),
            _ => None,
        };
        arg.or_else(|| std::env::var(name).ok())
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    if is_lambda_environment() {
        info!("Lambda関数として起動");
        let handler = CreateTableHandler::new(build_executor(DataApiConfig::from_env()).await);
        lambda_runtime::run(service_fn(|event: LambdaEvent<InvocationRequest>| {
            handler.handle_event(event)
        }))
        .await?;
    } else {
        info!("ローカルスクリプトとして起動");
        run_local(CliArgs::parse()).await?;
    }

    Ok(())
}

/// 設定からSQL実行実装を構築
///
/// 設定が不正な場合は起動を止めず、すべての呼び出しで400を返す実装にする。
async fn build_executor(
    config: Result<DataApiConfig, DataApiConfigError>,
) -> Box<dyn StatementExecutor> {
    match config {
        Ok(config) => {
            info!(
                resource_arn = %config.resource_arn(),
                database = %config.database(),
                "Data API設定を読み込み"
            );
            Box::new(DataApiExecutor::from_config(config).await)
        }
        Err(err) => {
            error!(error = %err, "Data API設定読み込み失敗");
            Box::new(UnconfiguredExecutor::new(err.to_string()))
        }
    }
}

/// ローカル実行用関数
///
/// 1回だけ呼び出しを処理し、レスポンスをJSONで標準出力に書き出す。
async fn run_local(args: CliArgs) -> Result<(), Error> {
    let config = DataApiConfig::from_lookup(|name| args.lookup(name));
    let handler = CreateTableHandler::new(build_executor(config).await);

    let response = handler.handle(&InvocationRequest).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
