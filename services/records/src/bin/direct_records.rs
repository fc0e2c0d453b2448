/// MySQL直接接続によるrecordsテーブル作成Lambda関数
///
/// 起動時にINSTANCE_CREDENTIALS（クラスターのシークレット値JSON）を読み込み、
/// 呼び出しごとにMySQLドライバーでCREATE TABLE IF NOT EXISTSを実行する。
/// 接続は最初の呼び出しで確立し、同じ実行環境内で再利用する。
///
/// # 環境変数
/// - INSTANCE_CREDENTIALS: シークレット値のJSON（必須）
///
/// # ローカル実行
/// ```bash
/// cargo run --bin direct_records -- \
///     --credentials '{"host":"127.0.0.1","username":"admin","password":"...","dbname":"mysqldb"}'
/// ```
use clap::Parser;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use records::application::CreateTableHandler;
use records::domain::InvocationRequest;
use records::infrastructure::{
    init_logging, is_lambda_environment, InstanceCredentials, InstanceCredentialsError,
    MySqlExecutor, StatementExecutor, UnconfiguredExecutor,
};
use tracing::{error, info};

/// コマンドライン引数（ローカル実行用）
#[derive(Parser, Debug)]
#[command(name = "direct_records")]
#[command(about = "MySQL直接接続でrecordsテーブルを作成")]
struct CliArgs {
    /// シークレット値のJSON（INSTANCE_CREDENTIALSより優先）
    #[arg(long, short = 'c')]
    credentials: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    if is_lambda_environment() {
        info!("Lambda関数として起動");
        let handler = CreateTableHandler::new(build_executor(InstanceCredentials::from_env()));
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

/// 認証情報からSQL実行実装を構築
///
/// 認証情報が不正な場合は起動を止めず、すべての呼び出しで400を返す実装にする。
fn build_executor(
    credentials: Result<InstanceCredentials, InstanceCredentialsError>,
) -> Box<dyn StatementExecutor> {
    match credentials {
        Ok(credentials) => {
            info!(
                host = %credentials.host(),
                port = credentials.port(),
                database = %credentials.database(),
                "認証情報を読み込み"
            );
            Box::new(MySqlExecutor::connect_lazy(&credentials))
        }
        Err(err) => {
            error!(error = %err, "認証情報読み込み失敗");
            Box::new(UnconfiguredExecutor::new(err.to_string()))
        }
    }
}

/// ローカル実行用関数
async fn run_local(args: CliArgs) -> Result<(), Error> {
    let credentials = match args.credentials {
        Some(json) => InstanceCredentials::from_json(&json),
        None => InstanceCredentials::from_env(),
    };
    let handler = CreateTableHandler::new(build_executor(credentials));

    let response = handler.handle(&InvocationRequest).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
