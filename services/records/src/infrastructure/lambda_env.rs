//! Lambda実行環境の判定
//!
//! Lambdaランタイムは`AWS_LAMBDA_FUNCTION_NAME`を必ず設定する。
//! 未設定の場合はローカル実行とみなす。

/// Lambda関数名の環境変数名
pub const LAMBDA_FUNCTION_NAME_VAR: &str = "AWS_LAMBDA_FUNCTION_NAME";

/// Lambda環境で実行されているか
pub fn is_lambda_environment() -> bool {
    std::env::var(LAMBDA_FUNCTION_NAME_VAR).is_ok()
}
