// アプリケーション層モジュール
pub mod create_table_handler;

// 再エクスポート
pub use create_table_handler::{CreateTableHandler, ERROR_BODY};
