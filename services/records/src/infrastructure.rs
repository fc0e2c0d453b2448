// Infrastructure layer modules
pub mod data_api_config;
pub mod data_api_executor;
pub mod instance_credentials;
pub mod lambda_env;
pub mod logging;
pub mod mysql_executor;
pub mod statement_executor;

// Re-exports
pub use data_api_config::{DataApiConfig, DataApiConfigError};
pub use data_api_executor::DataApiExecutor;
pub use instance_credentials::{InstanceCredentials, InstanceCredentialsError};
pub use lambda_env::is_lambda_environment;
pub use logging::init_logging;
pub use mysql_executor::MySqlExecutor;
pub use statement_executor::{StatementError, StatementExecutor, UnconfiguredExecutor};
