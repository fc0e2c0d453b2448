// Domain layer modules
pub mod invocation_request;
pub mod records_table;
pub mod response_envelope;
pub mod statement_result;

// Re-exports
pub use invocation_request::InvocationRequest;
pub use records_table::{CREATE_RECORDS_TABLE_SQL, RECORDS_TABLE_NAME};
pub use response_envelope::{ResponseEnvelope, STATUS_BAD_REQUEST, STATUS_OK};
pub use statement_result::StatementResult;
