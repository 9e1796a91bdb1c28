//! Domain error types.

mod proxy_error;
mod rule_error;
mod storage_error;

pub use proxy_error::ProxyError;
pub use rule_error::RuleError;
pub use storage_error::StorageError;
