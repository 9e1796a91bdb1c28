//! Domain layer with core entities, errors and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{AuthToken, MenuCommand, MenuItem, ProxyRule, RouteDecision, RuleKind};
pub use errors::{ProxyError, RuleError, StorageError};
pub use ports::{KeyValueStore, UpstreamPort};
