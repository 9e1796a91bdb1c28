/// Navigation menu driven by the session flag.
pub mod menu_reconciler;
/// Ordered proxy rule evaluation.
pub mod proxy_router;
/// Token persistence over a key-value port.
pub mod session_store;

pub use menu_reconciler::{MenuReconciler, PLACEHOLDER_TOKEN, SessionState};
pub use proxy_router::{ProxyRouter, rewrite_url, shadowed_rules};
pub use session_store::{SessionStore, TOKEN_KEY};
