//! Domain entity definitions.

mod menu;
mod proxy_rule;
mod token;

pub use menu::{MenuCommand, MenuItem, MenuItemKind};
pub use proxy_rule::{ProxyRule, RouteDecision, RuleKind};
pub use token::AuthToken;
