//! Use case implementations.

mod proxy_use_case;

pub use proxy_use_case::ProxyUseCase;
