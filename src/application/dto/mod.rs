//! Data transfer objects for the application layer.

mod proxy_dto;

pub use proxy_dto::{InboundRequest, ProxyResponse};
