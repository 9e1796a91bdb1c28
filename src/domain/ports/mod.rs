mod key_value_store_port;
mod upstream_port;

pub use key_value_store_port::KeyValueStore;
pub use upstream_port::{UpstreamPort, UpstreamRequest, UpstreamResponse};
