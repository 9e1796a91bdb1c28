//! Upstream transport adapters.

mod client;

pub use client::HttpUpstream;
