// Adapters layer: entry points for external systems.

#[cfg(feature = "server")]
pub mod http;
