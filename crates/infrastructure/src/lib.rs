//! Ferrous Lookup Infrastructure Layer
pub mod dns;
pub mod system;

pub use dns::{LookupClient, UpstreamExchange};
pub use system::SystemResolvers;
