// terrarium-api: Async Rust client for the registry browse API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::BrowseClient;
pub use error::Error;
pub use models::{
    LinkRecord, ModuleMetadataRecord, ModuleRecord, ProviderMetadataRecord, ProviderRecord,
    ReleaseRecord,
};
pub use transport::{TlsMode, TransportConfig};
