// # dnsrec-core
//
// Provider-neutral contract for managing DNS records in a hosted zone.
//
// ## Architecture Overview
//
// - **Record**: caller-facing DNS record (name, type, value, TTL)
// - **RecordProvider**: trait for listing, appending, setting and deleting
//   records in a zone through a provider API
// - **names**: relative/absolute name helpers shared by all providers
// - **ProviderRegistry**: plugin-based registry that builds providers from
//   configuration
//
// ## Design Principles
//
// 1. **Separation of Concerns**: the contract lives here, provider API
//    details live in provider crates
// 2. **Plugin-Based**: providers register a factory, no hard-coded if-else
// 3. **Library-First**: the command-line driver is a thin layer over this

pub mod config;
pub mod error;
pub mod names;
pub mod registry;
pub mod traits;

pub use config::ProviderConfig;
pub use error::{Error, Result};
pub use registry::ProviderRegistry;
pub use traits::{Record, RecordProvider, RecordProviderFactory};
