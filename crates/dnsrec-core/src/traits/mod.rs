//! Core traits for DNS record management
//!
//! This module defines the abstract interface that all providers implement.
//!
//! - [`RecordProvider`]: List, append, set and delete records in a zone
//! - [`RecordProviderFactory`]: Build a provider from configuration

pub mod record_provider;

pub use record_provider::{Record, RecordProvider, RecordProviderFactory};
