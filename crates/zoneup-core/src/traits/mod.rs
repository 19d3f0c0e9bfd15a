//! Core traits for the upsert system
//!
//! This module defines the abstract interface provider implementations must follow.
//!
//! - [`ZoneClient`]: the hosted-zone provider capability (listing, changes, waits)

pub mod zone_client;

pub use zone_client::ZoneClient;
