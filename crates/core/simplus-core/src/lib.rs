//! Simplus Core - Shared types and traits
//!
//! This crate defines the abstractions used across:
//! - simplus-policies (the concrete policy variants)
//! - simplus-loader (alias resolution and the diagnostic CLI)
//!
//! Key types:
//! - One capability trait per policy family (VM scheduling, VM allocation,
//!   cloudlet scheduling, resource provisioning, resource utilization)
//! - Context records that carry policy aliases (hosts, datacenters, VMs)
//! - Error types

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
