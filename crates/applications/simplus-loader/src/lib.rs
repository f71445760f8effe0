//! # Simplus policy loader
//!
//! Resolves the short policy aliases found in scenario configuration into
//! policy instances.
//!
//! ## Architecture
//!
//! ```text
//! scenario record ──alias──► PolicyLoader ──► naming::compose ──► PolicyRegistry
//!                                 ▲                                   │
//!                                 └──── Box<dyn Policy> ◄── constructor
//! ```
//!
//! - [`naming`]: `<namespace>.<stem><alias>` identifiers, with the kind
//!   prefix rule for provisioners
//! - [`registry`]: per-family constructor tables, built once and read-only
//! - [`loader`]: one method per family, fresh instance on every call
//!
//! ```no_run
//! use simplus_core::HostRegistry;
//! use simplus_loader::PolicyLoader;
//!
//! let loader = PolicyLoader::global();
//! let host = HostRegistry::new("host-1").with_vm_scheduler("SpaceShared");
//!
//! let scheduler = loader.host_vm_scheduler(&host)?;
//! let pe_provisioner = loader.new_pe_provisioner(&host)?;
//! # Ok::<(), simplus_loader::LoaderError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builtin;
pub mod error;
pub mod loader;
pub mod naming;
pub mod registry;

// ============================================================================
// Public exports
// ============================================================================

// Error handling
pub use error::{BoxError, LoaderError, Result};

// Resolution
pub use loader::{PolicyLoader, Resolution, ResolvedPolicy};

// Naming
pub use naming::{
    canonical_id, compose, provisioner_id, provisioner_stem, CanonicalId, BASE_PACKAGE,
    DEFAULT_KIND, PE_KIND,
};

// Registry
pub use registry::{Constructor, PolicyRegistry, RegistryBuilder};
