//! Add-on SDK
//!
//! Shared types for the add-on policy engine and its callers.
//! This crate is used by the engine and by the supervisor that owns the
//! add-on descriptors.

/// Error types and handling
pub mod errors;

/// Add-on descriptor types
pub mod descriptor;

// Re-export commonly used types
pub use descriptor::{AddonDescriptor, IsolationProfile, PlatformRole, Privilege};
pub use errors::{AddonErrorExt, EngineError};
