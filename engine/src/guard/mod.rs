//! Install-state guard for add-on lifecycle operations
//!
//! Lifecycle operations are modelled as [`AddonOperation`]s. Wrapping one with
//! [`guard_installed`] yields an operation of the same shape that refuses to
//! run against add-ons that are not installed.
//!
//! # Example
//!
//! ```
//! use addon_engine::guard::{guard_installed, AddonOperation};
//! use addon_engine::telemetry::TracingSink;
//! use async_trait::async_trait;
//! use sdk::{AddonDescriptor, EngineError};
//! use std::sync::Arc;
//!
//! struct Restart;
//!
//! #[async_trait]
//! impl AddonOperation for Restart {
//!     type Args = ();
//!     type Output = String;
//!     type Error = EngineError;
//!
//!     async fn call(&self, addon: &AddonDescriptor, _args: ()) -> Result<String, EngineError> {
//!         Ok(format!("restarted {}", addon.slug))
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let restart = guard_installed(Restart, Arc::new(TracingSink));
//!
//! let mut addon = AddonDescriptor::new("ssh");
//! assert!(matches!(
//!     restart.call(&addon, ()).await,
//!     Err(EngineError::AddonNotSupported(_))
//! ));
//!
//! addon.is_installed = true;
//! assert_eq!(restart.call(&addon, ()).await.unwrap(), "restarted ssh");
//! # }
//! ```

use async_trait::async_trait;
use sdk::{AddonDescriptor, EngineError};
use std::sync::Arc;

use crate::telemetry::{EventSink, PolicyEvent};

/// An asynchronous action against one add-on
#[async_trait]
pub trait AddonOperation: Send + Sync {
    /// Additional arguments beyond the descriptor
    type Args: Send + 'static;
    type Output: Send;
    /// Must be able to carry the guard's rejection
    type Error: From<EngineError> + Send;

    async fn call(
        &self,
        addon: &AddonDescriptor,
        args: Self::Args,
    ) -> Result<Self::Output, Self::Error>;
}

/// Fail with `AddonNotSupported` unless the add-on is installed
///
/// The rejection is reported to `sink`, identified by slug.
pub fn check_installed(addon: &AddonDescriptor, sink: &dyn EventSink) -> Result<(), EngineError> {
    if addon.is_installed {
        return Ok(());
    }

    sink.record_error(&PolicyEvent::GuardRejected {
        slug: addon.slug.clone(),
    });
    Err(EngineError::AddonNotSupported(addon.slug.clone()))
}

/// Operation wrapper that only runs against installed add-ons
pub struct InstalledGuard<O> {
    inner: O,
    sink: Arc<dyn EventSink>,
}

impl<O> InstalledGuard<O> {
    pub fn new(inner: O, sink: Arc<dyn EventSink>) -> Self {
        Self { inner, sink }
    }
}

/// Wrap `operation` with the installed-state check
pub fn guard_installed<O: AddonOperation>(
    operation: O,
    sink: Arc<dyn EventSink>,
) -> InstalledGuard<O> {
    InstalledGuard::new(operation, sink)
}

#[async_trait]
impl<O: AddonOperation> AddonOperation for InstalledGuard<O> {
    type Args = O::Args;
    type Output = O::Output;
    type Error = O::Error;

    async fn call(
        &self,
        addon: &AddonDescriptor,
        args: Self::Args,
    ) -> Result<Self::Output, Self::Error> {
        check_installed(addon, self.sink.as_ref())?;
        self.inner.call(addon, args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::MemorySink;

    #[test]
    fn test_check_installed_passes() {
        let sink = MemorySink::new();
        let mut addon = AddonDescriptor::new("ssh");
        addon.is_installed = true;

        assert!(check_installed(&addon, &sink).is_ok());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_check_installed_rejects_and_records() {
        let sink = MemorySink::new();
        let addon = AddonDescriptor::new("ssh");

        let result = check_installed(&addon, &sink);
        assert!(matches!(result, Err(EngineError::AddonNotSupported(ref slug)) if slug == "ssh"));
        assert_eq!(
            sink.events(),
            vec![PolicyEvent::GuardRejected {
                slug: "ssh".to_string()
            }]
        );
    }
}
