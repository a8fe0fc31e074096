//! Add-on descriptor types
//!
//! The descriptor is a read-only view over an add-on's declared configuration
//! and runtime flags. It is owned by the surrounding supervisor; the engine
//! only reads it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::EngineError;

/// Mandatory-access-control confinement requested by an add-on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IsolationProfile {
    /// Confinement switched off
    Disable,
    /// Platform default confinement
    #[default]
    Default,
    /// Add-on ships its own confinement profile
    Profile,
}

/// Level of access to the supervisor's control API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformRole {
    #[default]
    Default,
    Manager,
    Admin,
}

/// Kernel capability an add-on may request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Privilege {
    NetAdmin,
    SysAdmin,
    SysRawio,
    SysPtrace,
    SysModule,
    DacReadSearch,
    Bpf,
    CheckpointRestore,
    IpcLock,
    Perfmon,
    SysNice,
    SysResource,
    SysTime,
}

/// Privileges that lower the security rating when any of them is requested
pub const DANGEROUS_PRIVILEGES: [Privilege; 6] = [
    Privilege::NetAdmin,
    Privilege::SysAdmin,
    Privilege::SysRawio,
    Privilege::SysPtrace,
    Privilege::SysModule,
    Privilege::DacReadSearch,
];

impl Privilege {
    /// Whether this capability grants host-level control
    pub fn is_dangerous(self) -> bool {
        DANGEROUS_PRIVILEGES.contains(&self)
    }
}

/// Snapshot of an add-on's declared configuration and lifecycle flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonDescriptor {
    /// Unique add-on identifier
    pub slug: String,
    #[serde(default)]
    pub isolation_profile: IsolationProfile,
    /// Add-on may authenticate against the platform API
    #[serde(default)]
    pub platform_login_enabled: bool,
    #[serde(default)]
    pub requested_privileges: BTreeSet<Privilege>,
    #[serde(default)]
    pub platform_api_role: PlatformRole,
    #[serde(default)]
    pub uses_host_network: bool,
    #[serde(default)]
    pub uses_host_process_namespace: bool,
    #[serde(default)]
    pub has_full_device_access: bool,
    /// Direct access to the container engine's control socket
    #[serde(default)]
    pub has_container_runtime_api_access: bool,
    /// True once installation completes and until uninstallation begins
    #[serde(default)]
    pub is_installed: bool,
}

impl AddonDescriptor {
    /// Create a descriptor with every field at its safest setting
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            isolation_profile: IsolationProfile::Default,
            platform_login_enabled: false,
            requested_privileges: BTreeSet::new(),
            platform_api_role: PlatformRole::Default,
            uses_host_network: false,
            uses_host_process_namespace: false,
            has_full_device_access: false,
            has_container_runtime_api_access: false,
            is_installed: false,
        }
    }

    /// Whether any requested privilege is in [`DANGEROUS_PRIVILEGES`]
    pub fn requests_dangerous_privilege(&self) -> bool {
        self.requested_privileges
            .iter()
            .any(|privilege| privilege.is_dangerous())
    }

    /// Parse descriptor from JSON string
    ///
    /// Enumerated fields outside their documented sets are rejected, never
    /// defaulted.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::Descriptor(e.to_string()))
    }

    /// Serialize descriptor to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
