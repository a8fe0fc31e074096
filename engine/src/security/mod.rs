//! Security rating module
//!
//! This module scores an add-on's declared configuration on a 1-6 scale:
//!
//! - **1**: not secure
//! - **6**: highly secure
//!
//! # Scoring
//!
//! The score starts at the baseline of 5 and applies additive adjustments:
//!
//! | Factor                         | Adjustment |
//! |--------------------------------|------------|
//! | Isolation disabled / profile   | -1 / +1    |
//! | Platform login enabled         | +1         |
//! | Any dangerous privilege        | -1 (once)  |
//! | Manager / admin API role       | -1 / -2    |
//! | Host network                   | -1         |
//! | Host PID namespace             | -2         |
//! | Full device access             | -2         |
//!
//! Container runtime API access overrides the total and forces the score to 1.
//! The result is always clamped into `[RATING_MIN, RATING_MAX]`.

use sdk::descriptor::{AddonDescriptor, IsolationProfile, PlatformRole};
use serde::Serialize;

/// Starting score before any adjustment
pub const RATING_BASELINE: i32 = 5;

/// Lowest possible rating
pub const RATING_MIN: u8 = 1;

/// Highest possible rating
pub const RATING_MAX: u8 = 6;

/// A descriptor property that moved the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    IsolationDisabled,
    IsolationProfile,
    PlatformLogin,
    DangerousPrivilege,
    ManagerRole,
    AdminRole,
    HostNetwork,
    HostPidNamespace,
    FullDeviceAccess,
}

impl Factor {
    /// Signed contribution of this factor to the additive total
    pub fn delta(self) -> i32 {
        match self {
            Factor::IsolationDisabled => -1,
            Factor::IsolationProfile => 1,
            Factor::PlatformLogin => 1,
            Factor::DangerousPrivilege => -1,
            Factor::ManagerRole => -1,
            Factor::AdminRole => -2,
            Factor::HostNetwork => -1,
            Factor::HostPidNamespace => -2,
            Factor::FullDeviceAccess => -2,
        }
    }

    /// Short human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Factor::IsolationDisabled => "isolation profile disabled",
            Factor::IsolationProfile => "custom isolation profile",
            Factor::PlatformLogin => "platform login enabled",
            Factor::DangerousPrivilege => "dangerous kernel privilege requested",
            Factor::ManagerRole => "manager API role",
            Factor::AdminRole => "admin API role",
            Factor::HostNetwork => "host network",
            Factor::HostPidNamespace => "host process namespace",
            Factor::FullDeviceAccess => "full device access",
        }
    }
}

/// One applied adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Adjustment {
    pub factor: Factor,
    pub delta: i32,
}

/// Full result of rating an add-on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityRating {
    /// Final clamped score in `[RATING_MIN, RATING_MAX]`
    pub score: u8,
    /// Baseline plus every adjustment, before override and clamping
    pub total: i32,
    /// Adjustments in evaluation order
    pub adjustments: Vec<Adjustment>,
    /// Container runtime API access forced the score to the minimum
    pub runtime_override: bool,
}

/// Rate an add-on's security posture
///
/// # Examples
///
/// ```
/// use addon_engine::security::rate_security;
/// use sdk::descriptor::{AddonDescriptor, IsolationProfile};
///
/// let mut addon = AddonDescriptor::new("ssh");
/// assert_eq!(rate_security(&addon), 5);
///
/// addon.isolation_profile = IsolationProfile::Profile;
/// assert_eq!(rate_security(&addon), 6);
///
/// addon.has_container_runtime_api_access = true;
/// assert_eq!(rate_security(&addon), 1);
/// ```
pub fn rate_security(addon: &AddonDescriptor) -> u8 {
    assess(addon).score
}

/// Rate an add-on and report which factors contributed
pub fn assess(addon: &AddonDescriptor) -> SecurityRating {
    let adjustments: Vec<Adjustment> = collect_factors(addon)
        .into_iter()
        .map(|factor| Adjustment {
            factor,
            delta: factor.delta(),
        })
        .collect();

    let total = RATING_BASELINE + adjustments.iter().map(|a| a.delta).sum::<i32>();

    let runtime_override = addon.has_container_runtime_api_access;
    let rating = if runtime_override {
        i32::from(RATING_MIN)
    } else {
        total
    };

    SecurityRating {
        score: clamp(rating),
        total,
        adjustments,
        runtime_override,
    }
}

fn collect_factors(addon: &AddonDescriptor) -> Vec<Factor> {
    let mut factors = Vec::new();

    match addon.isolation_profile {
        IsolationProfile::Disable => factors.push(Factor::IsolationDisabled),
        IsolationProfile::Profile => factors.push(Factor::IsolationProfile),
        IsolationProfile::Default => {}
    }

    if addon.platform_login_enabled {
        factors.push(Factor::PlatformLogin);
    }

    // Presence test: one penalty no matter how many are requested
    if addon.requests_dangerous_privilege() {
        factors.push(Factor::DangerousPrivilege);
    }

    match addon.platform_api_role {
        PlatformRole::Manager => factors.push(Factor::ManagerRole),
        PlatformRole::Admin => factors.push(Factor::AdminRole),
        PlatformRole::Default => {}
    }

    if addon.uses_host_network {
        factors.push(Factor::HostNetwork);
    }

    if addon.uses_host_process_namespace {
        factors.push(Factor::HostPidNamespace);
    }

    if addon.has_full_device_access {
        factors.push(Factor::FullDeviceAccess);
    }

    factors
}

fn clamp(rating: i32) -> u8 {
    let clamped = rating.clamp(i32::from(RATING_MIN), i32::from(RATING_MAX));
    u8::try_from(clamped).unwrap_or(RATING_MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdk::descriptor::Privilege;

    fn baseline() -> AddonDescriptor {
        AddonDescriptor::new("test_addon")
    }

    #[test]
    fn test_baseline_rating() {
        let rating = assess(&baseline());
        assert_eq!(rating.score, 5);
        assert_eq!(rating.total, 5);
        assert!(rating.adjustments.is_empty());
        assert!(!rating.runtime_override);
    }

    #[test]
    fn test_isolation_disabled() {
        let mut addon = baseline();
        addon.isolation_profile = IsolationProfile::Disable;
        assert_eq!(rate_security(&addon), 4);
    }

    #[test]
    fn test_isolation_profile() {
        let mut addon = baseline();
        addon.isolation_profile = IsolationProfile::Profile;
        assert_eq!(rate_security(&addon), 6);
    }

    #[test]
    fn test_platform_login_clamped_at_max() {
        let mut addon = baseline();
        addon.isolation_profile = IsolationProfile::Profile;
        addon.platform_login_enabled = true;

        let rating = assess(&addon);
        assert_eq!(rating.total, 7);
        assert_eq!(rating.score, RATING_MAX);
    }

    #[test]
    fn test_single_dangerous_privilege() {
        let mut addon = baseline();
        addon.requested_privileges.insert(Privilege::SysAdmin);
        assert_eq!(rate_security(&addon), 4);
    }

    #[test]
    fn test_dangerous_privileges_penalized_once() {
        let mut addon = baseline();
        addon.requested_privileges.insert(Privilege::NetAdmin);
        addon.requested_privileges.insert(Privilege::SysAdmin);
        addon.requested_privileges.insert(Privilege::SysRawio);
        addon.requested_privileges.insert(Privilege::SysPtrace);
        addon.requested_privileges.insert(Privilege::SysModule);
        addon.requested_privileges.insert(Privilege::DacReadSearch);

        let rating = assess(&addon);
        assert_eq!(rating.score, 4);
        assert_eq!(rating.adjustments.len(), 1);
        assert_eq!(rating.adjustments[0].factor, Factor::DangerousPrivilege);
    }

    #[test]
    fn test_benign_privileges_ignored() {
        let mut addon = baseline();
        addon.requested_privileges.insert(Privilege::SysNice);
        addon.requested_privileges.insert(Privilege::IpcLock);
        addon.requested_privileges.insert(Privilege::SysTime);
        assert_eq!(rate_security(&addon), 5);
    }

    #[test]
    fn test_api_roles() {
        let mut addon = baseline();
        addon.platform_api_role = PlatformRole::Manager;
        assert_eq!(rate_security(&addon), 4);

        addon.platform_api_role = PlatformRole::Admin;
        assert_eq!(rate_security(&addon), 3);
    }

    #[test]
    fn test_host_network() {
        let mut addon = baseline();
        addon.uses_host_network = true;
        assert_eq!(rate_security(&addon), 4);
    }

    #[test]
    fn test_host_pid_and_full_access_reach_floor() {
        let mut addon = baseline();
        addon.uses_host_process_namespace = true;
        addon.has_full_device_access = true;

        let rating = assess(&addon);
        assert_eq!(rating.total, 1);
        assert_eq!(rating.score, 1);
        assert!(!rating.runtime_override);
    }

    #[test]
    fn test_everything_unsafe_clamped_at_min() {
        let mut addon = baseline();
        addon.isolation_profile = IsolationProfile::Disable;
        addon.requested_privileges.insert(Privilege::SysAdmin);
        addon.platform_api_role = PlatformRole::Admin;
        addon.uses_host_network = true;
        addon.uses_host_process_namespace = true;
        addon.has_full_device_access = true;

        let rating = assess(&addon);
        assert_eq!(rating.total, 5 - 1 - 1 - 2 - 1 - 2 - 2);
        assert_eq!(rating.score, RATING_MIN);
    }

    #[test]
    fn test_runtime_api_overrides_safest_settings() {
        let mut addon = baseline();
        addon.isolation_profile = IsolationProfile::Profile;
        addon.platform_login_enabled = true;
        addon.has_container_runtime_api_access = true;

        let rating = assess(&addon);
        assert_eq!(rating.total, 7);
        assert_eq!(rating.score, 1);
        assert!(rating.runtime_override);
    }

    #[test]
    fn test_adjustments_follow_factor_deltas() {
        let mut addon = baseline();
        addon.platform_login_enabled = true;
        addon.platform_api_role = PlatformRole::Admin;

        let rating = assess(&addon);
        assert_eq!(
            rating.adjustments,
            vec![
                Adjustment {
                    factor: Factor::PlatformLogin,
                    delta: 1
                },
                Adjustment {
                    factor: Factor::AdminRole,
                    delta: -2
                },
            ]
        );
        assert_eq!(rating.score, 4);
    }
}
