/// Admin and health payloads
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counters shown on the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Registered users
    #[serde(default)]
    pub total_users: u64,

    /// Tracks in the catalogue
    #[serde(default)]
    pub total_songs: u64,

    /// Users whose account is enabled
    #[serde(default)]
    pub active_users: u64,
}

/// Liveness report: component name to `"UP"` / `"DOWN"`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthStatus(pub BTreeMap<String, String>);

impl HealthStatus {
    /// True when every reported component is up
    pub fn is_healthy(&self) -> bool {
        !self.0.is_empty() && self.0.values().all(|v| v.eq_ignore_ascii_case("UP"))
    }

    /// Components reported as anything other than up
    pub fn failing(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(_, v)| !v.eq_ignore_ascii_case("UP"))
            .map(|(k, _)| k.as_str())
            .collect()
    }
}
