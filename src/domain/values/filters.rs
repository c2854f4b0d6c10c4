use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Immutable dashboard filter snapshot. Consumers receive this by value;
/// there is no shared mutable filter state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFilters {
    /// Site (stockroom) name to match exactly. None means all sites.
    pub site: Option<String>,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    /// Case-insensitive containment match on SKU and article name.
    pub search: Option<String>,
    /// Restrict to items with less than 15 days of coverage.
    pub alerts_only: bool,
}

impl DashboardFilters {
    /// Default window: start of 2025 through now, no other restriction.
    pub fn new() -> Self {
        Self {
            site: None,
            from: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            to: Utc::now(),
            search: None,
            alerts_only: false,
        }
    }
}

impl Default for DashboardFilters {
    fn default() -> Self {
        Self::new()
    }
}

/// Draft-versus-applied filter pair: edits accumulate in the draft and
/// only take effect when applied, exactly like the dashboard's
/// "Apply filters" button.
#[derive(Debug, Clone)]
pub struct FilterState {
    pub draft: DashboardFilters,
    applied: DashboardFilters,
}

impl FilterState {
    pub fn new() -> Self {
        let initial = DashboardFilters::new();
        Self {
            draft: initial.clone(),
            applied: initial,
        }
    }

    /// The snapshot data consumers should filter against.
    pub fn applied(&self) -> &DashboardFilters {
        &self.applied
    }

    pub fn apply(&mut self) {
        self.applied = self.draft.clone();
    }

    pub fn clear(&mut self) {
        self.draft = DashboardFilters::new();
        self.applied = self.draft.clone();
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}
