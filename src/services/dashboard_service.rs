use crate::models::dashboard::{AdminDashboard, DashboardStats, HeatmapPoint};
use crate::services::admin_service::AdminService;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

/// Result of a fetch that may fall back to placeholder data.
///
/// The fallback is visible to the caller instead of being silently mixed
/// into the view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Fetched<T> {
    Live(T),
    Degraded { data: T, cause: String },
}

impl<T> Fetched<T> {
    pub fn data(&self) -> &T {
        match self {
            Fetched::Live(data) | Fetched::Degraded { data, .. } => data,
        }
    }

    pub fn into_data(self) -> T {
        match self {
            Fetched::Live(data) | Fetched::Degraded { data, .. } => data,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Fetched::Degraded { .. })
    }
}

#[derive(Clone)]
pub struct DashboardService {
    admin: AdminService,
}

impl DashboardService {
    pub fn new(admin: AdminService) -> Self {
        Self { admin }
    }

    /// Fetches stats, the pending-verification queue and heatmap points in
    /// parallel. Any failure yields the placeholder dashboard in degraded mode.
    pub async fn load(&self) -> Fetched<AdminDashboard> {
        let fetched = tokio::try_join!(
            self.admin.dashboard_stats(),
            self.admin.pending_workers(),
            self.admin.heatmap(),
        );

        match fetched {
            Ok((stats, pending, heatmap)) => {
                info!(
                    total_jobs = stats.total_jobs,
                    pending = pending.len(),
                    "Dashboard loaded"
                );
                Fetched::Live(AdminDashboard {
                    stats,
                    pending_verifications: pending.len(),
                    heatmap,
                    total_revenue: None,
                    active_jobs: None,
                })
            }
            Err(e) => {
                warn!(error = %e, "Dashboard fetch failed, serving placeholder data");
                Fetched::Degraded {
                    data: placeholder_dashboard(),
                    cause: e.to_string(),
                }
            }
        }
    }
}

pub fn placeholder_dashboard() -> AdminDashboard {
    AdminDashboard {
        stats: DashboardStats {
            total_jobs: 156,
            total_users: 89,
            total_workers: 67,
            verified_workers: 52,
            ..DashboardStats::default()
        },
        pending_verifications: 15,
        heatmap: vec![
            HeatmapPoint { lat: 28.6139, lng: 77.2090, count: 15 },
            HeatmapPoint { lat: 19.0760, lng: 72.8777, count: 12 },
            HeatmapPoint { lat: 12.9716, lng: 77.5946, count: 8 },
        ],
        total_revenue: Some(Decimal::from(125_000)),
        active_jobs: Some(45),
    }
}
