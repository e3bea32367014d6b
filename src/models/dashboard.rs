use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeseriesPoint {
    pub date: String,
    pub jobs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_jobs: u64,
    pub jobs_today: u64,
    pub jobs_this_month: u64,
    pub completed_jobs: u64,
    pub total_users: u64,
    pub total_workers: u64,
    pub verified_workers: u64,
    pub most_popular_category: Option<String>,
    pub timeseries: Vec<TimeseriesPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    pub lat: f64,
    pub lng: f64,
    pub count: u64,
}

/// Admin landing page view-model merged from several endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub stats: DashboardStats,
    pub pending_verifications: usize,
    pub heatmap: Vec<HeatmapPoint>,
    pub total_revenue: Option<Decimal>,
    pub active_jobs: Option<u64>,
}
