use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fraud/dispute report as listed in the admin panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: i64,
    pub reported_user: String,
    pub reason: String,
    pub status: String,
    #[serde(default, with = "crate::utils::time::flexible_option")]
    pub created_at: Option<DateTime<Utc>>,
}
