use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-owned lifecycle label. Values the client does not know about
/// deserialize to `Unknown` instead of failing the whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Open,
    Assigned,
    InProgress,
    Completed,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "OPEN",
            JobStatus::Assigned => "ASSIGNED",
            JobStatus::InProgress => "IN_PROGRESS",
            JobStatus::Completed => "COMPLETED",
            JobStatus::Unknown => "UNKNOWN",
        }
    }

    /// Position along OPEN -> ASSIGNED -> IN_PROGRESS -> COMPLETED.
    pub fn rank(&self) -> Option<u8> {
        match self {
            JobStatus::Open => Some(0),
            JobStatus::Assigned => Some(1),
            JobStatus::InProgress => Some(2),
            JobStatus::Completed => Some(3),
            JobStatus::Unknown => None,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "OPEN" => JobStatus::Open,
            "ASSIGNED" => JobStatus::Assigned,
            "IN_PROGRESS" => JobStatus::InProgress,
            "COMPLETED" => JobStatus::Completed,
            _ => JobStatus::Unknown,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: JobStatus,
    #[serde(default)]
    pub budget: Option<Decimal>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, with = "crate::utils::time::flexible_option")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub worker_id: Option<i64>,
    #[serde(default, alias = "category")]
    pub category_name: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default, with = "crate::utils::time::flexible_option")]
    pub created_at: Option<DateTime<Utc>>,
}
