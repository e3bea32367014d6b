//! Display style and permitted actions per job status.
//!
//! Both are pure lookups. The backend owns the lifecycle; the tables here only
//! decide what a job card offers and which action the client is willing to
//! send for a job it currently sees in a given status.

use crate::error::{Error, Result};
use crate::models::job::{Job, JobStatus};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusStyle {
    pub label: &'static str,
    pub foreground: &'static str,
    pub background: &'static str,
    pub icon: &'static str,
}

const NEUTRAL: StatusStyle = StatusStyle {
    label: "Unknown",
    foreground: "text-gray-500",
    background: "bg-gray-500/10",
    icon: "circle",
};

impl StatusStyle {
    /// Style for a raw wire value; anything unrecognized gets the neutral style.
    pub fn for_status(raw: &str) -> Self {
        raw.parse::<JobStatus>()
            .map(|status| status.style())
            .unwrap_or(NEUTRAL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum JobAction {
    Accept,
    OnTheWay,
    Start,
    ProofAndOtp,
    Complete,
}

impl JobAction {
    pub fn label(&self) -> &'static str {
        match self {
            JobAction::Accept => "Accept",
            JobAction::OnTheWay => "On the way",
            JobAction::Start => "Start",
            JobAction::ProofAndOtp => "Proof & OTP",
            JobAction::Complete => "Complete",
        }
    }

    /// The status a job must be in for this action to be offered.
    pub fn required_status(&self) -> JobStatus {
        match self {
            JobAction::Accept => JobStatus::Open,
            JobAction::OnTheWay | JobAction::Start => JobStatus::Assigned,
            JobAction::ProofAndOtp | JobAction::Complete => JobStatus::InProgress,
        }
    }

    /// Status the backend moves the job to once the action succeeds.
    pub fn resulting_status(&self) -> JobStatus {
        match self {
            JobAction::Accept | JobAction::OnTheWay => JobStatus::Assigned,
            JobAction::Start | JobAction::ProofAndOtp => JobStatus::InProgress,
            JobAction::Complete => JobStatus::Completed,
        }
    }

    /// Path segment of the `PUT /api/jobs/:id/<segment>` endpoint, if the
    /// action maps to one.
    pub fn endpoint(&self) -> Option<&'static str> {
        match self {
            JobAction::Accept => Some("accept"),
            JobAction::OnTheWay => Some("on-the-way"),
            JobAction::Start => Some("start"),
            JobAction::ProofAndOtp => None,
            JobAction::Complete => Some("complete"),
        }
    }

    pub fn is_permitted(&self, status: JobStatus) -> bool {
        status.actions().contains(self)
    }

    /// Rejects out-of-order actions before any request is sent.
    pub fn check(&self, job: &Job) -> Result<()> {
        if self.is_permitted(job.status) {
            Ok(())
        } else {
            Err(Error::InvalidTransition {
                action: self.label().to_lowercase(),
                status: job.status.to_string(),
            })
        }
    }
}

impl fmt::Display for JobAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl JobStatus {
    pub fn style(&self) -> StatusStyle {
        match self {
            JobStatus::Open => StatusStyle {
                label: "Open",
                foreground: "text-green-500",
                background: "bg-green-500/10",
                icon: "clock",
            },
            JobStatus::Assigned => StatusStyle {
                label: "Assigned",
                foreground: "text-blue-500",
                background: "bg-blue-500/10",
                icon: "check-circle",
            },
            JobStatus::InProgress => StatusStyle {
                label: "In progress",
                foreground: "text-yellow-500",
                background: "bg-yellow-500/10",
                icon: "clock",
            },
            JobStatus::Completed => StatusStyle {
                label: "Completed",
                foreground: "text-purple-500",
                background: "bg-purple-500/10",
                icon: "check-circle",
            },
            JobStatus::Unknown => NEUTRAL,
        }
    }

    /// Buttons a job card shows, in display order.
    pub fn actions(&self) -> &'static [JobAction] {
        match self {
            JobStatus::Open => &[JobAction::Accept],
            JobStatus::Assigned => &[JobAction::OnTheWay, JobAction::Start],
            JobStatus::InProgress => &[JobAction::ProofAndOtp, JobAction::Complete],
            JobStatus::Completed | JobStatus::Unknown => &[],
        }
    }
}
