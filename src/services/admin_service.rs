use crate::dto::admin_dto::{CategoryNameRequest, MessageResponse, ReassignRequest, RejectWorkerRequest};
use crate::error::Result;
use crate::models::category::Category;
use crate::models::dashboard::{DashboardStats, HeatmapPoint};
use crate::models::job::Job;
use crate::models::report::Report;
use crate::models::user::User;
use crate::models::worker::{LeaderboardEntry, PendingWorker, VerifiedWorker};
use crate::services::api_client::ApiClient;
use crate::utils::validation::require_non_blank;
use tracing::info;

/// Calls under `/api/admin`. Every endpoint requires an ADMIN bearer token.
#[derive(Clone)]
pub struct AdminService {
    api: ApiClient,
}

impl AdminService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.api.get("/api/admin/dashboard").await
    }

    pub async fn heatmap(&self) -> Result<Vec<HeatmapPoint>> {
        self.api.get("/api/admin/jobs/heatmap").await
    }

    pub async fn pending_workers(&self) -> Result<Vec<PendingWorker>> {
        self.api.get("/api/admin/workers/pending").await
    }

    pub async fn verified_workers(&self) -> Result<Vec<VerifiedWorker>> {
        self.api.get("/api/admin/workers/verified").await
    }

    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        self.api.get("/api/admin/workers/leaderboard").await
    }

    pub async fn approve_worker(&self, worker_id: i64) -> Result<()> {
        self.api
            .post_unit::<()>(&format!("/api/admin/workers/{}/approve", worker_id), None)
            .await?;
        info!(worker_id, "Worker approved");
        Ok(())
    }

    pub async fn reject_worker(&self, worker_id: i64, reason: Option<String>) -> Result<MessageResponse> {
        let body = RejectWorkerRequest {
            reason: reason.filter(|r| !r.trim().is_empty()),
        };
        let res: MessageResponse = self
            .api
            .post(&format!("/api/admin/workers/{}/reject", worker_id), &body)
            .await?;
        info!(worker_id, reason = ?body.reason, "Worker rejected");
        Ok(res)
    }

    pub async fn users(&self) -> Result<Vec<User>> {
        self.api.get("/api/admin/users").await
    }

    pub async fn ban_user(&self, user_id: i64) -> Result<()> {
        self.api
            .post_unit::<()>(&format!("/api/admin/users/{}/ban", user_id), None)
            .await?;
        info!(user_id, "User banned");
        Ok(())
    }

    pub async fn unban_user(&self, user_id: i64) -> Result<()> {
        self.api
            .post_unit::<()>(&format!("/api/admin/users/{}/unban", user_id), None)
            .await?;
        info!(user_id, "User unbanned");
        Ok(())
    }

    pub async fn jobs(&self) -> Result<Vec<Job>> {
        self.api.get("/api/admin/jobs").await
    }

    pub async fn reassign_job(&self, job_id: i64, worker_profile_id: i64) -> Result<()> {
        let body = ReassignRequest { worker_profile_id };
        self.api
            .post_unit(&format!("/api/admin/jobs/{}/reassign", job_id), Some(&body))
            .await?;
        info!(job_id, worker_profile_id, "Job reassigned");
        Ok(())
    }

    pub async fn fraud_reports(&self) -> Result<Vec<Report>> {
        self.api.get("/api/admin/fraud/reports").await
    }

    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.api.get("/api/admin/categories").await
    }

    pub async fn create_category(&self, name: &str) -> Result<Category> {
        let body = CategoryNameRequest {
            name: require_non_blank("category name", name)?,
        };
        let category: Category = self.api.post("/api/admin/categories", &body).await?;
        info!(category_id = category.id, name = %category.name, "Category created");
        Ok(category)
    }

    pub async fn rename_category(&self, id: i64, name: &str) -> Result<Category> {
        let body = CategoryNameRequest {
            name: require_non_blank("category name", name)?,
        };
        let category: Category = self
            .api
            .put(&format!("/api/admin/categories/{}", id), &body)
            .await?;
        info!(category_id = id, name = %category.name, "Category renamed");
        Ok(category)
    }

    pub async fn delete_category(&self, id: i64) -> Result<()> {
        self.api
            .delete(&format!("/api/admin/categories/{}", id))
            .await?;
        info!(category_id = id, "Category deleted");
        Ok(())
    }
}
