//! Admin panel pages. Each page re-fetches its list after a successful
//! mutation instead of patching it locally.

use crate::error::{Error, Result};
use crate::models::category::Category;
use crate::models::dashboard::AdminDashboard;
use crate::models::job::Job;
use crate::models::report::Report;
use crate::models::user::User;
use crate::models::worker::{PendingWorker, VerifiedWorker};
use crate::services::admin_service::AdminService;
use crate::services::dashboard_service::{DashboardService, Fetched};
use crate::views::scope::ViewScope;
use crate::AppState;
use std::collections::HashMap;

pub struct DashboardView {
    service: DashboardService,
    scope: ViewScope,
    pub data: Option<Fetched<AdminDashboard>>,
}

impl DashboardView {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: state.dashboard_service.clone(),
            scope: ViewScope::new(),
            data: None,
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Only cancellation is an error here; fetch failures come back as
    /// [`Fetched::Degraded`].
    pub async fn load(&mut self) -> Result<&Fetched<AdminDashboard>> {
        let service = &self.service;
        let fetched = self.scope.run(async { Ok(service.load().await) }).await?;
        Ok(self.data.insert(fetched))
    }
}

pub struct UsersPage {
    service: AdminService,
    scope: ViewScope,
    pub users: Vec<User>,
}

impl UsersPage {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: state.admin_service.clone(),
            scope: ViewScope::new(),
            users: Vec::new(),
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub async fn load(&mut self) -> Result<()> {
        self.users = self.scope.run(self.service.users()).await?;
        Ok(())
    }

    pub async fn ban(&mut self, user_id: i64) -> Result<()> {
        self.scope.run(self.service.ban_user(user_id)).await?;
        self.load().await
    }

    pub async fn unban(&mut self, user_id: i64) -> Result<()> {
        self.scope.run(self.service.unban_user(user_id)).await?;
        self.load().await
    }
}

pub struct CategoriesPage {
    service: AdminService,
    scope: ViewScope,
    pub categories: Vec<Category>,
}

impl CategoriesPage {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: state.admin_service.clone(),
            scope: ViewScope::new(),
            categories: Vec::new(),
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub async fn load(&mut self) -> Result<()> {
        self.categories = self.scope.run(self.service.categories()).await?;
        Ok(())
    }

    pub async fn create(&mut self, name: &str) -> Result<()> {
        self.scope.run(self.service.create_category(name)).await?;
        self.load().await
    }

    pub async fn rename(&mut self, id: i64, name: &str) -> Result<()> {
        self.scope.run(self.service.rename_category(id, name)).await?;
        self.load().await
    }

    pub async fn delete(&mut self, id: i64) -> Result<()> {
        self.scope.run(self.service.delete_category(id)).await?;
        self.load().await
    }
}

pub struct JobsPage {
    service: AdminService,
    scope: ViewScope,
    pub jobs: Vec<Job>,
    pub workers: Vec<VerifiedWorker>,
    /// Worker profile picked per job id.
    selected: HashMap<i64, i64>,
}

impl JobsPage {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: state.admin_service.clone(),
            scope: ViewScope::new(),
            jobs: Vec::new(),
            workers: Vec::new(),
            selected: HashMap::new(),
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub async fn load(&mut self) -> Result<()> {
        let service = &self.service;
        let (jobs, workers) = self
            .scope
            .run(async { tokio::try_join!(service.jobs(), service.verified_workers()) })
            .await?;
        self.jobs = jobs;
        self.workers = workers;
        Ok(())
    }

    pub fn selected_worker(&self, job_id: i64) -> Option<i64> {
        self.selected.get(&job_id).copied()
    }

    /// Picks the worker profile the given job will be reassigned to. The id
    /// must belong to a verified worker on this page; `None` clears the pick.
    pub fn select_worker(&mut self, job_id: i64, worker_profile_id: Option<i64>) -> Result<()> {
        match worker_profile_id {
            Some(id) => {
                if !self.workers.iter().any(|w| w.id == id) {
                    return Err(Error::NotFound(format!("verified worker {}", id)));
                }
                self.selected.insert(job_id, id);
            }
            None => {
                self.selected.remove(&job_id);
            }
        }
        Ok(())
    }

    /// Returns `false` without calling the backend when no worker is
    /// selected for this job.
    pub async fn reassign(&mut self, job_id: i64) -> Result<bool> {
        let Some(worker) = self.selected_worker(job_id) else {
            return Ok(false);
        };
        self.scope
            .run(self.service.reassign_job(job_id, worker))
            .await?;
        self.selected.remove(&job_id);
        self.load().await?;
        Ok(true)
    }
}

pub struct DisputesPage {
    service: AdminService,
    scope: ViewScope,
    pub reports: Vec<Report>,
}

impl DisputesPage {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: state.admin_service.clone(),
            scope: ViewScope::new(),
            reports: Vec::new(),
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub async fn load(&mut self) -> Result<()> {
        self.reports = self.scope.run(self.service.fraud_reports()).await?;
        Ok(())
    }

    pub fn open_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| !r.status.eq_ignore_ascii_case("resolved"))
            .count()
    }
}

pub struct WorkerVerificationPage {
    service: AdminService,
    scope: ViewScope,
    pub pending: Vec<PendingWorker>,
}

impl WorkerVerificationPage {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: state.admin_service.clone(),
            scope: ViewScope::new(),
            pending: Vec::new(),
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub async fn load(&mut self) -> Result<()> {
        self.pending = self.scope.run(self.service.pending_workers()).await?;
        Ok(())
    }

    pub async fn approve(&mut self, worker_id: i64) -> Result<()> {
        self.scope.run(self.service.approve_worker(worker_id)).await?;
        self.load().await
    }

    pub async fn reject(&mut self, worker_id: i64, reason: Option<String>) -> Result<()> {
        self.scope
            .run(self.service.reject_worker(worker_id, reason))
            .await?;
        self.load().await
    }
}
