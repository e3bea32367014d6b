use crate::dto::job_dto::CreateJobRequest;
use crate::error::{Error, Result};
use crate::models::category::CategoryCatalog;
use crate::models::job::Job;
use crate::services::job_service::JobService;
use crate::views::scope::ViewScope;
use crate::AppState;
use rust_decimal::Decimal;
use tracing::warn;

/// Inputs of the "Post New Job" form.
#[derive(Debug, Clone, Default)]
pub struct JobForm {
    pub title: String,
    pub description: String,
    pub category_id: Option<i64>,
    pub budget: Option<Decimal>,
    pub address: String,
    /// Title picked from the category catalog.
    pub selected_category: Option<String>,
    /// Free-text title typed instead of a catalog pick.
    pub custom_job: Option<String>,
}

impl JobForm {
    /// The custom title wins over a catalog pick, which wins over the plain
    /// title field.
    pub fn resolved_title(&self) -> String {
        [self.custom_job.as_deref(), self.selected_category.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|t| !t.is_empty())
            .unwrap_or(self.title.trim())
            .to_string()
    }

    pub fn to_request(&self) -> Result<CreateJobRequest> {
        let title = self.resolved_title();
        if title.is_empty() {
            return Err(Error::BadRequest("job title is required".to_string()));
        }
        if matches!(self.budget, Some(b) if b.is_sign_negative()) {
            return Err(Error::BadRequest("budget cannot be negative".to_string()));
        }
        Ok(CreateJobRequest {
            title,
            description: non_blank(&self.description),
            category_id: self.category_id,
            budget: self.budget,
            address: non_blank(&self.address),
        })
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub struct ClientDashboard {
    service: JobService,
    scope: ViewScope,
    pub catalog: CategoryCatalog,
    /// Why the catalog is empty after the last load, if it failed.
    pub catalog_error: Option<String>,
    pub jobs: Vec<Job>,
}

impl ClientDashboard {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: state.job_service.clone(),
            scope: ViewScope::new(),
            catalog: CategoryCatalog::new(),
            catalog_error: None,
            jobs: Vec::new(),
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Fetches the catalog and the client's jobs side by side. A failed
    /// catalog only leaves the title suggestions empty; the job list still
    /// loads. Errors from the job list (or cancellation) are returned.
    pub async fn load(&mut self) -> Result<()> {
        let service = &self.service;
        let (catalog, jobs) = self
            .scope
            .run(async { Ok(tokio::join!(service.categories(), service.my_jobs())) })
            .await?;

        match catalog {
            Ok(catalog) => {
                self.catalog = catalog;
                self.catalog_error = None;
            }
            Err(e) => {
                warn!(error = %e, "Job catalog unavailable");
                self.catalog_error = Some(e.to_string());
            }
        }
        self.jobs = jobs?;
        Ok(())
    }

    /// Posts the form and puts the job the server returned at the top of the
    /// list.
    pub async fn post_job(&mut self, form: &JobForm) -> Result<&Job> {
        let request = form.to_request()?;
        let job = self.scope.run(self.service.post_job(&request)).await?;
        self.jobs.insert(0, job);
        Ok(&self.jobs[0])
    }
}
