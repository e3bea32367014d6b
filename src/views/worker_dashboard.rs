use crate::error::{Error, Result};
use crate::jobs::completion::{CompletionFlow, ProofFile};
use crate::models::category::flatten_catalog;
use crate::models::job::Job;
use crate::services::job_service::JobService;
use crate::views::scope::ViewScope;
use crate::AppState;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Server order.
    #[default]
    Relevance,
    Budget,
    Date,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Client-side filters over the nearby list. Unset bounds do not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilters {
    pub category: Option<String>,
    pub min_budget: Option<Decimal>,
    pub max_budget: Option<Decimal>,
    pub sort_by: SortBy,
    pub order: SortOrder,
}

impl JobFilters {
    pub fn matches(&self, job: &Job) -> bool {
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            let hit = job
                .category_name
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(category))
                || job.title.eq_ignore_ascii_case(category);
            if !hit {
                return false;
            }
        }
        let budget = job.budget.unwrap_or_default();
        if self.min_budget.is_some_and(|min| budget < min) {
            return false;
        }
        if self.max_budget.is_some_and(|max| budget > max) {
            return false;
        }
        true
    }

    pub fn apply(&self, jobs: &[Job]) -> Vec<Job> {
        let mut out: Vec<Job> = jobs.iter().filter(|j| self.matches(j)).cloned().collect();
        let cmp: Option<fn(&Job, &Job) -> Ordering> = match self.sort_by {
            SortBy::Relevance => None,
            SortBy::Budget => Some(by_budget),
            SortBy::Date => Some(by_date),
        };
        if let Some(cmp) = cmp {
            match self.order {
                SortOrder::Asc => out.sort_by(cmp),
                SortOrder::Desc => out.sort_by(|a, b| cmp(b, a)),
            }
        }
        out
    }
}

fn by_budget(a: &Job, b: &Job) -> Ordering {
    a.budget.unwrap_or_default().cmp(&b.budget.unwrap_or_default())
}

fn by_date(a: &Job, b: &Job) -> Ordering {
    a.created_at.cmp(&b.created_at)
}

pub struct WorkerDashboard {
    service: JobService,
    scope: ViewScope,
    pub nearby: Vec<Job>,
    pub my_jobs: Vec<Job>,
    pub categories: Vec<String>,
    pub filters: JobFilters,
    completion: Option<CompletionFlow>,
}

impl WorkerDashboard {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: state.job_service.clone(),
            scope: ViewScope::new(),
            nearby: Vec::new(),
            my_jobs: Vec::new(),
            categories: Vec::new(),
            filters: JobFilters::default(),
            completion: None,
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub async fn load(&mut self) -> Result<()> {
        let service = &self.service;
        let (catalog, nearby, mine) = self
            .scope
            .run(async { tokio::try_join!(service.categories(), service.nearby(), service.my_jobs()) })
            .await?;
        self.categories = flatten_catalog(&catalog);
        self.nearby = nearby;
        self.my_jobs = mine;
        Ok(())
    }

    /// Re-fetches both job lists after a status action.
    pub async fn refresh(&mut self) -> Result<()> {
        let service = &self.service;
        let (nearby, mine) = self
            .scope
            .run(async { tokio::try_join!(service.nearby(), service.my_jobs()) })
            .await?;
        self.nearby = nearby;
        self.my_jobs = mine;
        Ok(())
    }

    pub fn filtered_nearby(&self) -> Vec<Job> {
        self.filters.apply(&self.nearby)
    }

    pub fn find(&self, job_id: i64) -> Option<&Job> {
        self.my_jobs
            .iter()
            .chain(self.nearby.iter())
            .find(|j| j.id == job_id)
    }

    fn job(&self, job_id: i64) -> Result<Job> {
        self.find(job_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("job {} is not on this dashboard", job_id)))
    }

    pub async fn accept(&mut self, job_id: i64) -> Result<()> {
        let job = self.job(job_id)?;
        self.scope.run(self.service.accept(&job)).await?;
        self.refresh().await
    }

    pub async fn on_the_way(&mut self, job_id: i64) -> Result<()> {
        let job = self.job(job_id)?;
        self.scope.run(self.service.on_the_way(&job)).await?;
        self.refresh().await
    }

    pub async fn start(&mut self, job_id: i64) -> Result<()> {
        let job = self.job(job_id)?;
        self.scope.run(self.service.start(&job)).await?;
        self.refresh().await
    }

    /// Opens the proof-and-OTP dialog for an in-progress job.
    pub fn begin_completion(&mut self, job_id: i64) -> Result<&mut CompletionFlow> {
        let job = self.job(job_id)?;
        crate::jobs::status::JobAction::ProofAndOtp.check(&job)?;
        Ok(self.completion.insert(CompletionFlow::new(job)))
    }

    pub fn completion(&mut self) -> Option<&mut CompletionFlow> {
        self.completion.as_mut()
    }

    pub fn close_completion(&mut self) {
        self.completion = None;
    }

    pub async fn verify_completion(
        &mut self,
        proof: ProofFile,
        phone: &str,
        otp: &str,
    ) -> Result<()> {
        let flow = self
            .completion
            .as_mut()
            .ok_or_else(|| Error::BadRequest("no completion in progress".to_string()))?;
        flow.select_proof(Some(proof));
        flow.set_phone(phone);
        flow.set_otp(otp);

        let res = self.scope.run(flow.verify(&self.service)).await;
        if let Err(Error::Cancelled) = res {
            warn!(job_id = flow.job().id, "Completion verification abandoned");
            flow.cancel_verification();
        }
        res
    }

    /// Marks the job completed and closes the dialog. Refused until the
    /// verification step passed.
    pub async fn finish_completion(&mut self) -> Result<()> {
        let flow = self
            .completion
            .as_mut()
            .ok_or_else(|| Error::BadRequest("no completion in progress".to_string()))?;
        self.scope.run(flow.complete(&self.service)).await?;
        self.completion = None;
        self.refresh().await
    }
}
