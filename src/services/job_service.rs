use crate::dto::job_dto::{CompletionOtpRequest, CreateJobRequest};
use crate::error::{Error, Result};
use crate::jobs::completion::ProofFile;
use crate::jobs::status::JobAction;
use crate::models::category::CategoryCatalog;
use crate::models::job::Job;
use crate::services::api_client::ApiClient;
use crate::utils::validation::validate;
use reqwest::multipart::{Form, Part};
use tracing::info;

#[derive(Clone)]
pub struct JobService {
    api: ApiClient,
}

impl JobService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn categories(&self) -> Result<CategoryCatalog> {
        self.api.get("/api/jobs/categories").await
    }

    /// Jobs posted by the signed-in client, or taken by the signed-in worker.
    pub async fn my_jobs(&self) -> Result<Vec<Job>> {
        self.api.get("/api/jobs/me").await
    }

    pub async fn nearby(&self) -> Result<Vec<Job>> {
        self.api.get("/api/jobs/worker/nearby").await
    }

    /// Returns the job exactly as the server stored it.
    pub async fn post_job(&self, request: &CreateJobRequest) -> Result<Job> {
        validate(request)?;
        let job: Job = self.api.post("/api/jobs", request).await?;
        info!(job_id = job.id, title = %job.title, "Job posted");
        Ok(job)
    }

    pub async fn accept(&self, job: &Job) -> Result<()> {
        self.transition(job, JobAction::Accept).await
    }

    pub async fn on_the_way(&self, job: &Job) -> Result<()> {
        self.transition(job, JobAction::OnTheWay).await
    }

    pub async fn start(&self, job: &Job) -> Result<()> {
        self.transition(job, JobAction::Start).await
    }

    /// Completion goes through [`crate::jobs::CompletionFlow`], which holds the
    /// proof/OTP gate.
    pub(crate) async fn complete(&self, job: &Job) -> Result<()> {
        self.transition(job, JobAction::Complete).await
    }

    pub async fn upload_proof(&self, job_id: i64, proof: &ProofFile) -> Result<()> {
        let part = Part::bytes(proof.bytes.to_vec())
            .file_name(proof.file_name.clone())
            .mime_str(&proof.mime)?;
        let form = Form::new()
            .part("file", part)
            .text("jobId", job_id.to_string());

        self.api.post_multipart("/api/upload/job-proof", form).await?;
        info!(job_id, file = %proof.file_name, "Completion proof uploaded");
        Ok(())
    }

    pub async fn verify_completion_otp(&self, job_id: i64, phone: &str, otp: &str) -> Result<()> {
        let body = CompletionOtpRequest {
            phone: phone.trim().to_string(),
            otp: otp.trim().to_string(),
        };
        validate(&body)?;
        self.api
            .post_unit(&format!("/api/jobs/{}/complete/verify-otp", job_id), Some(&body))
            .await?;
        info!(job_id, "Completion OTP verified");
        Ok(())
    }

    async fn transition(&self, job: &Job, action: JobAction) -> Result<()> {
        action.check(job)?;
        let segment = action.endpoint().ok_or_else(|| {
            Error::BadRequest(format!("{} has no endpoint of its own", action.label()))
        })?;
        self.api
            .put_unit(&format!("/api/jobs/{}/{}", job.id, segment))
            .await?;
        info!(job_id = job.id, action = %action, "Job status action sent");
        Ok(())
    }
}
