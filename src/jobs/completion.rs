use crate::error::{Error, Result};
use crate::models::job::Job;
use crate::services::job_service::JobService;
use bytes::Bytes;
use std::path::Path;
use tracing::warn;

/// Photo proof selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Bytes,
}

impl ProofFile {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("proof")
            .to_string();
        let mime = mime_for(path).to_string();
        Ok(Self::new(file_name, mime, bytes))
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

/// Gate in front of marking a job COMPLETED.
///
/// Completion unlocks only after the proof upload and the customer's OTP
/// check both succeeded in this flow. Editing any input locks it again.
#[derive(Debug, Clone)]
pub struct CompletionFlow {
    job: Job,
    proof: Option<ProofFile>,
    phone: String,
    otp: String,
    verifying: bool,
    verified: bool,
}

impl CompletionFlow {
    pub fn new(job: Job) -> Self {
        Self {
            job,
            proof: None,
            phone: String::new(),
            otp: String::new(),
            verifying: false,
            verified: false,
        }
    }

    pub fn job(&self) -> &Job {
        &self.job
    }

    pub fn select_proof(&mut self, proof: Option<ProofFile>) {
        self.proof = proof;
        self.verified = false;
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
        self.verified = false;
    }

    pub fn set_otp(&mut self, otp: impl Into<String>) {
        self.otp = otp.into();
        self.verified = false;
    }

    pub fn is_verifying(&self) -> bool {
        self.verifying
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Mirrors the Verify button: enabled only with every input present and
    /// no verification already running.
    pub fn can_verify(&self) -> bool {
        !self.verifying
            && self.proof.is_some()
            && !self.phone.trim().is_empty()
            && !self.otp.trim().is_empty()
    }

    pub fn can_complete(&self) -> bool {
        self.verified
    }

    /// Uploads the proof, then checks the OTP. `verified` is set only when
    /// both calls succeed.
    pub async fn verify(&mut self, jobs: &JobService) -> Result<()> {
        let Some(proof) = self.proof.clone() else {
            return Err(Error::BadRequest("select a completion photo first".to_string()));
        };
        if self.phone.trim().is_empty() || self.otp.trim().is_empty() {
            return Err(Error::BadRequest("customer phone and OTP are required".to_string()));
        }
        if self.verifying {
            return Err(Error::BadRequest("verification already in progress".to_string()));
        }

        self.verifying = true;
        let outcome = async {
            jobs.upload_proof(self.job.id, &proof).await?;
            jobs.verify_completion_otp(self.job.id, &self.phone, &self.otp).await
        }
        .await;
        self.verifying = false;

        match outcome {
            Ok(()) => {
                self.verified = true;
                Ok(())
            }
            Err(e) => {
                warn!(job_id = self.job.id, error = %e, "Completion verification failed");
                self.verified = false;
                Err(e)
            }
        }
    }

    /// Clears the in-flight flag after a verification future was dropped
    /// before it finished.
    pub fn cancel_verification(&mut self) {
        self.verifying = false;
        self.verified = false;
    }

    pub async fn complete(&mut self, jobs: &JobService) -> Result<()> {
        if !self.verified {
            return Err(Error::NotVerified);
        }
        jobs.complete(&self.job).await
    }
}
