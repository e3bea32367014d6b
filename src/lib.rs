pub mod cli;
pub mod config;
pub mod dto;
pub mod error;
pub mod jobs;
pub mod models;
pub mod routing;
pub mod services;
pub mod session;
pub mod utils;
pub mod views;

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    admin_service::AdminService, api_client::ApiClient, auth_service::AuthService,
    dashboard_service::DashboardService, job_service::JobService,
};
use crate::session::{AppKind, FileSessionStore, SessionStore};
use std::sync::Arc;

/// Everything a page needs, built once per app and cloned into views.
/// All services share one [`ApiClient`], so the bearer installed by
/// [`AuthService`] applies to every call.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub api: ApiClient,
    pub auth: AuthService,
    pub job_service: JobService,
    pub admin_service: AdminService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub fn new(config: Config, kind: AppKind) -> Result<Self> {
        let store = FileSessionStore::new(&config.session_dir, kind.storage_name());
        Self::with_store(config, kind, Arc::new(store))
    }

    pub fn with_store(config: Config, kind: AppKind, store: Arc<dyn SessionStore>) -> Result<Self> {
        let api = ApiClient::new(&config)?;
        let auth = AuthService::new(api.clone(), store, kind);
        let job_service = JobService::new(api.clone());
        let admin_service = AdminService::new(api.clone());
        let dashboard_service = DashboardService::new(admin_service.clone());

        Ok(Self {
            config,
            api,
            auth,
            job_service,
            admin_service,
            dashboard_service,
        })
    }
}
