pub mod admin_service;
pub mod api_client;
pub mod auth_service;
pub mod dashboard_service;
pub mod job_service;
