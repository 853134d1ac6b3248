pub mod admin_service;
pub mod api_client;
pub mod auth_service;
pub mod background_jobs;
pub mod client_service;
pub mod directory_service;
pub mod eligibility;
pub mod error;
pub mod notification_service;
pub mod pro_service;
