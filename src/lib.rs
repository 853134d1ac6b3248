//! Client for the HOME-MAN local services marketplace.
//!
//! Clients hire professionals, professionals accept or decline requests, and an
//! administrator verifies and manages professional accounts. The server owns every
//! record; this crate holds transient copies, applies the advisory booking rules,
//! and turns booking status changes into transient notifications.

pub mod config;
pub mod dtos;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod models;
pub mod service;
pub mod session;
pub mod utils;

use std::sync::Arc;

pub use config::Config;
pub use error::ClientError;
pub use service::api_client::ApiClient;
pub use session::SessionContext;

use service::{
    admin_service::AdminService, auth_service::AuthService, client_service::ClientService,
    directory_service::DirectoryService, pro_service::ProService,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
    pub session: Arc<SessionContext>,
    pub api: ApiClient,
    // Services
    pub auth_service: AuthService,
    pub client_service: ClientService,
    pub pro_service: ProService,
    pub admin_service: AdminService,
    pub directory_service: DirectoryService,
}

impl AppState {
    pub fn new(env: Config, session: Arc<SessionContext>) -> Result<Self, ClientError> {
        let api = ApiClient::new(&env, session.clone())?;
        Ok(AppState {
            auth_service: AuthService::new(api.clone()),
            client_service: ClientService::new(api.clone()),
            pro_service: ProService::new(api.clone()),
            admin_service: AdminService::new(api.clone()),
            directory_service: DirectoryService::new(api.clone()),
            env,
            session,
            api,
        })
    }
}
