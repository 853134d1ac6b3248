// service/admin_service.rs
use crate::{
    models::{
        analyticsmodel::{Analytics, DashboardStats},
        usermodel::Professional,
    },
    utils::objectid,
};

use super::{api_client::ApiClient, error::ServiceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    Verify,
    ToggleSuspension,
    Delete,
}

impl AdminAction {
    pub fn to_str(&self) -> &str {
        match self {
            AdminAction::Verify => "verify",
            AdminAction::ToggleSuspension => "suspend",
            AdminAction::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdminDashboard {
    /// Newest registration first.
    pub pros: Vec<Professional>,
    pub stats: DashboardStats,
}

impl AdminDashboard {
    pub fn new(mut pros: Vec<Professional>, stats: DashboardStats) -> Self {
        pros.sort_by_key(|p| objectid::newest_first_key(&p.id));
        AdminDashboard { pros, stats }
    }

    /// Case-insensitive substring match on name or email. A blank term keeps everyone.
    pub fn search(&self, term: &str) -> Vec<&Professional> {
        let term = term.trim().to_lowercase();
        self.pros
            .iter()
            .filter(|p| {
                term.is_empty()
                    || p.name.to_lowercase().contains(&term)
                    || p.email.to_lowercase().contains(&term)
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct AdminService {
    api: ApiClient,
}

impl AdminService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn dashboard(&self) -> Result<AdminDashboard, ServiceError> {
        let (pros, stats) = self.api.fetch_dashboard().await?.into_parts();
        Ok(AdminDashboard::new(pros, stats))
    }

    pub async fn analytics(&self) -> Result<Analytics, ServiceError> {
        Ok(self.api.fetch_analytics().await?)
    }

    /// Runs one account action and reloads the dashboard from the server.
    ///
    /// Deleting is refused unless `confirmed` is set; nothing is sent in that case.
    pub async fn act(
        &self,
        action: AdminAction,
        pro_id: &str,
        confirmed: bool,
    ) -> Result<AdminDashboard, ServiceError> {
        match action {
            AdminAction::Verify => self.api.verify_pro(pro_id).await?,
            AdminAction::ToggleSuspension => self.api.toggle_suspension(pro_id).await?,
            AdminAction::Delete => {
                if !confirmed {
                    return Err(ServiceError::ConfirmationRequired);
                }
                self.api.delete_user(pro_id).await?
            }
        }

        tracing::info!("🛠️ Admin {} applied to {}", action.to_str(), pro_id);
        self.dashboard().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, session::SessionContext};
    use serde_json::json;

    fn pros() -> Vec<Professional> {
        serde_json::from_value(json!([
            { "_id": "65000000aaaaaaaaaaaaaaaa", "name": "Old Timer", "email": "old@example.com" },
            { "_id": "not-an-object-id", "name": "Mystery", "email": "who@example.com" },
            { "_id": "66000000aaaaaaaaaaaaaaaa", "name": "Newcomer", "email": "NEW@Example.com" }
        ]))
        .unwrap()
    }

    #[test]
    fn newest_registrations_first() {
        let dashboard = AdminDashboard::new(pros(), DashboardStats::default());
        let names: Vec<_> = dashboard.pros.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Newcomer", "Old Timer", "Mystery"]);
    }

    #[test]
    fn search_matches_name_or_email() {
        let dashboard = AdminDashboard::new(pros(), DashboardStats::default());
        assert_eq!(dashboard.search("new@example").len(), 1);
        assert_eq!(dashboard.search("TIMER")[0].name, "Old Timer");
        assert_eq!(dashboard.search("  ").len(), 3);
        assert!(dashboard.search("nobody").is_empty());
    }

    #[tokio::test]
    async fn delete_without_confirmation_sends_nothing() {
        // Nothing listens on this port; a request would surface as a transport error.
        let config = Config::default().with_base_url("http://127.0.0.1:9/api");
        let service = AdminService::new(ApiClient::new(&config, SessionContext::ephemeral()).unwrap());
        let result = service.act(AdminAction::Delete, "65000000aaaaaaaaaaaaaaaa", false).await;
        assert!(matches!(result, Err(ServiceError::ConfirmationRequired)));
    }
}
