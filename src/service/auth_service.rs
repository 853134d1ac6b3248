// service/auth_service.rs
use crate::{
    dtos::{LoginUserDto, RegisterUserDto},
    error::ClientError,
    middleware::{landing_route, Route},
    models::usermodel::UserRole,
};

use super::{api_client::ApiClient, error::ServiceError};

#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Signs in and returns the page the role lands on.
    pub async fn login(&self, body: &LoginUserDto) -> Result<Route, ServiceError> {
        body.check().map_err(ServiceError::Validation)?;

        let response = match self.api.login(body).await {
            Ok(response) => response,
            // A failed login is not an expired session.
            Err(ClientError::Unauthorized) => {
                return Err(ClientError::Api {
                    status: reqwest::StatusCode::UNAUTHORIZED,
                    message: String::new(),
                }
                .into())
            }
            Err(e) => return Err(e.into()),
        };

        self.api.session().sign_in(&response.token, &response.role)?;
        let role = response.role.parse::<UserRole>().ok();
        tracing::info!("🔐 Login successful, landing on {}", landing_route(role));
        Ok(landing_route(role))
    }

    /// Creates the account. The user signs in separately afterwards.
    pub async fn register(&self, body: &RegisterUserDto) -> Result<Route, ServiceError> {
        body.check().map_err(ServiceError::Validation)?;
        self.api.register(body).await?;
        tracing::info!("New {} account registered for {}", body.role, body.email);
        Ok(Route::Login)
    }

    pub fn logout(&self) -> Result<Route, ServiceError> {
        self.api.session().sign_out()?;
        tracing::info!("Signed out");
        Ok(Route::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, session::SessionContext};

    fn service() -> AuthService {
        let config = Config::default().with_base_url("http://127.0.0.1:9/api");
        AuthService::new(ApiClient::new(&config, SessionContext::ephemeral()).unwrap())
    }

    #[tokio::test]
    async fn invalid_login_never_reaches_the_server() {
        let err = service().login(&LoginUserDto::default()).await.unwrap_err();
        let fields = err.field_errors().unwrap();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn logout_goes_home() {
        let auth = service();
        auth.api.session().sign_in("tok", "client").unwrap();
        assert_eq!(auth.logout().unwrap(), Route::Home);
        assert!(!auth.api.session().is_active());
    }
}
