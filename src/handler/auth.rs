use crate::{
    dtos::{LoginUserDto, RegisterUserDto},
    error::ErrorMessage,
    middleware::Route,
    models::usermodel::UserRole,
    AppState,
};

use super::{require, PageError, PageResult};

pub async fn login(app_state: &AppState, email: String, password: String) -> PageResult {
    require(app_state, Route::Login)?;

    let body = LoginUserDto { email, password };
    let landing = app_state
        .auth_service
        .login(&body)
        .await
        .map_err(|e| PageError::from_service(e, ErrorMessage::WrongCredentials, Route::Login))?;

    Ok(format!("Welcome back! Continue at {}", landing))
}

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub location: String,
    pub skill: Option<String>,
}

pub async fn register(app_state: &AppState, input: RegisterInput) -> PageResult {
    require(app_state, Route::Register)?;

    let body = RegisterUserDto::new(
        input.name,
        input.email,
        input.password,
        input.role,
        input.phone,
        input.location,
        input.skill,
    );

    match app_state.auth_service.register(&body).await {
        Ok(next) => Ok(format!("Registration successful. Sign in at {}", next)),
        Err(e) => match e.field_errors() {
            // Every field message is worth showing on the registration form.
            Some(fields) => Err(PageError::Toast {
                message: fields
                    .iter()
                    .map(|(field, message)| format!("{}: {}", field, message))
                    .collect::<Vec<_>>()
                    .join("\n"),
                redirect: None,
            }),
            None => Err(PageError::from_service(e, ErrorMessage::RegistrationFailed, Route::Register)),
        },
    }
}

pub fn logout(app_state: &AppState) -> PageResult {
    let next = app_state
        .auth_service
        .logout()
        .map_err(|e| PageError::from_service(e, ErrorMessage::ServerError, Route::Home))?;
    Ok(format!("Signed out. Back to {}", next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, session::SessionContext};

    #[tokio::test]
    async fn registration_lists_every_bad_field() {
        let config = Config::default().with_base_url("http://127.0.0.1:9/api");
        let app = AppState::new(config, SessionContext::ephemeral()).unwrap();
        let input = RegisterInput {
            name: String::new(),
            email: "bad".into(),
            password: "123".into(),
            role: UserRole::Pro,
            phone: None,
            location: "hargeisa".into(),
            skill: None,
        };

        let err = register(&app, input).await.unwrap_err();
        let text = err.to_string();
        assert!(text.contains("name: Full name is required"));
        assert!(text.contains("email: Invalid email format"));
        assert!(text.contains("password: Password must be at least 6 characters"));
        assert!(text.contains("phone: Phone number is required for professionals"));
        assert!(text.contains("skills: Please select your trade"));
        assert!(!text.contains("location"));
    }
}
