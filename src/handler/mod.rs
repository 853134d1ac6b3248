//! Command-line pages. Each handler checks the route table first, then talks to
//! its service and returns the rendered text for the caller to print.

pub mod admin;
pub mod auth;
pub mod client;
pub mod pro;
pub mod watch;

use std::time::Instant;

use thiserror::Error;

use crate::{
    error::ErrorMessage,
    middleware::{after_unauthorized, role_check, GuardDecision, Route},
    service::{
        error::ServiceError,
        notification_service::{Notification, NotificationQueue},
    },
    utils::render,
    AppState,
};

pub type PageResult = Result<String, PageError>;

#[derive(Error, Debug)]
pub enum PageError {
    /// The guard refused the page.
    #[error("Redirecting to {0}")]
    Redirect(Route),

    /// A failed action, shown as an error toast.
    #[error("{message}")]
    Toast {
        message: String,
        redirect: Option<Route>,
    },
}

impl PageError {
    pub fn from_service(err: ServiceError, fallback: ErrorMessage, current: Route) -> Self {
        let redirect = if err.is_unauthorized() {
            after_unauthorized(current)
        } else {
            None
        };
        PageError::Toast {
            message: err.toast_message(fallback),
            redirect,
        }
    }

    /// Where the user ends up, if anywhere.
    pub fn redirect(&self) -> Option<Route> {
        match self {
            PageError::Redirect(route) => Some(*route),
            PageError::Toast { redirect, .. } => *redirect,
        }
    }

    pub fn is_unauthorized_redirect(&self) -> bool {
        matches!(self, PageError::Toast { redirect: Some(_), .. })
    }
}

/// Runs the route guard for the page about to render.
pub fn require(app_state: &AppState, route: Route) -> Result<(), PageError> {
    match role_check(&app_state.session, route) {
        GuardDecision::Render => Ok(()),
        GuardDecision::Redirect(target) => {
            tracing::debug!("Guard sent {} to {}", route, target);
            Err(PageError::Redirect(target))
        }
    }
}

/// Renders a one-off toast with the page's TTL.
pub(crate) fn toast_line(app_state: &AppState, queue: &mut NotificationQueue, notification: Notification) -> String {
    let now = Instant::now();
    let id = queue.push(notification, now);
    queue
        .active(now)
        .iter()
        .find(|t| t.id == id)
        .map(|t| render::toast(app_state.env.theme, t))
        .unwrap_or_default()
}

/// Home page: public, with a "Get Started" pointer for signed-in users.
pub fn home(app_state: &AppState) -> PageResult {
    require(app_state, Route::Home)?;
    let target = crate::middleware::landing_route(app_state.session.user_role());
    Ok(format!(
        "HOME-MAN: local professionals, one request away.\nGet Started -> {}",
        target
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, session::SessionContext};

    fn state() -> AppState {
        AppState::new(Config::default(), SessionContext::ephemeral()).unwrap()
    }

    #[test]
    fn guarded_pages_redirect_anonymous_users() {
        let app = state();
        assert!(matches!(require(&app, Route::Admin), Err(PageError::Redirect(Route::Login))));
        assert!(require(&app, Route::Register).is_ok());
    }

    #[test]
    fn home_points_to_the_role_landing() {
        let app = state();
        assert!(home(&app).unwrap().ends_with("/login"));
        app.session.sign_in("tok", "pro").unwrap();
        assert!(home(&app).unwrap().ends_with("/pro-dashboard"));
    }

    #[test]
    fn unauthorized_failures_send_the_user_home() {
        let err = PageError::from_service(
            ServiceError::from(crate::error::ClientError::Unauthorized),
            ErrorMessage::DashboardLoadFailed,
            Route::Admin,
        );
        assert_eq!(err.redirect(), Some(Route::Home));
        assert_eq!(err.to_string(), "Session expired. Please login again.");
        assert!(err.is_unauthorized_redirect());
    }
}
