//9
use std::fmt;

use crate::{models::usermodel::UserRole, session::SessionContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Analytics,
    Admin,
    ProDashboard,
    ClientHome,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Analytics => "/analytics",
            Route::Admin => "/admin",
            Route::ProDashboard => "/pro-dashboard",
            Route::ClientHome => "/client-home",
        }
    }

    /// Roles admitted to this route. `None` means the route is public.
    pub fn allowed_roles(&self) -> Option<&'static [UserRole]> {
        match self {
            Route::Home | Route::Login | Route::Register => None,
            Route::Analytics => Some(&[UserRole::Admin, UserRole::Pro, UserRole::Client]),
            Route::Admin => Some(&[UserRole::Admin]),
            Route::ProDashboard => Some(&[UserRole::Pro]),
            Route::ClientHome => Some(&[UserRole::Client]),
        }
    }

    /// Unknown paths fall back to home, like the catch-all route.
    pub fn from_path(path: &str) -> Route {
        match path.trim_end_matches('/') {
            "" => Route::Home,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/analytics" => Route::Analytics,
            "/admin" => Route::Admin,
            "/pro-dashboard" => Route::ProDashboard,
            "/client-home" => Route::ClientHome,
            _ => Route::Home,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(Route),
}

/// Decides whether a protected page may render for the stored credentials.
///
/// A missing or empty token always goes to `/login`. A token whose role is not
/// in `allowed` (an unreadable role included) goes to `/`. An empty `allowed`
/// admits any signed-in role.
pub fn guard(token: Option<&str>, role: Option<&str>, allowed: &[UserRole]) -> GuardDecision {
    let signed_in = token.map_or(false, |t| !t.is_empty());
    if !signed_in {
        return GuardDecision::Redirect(Route::Login);
    }

    if allowed.is_empty() {
        return GuardDecision::Render;
    }

    let role = role.and_then(|r| r.parse::<UserRole>().ok());
    match role {
        Some(role) if allowed.contains(&role) => GuardDecision::Render,
        _ => GuardDecision::Redirect(Route::Home),
    }
}

/// Applies [`guard`] to a route using whatever the session holds right now.
pub fn role_check(session: &SessionContext, route: Route) -> GuardDecision {
    match route.allowed_roles() {
        None => GuardDecision::Render,
        Some(allowed) => guard(
            session.token().as_deref(),
            session.role().as_deref(),
            allowed,
        ),
    }
}

/// Where "Get Started" and a successful login send each role.
pub fn landing_route(role: Option<UserRole>) -> Route {
    match role {
        Some(UserRole::Admin) => Route::Admin,
        Some(UserRole::Pro) => Route::ProDashboard,
        Some(UserRole::Client) => Route::ClientHome,
        None => Route::Login,
    }
}

/// The forced navigation after a 401, or `None` when already home.
pub fn after_unauthorized(current: Route) -> Option<Route> {
    if current == Route::Home {
        None
    } else {
        Some(Route::Home)
    }
}
