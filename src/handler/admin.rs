use std::time::Duration;

use crate::{
    dtos::ServiceListingDto,
    error::ErrorMessage,
    middleware::Route,
    service::{
        admin_service::{AdminAction, AdminDashboard},
        notification_service::{Notification, NotificationQueue},
    },
    utils::render,
    AppState,
};

use super::{require, toast_line, PageError, PageResult};

/// Admin toasts go away a little faster than the client's.
pub const ADMIN_TOAST_TTL: Duration = Duration::from_secs(4);

fn render_dashboard(app_state: &AppState, dashboard: &AdminDashboard, search: Option<&str>) -> String {
    let theme = app_state.env.theme;
    let stats = &dashboard.stats;
    let mut out = format!(
        "Users: {}  Pros: {}  Bookings: {}  Pending verifications: {}",
        stats.total_users, stats.total_pros, stats.total_bookings, stats.pending_verifications
    );

    let rows = dashboard.search(search.unwrap_or_default());
    if rows.is_empty() {
        out.push_str("\n\nNo professionals found.");
    }
    for pro in rows {
        out.push('\n');
        out.push_str(&render::admin_row(theme, pro));
    }
    out
}

pub async fn dashboard(app_state: &AppState, search: Option<&str>) -> PageResult {
    require(app_state, Route::Admin)?;
    let dashboard = app_state
        .admin_service
        .dashboard()
        .await
        .map_err(|e| PageError::from_service(e, ErrorMessage::DashboardLoadFailed, Route::Admin))?;
    Ok(render_dashboard(app_state, &dashboard, search))
}

/// Verify, suspend or delete one professional, then show the reloaded list.
pub async fn act(app_state: &AppState, action: AdminAction, pro_id: &str, confirmed: bool) -> PageResult {
    require(app_state, Route::Admin)?;
    let mut toasts = NotificationQueue::new(ADMIN_TOAST_TTL);

    let dashboard = app_state
        .admin_service
        .act(action, pro_id, confirmed)
        .await
        .map_err(|e| PageError::from_service(e, ErrorMessage::ActionFailed, Route::Admin))?;

    Ok(format!(
        "{}\n\n{}",
        toast_line(app_state, &mut toasts, Notification::success("Action successful")),
        render_dashboard(app_state, &dashboard, None)
    ))
}

pub async fn analytics(app_state: &AppState) -> PageResult {
    require(app_state, Route::Analytics)?;
    let data = app_state
        .admin_service
        .analytics()
        .await
        .map_err(|e| PageError::from_service(e, ErrorMessage::DashboardLoadFailed, Route::Analytics))?;
    Ok(render::analytics(app_state.env.theme, &data))
}

fn render_listings(listings: &[crate::models::servicemodel::ServiceListing]) -> String {
    if listings.is_empty() {
        return "No services listed.".to_string();
    }
    listings
        .iter()
        .map(render::service_listing)
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone)]
pub enum DirectoryChange {
    Add(ServiceListingDto),
    Update(String, ServiceListingDto),
    Delete(String),
}

pub async fn services(app_state: &AppState, change: Option<DirectoryChange>) -> PageResult {
    require(app_state, Route::Admin)?;
    let directory = &app_state.directory_service;
    let fail = |e| PageError::from_service(e, ErrorMessage::ActionFailed, Route::Admin);

    let listings = match &change {
        None => directory.list().await,
        Some(DirectoryChange::Add(listing)) => directory.add(listing).await,
        Some(DirectoryChange::Update(id, listing)) => directory.update(id, listing).await,
        Some(DirectoryChange::Delete(id)) => directory.delete(id).await,
    }
    .map_err(fail)?;

    if change.is_none() {
        return Ok(render_listings(&listings));
    }
    let mut toasts = NotificationQueue::new(ADMIN_TOAST_TTL);
    Ok(format!(
        "{}\n\n{}",
        toast_line(app_state, &mut toasts, Notification::success("Action successful")),
        render_listings(&listings)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, session::SessionContext};

    #[tokio::test]
    async fn clients_cannot_open_the_admin_console() {
        let app = AppState::new(Config::default(), SessionContext::ephemeral()).unwrap();
        app.session.sign_in("tok", "client").unwrap();

        let err = dashboard(&app, None).await.unwrap_err();
        assert_eq!(err.redirect(), Some(Route::Home));
        let err = act(&app, AdminAction::Verify, "p1", false).await.unwrap_err();
        assert_eq!(err.redirect(), Some(Route::Home));
    }

    #[tokio::test]
    async fn unconfirmed_delete_explains_itself() {
        let config = Config::default().with_base_url("http://127.0.0.1:9/api");
        let app = AppState::new(config, SessionContext::ephemeral()).unwrap();
        app.session.sign_in("tok", "admin").unwrap();

        let err = act(&app, AdminAction::Delete, "p1", false).await.unwrap_err();
        assert!(err.to_string().contains("permanently delete"));
        assert_eq!(err.redirect(), None);
    }
}
