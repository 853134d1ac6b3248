use crate::{
    error::ErrorMessage,
    middleware::Route,
    service::{notification_service::{Notification, NotificationQueue}, pro_service::ProDashboard},
    utils::render,
    AppState,
};

use super::{require, toast_line, PageError, PageResult};

async fn load(app_state: &AppState) -> Result<ProDashboard, PageError> {
    app_state
        .pro_service
        .dashboard()
        .await
        .map_err(|e| PageError::from_service(e, ErrorMessage::DashboardLoadFailed, Route::ProDashboard))
}

pub async fn dashboard(app_state: &AppState) -> PageResult {
    require(app_state, Route::ProDashboard)?;
    let dashboard = load(app_state).await?;
    Ok(render::pro_dashboard(app_state.env.theme, &dashboard))
}

pub async fn accept(app_state: &AppState, booking_id: &str) -> PageResult {
    require(app_state, Route::ProDashboard)?;
    let dashboard = load(app_state).await?;

    app_state
        .pro_service
        .accept(&dashboard, booking_id)
        .await
        .map_err(|e| PageError::from_service(e, ErrorMessage::StatusUpdateFailed, Route::ProDashboard))?;

    reload_with(app_state, Notification::success("Request accepted")).await
}

pub async fn decline(app_state: &AppState, booking_id: &str) -> PageResult {
    require(app_state, Route::ProDashboard)?;
    let dashboard = load(app_state).await?;

    app_state
        .pro_service
        .decline(&dashboard, booking_id)
        .await
        .map_err(|e| PageError::from_service(e, ErrorMessage::StatusUpdateFailed, Route::ProDashboard))?;

    reload_with(app_state, Notification::success("Request declined")).await
}

async fn reload_with(app_state: &AppState, notification: Notification) -> PageResult {
    let mut toasts = NotificationQueue::new(app_state.env.notification_ttl);
    let line = toast_line(app_state, &mut toasts, notification);
    let dashboard = load(app_state).await?;
    Ok(format!("{}\n\n{}", line, render::pro_dashboard(app_state.env.theme, &dashboard)))
}
