use chrono::Utc;

use crate::{
    error::ErrorMessage,
    middleware::Route,
    service::{
        client_service::Marketplace,
        notification_service::{Notification, NotificationQueue},
    },
    utils::render,
    AppState,
};

use super::{require, toast_line, PageError, PageResult};

async fn load(app_state: &AppState) -> Result<Marketplace, PageError> {
    app_state
        .client_service
        .load()
        .await
        .map_err(|e| PageError::from_service(e, ErrorMessage::DashboardLoadFailed, Route::ClientHome))
}

fn render_market(app_state: &AppState, market: &Marketplace, skill: Option<&str>) -> String {
    let theme = app_state.env.theme;
    let pros = market.filter_by_skill(skill);

    let mut sections = vec![render::requests_panel(theme, &market.bookings)];
    let options = market.skill_options();
    if !options.is_empty() {
        sections.push(format!("Skills: All, {}", options.join(", ")));
    }
    if pros.is_empty() {
        sections.push("No verified professionals match this skill yet.".to_string());
    }
    sections.extend(
        pros.iter()
            .map(|pro| render::pro_card(theme, pro, market.can_rate(&pro.id))),
    );
    sections.join("\n\n")
}

pub async fn client_home(app_state: &AppState, skill: Option<&str>) -> PageResult {
    require(app_state, Route::ClientHome)?;
    let market = load(app_state).await?;
    Ok(render_market(app_state, &market, skill))
}

pub async fn hire(app_state: &AppState, pro_id: &str, skill: Option<&str>) -> PageResult {
    require(app_state, Route::ClientHome)?;
    let market = load(app_state).await?;
    let mut toasts = NotificationQueue::new(app_state.env.notification_ttl);

    let confirmation = app_state
        .client_service
        .hire(&market, pro_id, skill, Utc::now())
        .await
        .map_err(|e| PageError::from_service(e, ErrorMessage::BookingFailed, Route::ClientHome))?;

    let refreshed = load(app_state).await?;
    Ok(format!(
        "{}\n\n{}",
        toast_line(app_state, &mut toasts, Notification::success(confirmation)),
        render::requests_panel(app_state.env.theme, &refreshed.bookings)
    ))
}

pub async fn rate(app_state: &AppState, pro_id: &str, value: u8) -> PageResult {
    require(app_state, Route::ClientHome)?;
    let market = load(app_state).await?;
    let mut toasts = NotificationQueue::new(app_state.env.notification_ttl);

    let confirmation = app_state
        .client_service
        .rate(&market, pro_id, value)
        .await
        .map_err(|e| PageError::from_service(e, ErrorMessage::RatingFailed, Route::ClientHome))?;

    Ok(toast_line(app_state, &mut toasts, Notification::success(confirmation)))
}
