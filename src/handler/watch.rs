use std::future::Future;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::{
    middleware::{after_unauthorized, Route},
    models::usermodel::UserRole,
    service::{
        background_jobs::{BookingEvent, BookingWatcher, WatchExit},
        notification_service::{NotificationQueue, Perspective},
    },
    utils::render,
    AppState,
};

use super::{require, PageError};

/// Keeps the booking list under watch and hands every rendered toast to `print`.
///
/// Clients and pros both get the watcher; their page decides which party the
/// messages name.
pub async fn watch<S, P>(
    app_state: &AppState,
    events: Option<mpsc::Receiver<BookingEvent>>,
    shutdown: S,
    mut print: P,
) -> Result<WatchExit, PageError>
where
    S: Future<Output = ()> + Send + 'static,
    P: FnMut(String),
{
    let (route, perspective) = match app_state.session.user_role() {
        Some(UserRole::Pro) => (Route::ProDashboard, Perspective::Pro),
        _ => (Route::ClientHome, Perspective::Client),
    };
    require(app_state, route)?;

    let watcher = BookingWatcher::new(
        app_state.api.clone(),
        app_state.session.clone(),
        perspective,
        app_state.env.poll_interval,
    );
    let (tx, mut rx) = mpsc::channel(16);
    let task = tokio::spawn(watcher.run(events, tx, shutdown));

    let mut toasts = NotificationQueue::new(app_state.env.notification_ttl);
    while let Some(notification) = rx.recv().await {
        let now = Instant::now();
        let id = toasts.push(notification, now);
        if let Some(toast) = toasts.active(now).iter().find(|t| t.id == id) {
            print(render::toast(app_state.env.theme, toast));
        }
    }

    let exit = task.await.unwrap_or_else(|e| {
        tracing::error!("Booking watcher task failed: {}", e);
        WatchExit::Shutdown
    });

    match exit {
        WatchExit::Unauthorized => Err(PageError::Toast {
            message: crate::error::ErrorMessage::SessionExpired.to_string(),
            redirect: after_unauthorized(route),
        }),
        other => Ok(other),
    }
}
