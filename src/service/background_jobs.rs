// service/background_jobs.rs
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::{
    error::ClientError,
    models::bookingmodel::{Booking, BookingStatus},
    session::{SessionChange, SessionContext},
};

use super::{
    api_client::ApiClient,
    notification_service::{BookingNotifier, Notification, Perspective},
};

/// Source of the signed-in user's bookings.
#[async_trait]
pub trait BookingFeed: Send + Sync {
    async fn fetch_bookings(&self) -> Result<Vec<Booking>, ClientError>;
}

#[async_trait]
impl BookingFeed for ApiClient {
    async fn fetch_bookings(&self) -> Result<Vec<Booking>, ClientError> {
        self.my_bookings().await
    }
}

/// Pushed by the server when it can; polling still runs underneath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingEvent {
    StatusChanged {
        booking_id: String,
        status: BookingStatus,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchExit {
    Shutdown,
    SessionEnded,
    Unauthorized,
}

/// Watches the booking list and reports status changes as notifications.
pub struct BookingWatcher<F> {
    feed: F,
    session: Arc<SessionContext>,
    notifier: BookingNotifier,
    every: Duration,
}

impl<F: BookingFeed + 'static> BookingWatcher<F> {
    pub fn new(feed: F, session: Arc<SessionContext>, perspective: Perspective, every: Duration) -> Self {
        BookingWatcher {
            feed,
            session,
            notifier: BookingNotifier::new(perspective),
            every,
        }
    }

    /// Runs until `shutdown` resolves, the session ends, the server answers 401,
    /// or nobody is listening for notices any more.
    pub async fn run<S>(
        mut self,
        mut events: Option<mpsc::Receiver<BookingEvent>>,
        notices: mpsc::Sender<Notification>,
        shutdown: S,
    ) -> WatchExit
    where
        S: Future<Output = ()> + Send,
    {
        if !self.session.is_active() {
            return WatchExit::SessionEnded;
        }

        let mut session_rx = self.session.subscribe();
        let mut ticker = interval(self.every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::info!("👀 Watching bookings every {:?}", self.every);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Booking watcher shutting down");
                    return WatchExit::Shutdown;
                }
                changed = session_rx.changed() => {
                    let state = session_rx.borrow().clone();
                    if changed.is_err() || state.session.is_none() {
                        tracing::info!("Session ended, booking watcher stopping");
                        return match state.last_change {
                            Some(SessionChange::Expired) => WatchExit::Unauthorized,
                            _ => WatchExit::SessionEnded,
                        };
                    }
                }
                event = next_event(&mut events) => {
                    let Some(BookingEvent::StatusChanged { booking_id, status }) = event else {
                        tracing::warn!("Booking event stream closed, falling back to polling");
                        events = None;
                        continue;
                    };
                    if let Some(notice) = self.notifier.apply_event(&booking_id, status) {
                        if notices.send(notice).await.is_err() {
                            return WatchExit::Shutdown;
                        }
                    }
                }
                _ = ticker.tick() => {
                    match self.feed.fetch_bookings().await {
                        Ok(bookings) => {
                            tracing::debug!("Polled {} bookings at {}", bookings.len(), Utc::now());
                            for notice in self.notifier.reconcile(bookings) {
                                if notices.send(notice).await.is_err() {
                                    return WatchExit::Shutdown;
                                }
                            }
                        }
                        Err(e) if e.is_unauthorized() => {
                            tracing::warn!("Booking poll rejected, session is no longer valid");
                            return WatchExit::Unauthorized;
                        }
                        // Transient failures keep the old snapshot.
                        Err(e) => tracing::warn!("Booking poll failed: {}", e),
                    }
                }
            }
        }
    }
}

async fn next_event(events: &mut Option<mpsc::Receiver<BookingEvent>>) -> Option<BookingEvent> {
    match events {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
