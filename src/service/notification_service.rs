// service/notification_service.rs
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::models::bookingmodel::{Booking, BookingStatus};

/// Whose list is being watched. Decides which party a message names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perspective {
    Client,
    Pro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

impl ToastLevel {
    pub fn to_str(&self) -> &str {
        match self {
            ToastLevel::Success => "success",
            ToastLevel::Error => "error",
            ToastLevel::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: ToastLevel,
}

impl Notification {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Notification {
            message: message.into(),
            level,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub booking_id: String,
    pub previous: BookingStatus,
    pub current: BookingStatus,
    pub pro_name: String,
    pub client_name: String,
}

impl StatusChange {
    fn between(previous: BookingStatus, booking: &Booking) -> Self {
        StatusChange {
            booking_id: booking.id.clone(),
            previous,
            current: booking.status,
            pro_name: booking.professional_name().to_string(),
            client_name: booking.client_name().to_string(),
        }
    }

    pub fn notification(&self, perspective: Perspective) -> Notification {
        let who = match perspective {
            Perspective::Client => &self.pro_name,
            Perspective::Pro => &self.client_name,
        };

        match self.current {
            status if status.is_accepted() => {
                Notification::success(format!("✅ Your request with {} has been accepted!", who))
            }
            BookingStatus::Rejected => {
                Notification::error(format!("❌ Your request with {} was declined.", who))
            }
            status => Notification::new(
                format!("Your request with {} is now {}.", who, status),
                ToastLevel::Info,
            ),
        }
    }
}

/// One change per booking present in both lists whose status moved, in the
/// order of `next`. Bookings that appeared or disappeared are not changes.
pub fn diff_statuses(prev: &[Booking], next: &[Booking]) -> Vec<StatusChange> {
    let before: HashMap<&str, BookingStatus> =
        prev.iter().map(|b| (b.id.as_str(), b.status)).collect();

    next.iter()
        .filter_map(|booking| match before.get(booking.id.as_str()) {
            Some(&previous) if previous != booking.status => {
                Some(StatusChange::between(previous, booking))
            }
            _ => None,
        })
        .collect()
}

/// Keeps the last seen booking list and turns updates into notifications.
///
/// Polls and pushed events both go through here, so whichever reports a
/// change first wins and the other sees nothing new.
#[derive(Debug)]
pub struct BookingNotifier {
    perspective: Perspective,
    snapshot: Option<Vec<Booking>>,
}

impl BookingNotifier {
    pub fn new(perspective: Perspective) -> Self {
        BookingNotifier {
            perspective,
            snapshot: None,
        }
    }

    pub fn perspective(&self) -> Perspective {
        self.perspective
    }

    pub fn snapshot(&self) -> &[Booking] {
        self.snapshot.as_deref().unwrap_or(&[])
    }

    /// The first list only sets the baseline.
    pub fn reconcile(&mut self, bookings: Vec<Booking>) -> Vec<Notification> {
        let changes = match &self.snapshot {
            Some(prev) => diff_statuses(prev, &bookings),
            None => Vec::new(),
        };
        self.snapshot = Some(bookings);

        changes
            .iter()
            .map(|change| change.notification(self.perspective))
            .collect()
    }

    /// Applies a pushed status. Unknown bookings are left for the next poll.
    pub fn apply_event(&mut self, booking_id: &str, status: BookingStatus) -> Option<Notification> {
        let booking = self
            .snapshot
            .as_mut()?
            .iter_mut()
            .find(|b| b.id == booking_id)?;

        if booking.status == status {
            return None;
        }

        let previous = booking.status;
        booking.status = status;
        Some(StatusChange::between(previous, booking).notification(self.perspective))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub level: ToastLevel,
    pub expires_at: Instant,
}

/// Transient notifications that dismiss themselves after `ttl`.
#[derive(Debug)]
pub struct NotificationQueue {
    ttl: Duration,
    items: Vec<Toast>,
    next_id: u64,
}

impl NotificationQueue {
    pub fn new(ttl: Duration) -> Self {
        NotificationQueue {
            ttl,
            items: Vec::new(),
            next_id: 1,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn push(&mut self, notification: Notification, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast {
            id,
            message: notification.message,
            level: notification.level,
            expires_at: now + self.ttl,
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|toast| toast.id != id);
        self.items.len() != before
    }

    pub fn active(&mut self, now: Instant) -> &[Toast] {
        self.items.retain(|toast| toast.expires_at > now);
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bookings(entries: &[(&str, &str)]) -> Vec<Booking> {
        let raw: Vec<_> = entries
            .iter()
            .map(|(id, status)| {
                json!({
                    "_id": id,
                    "client": { "_id": "c1", "name": "Amina" },
                    "professional": { "_id": "p1", "name": "Hodan" },
                    "status": status,
                    "createdAt": "2026-03-01T08:00:00Z"
                })
            })
            .collect();
        serde_json::from_value(json!(raw)).unwrap()
    }

    #[test]
    fn diff_ignores_one_sided_ids() {
        let prev = bookings(&[("a", "pending"), ("b", "pending"), ("gone", "pending")]);
        let next = bookings(&[("new", "approved"), ("b", "rejected"), ("a", "approved")]);

        let changes = diff_statuses(&prev, &next);
        let ids: Vec<_> = changes.iter().map(|c| c.booking_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(changes[1].previous, BookingStatus::Pending);
        assert_eq!(changes[1].current, BookingStatus::Approved);
    }

    #[test]
    fn unchanged_lists_produce_nothing() {
        let list = bookings(&[("a", "pending")]);
        assert!(diff_statuses(&list, &list).is_empty());
        assert!(diff_statuses(&[], &list).is_empty());
    }

    #[test]
    fn messages_name_the_other_party() {
        let prev = bookings(&[("a", "pending"), ("b", "pending"), ("c", "approved")]);
        let next = bookings(&[("a", "accepted"), ("b", "rejected"), ("c", "pending")]);
        let changes = diff_statuses(&prev, &next);

        assert_eq!(
            changes[0].notification(Perspective::Client),
            Notification::success("✅ Your request with Hodan has been accepted!")
        );
        assert_eq!(
            changes[1].notification(Perspective::Client),
            Notification::error("❌ Your request with Hodan was declined.")
        );
        let info = changes[2].notification(Perspective::Pro);
        assert_eq!(info.level, ToastLevel::Info);
        assert_eq!(info.message, "Your request with Amina is now pending.");
    }

    #[test]
    fn first_reconcile_is_a_baseline() {
        let mut notifier = BookingNotifier::new(Perspective::Client);
        assert!(notifier.reconcile(bookings(&[("a", "approved")])).is_empty());

        let notes = notifier.reconcile(bookings(&[("a", "rejected")]));
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, ToastLevel::Error);
    }

    #[test]
    fn pushed_change_is_not_repeated_by_the_poll() {
        let mut notifier = BookingNotifier::new(Perspective::Client);
        notifier.reconcile(bookings(&[("a", "pending")]));

        let pushed = notifier.apply_event("a", BookingStatus::Approved);
        assert_eq!(pushed.map(|n| n.level), Some(ToastLevel::Success));
        assert!(notifier.apply_event("a", BookingStatus::Approved).is_none());
        assert!(notifier.apply_event("unknown", BookingStatus::Approved).is_none());

        assert!(notifier.reconcile(bookings(&[("a", "approved")])).is_empty());
    }

    #[test]
    fn events_before_the_baseline_are_dropped() {
        let mut notifier = BookingNotifier::new(Perspective::Pro);
        assert!(notifier.apply_event("a", BookingStatus::Approved).is_none());
        assert!(notifier.snapshot().is_empty());
    }

    #[test]
    fn toasts_expire_after_ttl() {
        let start = Instant::now();
        let mut queue = NotificationQueue::new(Duration::from_secs(5));
        let first = queue.push(Notification::success("one"), start);
        let second = queue.push(Notification::error("two"), start + Duration::from_secs(3));
        assert!(second > first);

        assert_eq!(queue.active(start + Duration::from_secs(4)).len(), 2);
        let left = queue.active(start + Duration::from_secs(5));
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].message, "two");

        assert!(queue.dismiss(second));
        assert!(!queue.dismiss(second));
        assert!(queue.active(start).is_empty());
    }
}
