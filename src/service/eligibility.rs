// service/eligibility.rs
//! Client-side booking rules. The server stays authoritative; these checks only
//! spare the user a round trip that would be refused anyway.

use chrono::{DateTime, Duration, Utc};

use crate::models::{
    bookingmodel::{Booking, BookingStatus},
    usermodel::Professional,
};

use super::error::ServiceError;

/// A pending request younger than this many hours blocks another request to the same pro.
pub const RECENT_PENDING_HOURS: i64 = 2;

pub const DAILY_REQUEST_LIMIT: u32 = 3;

pub const ALL_SKILLS: &str = "All";

pub const GENERAL_SERVICE: &str = "General Service";

pub fn has_recent_pending(bookings: &[Booking], pro_id: &str, now: DateTime<Utc>) -> bool {
    bookings.iter().any(|b| {
        b.is_for(pro_id)
            && b.status == BookingStatus::Pending
            && now.signed_duration_since(b.created_at) < Duration::hours(RECENT_PENDING_HOURS)
    })
}

/// First accepted, still unrated booking with this pro.
pub fn booking_to_rate<'a>(bookings: &'a [Booking], pro_id: &str) -> Option<&'a Booking> {
    bookings
        .iter()
        .find(|b| b.is_for(pro_id) && b.status.is_accepted() && !b.is_rated())
}

pub fn can_rate(bookings: &[Booking], pro_id: &str) -> bool {
    booking_to_rate(bookings, pro_id).is_some()
}

pub fn daily_limit_reached(pro: &Professional) -> bool {
    pro.daily_request_count >= DAILY_REQUEST_LIMIT
}

/// Category sent with a new booking: the filter the client picked, or the pro's
/// first listed trade.
pub fn booking_category(selected_skill: Option<&str>, pro: &Professional) -> String {
    match selected_skill.map(str::trim) {
        Some(skill) if !skill.is_empty() && skill != ALL_SKILLS => skill.to_string(),
        _ => pro
            .skills
            .first()
            .map(|s| s.as_str().to_string())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| GENERAL_SERVICE.to_string()),
    }
}

pub fn check_hire(
    signed_in: bool,
    bookings: &[Booking],
    pro: &Professional,
    now: DateTime<Utc>,
) -> Result<(), ServiceError> {
    if !signed_in {
        return Err(ServiceError::NotSignedIn);
    }
    if has_recent_pending(bookings, &pro.id, now) {
        return Err(ServiceError::RecentPendingRequest);
    }
    if daily_limit_reached(pro) {
        return Err(ServiceError::DailyLimitReached);
    }
    Ok(())
}
