// service/pro_service.rs
use validator::Validate;

use crate::{
    dtos::UpdateBookingStatusDto,
    models::{
        bookingmodel::{Booking, BookingParty, BookingStatus},
        usermodel::Professional,
    },
};

use super::{api_client::ApiClient, error::ServiceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Suspended,
    Verified,
    UnderReview,
}

impl AccountStatus {
    /// Suspension outranks verification.
    pub fn of(profile: Option<&Professional>) -> Self {
        match profile {
            Some(p) if p.is_suspended => AccountStatus::Suspended,
            Some(p) if p.is_verified => AccountStatus::Verified,
            _ => AccountStatus::UnderReview,
        }
    }

    pub fn icon(&self) -> &str {
        match self {
            AccountStatus::Suspended => "🚫",
            AccountStatus::Verified => "🛡️",
            AccountStatus::UnderReview => "⏳",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            AccountStatus::Suspended => "Account Suspended",
            AccountStatus::Verified => "Approved & Verified",
            AccountStatus::UnderReview => "Account Under Review",
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            AccountStatus::Suspended => "Contact support to resolve account restrictions.",
            AccountStatus::Verified => "Your profile is live. You can accept requests.",
            AccountStatus::UnderReview => "You cannot accept requests until approved.",
        }
    }
}

/// Client details a pro may see for one booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientContact {
    Revealed { email: String, phone: String },
    Hidden,
}

#[derive(Debug, Clone, Default)]
pub struct ProDashboard {
    pub bookings: Vec<Booking>,
    pub profile: Option<Professional>,
}

impl ProDashboard {
    pub fn pending_count(&self) -> usize {
        self.count(|s| s == BookingStatus::Pending)
    }

    pub fn approved_count(&self) -> usize {
        self.count(|s| s.is_accepted())
    }

    fn count(&self, wanted: impl Fn(BookingStatus) -> bool) -> usize {
        self.bookings.iter().filter(|b| wanted(b.status)).count()
    }

    pub fn account_status(&self) -> AccountStatus {
        AccountStatus::of(self.profile.as_ref())
    }

    pub fn check_can_accept(&self) -> Result<(), ServiceError> {
        match self.account_status() {
            AccountStatus::Suspended => Err(ServiceError::AccountSuspended),
            AccountStatus::UnderReview => Err(ServiceError::AccountNotVerified),
            AccountStatus::Verified => Ok(()),
        }
    }

    /// Email and phone stay hidden until the pro has accepted the job.
    pub fn contact(booking: &Booking) -> ClientContact {
        if !booking.status.is_accepted() {
            return ClientContact::Hidden;
        }
        let party: Option<&BookingParty> = booking.client_party();
        ClientContact::Revealed {
            email: party
                .and_then(|p| p.email.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            phone: party
                .and_then(|p| p.phone.clone())
                .unwrap_or_else(|| "No phone".to_string()),
        }
    }

    pub fn find(&self, booking_id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == booking_id)
    }

    /// Only the pro's own requests still awaiting an answer can be accepted or declined.
    pub fn pending_booking(&self, booking_id: &str) -> Result<&Booking, ServiceError> {
        let booking = self
            .find(booking_id)
            .ok_or_else(|| ServiceError::NotFound(format!("Booking {}", booking_id)))?;
        if booking.status != BookingStatus::Pending {
            return Err(ServiceError::NotPending);
        }
        Ok(booking)
    }
}

#[derive(Debug, Clone)]
pub struct ProService {
    api: ApiClient,
}

impl ProService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn dashboard(&self) -> Result<ProDashboard, ServiceError> {
        let (bookings, profile) = tokio::try_join!(self.api.my_bookings(), self.api.pro_profile())?;
        Ok(ProDashboard { bookings, profile })
    }

    pub async fn accept(&self, dashboard: &ProDashboard, booking_id: &str) -> Result<(), ServiceError> {
        let booking = dashboard.pending_booking(booking_id)?;
        dashboard.check_can_accept()?;
        self.set_status(&booking.id, BookingStatus::Approved).await
    }

    pub async fn decline(&self, dashboard: &ProDashboard, booking_id: &str) -> Result<(), ServiceError> {
        let booking = dashboard.pending_booking(booking_id)?;
        self.set_status(&booking.id, BookingStatus::Rejected).await
    }

    async fn set_status(&self, booking_id: &str, status: BookingStatus) -> Result<(), ServiceError> {
        let body = UpdateBookingStatusDto {
            booking_id: booking_id.to_string(),
            status,
        };
        body.validate()?;
        self.api.update_booking_status(&body).await?;
        tracing::info!("Booking {} marked {}", booking_id, status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dashboard(profile: serde_json::Value) -> ProDashboard {
        let bookings: Vec<Booking> = serde_json::from_value(json!([
            {
                "_id": "b1",
                "client": { "_id": "c1", "name": "Amina", "email": "amina@example.com", "phone": "+252 63 1234567" },
                "status": "approved",
                "createdAt": "2026-03-01T08:00:00Z"
            },
            {
                "_id": "b2",
                "client": { "_id": "c2", "name": "Ilhan", "email": "ilhan@example.com" },
                "status": "pending",
                "createdAt": "2026-03-01T09:00:00Z"
            },
            { "_id": "b3", "client": "c3", "status": "pending", "createdAt": "2026-03-01T10:00:00Z" }
        ]))
        .unwrap();
        ProDashboard {
            bookings,
            profile: serde_json::from_value(profile).ok(),
        }
    }

    #[test]
    fn counts_by_status() {
        let d = dashboard(json!(null));
        assert_eq!(d.pending_count(), 2);
        assert_eq!(d.approved_count(), 1);
    }

    #[test]
    fn banner_prefers_suspension() {
        let suspended = dashboard(json!({ "_id": "p1", "isVerified": true, "isSuspended": true }));
        assert_eq!(suspended.account_status(), AccountStatus::Suspended);
        assert!(matches!(suspended.check_can_accept(), Err(ServiceError::AccountSuspended)));

        let verified = dashboard(json!({ "_id": "p1", "isVerified": true }));
        assert_eq!(verified.account_status(), AccountStatus::Verified);
        assert!(verified.check_can_accept().is_ok());

        let missing = dashboard(json!(null));
        assert_eq!(missing.account_status(), AccountStatus::UnderReview);
        assert!(matches!(missing.check_can_accept(), Err(ServiceError::AccountNotVerified)));
    }

    #[test]
    fn contact_only_after_acceptance() {
        let d = dashboard(json!(null));
        assert_eq!(
            ProDashboard::contact(d.find("b1").unwrap()),
            ClientContact::Revealed {
                email: "amina@example.com".into(),
                phone: "+252 63 1234567".into()
            }
        );
        assert_eq!(ProDashboard::contact(d.find("b2").unwrap()), ClientContact::Hidden);
    }

    #[test]
    fn only_own_pending_requests_can_be_answered() {
        let d = dashboard(json!(null));
        assert_eq!(d.pending_booking("b2").unwrap().id, "b2");
        assert!(matches!(d.pending_booking("b1"), Err(ServiceError::NotPending)));
        assert!(matches!(d.pending_booking("elsewhere"), Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn answered_request_is_refused_before_any_call() {
        use crate::{config::Config, session::SessionContext};

        let config = Config::default().with_base_url("http://127.0.0.1:9/api");
        let service = ProService::new(ApiClient::new(&config, SessionContext::ephemeral()).unwrap());
        let d = dashboard(json!({ "_id": "p1", "isVerified": true }));

        assert!(matches!(service.decline(&d, "b1").await, Err(ServiceError::NotPending)));
        assert!(matches!(service.accept(&d, "b1").await, Err(ServiceError::NotPending)));
        assert!(matches!(service.accept(&d, "nope").await, Err(ServiceError::NotFound(_))));
    }
}
