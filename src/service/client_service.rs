// service/client_service.rs
use chrono::{DateTime, Utc};
use validator::Validate;

use crate::{
    dtos::{CreateBookingDto, RateBookingDto},
    models::{bookingmodel::Booking, usermodel::Professional},
};

use super::{
    api_client::ApiClient,
    eligibility::{self, ALL_SKILLS},
    error::ServiceError,
};

/// What the client home page works from: bookable pros plus the client's own
/// requests, both fresh from the server.
#[derive(Debug, Clone, Default)]
pub struct Marketplace {
    pub pros: Vec<Professional>,
    pub bookings: Vec<Booking>,
}

impl Marketplace {
    pub fn filter_by_skill(&self, skill: Option<&str>) -> Vec<&Professional> {
        match skill.map(str::trim) {
            None | Some("") | Some(ALL_SKILLS) => self.pros.iter().collect(),
            Some(wanted) => self.pros.iter().filter(|p| p.has_skill(wanted)).collect(),
        }
    }

    pub fn find_pro(&self, pro_id: &str) -> Option<&Professional> {
        self.pros.iter().find(|p| p.id == pro_id)
    }

    pub fn can_rate(&self, pro_id: &str) -> bool {
        eligibility::can_rate(&self.bookings, pro_id)
    }

    /// Every trade offered by at least one listed pro, for the filter menu.
    pub fn skill_options(&self) -> Vec<String> {
        let mut options: Vec<String> = Vec::new();
        for skill in self.pros.iter().flat_map(|p| p.skills.iter()) {
            let name = skill.as_str().trim();
            if !name.is_empty() && !options.iter().any(|o| o.eq_ignore_ascii_case(name)) {
                options.push(name.to_string());
            }
        }
        options.sort();
        options
    }
}

#[derive(Debug, Clone)]
pub struct ClientService {
    api: ApiClient,
}

impl ClientService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn load(&self) -> Result<Marketplace, ServiceError> {
        let dashboard = self.api.fetch_dashboard().await?;
        let (pros, _) = dashboard.into_parts();
        let pros: Vec<Professional> = pros.into_iter().filter(Professional::is_bookable).collect();

        let bookings = if self.api.session().is_active() {
            self.api.my_bookings().await?
        } else {
            Vec::new()
        };

        tracing::debug!("Marketplace loaded: {} pros, {} bookings", pros.len(), bookings.len());
        Ok(Marketplace { pros, bookings })
    }

    /// Sends a hire request and returns the confirmation text.
    pub async fn hire(
        &self,
        market: &Marketplace,
        pro_id: &str,
        selected_skill: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<String, ServiceError> {
        let pro = market
            .find_pro(pro_id)
            .ok_or_else(|| ServiceError::NotFound(format!("Professional {}", pro_id)))?;

        eligibility::check_hire(self.api.session().is_active(), &market.bookings, pro, now)?;

        let category = eligibility::booking_category(selected_skill, pro);
        let body = CreateBookingDto {
            pro_id: pro.id.clone(),
            category: category.clone(),
        };
        body.validate()?;
        self.api.create_booking(&body).await?;

        tracing::info!("📨 Booking request sent to {} ({})", pro.display_name(), category);
        Ok(format!("{} request sent successfully!", category))
    }

    pub async fn rate(&self, market: &Marketplace, pro_id: &str, value: u8) -> Result<String, ServiceError> {
        if !(1..=5).contains(&value) {
            return Err(ServiceError::InvalidRating(value));
        }

        let booking = eligibility::booking_to_rate(&market.bookings, pro_id)
            .ok_or(ServiceError::NothingToRate)?;

        let body = RateBookingDto {
            booking_id: booking.id.clone(),
            rating_value: value,
        };
        body.validate()?;
        self.api.rate_booking(&body).await?;

        tracing::info!("⭐ Rated booking {} with {}", booking.id, value);
        Ok("Rating submitted successfully!".to_string())
    }
}
