use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::bookingmodel::{Booking, BookingStatus};

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingDto {
    #[validate(length(min = 1, message = "Professional is required"))]
    pub pro_id: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusDto {
    #[validate(length(min = 1, message = "Booking is required"))]
    pub booking_id: String,
    pub status: BookingStatus,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RateBookingDto {
    #[validate(length(min = 1, message = "Booking is required"))]
    pub booking_id: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating_value: u8,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct MyBookingsResponseDto {
    #[serde(default)]
    pub bookings: Option<Vec<Booking>>,
}
