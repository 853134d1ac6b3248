// service/api_client.rs
use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::Config,
    dtos::{
        CreateBookingDto, DashboardResponseDto, LoginUserDto, MyBookingsResponseDto,
        RateBookingDto, RegisterUserDto, ServiceListingDto, UpdateBookingStatusDto,
        UserLoginResponseDto,
    },
    error::ClientError,
    models::{
        analyticsmodel::Analytics, bookingmodel::Booking, servicemodel::ServiceListing,
        usermodel::Professional,
    },
    session::SessionContext,
};

/// Thin wrapper over the marketplace REST API.
///
/// Attaches `Authorization: Bearer <token>` whenever the session holds a token.
/// Any 401 expires the session before the error is returned, so callers only
/// need to decide where to navigate.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionContext>,
}

impl ApiClient {
    pub fn new(config: &Config, session: Arc<SessionContext>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<String, ClientError> {
        let request = builder.build()?;
        tracing::debug!("{} {}", request.method(), request.url().path());

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(body);
        }

        let error = ClientError::from_response(status, &body);
        if error.is_unauthorized() {
            tracing::warn!("Server rejected the session token, clearing credentials");
            self.session.expire();
        }
        Err(error)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let body = self.execute(builder).await?;
        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn send_unit(&self, builder: RequestBuilder) -> Result<(), ClientError> {
        self.execute(builder).await.map(|_| ())
    }

    fn with_body<B: Serialize>(&self, method: Method, path: &str, body: &B) -> RequestBuilder {
        self.request(method, path).json(body)
    }

    // Auth

    pub async fn login(&self, body: &LoginUserDto) -> Result<UserLoginResponseDto, ClientError> {
        self.send_json(self.with_body(Method::POST, "/auth/login", body)).await
    }

    pub async fn register(&self, body: &RegisterUserDto) -> Result<(), ClientError> {
        self.send_unit(self.with_body(Method::POST, "/auth/register", body)).await
    }

    // Admin & analytics

    pub async fn fetch_dashboard(&self) -> Result<DashboardResponseDto, ClientError> {
        self.send_json(self.request(Method::GET, "/admin/dashboard")).await
    }

    pub async fn fetch_analytics(&self) -> Result<Analytics, ClientError> {
        self.send_json(self.request(Method::GET, "/admin/analytics")).await
    }

    pub async fn verify_pro(&self, id: &str) -> Result<(), ClientError> {
        let path = format!("/admin/verify/{}", urlencoding::encode(id));
        self.send_unit(self.request(Method::PATCH, &path)).await
    }

    pub async fn toggle_suspension(&self, id: &str) -> Result<(), ClientError> {
        let path = format!("/admin/toggle-suspension/{}", urlencoding::encode(id));
        self.send_unit(self.request(Method::PATCH, &path)).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ClientError> {
        let path = format!("/admin/user/{}", urlencoding::encode(id));
        self.send_unit(self.request(Method::DELETE, &path)).await
    }

    // Bookings

    pub async fn my_bookings(&self) -> Result<Vec<Booking>, ClientError> {
        let response: Option<MyBookingsResponseDto> =
            self.send_json(self.request(Method::GET, "/bookings/my-bookings")).await?;
        Ok(response.and_then(|r| r.bookings).unwrap_or_default())
    }

    pub async fn create_booking(&self, body: &CreateBookingDto) -> Result<(), ClientError> {
        self.send_unit(self.with_body(Method::POST, "/bookings/create", body)).await
    }

    pub async fn update_booking_status(&self, body: &UpdateBookingStatusDto) -> Result<(), ClientError> {
        self.send_unit(self.with_body(Method::PATCH, "/bookings/update-status", body)).await
    }

    pub async fn rate_booking(&self, body: &RateBookingDto) -> Result<(), ClientError> {
        self.send_unit(self.with_body(Method::POST, "/bookings/rate", body)).await
    }

    // Professionals

    pub async fn pro_profile(&self) -> Result<Option<Professional>, ClientError> {
        self.send_json(self.request(Method::GET, "/pros/profile")).await
    }

    // Service directory

    pub async fn list_services(&self) -> Result<Vec<ServiceListing>, ClientError> {
        let listings: Option<Vec<ServiceListing>> =
            self.send_json(self.request(Method::GET, "/services")).await?;
        Ok(listings.unwrap_or_default())
    }

    pub async fn create_service(&self, body: &ServiceListingDto) -> Result<(), ClientError> {
        self.send_unit(self.with_body(Method::POST, "/services", body)).await
    }

    pub async fn update_service(&self, id: &str, body: &ServiceListingDto) -> Result<(), ClientError> {
        let path = format!("/services/{}", urlencoding::encode(id));
        self.send_unit(self.with_body(Method::PUT, &path, body)).await
    }

    pub async fn delete_service(&self, id: &str) -> Result<(), ClientError> {
        let path = format!("/services/{}", urlencoding::encode(id));
        self.send_unit(self.request(Method::DELETE, &path)).await
    }
}
