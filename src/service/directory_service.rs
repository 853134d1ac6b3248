// service/directory_service.rs
use validator::Validate;

use crate::{
    dtos::{field_errors, ServiceListingDto},
    models::servicemodel::ServiceListing,
};

use super::{api_client::ApiClient, error::ServiceError};

/// Admin-maintained directory of service contacts.
#[derive(Debug, Clone)]
pub struct DirectoryService {
    api: ApiClient,
}

impl DirectoryService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<ServiceListing>, ServiceError> {
        Ok(self.api.list_services().await?)
    }

    pub async fn add(&self, listing: &ServiceListingDto) -> Result<Vec<ServiceListing>, ServiceError> {
        check(listing)?;
        self.api.create_service(listing).await?;
        tracing::info!("Added directory entry {}", listing.name);
        self.list().await
    }

    pub async fn update(&self, id: &str, listing: &ServiceListingDto) -> Result<Vec<ServiceListing>, ServiceError> {
        check(listing)?;
        self.api.update_service(id, listing).await?;
        tracing::info!("Updated directory entry {}", id);
        self.list().await
    }

    pub async fn delete(&self, id: &str) -> Result<Vec<ServiceListing>, ServiceError> {
        self.api.delete_service(id).await?;
        tracing::info!("Removed directory entry {}", id);
        self.list().await
    }
}

fn check(listing: &ServiceListingDto) -> Result<(), ServiceError> {
    listing
        .validate()
        .map_err(|e| ServiceError::Validation(field_errors(&e)))
}
