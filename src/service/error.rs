use std::collections::BTreeMap;

use thiserror::Error;
use validator::ValidationErrors;

use crate::{
    dtos::field_errors,
    error::{ClientError, ErrorMessage},
};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Please login first.")]
    NotSignedIn,

    #[error("You already have a pending request for this pro submitted recently.")]
    RecentPendingRequest,

    #[error("Limit Reached")]
    DailyLimitReached,

    #[error("No accepted booking with this professional is waiting for a rating")]
    NothingToRate,

    #[error("Rating {0} is outside 1-5")]
    InvalidRating(u8),

    #[error("You cannot accept requests until approved.")]
    AccountNotVerified,

    #[error("Contact support to resolve account restrictions.")]
    AccountSuspended,

    #[error("This will permanently delete the user. Pass confirmation to continue.")]
    ConfirmationRequired,

    #[error("{0} not found")]
    NotFound(String),

    #[error("This request is no longer pending.")]
    NotPending,

    #[error("Validation error")]
    Validation(BTreeMap<String, String>),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(field_errors(&errors))
    }
}

impl ServiceError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ServiceError::Client(ClientError::Unauthorized))
    }

    /// The text a transient notification shows for this failure.
    ///
    /// `fallback` is the page's generic message for errors that carry none of
    /// their own; a server-provided message always wins over it.
    pub fn toast_message(&self, fallback: ErrorMessage) -> String {
        match self {
            ServiceError::Client(ClientError::Unauthorized) => ErrorMessage::SessionExpired.to_string(),
            ServiceError::Client(ClientError::Validation(fields))
            | ServiceError::Validation(fields) => fields
                .values()
                .next()
                .cloned()
                .unwrap_or_else(|| fallback.to_string()),
            ServiceError::Client(err) => err
                .server_message()
                .map(str::to_owned)
                .unwrap_or_else(|| fallback.to_string()),
            other => other.to_string(),
        }
    }

    pub fn field_errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            ServiceError::Validation(fields) | ServiceError::Client(ClientError::Validation(fields)) => {
                Some(fields)
            }
            _ => None,
        }
    }
}
