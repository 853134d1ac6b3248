use std::collections::BTreeMap;
use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorMessage {
    WrongCredentials,
    SessionExpired,
    RegistrationFailed,
    BookingFailed,
    RatingFailed,
    ActionFailed,
    DashboardLoadFailed,
    StatusUpdateFailed,
    ServerError,
}

impl ToString for ErrorMessage {
    fn to_string(&self) -> String {
        self.to_str().to_owned()
    }
}

impl ErrorMessage {
    fn to_str(&self) -> &str {
        match self {
            ErrorMessage::WrongCredentials => "Invalid credentials",
            ErrorMessage::SessionExpired => "Session expired. Please login again.",
            ErrorMessage::RegistrationFailed => "Registration failed. Please try again.",
            ErrorMessage::BookingFailed => "Booking failed.",
            ErrorMessage::RatingFailed => "Error saving rating.",
            ErrorMessage::ActionFailed => "Action failed.",
            ErrorMessage::DashboardLoadFailed => "Failed to load dashboard data.",
            ErrorMessage::StatusUpdateFailed => "Failed to update status",
            ErrorMessage::ServerError => "Server error",
        }
    }
}

/// Everything that can go wrong talking to the marketplace API.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered 401. The stored session has already been cleared.
    #[error("Session expired")]
    Unauthorized,

    #[error("Validation failed: {}", FieldErrors(.0))]
    Validation(BTreeMap<String, String>),

    #[error("Request failed with status {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("Could not decode response: {0}")]
    Decode(String),

    #[error("Session storage error: {0}")]
    Session(String),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    /// The message the server put in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Builds the error for a non-success response from its status and raw body.
    ///
    /// A 4xx body carrying an `errors` object becomes a field-level validation
    /// error; anything else keeps the server's `message` when it has one.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            return ClientError::Unauthorized;
        }

        let parsed = serde_json::from_str::<ErrorBody>(body).unwrap_or_default();

        if status.is_client_error() {
            if let Some(fields) = parsed.errors.filter(|fields| !fields.is_empty()) {
                return ClientError::Validation(fields);
            }
        }

        ClientError::Api {
            status,
            message: parsed.message.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    #[serde(default, deserialize_with = "deserialize_field_errors")]
    errors: Option<BTreeMap<String, String>>,
}

// The server sends either {field: "msg"} or {field: ["msg", ...]}.
fn deserialize_field_errors<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(serde_json::Value::Object(map)) = raw else {
        return Ok(None);
    };

    let fields = map
        .into_iter()
        .filter_map(|(field, value)| {
            let message = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Array(items) => items
                    .into_iter()
                    .find_map(|item| item.as_str().map(str::to_owned))?,
                serde_json::Value::Object(inner) => inner
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_owned)?,
                _ => return None,
            };
            Some((field, message))
        })
        .collect();

    Ok(Some(fields))
}

struct FieldErrors<'a>(&'a BTreeMap<String, String>);

impl fmt::Display for FieldErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_wins_over_body() {
        let err = ClientError::from_response(StatusCode::UNAUTHORIZED, r#"{"message":"nope"}"#);
        assert!(err.is_unauthorized());
    }

    #[test]
    fn field_map_becomes_validation_error() {
        let body = r#"{"message":"bad","errors":{"email":"Email already exists","phone":["Too short"]}}"#;
        match ClientError::from_response(StatusCode::BAD_REQUEST, body) {
            ClientError::Validation(fields) => {
                assert_eq!(fields.get("email").map(String::as_str), Some("Email already exists"));
                assert_eq!(fields.get("phone").map(String::as_str), Some("Too short"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn server_message_is_kept() {
        let err = ClientError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Daily limit reached for this professional"}"#,
        );
        assert_eq!(err.server_message(), Some("Daily limit reached for this professional"));
    }

    #[test]
    fn non_json_body_has_no_message() {
        let err = ClientError::from_response(StatusCode::BAD_GATEWAY, "<html>upstream</html>");
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn errors_on_server_failure_are_not_validation() {
        let body = r#"{"errors":{"email":"x"}}"#;
        let err = ClientError::from_response(StatusCode::INTERNAL_SERVER_ERROR, body);
        assert!(matches!(err, ClientError::Api { .. }));
    }
}
