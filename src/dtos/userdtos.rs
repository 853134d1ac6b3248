//3
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::usermodel::UserRole;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("static email pattern"));

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::from(message));
    error
}

fn validate_email_field(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(invalid("required", "Email is required"));
    }
    if !EMAIL_SHAPE.is_match(email) {
        return Err(invalid("invalid_email", "Invalid email format"));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(invalid("required", "Full name is required"));
    }
    Ok(())
}

fn validate_location(location: &str) -> Result<(), ValidationError> {
    if location.trim().is_empty() {
        return Err(invalid("required", "Please select your city"));
    }
    Ok(())
}

/// Flattens validator output to one message per field, the first rule that failed.
pub fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                (field.to_string(), message)
            })
        })
        .collect()
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(custom = "validate_email_field")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginUserDto {
    pub fn check(&self) -> Result<(), BTreeMap<String, String>> {
        self.validate().map_err(|e| field_errors(&e))
    }
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    #[validate(custom = "validate_name")]
    pub name: String,

    #[validate(custom = "validate_email_field")]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub role: UserRole,

    #[serde(default)]
    pub phone: String,

    #[validate(custom = "validate_location")]
    pub location: String,

    #[serde(default)]
    pub skills: Vec<String>,
}

impl RegisterUserDto {
    /// Builds the payload the way the server expects it: a pro sends its one
    /// trade as a single-element list, a client sends none.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: UserRole,
        phone: Option<String>,
        location: impl Into<String>,
        skill: Option<String>,
    ) -> Self {
        let skills = match (role, skill) {
            (UserRole::Pro, Some(skill)) if !skill.trim().is_empty() => vec![skill],
            _ => Vec::new(),
        };

        RegisterUserDto {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role,
            phone: phone.unwrap_or_default(),
            location: location.into().to_lowercase(),
            skills,
        }
    }

    /// Field rules plus the extra requirements for professionals.
    pub fn check(&self) -> Result<(), BTreeMap<String, String>> {
        let mut errors = match self.validate() {
            Ok(()) => BTreeMap::new(),
            Err(e) => field_errors(&e),
        };

        if self.role == UserRole::Pro {
            if self.phone.trim().is_empty() {
                errors.insert(
                    "phone".to_string(),
                    "Phone number is required for professionals".to_string(),
                );
            }
            if self.skills.is_empty() {
                errors.insert("skills".to_string(), "Please select your trade".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserLoginResponseDto {
    pub token: String,
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_both_fields() {
        let errors = LoginUserDto::default().check().unwrap_err();
        assert_eq!(errors.get("email").map(String::as_str), Some("Email is required"));
        assert_eq!(errors.get("password").map(String::as_str), Some("Password is required"));
    }

    #[test]
    fn login_rejects_malformed_email() {
        let dto = LoginUserDto {
            email: "not-an-email".into(),
            password: "secret".into(),
        };
        let errors = dto.check().unwrap_err();
        assert_eq!(errors.get("email").map(String::as_str), Some("Invalid email format"));
        assert!(!errors.contains_key("password"));
    }

    #[test]
    fn pro_registration_needs_phone_and_skill() {
        let dto = RegisterUserDto::new(
            "Faisal",
            "faisal@example.com",
            "secret1",
            UserRole::Pro,
            None,
            "Hargeisa",
            None,
        );
        let errors = dto.check().unwrap_err();
        assert!(errors.contains_key("phone"));
        assert!(errors.contains_key("skills"));
        assert_eq!(dto.location, "hargeisa");
    }

    #[test]
    fn client_registration_sends_no_skills() {
        let dto = RegisterUserDto::new(
            "Amina",
            "amina@example.com",
            "secret1",
            UserRole::Client,
            None,
            "Burco",
            Some("Plumber".into()),
        );
        assert!(dto.check().is_ok());
        assert!(dto.skills.is_empty());
    }

    #[test]
    fn short_password_and_missing_city() {
        let dto = RegisterUserDto::new("A", "a@b.co", "123", UserRole::Client, None, "", None);
        let errors = dto.check().unwrap_err();
        assert_eq!(
            errors.get("password").map(String::as_str),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(errors.get("location").map(String::as_str), Some("Please select your city"));
    }
}
