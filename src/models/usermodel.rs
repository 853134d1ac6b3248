//1
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Client,
    Pro,
    Admin,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Client => "client",
            UserRole::Pro => "pro",
            UserRole::Admin => "admin",
        }
    }

    pub const ALL: [UserRole; 3] = [UserRole::Admin, UserRole::Pro, UserRole::Client];
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "client" => Ok(UserRole::Client),
            "pro" => Ok(UserRole::Pro),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub location: Option<String>,
}

/// A trade listed on a professional's profile.
///
/// Older accounts store skills as `{ "name": .. }` or `{ "title": .. }` objects
/// instead of plain strings; both shapes are accepted.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Skill(pub String);

impl Skill {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, wanted: &str) -> bool {
        self.0.eq_ignore_ascii_case(wanted.trim())
    }
}

impl<'de> Deserialize<'de> for Skill {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawSkill {
            Plain(String),
            Named {
                name: Option<String>,
                title: Option<String>,
            },
        }

        Ok(match RawSkill::deserialize(deserializer)? {
            RawSkill::Plain(s) => Skill(s),
            RawSkill::Named { name, title } => Skill(name.or(title).unwrap_or_default()),
        })
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<Skill>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_verified: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_suspended: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub review_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub daily_request_count: u32,
}

impl Professional {
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Professional"
        } else {
            &self.name
        }
    }

    /// Verified and not suspended: the only pros shown in the marketplace.
    pub fn is_bookable(&self) -> bool {
        self.is_verified && !self.is_suspended
    }

    pub fn has_skill(&self, wanted: &str) -> bool {
        self.skills.iter().any(|skill| skill.matches(wanted))
    }

    pub fn average_rating(&self) -> String {
        format!("{:.1}", self.rating)
    }
}

// Mongo documents sometimes carry explicit nulls for counters and flags.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_parses_stored_strings() {
        assert_eq!("pro".parse::<UserRole>(), Ok(UserRole::Pro));
        assert_eq!(" admin ".parse::<UserRole>(), Ok(UserRole::Admin));
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn professional_accepts_mixed_skill_shapes() {
        let pro: Professional = serde_json::from_value(json!({
            "_id": "65a0f0c0aaaaaaaaaaaaaaaa",
            "name": "Abdi",
            "skills": ["Plumber", { "name": "Painter" }, { "title": "Mason" }],
            "isVerified": true,
            "rating": 4.26
        }))
        .unwrap();

        assert!(pro.has_skill("plumber"));
        assert!(pro.has_skill("PAINTER"));
        assert!(pro.has_skill("Mason"));
        assert!(!pro.is_suspended);
        assert_eq!(pro.daily_request_count, 0);
        assert_eq!(pro.average_rating(), "4.3");
    }

    #[test]
    fn blank_name_falls_back() {
        let pro: Professional = serde_json::from_value(json!({ "_id": "x" })).unwrap();
        assert_eq!(pro.display_name(), "Professional");
        assert!(!pro.is_bookable());
    }

    #[test]
    fn null_counters_read_as_zero() {
        let pro: Professional = serde_json::from_value(json!({
            "_id": "x",
            "rating": null,
            "dailyRequestCount": null,
            "isVerified": null
        }))
        .unwrap();
        assert_eq!(pro.rating, 0.0);
        assert_eq!(pro.daily_request_count, 0);
        assert!(!pro.is_verified);
    }
}
