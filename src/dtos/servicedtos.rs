use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, Default)]
pub struct ServiceListingDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub location: String,
    #[validate(length(min = 1, message = "Skill is required"))]
    pub skill: String,
}
