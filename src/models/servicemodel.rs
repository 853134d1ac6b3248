use serde::{Deserialize, Serialize};

/// An entry in the admin-maintained service directory.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ServiceListing {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub skill: String,
}
