use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Accepted,
    Rejected,
}

impl BookingStatus {
    pub fn to_str(&self) -> &str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Accepted => "accepted",
            BookingStatus::Rejected => "rejected",
        }
    }

    /// `approved` and `accepted` are used interchangeably by the server.
    pub fn is_accepted(&self) -> bool {
        matches!(self, BookingStatus::Approved | BookingStatus::Accepted)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// One side of a booking as the server returns it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BookingParty {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// A reference that is either populated or left as a bare id.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum PartyRef {
    Populated(BookingParty),
    Id(String),
}

impl PartyRef {
    pub fn id(&self) -> &str {
        match self {
            PartyRef::Populated(party) => &party.id,
            PartyRef::Id(id) => id,
        }
    }

    pub fn party(&self) -> Option<&BookingParty> {
        match self {
            PartyRef::Populated(party) => Some(party),
            PartyRef::Id(_) => None,
        }
    }

    fn name(&self) -> Option<&str> {
        self.party()
            .and_then(|party| party.name.as_deref())
            .filter(|name| !name.trim().is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub client: Option<PartyRef>,
    #[serde(default)]
    pub professional: Option<PartyRef>,
    #[serde(default)]
    pub category: Option<String>,
    pub status: BookingStatus,
    #[serde(default)]
    pub rating: Option<u8>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn professional_id(&self) -> Option<&str> {
        self.professional.as_ref().map(PartyRef::id)
    }

    pub fn professional_name(&self) -> &str {
        self.professional
            .as_ref()
            .and_then(PartyRef::name)
            .unwrap_or("Professional")
    }

    pub fn client_name(&self) -> &str {
        self.client
            .as_ref()
            .and_then(PartyRef::name)
            .unwrap_or("Client")
    }

    pub fn client_party(&self) -> Option<&BookingParty> {
        self.client.as_ref().and_then(PartyRef::party)
    }

    pub fn is_for(&self, pro_id: &str) -> bool {
        self.professional_id() == Some(pro_id)
    }

    /// A rating of zero is how the server marks "not rated yet".
    pub fn is_rated(&self) -> bool {
        self.rating.map_or(false, |value| value > 0)
    }
}
