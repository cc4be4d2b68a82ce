//! Listing domain entity and related types.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::user::User;

/// Kind of listing offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Rent,
    Sale,
}

impl FromStr for ListingType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rent" => Ok(ListingType::Rent),
            "sale" => Ok(ListingType::Sale),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for ListingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingType::Rent => write!(f, "rent"),
            ListingType::Sale => write!(f, "sale"),
        }
    }
}

/// Listing entity as stored by the listings store and fetched by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub user_id: i64,
    pub listing_type: ListingType,
    pub price: i64,
    /// Microseconds since the epoch.
    pub created_at: i64,
    /// Microseconds since the epoch.
    pub updated_at: i64,
}

impl Listing {
    /// Build the joined view: `user_id` is dropped and replaced by the full
    /// owner record.
    pub fn with_user(self, user: User) -> JoinedListing {
        JoinedListing {
            id: self.id,
            listing_type: self.listing_type,
            price: self.price,
            created_at: self.created_at,
            updated_at: self.updated_at,
            user,
        }
    }
}

/// Listing with its owner embedded, as exposed by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinedListing {
    pub id: i64,
    pub listing_type: ListingType,
    pub price: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub user: User,
}

/// Validated listing creation data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewListing {
    pub user_id: i64,
    pub listing_type: ListingType,
    pub price: i64,
}
