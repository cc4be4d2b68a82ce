//! Create-request validation.
//!
//! Payloads arrive as raw JSON and are only loosely typed by clients: numeric
//! fields may be sent as numbers or as numeric strings. Validation coerces at
//! the boundary and accumulates every failure for a request into one ordered
//! error set before anything is reported.

use serde_json::Value;

use crate::listing::{ListingType, NewListing};
use crate::user::NewUser;

/// Ordered collection of human-readable validation messages.
///
/// Messages are surfaced to the caller verbatim, all together, with status
/// 400. Partial reporting is never done.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_messages(self) -> Vec<String> {
        self.0
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

/// Coerce a JSON value to an integer: accepts integer numbers and strings
/// that parse as integers.
fn coerce_int(value: Option<&Value>) -> Option<i64> {
    match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Validate a listing create payload.
///
/// All three fields are checked independently; every failure is collected.
pub fn validate_listing(payload: &Value) -> Result<NewListing, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let user_id = coerce_int(payload.get("user_id"));
    if user_id.is_none() {
        errors.push("invalid user_id");
    }

    let listing_type = payload
        .get("listing_type")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<ListingType>().ok());
    if listing_type.is_none() {
        errors.push("invalid listing_type. Supported values: 'rent', 'sale'");
    }

    let price = coerce_int(payload.get("price"));
    match price {
        None => errors.push("invalid price. Must be an integer"),
        Some(p) if p < 1 => errors.push("price must be greater than 0"),
        Some(_) => {}
    }

    if errors.is_empty() {
        Ok(NewListing {
            user_id: user_id.unwrap_or_default(),
            listing_type: listing_type.unwrap_or(ListingType::Rent),
            price: price.unwrap_or_default(),
        })
    } else {
        Err(errors)
    }
}

/// Validate a user create payload.
///
/// Names must be non-empty and purely alphabetic once spaces are removed,
/// so "Daniel Radcliffe" is accepted while "Dan99" and "O'Brien" are not.
pub fn validate_user(payload: &Value) -> Result<NewUser, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = payload
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| is_valid_name(n));
    if name.is_none() {
        errors.push("invalid name");
    }

    match name {
        Some(name) => Ok(NewUser {
            name: name.to_string(),
        }),
        None => Err(errors),
    }
}

fn is_valid_name(name: &str) -> bool {
    let stripped: String = name.chars().filter(|c| *c != ' ').collect();
    !stripped.is_empty() && stripped.chars().all(char::is_alphabetic)
}
