//! Join engine and post-join filter.
//!
//! The historical contract matches a listing to its owner by treating the
//! listing's `user_id` as an index counted from the end of the fetched users
//! page, not as a key. The `Index` strategy reproduces that exactly, while
//! `Keyed` joins on the `user_id` field for deployments that can take the
//! behavior change. Either way a listing whose owner cannot be resolved
//! aborts the whole request; partial joins are never returned.

use std::collections::HashMap;
use std::str::FromStr;

use common::{AppError, AppResult};
use domain::{JoinedListing, Listing, User};

/// How listings are matched to users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinStrategy {
    /// `user_id` is an index from the end of the users page (compatible).
    #[default]
    Index,
    /// `user_id` is matched against the `id` field of the users page.
    Keyed,
}

impl FromStr for JoinStrategy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "index" => Ok(JoinStrategy::Index),
            "keyed" => Ok(JoinStrategy::Keyed),
            _ => Err(()),
        }
    }
}

/// What a positional filter miss yields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMissPolicy {
    /// Degrade to an empty list (current canonical behavior).
    #[default]
    Empty,
    /// Report 400, as earlier service revisions did.
    Error,
}

impl FromStr for FilterMissPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empty" => Ok(FilterMissPolicy::Empty),
            "error" => Ok(FilterMissPolicy::Error),
            _ => Err(()),
        }
    }
}

/// Join one fetched page of listings with one fetched page of users.
pub fn join_page(
    listings: Vec<Listing>,
    users: Vec<User>,
    strategy: JoinStrategy,
) -> AppResult<Vec<JoinedListing>> {
    match strategy {
        JoinStrategy::Index => join_by_index(listings, users),
        JoinStrategy::Keyed => join_by_key(listings, users),
    }
}

fn join_by_index(listings: Vec<Listing>, users: Vec<User>) -> AppResult<Vec<JoinedListing>> {
    listings
        .into_iter()
        .map(|listing| {
            let idx = index_from_end(users.len(), listing.user_id)
                .ok_or_else(|| AppError::bad_request("invalid user_id"))?;
            Ok(listing.with_user(users[idx].clone()))
        })
        .collect()
}

fn join_by_key(listings: Vec<Listing>, users: Vec<User>) -> AppResult<Vec<JoinedListing>> {
    let by_id: HashMap<i64, User> = users.into_iter().map(|user| (user.id, user)).collect();
    listings
        .into_iter()
        .map(|listing| {
            let user = by_id
                .get(&listing.user_id)
                .cloned()
                .ok_or_else(|| AppError::bad_request("invalid user_id"))?;
            Ok(listing.with_user(user))
        })
        .collect()
}

/// Narrow an already-joined page to the caller's `user_id` filter.
///
/// `0` is unconditionally empty; any other value is a positional lookup
/// counted from the end of the page, yielding at most one element. A miss
/// follows the configured policy and is never a 404.
pub fn filter_by_position(
    joined: Vec<JoinedListing>,
    user_id: i64,
    policy: FilterMissPolicy,
) -> AppResult<Vec<JoinedListing>> {
    if user_id == 0 {
        return Ok(Vec::new());
    }

    match index_from_end(joined.len(), user_id) {
        Some(idx) => Ok(joined.into_iter().skip(idx).take(1).collect()),
        None => match policy {
            FilterMissPolicy::Empty => Ok(Vec::new()),
            FilterMissPolicy::Error => Err(AppError::bad_request("invalid user_id")),
        },
    }
}

/// Resolve `sequence[-value]` under Python indexing rules: positive values
/// count back from the end, zero and negatives address from the front.
fn index_from_end(len: usize, value: i64) -> Option<usize> {
    if value > 0 {
        let back = value as usize;
        if back <= len {
            Some(len - back)
        } else {
            None
        }
    } else {
        let front = value.unsigned_abs() as usize;
        if front < len {
            Some(front)
        } else {
            None
        }
    }
}
