//! Pagination parameter handling.
//!
//! Pagination parameters are optional at every surface. The gateway mirrors
//! whatever the caller supplied to both stores, attaching only the
//! parameters that were actually present; the stores fall back to the
//! defaults when paging without caller input.

use crate::error::{AppError, AppResult};

pub const DEFAULT_PAGE_NUM: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Optional `(page_num, page_size)` pair as received from a caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    pub page_num: Option<u64>,
    pub page_size: Option<u64>,
}

impl PageParams {
    /// Parse raw query values. Values must be positive integers; anything
    /// else is a 400 naming the offending parameter.
    pub fn parse(page_num: Option<&str>, page_size: Option<&str>) -> AppResult<Self> {
        Ok(Self {
            page_num: parse_positive(page_num, "invalid page_num")?,
            page_size: parse_positive(page_size, "invalid page_size")?,
        })
    }

    /// Query pairs to mirror upstream. Only parameters the caller actually
    /// supplied are attached; they are never split or translated.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(n) = self.page_num {
            pairs.push(("page_num", n.to_string()));
        }
        if let Some(s) = self.page_size {
            pairs.push(("page_size", s.to_string()));
        }
        pairs
    }

    /// Row limit for a store query.
    pub fn limit(&self) -> u64 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Row offset for a store query. Saturates on extreme page numbers;
    /// an offset past the end of the table just selects nothing.
    pub fn offset(&self) -> u64 {
        self.page_num
            .unwrap_or(DEFAULT_PAGE_NUM)
            .saturating_sub(1)
            .saturating_mul(self.limit())
    }
}

fn parse_positive(raw: Option<&str>, message: &str) -> AppResult<Option<u64>> {
    match raw {
        None => Ok(None),
        Some(raw) => match raw.parse::<u64>() {
            Ok(n) if n >= 1 => Ok(Some(n)),
            _ => Err(AppError::bad_request(message)),
        },
    }
}
