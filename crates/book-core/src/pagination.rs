//! # Pagination
//!
//! Page/limit/offset arithmetic for the book listing.
//!
//! Query parameters fail open: anything missing, non-numeric or below one
//! falls back to the defaults instead of producing a 400.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 15;

/// Pagination cursor derived from request parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number
    pub page: i64,
    /// Rows per page
    pub limit: i64,
}

impl PageRequest {
    /// Build a cursor from raw `page` / `limit` query values.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Rows to skip before this page
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// `ceil(total / limit)`
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        let whole = total / self.limit;
        if total % self.limit == 0 {
            whole
        } else {
            whole + 1
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    parse_leading_int(raw?).filter(|n| *n >= 1)
}

/// Parses the integer prefix of `raw` (`"3abc"` → 3, `"abc"` → None).
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    rest[..digits_end].parse::<i64>().ok().map(|n| sign * n)
}
