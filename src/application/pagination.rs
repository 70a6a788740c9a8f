//! Offset pagination over in-memory result sets.

use std::num::NonZeroU32;
use std::ops::Range;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;
use time::OffsetDateTime;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Literal accepted in place of a number to request every matching record.
pub const UNLIMITED_TOKEN: &str = "all";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page must be a positive integer, got `{0}`")]
    InvalidPage(String),
    #[error("limit must be a positive integer or `all`, got `{0}`")]
    InvalidPageSize(String),
}

/// Requested page size: a positive row count or "everything".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Limited(NonZeroU32),
    Unlimited,
}

impl PageSize {
    pub fn limited(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self::Limited)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::Limited(NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU32::MIN))
    }
}

impl FromStr for PageSize {
    type Err = PaginationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case(UNLIMITED_TOKEN) {
            return Ok(Self::Unlimited);
        }
        trimmed
            .parse::<u32>()
            .ok()
            .and_then(Self::limited)
            .ok_or_else(|| PaginationError::InvalidPageSize(raw.to_string()))
    }
}

impl Serialize for PageSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Limited(value) => serializer.serialize_u32(value.get()),
            Self::Unlimited => serializer.serialize_str(UNLIMITED_TOKEN),
        }
    }
}

/// Parse a 1-indexed page number.
pub fn parse_page(raw: &str) -> Result<NonZeroU32, PaginationError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(|| PaginationError::InvalidPage(raw.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: NonZeroU32,
    pub size: PageSize,
}

impl PageRequest {
    pub fn new(page: NonZeroU32, size: PageSize) -> Self {
        Self { page, size }
    }

    /// Index range of this page within a result set of `total` rows, clamped
    /// so pages past the end yield an empty range.
    pub fn window(&self, total: usize) -> Range<usize> {
        match self.size {
            PageSize::Unlimited => 0..total,
            PageSize::Limited(size) => {
                let size = u64::from(size.get());
                let offset = u64::from(self.page.get() - 1).saturating_mul(size);
                let start = usize::try_from(offset).unwrap_or(usize::MAX).min(total);
                let end = usize::try_from(offset.saturating_add(size))
                    .unwrap_or(usize::MAX)
                    .min(total);
                start..end
            }
        }
    }

    pub fn total_pages(&self, total: usize) -> u64 {
        match self.size {
            PageSize::Unlimited => 1,
            PageSize::Limited(size) => (total as u64).div_ceil(u64::from(size.get())),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: NonZeroU32::MIN,
            size: PageSize::default(),
        }
    }
}

/// Pagination block returned alongside every listed page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub limit: PageSize,
    pub total_count: u64,
    pub total_pages: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub cached_at: OffsetDateTime,
}
