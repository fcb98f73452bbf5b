//! Member listing query extractor
//!
//! Extracts skip/take pagination and the optional search term from query
//! strings.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use guildhall_core::traits::MemberPage;
use serde::Deserialize;

use crate::response::ApiError;

/// Default page size
const DEFAULT_TAKE: i64 = 50;
/// Maximum page size
const MAX_TAKE: i64 = 100;
/// Maximum search term length
const MAX_SEARCH_LEN: usize = 100;

/// Raw member listing query parameters
#[derive(Debug, Deserialize)]
pub struct MemberListParams {
    /// Substring match over username and display name
    #[serde(default)]
    pub search: Option<String>,
    /// Rows to skip
    #[serde(default)]
    pub skip: Option<i64>,
    /// Maximum rows to return
    #[serde(default)]
    pub take: Option<i64>,
}

/// Validated member listing query
#[derive(Debug, Clone)]
pub struct MemberListQuery {
    pub search: Option<String>,
    pub skip: i64,
    /// Validated to 1..=100
    pub take: i64,
}

impl Default for MemberListQuery {
    fn default() -> Self {
        Self {
            search: None,
            skip: 0,
            take: DEFAULT_TAKE,
        }
    }
}

impl MemberListQuery {
    /// Convert into the repository paging options
    pub fn into_page(self) -> MemberPage {
        MemberPage {
            search: self.search,
            skip: self.skip,
            take: self.take,
        }
    }
}

impl TryFrom<MemberListParams> for MemberListQuery {
    type Error = ApiError;

    fn try_from(params: MemberListParams) -> Result<Self, Self::Error> {
        let search = params
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        if let Some(search) = &search {
            if search.len() > MAX_SEARCH_LEN {
                return Err(ApiError::invalid_query("Search term too long"));
            }
        }

        let skip = params.skip.unwrap_or(0);
        if skip < 0 {
            return Err(ApiError::invalid_query("'skip' must not be negative"));
        }

        let take = params.take.unwrap_or(DEFAULT_TAKE).clamp(1, MAX_TAKE);

        Ok(MemberListQuery { search, skip, take })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MemberListQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<MemberListParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        MemberListQuery::try_from(params)
    }
}
