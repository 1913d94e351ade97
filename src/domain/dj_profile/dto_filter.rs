use super::DjStatus;
use crate::shared::PaginationParams;

/// Listing criteria. Text matches are case-insensitive substrings except
/// `genre`, which must equal one of the profile's genres.
#[derive(Debug, Clone, Default)]
pub struct DjProfileFilter {
    pub status: Option<DjStatus>,
    pub genre: Option<String>,
    pub city: Option<String>,
    pub min_rate: Option<f64>,
    pub max_rate: Option<f64>,
    /// Matched against the bio and the owner's name
    pub search: Option<String>,
    pub pagination: PaginationParams,
}
