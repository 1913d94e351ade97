//! Response envelopes and extractors shared by every HTTP module

pub mod patch;
pub mod validated_json;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::PaginatedResult;

pub use patch::present;
pub use validated_json::ValidatedJson;

/// Standard API envelope.
///
/// Success: `{"success": true, "data": {...}}`.
/// Failure: `{"success": false, "data": null, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Page metadata; `pages = ceil(total / limit)`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn from_result<S>(result: PaginatedResult<S>, f: impl FnMut(S) -> T) -> Self {
        let pagination = PaginationMeta {
            page: result.page,
            limit: result.limit,
            total: result.total,
            pages: result.total_pages,
        };
        Self {
            items: result.items.into_iter().map(f).collect(),
            pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::PaginationParams;

    #[test]
    fn envelope_shapes() {
        let ok = serde_json::to_value(ApiResponse::success(1)).unwrap();
        assert_eq!(ok, serde_json::json!({"success": true, "data": 1}));

        let err = serde_json::to_value(ApiResponse::<()>::error("nope")).unwrap();
        assert_eq!(
            err,
            serde_json::json!({"success": false, "data": null, "error": "nope"})
        );
    }

    #[test]
    fn pagination_meta_is_copied_from_result() {
        let result = PaginatedResult::new(vec![1, 2], 25, PaginationParams::new(Some(2), Some(10)));
        let page = PaginatedResponse::from_result(result, |n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.pagination.pages, 3);
        assert_eq!(page.pagination.page, 2);
        assert_eq!(page.pagination.total, 25);
    }
}
