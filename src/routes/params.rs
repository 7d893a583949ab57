use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::BannerPosition;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Highest page a listing will serve; keeps the offset far from overflow.
pub const MAX_PAGE: i64 = 1_000_000;

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).clamp(1, MAX_PAGE);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductSortBy {
    /// Curated order: `sort_order` ascending, newest first within a slot.
    Position,
    CreatedAt,
    Price,
    Title,
}

// Query structs repeat `page`/`per_page` instead of flattening `Pagination`:
// flattened fields lose their numeric types in query-string decoding.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub q: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub sort_by: Option<ProductSortBy>,
    pub sort_order: Option<SortOrder>,
}

impl ProductQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl OrderListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Admin listing filter; `status` omitted (or `all`) lists every record.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StatusQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<String>,
}

impl StatusQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }

    pub fn status_filter(&self) -> Option<&str> {
        self.status
            .as_deref()
            .filter(|s| !s.is_empty() && *s != "all")
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BannerQuery {
    pub position: Option<BannerPosition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_clamps_to_sane_bounds() {
        let p = Pagination {
            page: Some(0),
            per_page: Some(500),
        };
        assert_eq!(p.normalize(), (1, 100, 0));

        let p = Pagination {
            page: Some(3),
            per_page: None,
        };
        assert_eq!(p.normalize(), (3, 20, 40));
    }

    #[test]
    fn huge_page_is_capped() {
        let p = Pagination {
            page: Some(i64::MAX),
            per_page: Some(100),
        };
        assert_eq!(p.normalize(), (MAX_PAGE, 100, (MAX_PAGE - 1) * 100));
    }

    #[test]
    fn status_all_means_no_filter() {
        let q = StatusQuery {
            status: Some("all".into()),
            ..StatusQuery::default()
        };
        assert_eq!(q.status_filter(), None);
    }
}
