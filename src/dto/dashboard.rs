use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::RevenuePoint;

#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct DashboardStats {
    pub today_orders: u64,
    pub today_revenue: i64,
    pub month_orders: u64,
    pub month_revenue: i64,
    pub pending_orders: u64,
    pub active_products: u64,
    pub pending_reviews: u64,
}

/// Chart payload: one point per calendar day, oldest first.
#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct RevenueSeries {
    #[schema(value_type = Vec<RevenuePoint>)]
    pub points: Vec<RevenuePoint>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RevenueQuery {
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecentOrdersQuery {
    pub limit: Option<u64>,
}

impl RecentOrdersQuery {
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(10).clamp(1, 50)
    }
}
