use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Product, RecordStatus};

/// New product, including its opening stock.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProductPayload {
    pub title: String,
    pub description: Option<String>,
    pub price: i64,
    pub discount_price: Option<i64>,
    pub stock: i32,
    pub image_url: Option<String>,
    #[serde(default)]
    pub inquiry_only: bool,
    pub status: Option<RecordStatus>,
    pub sort_order: Option<i32>,
}

/// Full replacement of a product's catalog fields. Stock is changed only
/// through [`AdjustStockRequest`], so checkouts are never overwritten.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub title: String,
    pub description: Option<String>,
    pub price: i64,
    pub discount_price: Option<i64>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub inquiry_only: bool,
    pub status: Option<RecordStatus>,
    pub sort_order: Option<i32>,
}

/// Relative stock change: positive to restock, negative to write off.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AdjustStockRequest {
    pub delta: i32,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
