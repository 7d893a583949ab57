use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Order, OrderItem, OrderStatus, PaymentStatus};

/// One line of the customer's cart as submitted at checkout.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CartLine {
    pub product_id: Uuid,
    pub quantity: i32,
    /// Price the client displayed; rejected when it differs from the catalog price.
    pub unit_price: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub items: Vec<CartLine>,
    pub user_name: Option<String>,
    pub user_phone: Option<String>,
    pub user_email: Option<String>,
    pub total_amount: Option<i64>,
    pub final_amount: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePaymentStatusRequest {
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}
