use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;

/// Declares a lowercase, string-backed status enum stored as text in the database.
macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = AppError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($text => Ok($name::$variant),)+
                    other => Err(AppError::BadRequest(format!(
                        "invalid {} '{}'",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

text_enum!(
    /// Lifecycle of an order. `Delivered` and `Cancelled` are terminal.
    OrderStatus {
        Pending => "pending",
        Confirmed => "confirmed",
        Delivered => "delivered",
        Cancelled => "cancelled",
    }
);

impl OrderStatus {
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Delivered) | (Confirmed, Cancelled)
        )
    }
}

text_enum!(PaymentStatus {
    Pending => "pending",
    Paid => "paid",
    Failed => "failed",
});

text_enum!(
    /// Visibility of catalog and media records.
    RecordStatus {
        Active => "active",
        Inactive => "inactive",
    }
);

text_enum!(ReviewStatus {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
});

text_enum!(
    /// Follow-up state of inquiries and free-website requests.
    LeadStatus {
        Pending => "pending",
        Contacted => "contacted",
        Closed => "closed",
    }
);

text_enum!(BannerPosition {
    Top => "top",
    Bottom => "bottom",
    Both => "both",
});

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: i64,
    pub discount_price: Option<i64>,
    pub stock: i32,
    pub image_url: Option<String>,
    pub inquiry_only: bool,
    pub status: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Price a customer pays per unit.
    pub fn effective_price(&self) -> i64 {
        self.discount_price.unwrap_or(self.price)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub user_id: Option<Uuid>,
    pub user_name: Option<String>,
    pub user_phone: Option<String>,
    pub user_email: Option<String>,
    pub total_amount: i64,
    pub final_amount: i64,
    pub status: String,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Option<Uuid>,
    pub product_title: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Banner {
    pub id: Uuid,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub position: String,
    pub status: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rating: i32,
    pub comment: String,
    pub ip_address: Option<String>,
    pub status: String,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GalleryItem {
    pub id: Uuid,
    pub title: String,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub alt_text: Option<String>,
    pub status: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    pub youtube_url: String,
    pub embed_code: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Pdf {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub file_size: Option<i64>,
    pub status: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Inquiry {
    pub id: Uuid,
    pub user_name: Option<String>,
    pub user_phone: Option<String>,
    pub user_email: Option<String>,
    #[schema(value_type = Object)]
    pub products: serde_json::Value,
    pub message: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FreeWebsiteRequest {
    pub id: Uuid,
    pub name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub business_details: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: String,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct RevenuePoint {
    pub date: NaiveDate,
    pub revenue: i64,
}
