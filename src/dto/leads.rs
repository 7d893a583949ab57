use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{FreeWebsiteRequest, Inquiry, LeadStatus};

/// Product reference captured with an inquiry, as the visitor saw it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InquiryProduct {
    pub product_id: Option<Uuid>,
    pub title: String,
    pub price: Option<i64>,
    pub quantity: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateInquiryRequest {
    pub products: Vec<InquiryProduct>,
    pub message: Option<String>,
    pub user_name: Option<String>,
    pub user_phone: Option<String>,
    pub user_email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateFreeWebsiteRequest {
    pub name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub business_details: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLeadStatusRequest {
    pub status: LeadStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InquiryList {
    pub items: Vec<Inquiry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FreeWebsiteRequestList {
    pub items: Vec<FreeWebsiteRequest>,
}
