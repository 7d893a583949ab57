use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Review, ReviewStatus};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rating: i32,
    pub comment: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReviewStatusRequest {
    pub status: ReviewStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewList {
    pub items: Vec<Review>,
}
