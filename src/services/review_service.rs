use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::reviews::{CreateReviewRequest, ReviewList, UpdateReviewStatusRequest},
    entity::reviews::{ActiveModel, Column, Entity as Reviews, Model as ReviewModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Review, ReviewStatus},
    response::{ApiResponse, Meta},
    routes::params::StatusQuery,
    services::fetch_page,
    state::AppState,
};

/// Store a visitor review; it stays hidden until an admin approves it.
pub async fn submit_review(
    state: &AppState,
    ip_address: Option<String>,
    payload: CreateReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    validate_review(&payload)?;

    let review = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_string()),
        email: Set(payload.email.filter(|e| !e.trim().is_empty())),
        phone: Set(payload.phone.filter(|p| !p.trim().is_empty())),
        rating: Set(payload.rating),
        comment: Set(payload.comment.trim().to_string()),
        ip_address: Set(ip_address),
        status: Set(ReviewStatus::Pending.as_str().into()),
        approved_at: Set(None),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(&state.orm)
    .await?;

    tracing::debug!(review_id = %review.id, rating = review.rating, "review submitted");

    Ok(ApiResponse::success(
        "Thank you! Your review will appear after approval",
        review_from_entity(review),
        Some(Meta::empty()),
    ))
}

fn validate_review(payload: &CreateReviewRequest) -> AppResult<()> {
    if payload.name.trim().is_empty() {
        return Err(AppError::bad_request("name is required"));
    }
    if payload.comment.trim().is_empty() {
        return Err(AppError::bad_request("comment is required"));
    }
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::bad_request("rating must be between 1 and 5"));
    }
    Ok(())
}

/// Approved reviews, newest first.
pub async fn list_approved(state: &AppState) -> AppResult<ApiResponse<ReviewList>> {
    let items = Reviews::find()
        .filter(Column::Status.eq(ReviewStatus::Approved.as_str()))
        .order_by_desc(Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(review_from_entity)
        .collect();
    Ok(ApiResponse::success("Reviews", ReviewList { items }, Some(Meta::empty())))
}

pub async fn admin_list_reviews(
    state: &AppState,
    query: StatusQuery,
) -> AppResult<ApiResponse<ReviewList>> {
    let mut finder = Reviews::find();
    if let Some(status) = query.status_filter() {
        finder = finder.filter(Column::Status.eq(status));
    }
    let finder = finder.order_by_desc(Column::CreatedAt);

    let (rows, meta) = fetch_page(&state.orm, finder, &query.pagination()).await?;
    let items = rows.into_iter().map(review_from_entity).collect();
    Ok(ApiResponse::success("Reviews", ReviewList { items }, Some(meta)))
}

pub async fn get_review(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Review>> {
    let review = Reviews::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "Review",
        review_from_entity(review),
        Some(Meta::empty()),
    ))
}

/// Moderate a review. `approved_at` tracks the latest approval and is
/// cleared whenever the review leaves the approved state.
pub async fn update_review_status(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
    payload: UpdateReviewStatusRequest,
) -> AppResult<ApiResponse<Review>> {
    let existing = Reviews::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let approved_at = match payload.status {
        ReviewStatus::Approved => Some(Utc::now().fixed_offset()),
        ReviewStatus::Pending | ReviewStatus::Rejected => None,
    };
    let mut active: ActiveModel = existing.into();
    active.status = Set(payload.status.as_str().into());
    active.approved_at = Set(approved_at);
    let review = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(actor.user_id),
        "review_status_update",
        "reviews",
        serde_json::json!({ "review_id": review.id, "status": review.status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Review updated",
        review_from_entity(review),
        Some(Meta::empty()),
    ))
}

pub async fn delete_review(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Reviews::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.orm,
        Some(actor.user_id),
        "review_delete",
        "reviews",
        serde_json::json!({ "review_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn review_from_entity(model: ReviewModel) -> Review {
    Review {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        rating: model.rating,
        comment: model.comment,
        ip_address: model.ip_address,
        status: model.status,
        approved_at: model.approved_at.map(|at| at.with_timezone(&Utc)),
        created_at: model.created_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(rating: i32) -> CreateReviewRequest {
        CreateReviewRequest {
            name: "Asha".into(),
            email: None,
            phone: None,
            rating,
            comment: "Great service".into(),
        }
    }

    #[test]
    fn rating_must_be_one_to_five() {
        assert!(validate_review(&request(1)).is_ok());
        assert!(validate_review(&request(5)).is_ok());
        assert!(validate_review(&request(0)).is_err());
        assert!(validate_review(&request(6)).is_err());
    }

    #[test]
    fn empty_comment_is_rejected() {
        let mut req = request(4);
        req.comment = "  ".into();
        assert!(validate_review(&req).is_err());
    }
}
