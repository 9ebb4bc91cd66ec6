use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use models::{order, review};
use serde::Deserialize;
use service::auth::Claims;
use service::booking::service::ReviewInput;

use crate::errors::ApiError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub service_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}

#[utoipa::path(post, path = "/orders", tag = "orders", request_body = crate::openapi::CreateOrderDoc, responses((status = 201, description = "Created", body = crate::openapi::OrderDoc), (status = 401, description = "Unauthorized"), (status = 404, description = "Unknown service")))]
pub async fn create_order(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<order::Model>), ApiError> {
    let Json(input) = payload?;
    let created = state.bookings.create_order(&claims, input.service_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/orders", tag = "orders", responses((status = 200, description = "Caller's orders", body = [crate::openapi::OrderDoc]), (status = 401, description = "Unauthorized")))]
pub async fn my_orders(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<order::Model>>, ApiError> {
    Ok(Json(state.bookings.my_orders(&claims).await?))
}

#[utoipa::path(delete, path = "/orders/{id}", tag = "orders", params(("id" = i32, Path, description = "Order id")), responses((status = 204, description = "Deleted"), (status = 403, description = "Not the owner"), (status = 404, description = "Not Found")))]
pub async fn delete_order(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.bookings.delete_order(&claims, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/orders/{id}/cancel", tag = "orders", params(("id" = i32, Path, description = "Order id")), responses((status = 200, description = "Cancelled", body = crate::openapi::OrderDoc), (status = 403, description = "Forbidden"), (status = 409, description = "Illegal transition")))]
pub async fn cancel_order(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<order::Model>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.bookings.cancel_order(&claims, id).await?))
}

#[utoipa::path(post, path = "/orders/{id}/reviews", tag = "orders", params(("id" = i32, Path, description = "Order id")), request_body = crate::openapi::CreateReviewDoc, responses((status = 201, description = "Created", body = crate::openapi::ReviewDoc), (status = 403, description = "Not the owner"), (status = 409, description = "Already reviewed or not completed")))]
pub async fn create_review(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<CreateReviewRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<review::Model>), ApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let created = state
        .bookings
        .create_review(&claims, id, ReviewInput { rating: input.rating, comment: input.comment })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}
