use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use models::order::{self, OrderStatus};
use serde::Deserialize;
use service::auth::Claims;

use crate::errors::ApiError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

#[utoipa::path(get, path = "/admin/orders", tag = "admin", responses((status = 200, description = "All orders", body = [crate::openapi::OrderDoc]), (status = 403, description = "Forbidden")))]
pub async fn list_orders(State(state): State<ServerState>) -> Result<Json<Vec<order::Model>>, ApiError> {
    Ok(Json(state.bookings.all_orders().await?))
}

#[utoipa::path(patch, path = "/admin/orders/{id}", tag = "admin", params(("id" = i32, Path, description = "Order id")), request_body = crate::openapi::StatusUpdateDoc, responses((status = 200, description = "Updated", body = crate::openapi::OrderDoc), (status = 403, description = "Forbidden"), (status = 404, description = "Not Found"), (status = 409, description = "Illegal transition or concurrent update")))]
pub async fn update_order_status(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> Result<Json<order::Model>, ApiError> {
    let Path(id) = id?;
    let Json(update) = payload?;
    Ok(Json(state.bookings.update_order_status(&claims, id, update.status).await?))
}

#[utoipa::path(delete, path = "/admin/orders/{id}", tag = "admin", operation_id = "admin_delete_order", params(("id" = i32, Path, description = "Order id")), responses((status = 204, description = "Deleted"), (status = 403, description = "Forbidden"), (status = 404, description = "Not Found")))]
pub async fn delete_order(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.bookings.delete_order(&claims, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
