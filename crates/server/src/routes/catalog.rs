use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use models::catalog::{self, NewService};
use models::review;

use crate::errors::ApiError;
use crate::routes::ServerState;

#[utoipa::path(get, path = "/services", tag = "catalog", responses((status = 200, description = "OK", body = [crate::openapi::ServiceDoc])))]
pub async fn list_services(State(state): State<ServerState>) -> Result<Json<Vec<catalog::Model>>, ApiError> {
    Ok(Json(state.bookings.list_services().await?))
}

#[utoipa::path(post, path = "/services", tag = "catalog", request_body = crate::openapi::NewServiceDoc, responses((status = 201, description = "Created", body = crate::openapi::ServiceDoc), (status = 400, description = "Bad Request"), (status = 403, description = "Forbidden")))]
pub async fn create_service(
    State(state): State<ServerState>,
    payload: Result<Json<NewService>, JsonRejection>,
) -> Result<(StatusCode, Json<catalog::Model>), ApiError> {
    let Json(input) = payload?;
    let created = state.bookings.create_service(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/reviews", tag = "catalog", responses((status = 200, description = "OK", body = [crate::openapi::ReviewDoc])))]
pub async fn list_reviews(State(state): State<ServerState>) -> Result<Json<Vec<review::Model>>, ApiError> {
    Ok(Json(state.bookings.list_reviews().await?))
}
