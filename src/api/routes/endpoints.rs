//! Target management endpoints

use axum::{Json, extract::State};

use crate::api::{
    error::ApiResult,
    state::ApiState,
    types::{EndpointRequest, MessageResponse},
};

/// POST /add-endpoint
///
/// Register a URL and start monitoring it
pub async fn add_endpoint(
    State(state): State<ApiState>,
    Json(request): Json<EndpointRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state.registry.write().await.add(&request.url).await?;

    Ok(Json(MessageResponse::new("Endpoint added successfully!")))
}

/// POST /remove-endpoint
///
/// Unregister a URL and stop monitoring it
pub async fn remove_endpoint(
    State(state): State<ApiState>,
    Json(request): Json<EndpointRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state.registry.write().await.remove(&request.url).await?;

    Ok(Json(MessageResponse::new("Endpoint removed successfully!")))
}
