use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use scan2share_types::NewEvent;
use scan2share_types::api::{AddQrRequest, PurgeResponse, SetAddressRequest};

use crate::{ApiState, lock};

pub async fn set_address(
    State(state): State<ApiState>,
    Json(req): Json<SetAddressRequest>,
) -> Result<StatusCode, StatusCode> {
    let address = req.address.filter(|a| !a.trim().is_empty());
    lock(&state)?.set_address(address);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_event(
    State(state): State<ApiState>,
    Json(req): Json<NewEvent>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.title.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    if req.end_ms != 0 && req.end_ms < req.start_ms {
        return Err(StatusCode::BAD_REQUEST);
    }

    let event = lock(&state)?.create_event(req);
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn add_qr_to_event(
    State(state): State<ApiState>,
    Path(event_id): Path<String>,
    Json(req): Json<AddQrRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let event = lock(&state)?
        .add_qr_to_event(&event_id, req.payload)
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(event))
}

pub async fn delete_event(
    State(state): State<ApiState>,
    Path(event_id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    lock(&state)?
        .delete_event(&event_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_past_event(
    State(state): State<ApiState>,
    Path(event_id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    lock(&state)?
        .delete_past_event(&event_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn purge_expired_events(
    State(state): State<ApiState>,
) -> Result<Json<PurgeResponse>, StatusCode> {
    let mut store = lock(&state)?;
    let moved = store.purge_expired_events();
    Ok(Json(PurgeResponse {
        moved,
        active: store.state().events().len(),
        past: store.state().past_events().len(),
    }))
}
