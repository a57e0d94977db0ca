use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use scan2share_types::NewShare;
use scan2share_types::api::{RewardsResponse, StakeRequest, UnstakeResponse, VerifyShareRequest};

use crate::{ApiState, lock, store_error_status};

pub async fn record_share(
    State(state): State<ApiState>,
    Json(req): Json<NewShare>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.url.trim().is_empty() || req.event_id.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let share = lock(&state)?.record_share(req);
    Ok((StatusCode::CREATED, Json(share)))
}

pub async fn verify_share(
    State(state): State<ApiState>,
    Path(share_id): Path<String>,
    Json(req): Json<VerifyShareRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if !req.reward.is_finite() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let share = lock(&state)?
        .verify_share(&share_id, req.reward)
        .map_err(store_error_status)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(share))
}

pub async fn stake(
    State(state): State<ApiState>,
    Json(req): Json<StakeRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    // The balance itself may go negative; only the amount is checked.
    if !req.amount.is_finite() || req.amount <= 0.0 {
        return Err(StatusCode::BAD_REQUEST);
    }

    let position = lock(&state)?
        .stake(req.amount)
        .map_err(store_error_status)?;
    Ok((StatusCode::CREATED, Json(position)))
}

pub async fn unstake(
    State(state): State<ApiState>,
    Path(position_id): Path<String>,
) -> Result<Json<UnstakeResponse>, StatusCode> {
    let mut store = lock(&state)?;
    let payout = store
        .unstake(&position_id)
        .map_err(store_error_status)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(UnstakeResponse {
        payout,
        balance: store.state().balance(),
    }))
}

pub async fn accrue_rewards(
    State(state): State<ApiState>,
) -> Result<Json<RewardsResponse>, StatusCode> {
    let store = lock(&state)?;
    Ok(Json(RewardsResponse {
        pending: store.accrue_rewards(),
        balance: store.state().balance(),
    }))
}
