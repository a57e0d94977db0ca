use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use scan2share_types::api::{OAuthSyncResponse, SignInRequest, UserView};
use scan2share_types::session::OAuthSession;
use scan2share_types::{ProfileUpdate, SignUp};

use crate::{ApiState, lock, store_error_status};

fn valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.contains('@')
}

pub async fn sign_up(
    State(state): State<ApiState>,
    Json(req): Json<SignUp>,
) -> Result<impl IntoResponse, StatusCode> {
    if !valid_email(&req.email) || req.password.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let user = lock(&state)?.sign_up(req).map_err(store_error_status)?;
    Ok((StatusCode::CREATED, Json(UserView::from(&user))))
}

pub async fn sign_in(
    State(state): State<ApiState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<UserView>, StatusCode> {
    let user = lock(&state)?
        .sign_in(&req.email, &req.password)
        .ok_or(StatusCode::UNAUTHORIZED)?;
    Ok(Json(UserView::from(&user)))
}

pub async fn sign_out(State(state): State<ApiState>) -> Result<StatusCode, StatusCode> {
    lock(&state)?.sign_out();
    Ok(StatusCode::NO_CONTENT)
}

/// Push the OAuth provider's current session into the store.
pub async fn sync_oauth(
    State(state): State<ApiState>,
    Json(session): Json<OAuthSession>,
) -> Result<Json<OAuthSyncResponse>, StatusCode> {
    let mut store = lock(&state)?;
    let outcome = store.sync_oauth(&session);
    Ok(Json(OAuthSyncResponse {
        outcome: outcome.to_string(),
        user: store.state().current_user().map(UserView::from),
    }))
}

pub async fn get_profile(State(state): State<ApiState>) -> Result<Json<UserView>, StatusCode> {
    let store = lock(&state)?;
    let user = store.state().current_user().ok_or(StatusCode::UNAUTHORIZED)?;
    Ok(Json(UserView::from(user)))
}

pub async fn update_profile(
    State(state): State<ApiState>,
    Json(req): Json<ProfileUpdate>,
) -> Result<Json<UserView>, StatusCode> {
    if req.email.as_deref().is_some_and(|e| !valid_email(e)) {
        return Err(StatusCode::BAD_REQUEST);
    }

    let user = lock(&state)?
        .update_profile(req)
        .map_err(store_error_status)?
        .ok_or(StatusCode::UNAUTHORIZED)?;
    Ok(Json(UserView::from(&user)))
}
