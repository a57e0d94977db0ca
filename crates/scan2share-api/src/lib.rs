pub mod auth;
pub mod catalog;
pub mod events;
pub mod rewards;

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
};

use scan2share_store::{Clock, Persistence, Store, StoreError};
use scan2share_types::api::StateView;

/// Store as hosted by the HTTP layer: adapters are chosen at startup.
pub type AppStore = Store<Arc<dyn Persistence>, Arc<dyn Clock>>;

/// One store per process, shared by every request.
pub type ApiState = Arc<Mutex<AppStore>>;

pub fn shared(store: AppStore) -> ApiState {
    Arc::new(Mutex::new(store))
}

/// Handlers never hold the guard across an await point.
pub(crate) fn lock(state: &ApiState) -> Result<MutexGuard<'_, AppStore>, StatusCode> {
    state.lock().map_err(|_| {
        tracing::error!("Store lock poisoned");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

pub(crate) fn store_error_status(err: StoreError) -> StatusCode {
    match err {
        StoreError::EmailTaken(_) => StatusCode::CONFLICT,
        StoreError::NonFiniteBalance(balance) => {
            tracing::warn!(balance, "Rejected balance overflow");
            StatusCode::UNPROCESSABLE_ENTITY
        }
        StoreError::PasswordHash(e) => {
            tracing::error!("Password hashing failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/state", get(get_state))
        .route("/address", put(events::set_address))
        .route("/events", post(events::create_event))
        .route("/events/purge", post(events::purge_expired_events))
        .route("/events/{event_id}", delete(events::delete_event))
        .route("/events/{event_id}/qr", put(events::add_qr_to_event))
        .route("/past-events/{event_id}", delete(events::delete_past_event))
        .route("/shares", post(rewards::record_share))
        .route("/shares/{share_id}/verify", post(rewards::verify_share))
        .route("/staking", post(rewards::stake))
        .route("/staking/rewards", get(rewards::accrue_rewards))
        .route("/staking/{position_id}", delete(rewards::unstake))
        .route("/companies", post(catalog::add_company))
        .route("/jobs", post(catalog::add_job))
        .route("/gigs", post(catalog::add_gig))
        .route("/auth/signup", post(auth::sign_up))
        .route("/auth/signin", post(auth::sign_in))
        .route("/auth/signout", post(auth::sign_out))
        .route("/auth/oauth", post(auth::sync_oauth))
        .route("/profile", get(auth::get_profile).patch(auth::update_profile))
        .with_state(state)
}

async fn get_state(State(state): State<ApiState>) -> Result<Json<StateView>, StatusCode> {
    let store = lock(&state)?;
    Ok(Json(store.state().view()))
}
