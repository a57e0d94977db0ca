use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use scan2share_types::{NewCompany, NewGig, NewJob};

use crate::{ApiState, lock};

/// Listings added through the forms are stamped with this instead of a date.
const JUST_POSTED: &str = "Just now";

fn missing(fields: &[&str]) -> bool {
    fields.iter().any(|f| f.trim().is_empty())
}

pub async fn add_company(
    State(state): State<ApiState>,
    Json(req): Json<NewCompany>,
) -> Result<impl IntoResponse, StatusCode> {
    if missing(&[req.name.as_str(), req.industry.as_str(), req.location.as_str()]) {
        return Err(StatusCode::BAD_REQUEST);
    }

    let company = lock(&state)?.add_company(req);
    Ok((StatusCode::CREATED, Json(company)))
}

pub async fn add_job(
    State(state): State<ApiState>,
    Json(mut req): Json<NewJob>,
) -> Result<impl IntoResponse, StatusCode> {
    if missing(&[req.title.as_str(), req.company.as_str(), req.location.as_str()]) {
        return Err(StatusCode::BAD_REQUEST);
    }
    if req.posted.is_empty() {
        req.posted = JUST_POSTED.into();
    }

    let job = lock(&state)?.add_job(req);
    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn add_gig(
    State(state): State<ApiState>,
    Json(mut req): Json<NewGig>,
) -> Result<impl IntoResponse, StatusCode> {
    if missing(&[req.title.as_str(), req.client.as_str(), req.budget.as_str()]) {
        return Err(StatusCode::BAD_REQUEST);
    }
    if req.posted.is_empty() {
        req.posted = JUST_POSTED.into();
    }

    let gig = lock(&state)?.add_gig(req);
    Ok((StatusCode::CREATED, Json(gig)))
}
