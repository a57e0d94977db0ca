//! Drives the router end to end against an in-memory store with a manual clock.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use scan2share_api::{AppStore, router, shared};
use scan2share_store::{Clock, FixedClock, MemoryPersistence, Persistence, Store};

const DAY_MS: i64 = 86_400_000;

fn app() -> (Router, Arc<FixedClock>, Arc<MemoryPersistence>) {
    let clock = Arc::new(FixedClock::new(1_000_000));
    let disk = Arc::new(MemoryPersistence::new());
    let store: AppStore = Store::open(
        disk.clone() as Arc<dyn Persistence>,
        clock.clone() as Arc<dyn Clock>,
    );
    (router(shared(store)), clock, disk)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.map(|b| b.to_string()).unwrap_or_default()))
        .unwrap();

    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn signup_body(email: &str) -> Value {
    json!({
        "email": email,
        "password": "correct horse",
        "full_name": "Ada Lovelace",
        "title": "Engineer",
        "skills": "math, poetry",
    })
}

async fn signup(app: &Router, email: &str) -> (StatusCode, Value) {
    call(app, "POST", "/auth/signup", Some(signup_body(email))).await
}

#[tokio::test]
async fn event_lifecycle() {
    let (app, clock, _) = app();

    let (status, event) = call(
        &app,
        "POST",
        "/events",
        Some(json!({
            "title": "RustConf",
            "hashtags": "rust, conf",
            "start_ms": 0,
            "end_ms": 1_000_000 + 60_000,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(event["short_code"].as_str().unwrap().len(), 6);
    assert_eq!(event["hashtags"], json!(["rust", "conf"]));
    let id = event["id"].as_str().unwrap().to_string();

    let (status, updated) = call(
        &app,
        "PUT",
        &format!("/events/{id}/qr"),
        Some(json!({ "payload": "https://scan2share.app/e/abc" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["qr_payload"], "https://scan2share.app/e/abc");

    let (_, purge) = call(&app, "POST", "/events/purge", None).await;
    assert_eq!(purge["moved"], 0);

    clock.advance(120_000);
    let (_, purge) = call(&app, "POST", "/events/purge", None).await;
    assert_eq!(purge, json!({ "moved": 1, "active": 0, "past": 1 }));

    let (status, _) = call(&app, "DELETE", &format!("/events/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, "DELETE", &format!("/past-events/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn create_event_requires_title() {
    let (app, _, _) = app();
    let (status, _) = call(
        &app,
        "POST",
        "/events",
        Some(json!({ "title": "  ", "start_ms": 0, "end_ms": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_event_rejects_end_before_start() {
    let (app, _, disk) = app();
    let (status, _) = call(
        &app,
        "POST",
        "/events",
        Some(json!({ "title": "Backwards", "start_ms": 5_000, "end_ms": 4_000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(disk.raw().is_none());
}

#[tokio::test]
async fn event_ending_now_stays_active() {
    let (app, clock, _) = app();
    let (status, _) = call(
        &app,
        "POST",
        "/events",
        Some(json!({ "title": "Closing", "start_ms": 0, "end_ms": clock.now_ms() })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, purge) = call(&app, "POST", "/events/purge", None).await;
    assert_eq!(purge, json!({ "moved": 0, "active": 1, "past": 0 }));

    clock.advance(1);
    let (_, purge) = call(&app, "POST", "/events/purge", None).await;
    assert_eq!(purge, json!({ "moved": 1, "active": 0, "past": 1 }));
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let (app, _, disk) = app();
    let (status, _) = call(&app, "PUT", "/events/nope/qr", Some(json!({ "payload": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(
        &app,
        "POST",
        "/shares/nope/verify",
        Some(json!({ "reward": 5.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, "DELETE", "/staking/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(disk.raw().is_none());
}

#[tokio::test]
async fn shares_and_staking_move_the_balance() {
    let (app, clock, _) = app();

    let (status, share) = call(
        &app,
        "POST",
        "/shares",
        Some(json!({
            "event_id": "evt-1",
            "platform": "twitter",
            "url": "https://x.com/ada/status/1",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(share["verified"], false);
    let share_id = share["id"].as_str().unwrap().to_string();

    for _ in 0..2 {
        let (status, _) = call(
            &app,
            "POST",
            &format!("/shares/{share_id}/verify"),
            Some(json!({ "reward": 50.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, position) = call(&app, "POST", "/staking", Some(json!({ "amount": 100.0 }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let position_id = position["id"].as_str().unwrap().to_string();

    clock.advance(DAY_MS);
    let (_, rewards) = call(&app, "GET", "/staking/rewards", None).await;
    assert!((rewards["pending"].as_f64().unwrap() - 2.0).abs() < 1e-9);
    assert_eq!(rewards["balance"], 0.0);

    let (status, unstaked) = call(&app, "DELETE", &format!("/staking/{position_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!((unstaked["payout"].as_f64().unwrap() - 102.0).abs() < 1e-9);
    assert!((unstaked["balance"].as_f64().unwrap() - 102.0).abs() < 1e-9);
}

#[tokio::test]
async fn stake_rejects_non_positive_amounts() {
    let (app, _, _) = app();
    let (status, _) = call(&app, "POST", "/staking", Some(json!({ "amount": 0.0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn balance_overflow_is_rejected_and_state_survives() {
    let (app, clock, disk) = app();
    let (status, _) = call(
        &app,
        "POST",
        "/events",
        Some(json!({ "title": "Keep me", "start_ms": 0, "end_ms": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let huge = json!({ "amount": 1e308 });
    let (status, _) = call(&app, "POST", "/staking", Some(huge.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = call(&app, "POST", "/staking", Some(huge)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, state) = call(&app, "GET", "/state", None).await;
    assert_eq!(state["balance"], -1e308);
    assert_eq!(state["staked"].as_array().unwrap().len(), 1);

    let reopened: AppStore = Store::open(
        disk as Arc<dyn Persistence>,
        clock as Arc<dyn Clock>,
    );
    assert_eq!(reopened.state().events()[0].title, "Keep me");
    assert_eq!(reopened.state().balance(), -1e308);
}

#[tokio::test]
async fn catalog_forms_require_fields() {
    let (app, _, _) = app();

    let (status, _) = call(
        &app,
        "POST",
        "/jobs",
        Some(json!({
            "title": "Engineer",
            "company": "",
            "location": "Remote",
            "job_type": "Full-time",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, job) = call(
        &app,
        "POST",
        "/jobs",
        Some(json!({
            "title": "Engineer",
            "company": "Acme",
            "location": "Remote",
            "job_type": "Full-time",
            "skills": "rust, tokio",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(job["posted"], "Just now");
    assert_eq!(job["skills"], json!(["rust", "tokio"]));

    let (status, _) = call(
        &app,
        "POST",
        "/gigs",
        Some(json!({
            "title": "Logo",
            "client": "Initech",
            "budget": "$200",
            "level": "Expert",
            "pricing": "Hourly",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = call(
        &app,
        "POST",
        "/companies",
        Some(json!({ "name": "Acme", "industry": "Anvils", "location": "Desert" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, state) = call(&app, "GET", "/state", None).await;
    assert_eq!(state["jobs"].as_array().unwrap().len(), 1);
    assert_eq!(state["gigs"].as_array().unwrap().len(), 1);
    assert_eq!(state["companies"][0]["name"], "Acme");
}

#[tokio::test]
async fn account_flow() {
    let (app, _, _) = app();

    let (status, user) = signup(&app, "ada@example.com").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["skills"], json!(["math", "poetry"]));
    assert!(user.get("password_hash").is_none());

    let (status, _) = signup(&app, "ada@example.com").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call(&app, "POST", "/auth/signout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&app, "GET", "/profile", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = call(&app, "PATCH", "/profile", Some(json!({ "title": "Lead" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(
        &app,
        "POST",
        "/auth/signin",
        Some(json!({ "email": "ada@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(
        &app,
        "POST",
        "/auth/signin",
        Some(json!({ "email": "ada@example.com", "password": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, profile) = call(&app, "PATCH", "/profile", Some(json!({ "title": "Lead" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["title"], "Lead");
    assert_eq!(profile["full_name"], "Ada Lovelace");

    let (_, state) = call(&app, "GET", "/state", None).await;
    assert_eq!(state["is_authenticated"], true);
    assert_eq!(state["current_user"]["title"], "Lead");
    assert!(state["users"][0].get("password_hash").is_none());
}

#[tokio::test]
async fn sign_up_validates_credentials() {
    let (app, _, _) = app();

    let mut body = signup_body("not-an-email");
    let (status, _) = call(&app, "POST", "/auth/signup", Some(body.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    body["email"] = json!("ada@example.com");
    body["password"] = json!("");
    let (status, _) = call(&app, "POST", "/auth/signup", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, state) = call(&app, "GET", "/state", None).await;
    assert_eq!(state["users"], json!([]));
}

#[tokio::test]
async fn profile_email_change_conflicts_with_other_account() {
    let (app, _, _) = app();
    let (status, _) = signup(&app, "ada@example.com").await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = signup(&app, "grace@example.com").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = call(
        &app,
        "PATCH",
        "/profile",
        Some(json!({ "email": "ada@example.com", "title": "Admiral" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, profile) = call(&app, "GET", "/profile", None).await;
    assert_eq!(profile["email"], "grace@example.com");
    assert_eq!(profile["title"], "Engineer");

    let (status, _) = call(&app, "PATCH", "/profile", Some(json!({ "email": "nope" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oauth_sync_creates_then_signs_out() {
    let (app, _, _) = app();
    let session = json!({
        "status": "authenticated",
        "user": { "email": "grace@example.com", "name": "Grace Hopper", "image": null },
    });

    let (status, synced) = call(&app, "POST", "/auth/oauth", Some(session.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(synced["outcome"], "created");
    assert_eq!(synced["user"]["provider"], "google");

    let signed_out = json!({ "status": "unauthenticated" });
    let (_, synced) = call(&app, "POST", "/auth/oauth", Some(signed_out)).await;
    assert_eq!(synced["outcome"], "signed_out");
    assert_eq!(synced["user"], Value::Null);

    let (_, synced) = call(&app, "POST", "/auth/oauth", Some(session)).await;
    assert_eq!(synced["outcome"], "activated");

    let loading = json!({ "status": "loading" });
    let (status, synced) = call(&app, "POST", "/auth/oauth", Some(loading)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(synced["outcome"], "unchanged");
    assert_eq!(synced["user"]["email"], "grace@example.com");
}

#[tokio::test]
async fn mutations_reach_persistence() {
    let (app, _, disk) = app();
    let (status, _) = call(&app, "PUT", "/address", Some(json!({ "address": "0xfeed" }))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(disk.raw().unwrap().contains("0xfeed"));
}
