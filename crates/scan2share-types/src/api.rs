use serde::{Deserialize, Serialize};

use crate::models::{
    Company, EventItem, Gig, Job, ShareRecord, StakingPosition, User,
};

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// User as shown to clients: everything except the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub title: String,
    pub about: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    pub created_at: i64,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            title: user.title.clone(),
            about: user.about.clone(),
            location: user.location.clone(),
            website: user.website.clone(),
            skills: user.skills.clone(),
            experience: user.experience.clone(),
            avatar: user.avatar.clone(),
            provider: user.provider.clone(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OAuthSyncResponse {
    pub outcome: String,
    pub user: Option<UserView>,
}

// -- Wallet --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetAddressRequest {
    pub address: Option<String>,
}

// -- Events --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddQrRequest {
    pub payload: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PurgeResponse {
    pub moved: usize,
    pub active: usize,
    pub past: usize,
}

// -- Shares & staking --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifyShareRequest {
    pub reward: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StakeRequest {
    pub amount: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UnstakeResponse {
    pub payout: f64,
    pub balance: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RewardsResponse {
    pub pending: f64,
    pub balance: f64,
}

// -- Snapshot --

/// Read model of the whole store handed to the UI.
#[derive(Debug, Serialize, Deserialize)]
pub struct StateView {
    pub address: Option<String>,
    pub events: Vec<EventItem>,
    pub past_events: Vec<EventItem>,
    pub shares: Vec<ShareRecord>,
    pub balance: f64,
    pub staked: Vec<StakingPosition>,
    pub companies: Vec<Company>,
    pub jobs: Vec<Job>,
    pub gigs: Vec<Gig>,
    pub users: Vec<UserView>,
    pub current_user: Option<UserView>,
    pub is_authenticated: bool,
}
