use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use scan2share_types::api::{StateView, UserView};
use scan2share_types::{Company, EventItem, Gig, Job, ShareRecord, StakingPosition, User};

/// One immutable snapshot of everything the application knows.
///
/// Only the reducer methods produce new snapshots. Users are keyed by email so
/// uniqueness holds by construction; `current_user` is a key into that map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub(crate) address: Option<String>,
    #[serde(default)]
    pub(crate) events: Vec<EventItem>,
    #[serde(default)]
    pub(crate) past_events: Vec<EventItem>,
    #[serde(default)]
    pub(crate) shares: Vec<ShareRecord>,
    #[serde(default)]
    pub(crate) balance: f64,
    #[serde(default)]
    pub(crate) staked: Vec<StakingPosition>,
    #[serde(default)]
    pub(crate) companies: Vec<Company>,
    #[serde(default)]
    pub(crate) jobs: Vec<Job>,
    #[serde(default)]
    pub(crate) gigs: Vec<Gig>,
    #[serde(default)]
    pub(crate) users: BTreeMap<String, User>,
    #[serde(default)]
    pub(crate) current_user: Option<String>,
    #[serde(default)]
    pub(crate) is_authenticated: bool,
}

impl AppState {
    /// Connected wallet address, if any.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn set_address(&self, address: Option<String>) -> Self {
        Self {
            address,
            ..self.clone()
        }
    }

    pub fn events(&self) -> &[EventItem] {
        &self.events
    }

    pub fn past_events(&self) -> &[EventItem] {
        &self.past_events
    }

    pub fn shares(&self) -> &[ShareRecord] {
        &self.shares
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn staked(&self) -> &[StakingPosition] {
        &self.staked
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn gigs(&self) -> &[Gig] {
        &self.gigs
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn user(&self, email: &str) -> Option<&User> {
        self.users.get(email)
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<&User> {
        if !self.is_authenticated {
            return None;
        }
        self.current_user
            .as_deref()
            .and_then(|email| self.users.get(email))
    }

    /// Client-facing read model, with password hashes stripped.
    pub fn view(&self) -> StateView {
        StateView {
            address: self.address.clone(),
            events: self.events.clone(),
            past_events: self.past_events.clone(),
            shares: self.shares.clone(),
            balance: self.balance,
            staked: self.staked.clone(),
            companies: self.companies.clone(),
            jobs: self.jobs.clone(),
            gigs: self.gigs.clone(),
            users: self.users.values().map(UserView::from).collect(),
            current_user: self.current_user().map(UserView::from),
            is_authenticated: self.is_authenticated,
        }
    }
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
