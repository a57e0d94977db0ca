use tracing::{debug, info, warn};

use scan2share_types::session::{OAuthSession, OAuthUser};
use scan2share_types::{
    Company, EventItem, Gig, Job, NewCompany, NewEvent, NewGig, NewJob, NewShare,
    ProfileUpdate, ShareRecord, SignUp, StakingPosition, User,
};

use crate::clock::{Clock, SystemClock};
use crate::error::StoreError;
use crate::oauth::SyncOutcome;
use crate::persistence::Persistence;
use crate::state::AppState;

/// Host for the live snapshot.
///
/// Every method runs the matching [`AppState`] reducer with the current time,
/// swaps in the resulting snapshot when something changed and saves it.
/// Save failures are logged and never reach the caller.
pub struct Store<P, C = SystemClock> {
    state: AppState,
    persistence: P,
    clock: C,
}

impl<P: Persistence, C: Clock> Store<P, C> {
    /// Start from the persisted snapshot, or an empty one if there is none or
    /// it cannot be read.
    pub fn open(persistence: P, clock: C) -> Self {
        let state = match persistence.load() {
            Ok(Some(state)) => {
                info!(
                    events = state.events().len(),
                    users = state.users().count(),
                    "Loaded persisted snapshot"
                );
                state
            }
            Ok(None) => {
                info!("No persisted snapshot, starting empty");
                AppState::default()
            }
            Err(e) => {
                warn!("Failed to load snapshot, starting empty: {}", e);
                AppState::default()
            }
        };

        Self {
            state,
            persistence,
            clock,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    fn commit(&mut self, next: AppState, op: &'static str) {
        self.state = next;
        if let Err(e) = self.persistence.save(&self.state) {
            warn!(op, "Failed to persist snapshot: {}", e);
        }
    }

    /// Commit when the reducer found its target; log the miss otherwise.
    fn commit_found<T>(
        &mut self,
        (next, found): (AppState, Option<T>),
        op: &'static str,
        id: &str,
    ) -> Option<T> {
        match found {
            Some(value) => {
                self.commit(next, op);
                Some(value)
            }
            None => {
                debug!(op, id, "Target not found, nothing changed");
                None
            }
        }
    }

    // -- Wallet --

    pub fn set_address(&mut self, address: Option<String>) {
        let next = self.state.set_address(address);
        self.commit(next, "set_address");
    }

    // -- Events --

    pub fn create_event(&mut self, new: NewEvent) -> EventItem {
        let (next, event) = self.state.create_event(new);
        debug!(id = %event.id, short_code = %event.short_code, "Event created");
        self.commit(next, "create_event");
        event
    }

    pub fn add_qr_to_event(&mut self, event_id: &str, payload: String) -> Option<EventItem> {
        let reduced = self.state.add_qr_to_event(event_id, payload);
        self.commit_found(reduced, "add_qr_to_event", event_id)
    }

    pub fn delete_event(&mut self, event_id: &str) -> Option<EventItem> {
        let reduced = self.state.delete_event(event_id);
        self.commit_found(reduced, "delete_event", event_id)
    }

    pub fn delete_past_event(&mut self, event_id: &str) -> Option<EventItem> {
        let reduced = self.state.delete_past_event(event_id);
        self.commit_found(reduced, "delete_past_event", event_id)
    }

    pub fn purge_expired_events(&mut self) -> usize {
        let (next, moved) = self.state.purge_expired_events(self.clock.now_ms());
        if moved > 0 {
            info!("Purged {} expired events", moved);
            self.commit(next, "purge_expired_events");
        }
        moved
    }

    // -- Shares --

    pub fn record_share(&mut self, share: NewShare) -> ShareRecord {
        let (next, record) = self.state.record_share(share, self.clock.now_ms());
        debug!(id = %record.id, event_id = %record.event_id, "Share recorded");
        self.commit(next, "record_share");
        record
    }

    pub fn verify_share(
        &mut self,
        share_id: &str,
        reward: f64,
    ) -> Result<Option<ShareRecord>, StoreError> {
        let reduced = self.state.verify_share(share_id, reward)?;
        Ok(self.commit_found(reduced, "verify_share", share_id))
    }

    // -- Staking --

    pub fn stake(&mut self, amount: f64) -> Result<StakingPosition, StoreError> {
        let (next, position) = self.state.stake(amount, self.clock.now_ms())?;
        debug!(id = %position.id, amount, "Position opened");
        self.commit(next, "stake");
        Ok(position)
    }

    /// Close a position and return the payout credited to the balance.
    pub fn unstake(&mut self, position_id: &str) -> Result<Option<f64>, StoreError> {
        let reduced = self.state.unstake(position_id, self.clock.now_ms())?;
        Ok(self.commit_found(reduced, "unstake", position_id))
    }

    pub fn accrue_rewards(&self) -> f64 {
        self.state.accrue_rewards(self.clock.now_ms())
    }

    // -- Catalog --

    pub fn add_company(&mut self, company: NewCompany) -> Company {
        let (next, company) = self.state.add_company(company);
        self.commit(next, "add_company");
        company
    }

    pub fn add_job(&mut self, job: NewJob) -> Job {
        let (next, job) = self.state.add_job(job);
        self.commit(next, "add_job");
        job
    }

    pub fn add_gig(&mut self, gig: NewGig) -> Gig {
        let (next, gig) = self.state.add_gig(gig);
        self.commit(next, "add_gig");
        gig
    }

    // -- Accounts --

    pub fn sign_up(&mut self, data: SignUp) -> Result<User, StoreError> {
        let (next, user) = self.state.sign_up(data, self.clock.now_ms())?;
        info!(user_id = %user.id, "User registered");
        self.commit(next, "sign_up");
        Ok(user)
    }

    pub fn sign_in(&mut self, email: &str, password: &str) -> Option<User> {
        let (next, user) = self.state.sign_in(email, password);
        match user {
            Some(user) => {
                info!(user_id = %user.id, "User signed in");
                self.commit(next, "sign_in");
                Some(user)
            }
            None => {
                debug!("Sign-in rejected");
                None
            }
        }
    }

    pub fn sign_in_with_oauth(&mut self, identity: &OAuthUser) -> User {
        let (next, user) = self.state.sign_in_with_oauth(identity, self.clock.now_ms());
        self.commit(next, "sign_in_with_oauth");
        user
    }

    pub fn sync_oauth(&mut self, session: &OAuthSession) -> SyncOutcome {
        let (next, outcome) = self.state.sync_oauth(session, self.clock.now_ms());
        if outcome != SyncOutcome::Unchanged {
            info!(%outcome, "OAuth session synced");
            self.commit(next, "sync_oauth");
        }
        outcome
    }

    pub fn sign_out(&mut self) {
        let next = self.state.sign_out();
        self.commit(next, "sign_out");
    }

    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<Option<User>, StoreError> {
        let (next, user) = self.state.update_profile(update)?;
        if user.is_some() {
            self.commit(next, "update_profile");
        }
        Ok(user)
    }
}
