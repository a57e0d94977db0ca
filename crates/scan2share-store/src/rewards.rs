use scan2share_types::{DAILY_REWARD_RATE, NewShare, ShareRecord, StakingPosition};

use crate::error::StoreError;
use crate::state::{AppState, new_id};

/// The snapshot stores the balance as a JSON number, which has no infinity or NaN.
fn checked_balance(balance: f64) -> Result<f64, StoreError> {
    if balance.is_finite() {
        Ok(balance)
    } else {
        Err(StoreError::NonFiniteBalance(balance))
    }
}

impl AppState {
    // -- Shares --

    /// Record a share as unverified with no reward yet.
    pub fn record_share(&self, share: NewShare, now_ms: i64) -> (Self, ShareRecord) {
        let record = ShareRecord {
            id: new_id(),
            event_id: share.event_id,
            platform: share.platform,
            url: share.url,
            timestamp: now_ms,
            verified: false,
            reward: 0.0,
        };

        let mut next = self.clone();
        next.shares.insert(0, record.clone());
        (next, record)
    }

    /// Mark a share verified and credit `reward` to the balance.
    ///
    /// Every call credits again, including on an already verified share.
    pub fn verify_share(
        &self,
        share_id: &str,
        reward: f64,
    ) -> Result<(Self, Option<ShareRecord>), StoreError> {
        let Some(idx) = self.shares.iter().position(|s| s.id == share_id) else {
            return Ok((self.clone(), None));
        };
        let balance = checked_balance(self.balance + reward)?;

        let mut next = self.clone();
        let share = &mut next.shares[idx];
        share.verified = true;
        share.reward = reward;
        let verified = share.clone();
        next.balance = balance;
        Ok((next, Some(verified)))
    }

    // -- Staking --

    /// Open a position and debit its amount. The balance is allowed to go
    /// negative but never past what an f64 can hold.
    pub fn stake(&self, amount: f64, now_ms: i64) -> Result<(Self, StakingPosition), StoreError> {
        let balance = checked_balance(self.balance - amount)?;
        let position = StakingPosition {
            id: new_id(),
            amount,
            start_ms: now_ms,
            reward_per_day: DAILY_REWARD_RATE,
        };

        let mut next = self.clone();
        next.staked.insert(0, position.clone());
        next.balance = balance;
        Ok((next, position))
    }

    /// Close a position, paying principal plus prorated reward into the
    /// balance. Returns the payout.
    pub fn unstake(
        &self,
        position_id: &str,
        now_ms: i64,
    ) -> Result<(Self, Option<f64>), StoreError> {
        let Some(idx) = self.staked.iter().position(|p| p.id == position_id) else {
            return Ok((self.clone(), None));
        };

        let mut next = self.clone();
        let position = next.staked.remove(idx);
        let payout = position.amount + position.reward_at(now_ms);
        next.balance = checked_balance(self.balance + payout)?;
        Ok((next, Some(payout)))
    }

    /// Rewards accrued so far across all open positions. Nothing is applied.
    pub fn accrue_rewards(&self, now_ms: i64) -> f64 {
        self.staked.iter().map(|p| p.reward_at(now_ms)).sum()
    }
}
