//! Split calculator.
//!
//! [`ExpenseDraft`] is the editable state behind an expense form: a total
//! amount, a split policy and a participant list. Every mutation is an
//! explicit operation that keeps the contribution list consistent with the
//! policy, instead of a cascade of ad-hoc recomputes.
//!
//! Under [`SplitPolicy::Equal`] each share is always `total / count`, as a
//! plain floating division. No remainder redistribution and no internal
//! rounding: exact-to-the-cent equal splitting is not a goal, the sum
//! tolerance in validation absorbs the drift.

use crate::{
    Contribution, Money, ValidationError,
    expenses::{ExpenseFields, MIN_PARTICIPANTS},
};

/// How the total is divided among participants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SplitPolicy {
    /// Every share is recomputed to `total / count` whenever the total, the
    /// participant count or the policy changes.
    Equal,
    /// Each share is entered independently and never auto-recomputed.
    #[default]
    Custom,
}

/// Editable expense state, to be validated into [`ExpenseFields`].
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseDraft {
    pub title: String,
    pub paid_by: String,
    amount: Money,
    policy: SplitPolicy,
    participants: Vec<Contribution>,
}

impl ExpenseDraft {
    /// Creates a draft with `initial_count` blank contributions (clamped up
    /// to the participant minimum), zero total and the given policy.
    #[must_use]
    pub fn new(initial_count: usize, policy: SplitPolicy) -> Self {
        let count = initial_count.max(MIN_PARTICIPANTS);
        let mut draft = Self {
            title: String::new(),
            paid_by: String::new(),
            amount: Money::ZERO,
            policy,
            participants: vec![Contribution::blank(); count],
        };
        draft.recompute_equal_shares();
        draft
    }

    #[must_use]
    pub fn policy(&self) -> SplitPolicy {
        self.policy
    }

    #[must_use]
    pub fn amount(&self) -> Money {
        self.amount
    }

    #[must_use]
    pub fn participants(&self) -> &[Contribution] {
        &self.participants
    }

    /// Switches the split policy.
    ///
    /// Switching to `Equal` recomputes every share immediately; switching to
    /// `Custom` freezes the current amounts as the new editable baseline.
    pub fn set_policy(&mut self, policy: SplitPolicy) {
        self.policy = policy;
        self.recompute_equal_shares();
    }

    /// Sets the expense total. Shares are recomputed only under `Equal`;
    /// under `Custom` the caller re-enters amounts themselves.
    pub fn set_total_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.recompute_equal_shares();
    }

    /// Appends a blank participant. Under `Equal` all shares (old and new)
    /// are recomputed over the new count; under `Custom` the new share
    /// starts at zero and the rest are untouched.
    pub fn add_participant(&mut self) {
        self.participants.push(Contribution::blank());
        self.recompute_equal_shares();
    }

    /// Removes the participant at `index`.
    ///
    /// Fails, leaving the list unchanged, when the count would drop below
    /// the minimum or `index` is out of bounds. Under `Equal` the remaining
    /// shares are recomputed over the new count.
    pub fn remove_participant(&mut self, index: usize) -> Result<(), ValidationError> {
        if self.participants.len() <= MIN_PARTICIPANTS {
            return Err(ValidationError::TooFewParticipants);
        }
        if index >= self.participants.len() {
            return Err(ValidationError::MissingField("participant"));
        }
        self.participants.remove(index);
        self.recompute_equal_shares();
        Ok(())
    }

    /// Sets the name of the participant at `index`.
    pub fn set_participant_name(
        &mut self,
        index: usize,
        name: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let entry = self
            .participants
            .get_mut(index)
            .ok_or(ValidationError::MissingField("participant"))?;
        entry.participant = name.into();
        Ok(())
    }

    /// Sets the share of the participant at `index`.
    ///
    /// Rejected under `Equal`: shares are derived from the total there, not
    /// directly settable.
    pub fn set_participant_amount(
        &mut self,
        index: usize,
        amount: Money,
    ) -> Result<(), ValidationError> {
        if self.policy == SplitPolicy::Equal {
            return Err(ValidationError::AmountNotEditable);
        }
        let entry = self
            .participants
            .get_mut(index)
            .ok_or(ValidationError::MissingField("participant"))?;
        entry.amount = amount;
        Ok(())
    }

    /// Checks every expense invariant and, on success, returns the
    /// trimmed fields ready for the store.
    pub fn validate(&self) -> Result<ExpenseFields, ValidationError> {
        let fields = ExpenseFields {
            title: self.title.trim().to_string(),
            amount: self.amount,
            paid_by: self.paid_by.trim().to_string(),
            participants: self
                .participants
                .iter()
                .map(|c| Contribution::new(c.participant.trim(), c.amount))
                .collect(),
        };
        fields.validate()?;
        Ok(fields)
    }

    fn recompute_equal_shares(&mut self) {
        if self.policy != SplitPolicy::Equal {
            return;
        }
        let share = Money::new(self.amount.value() / self.participants.len() as f64);
        for contribution in &mut self.participants {
            contribution.amount = share;
        }
    }
}

impl Default for ExpenseDraft {
    fn default() -> Self {
        Self::new(MIN_PARTICIPANTS, SplitPolicy::default())
    }
}
