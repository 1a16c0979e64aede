//! Derived views over the expense collection.
//!
//! Everything here is recomputed from a fresh snapshot on every call.
//! Recomputation is cheap and deterministic, and it keeps an entire class
//! of incremental-aggregation bugs out of the engine.

use crate::{BalanceSheet, Money, ResultEngine, ShareSummary, settlement};

use super::Engine;

impl Engine {
    /// Recomputes the pairwise balance sheet over `user_id`'s expenses.
    pub async fn balance_sheet(&self, user_id: &str) -> ResultEngine<BalanceSheet> {
        let expenses = self.list_expenses(user_id).await?;
        Ok(settlement::aggregate(&expenses))
    }

    /// Returns `(total spent, expense count)` over `user_id`'s expenses.
    pub async fn statistics(&self, user_id: &str) -> ResultEngine<(Money, usize)> {
        let expenses = self.list_expenses(user_id).await?;
        let total: Money = expenses.iter().map(|e| e.amount).sum();
        Ok((total, expenses.len()))
    }

    /// Builds the share payload for what `person` owes `owed_to` across
    /// `user_id`'s expenses.
    pub async fn share_summary(
        &self,
        person: &str,
        owed_to: &str,
        user_id: &str,
    ) -> ResultEngine<ShareSummary> {
        let expenses = self.list_expenses(user_id).await?;
        Ok(ShareSummary::build(&expenses, person, owed_to))
    }
}
