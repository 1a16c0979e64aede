//! Settlement aggregator.
//!
//! Folds a collection of valid expenses into a [`BalanceSheet`] of pairwise
//! debt: `balances[debtor][creditor]` is the total the debtor owes the
//! creditor across all expenses.
//!
//! The sheet is *gross and directional*: if Alice pays for Bob in one
//! expense and Bob pays for Alice in another, both entries exist
//! independently. Netting the two directions into one signed balance is a
//! presentation concern and is deliberately not done here.
//!
//! The fold is order independent: addition commutes and the accumulation
//! key is fully determined by `(participant, paid_by)`, so any permutation
//! of the input produces the same amounts. People and creditors are listed
//! in first-appearance order, which is the order the input collection
//! presents them in.

use std::collections::HashMap;

use crate::{Expense, Money};

/// Aggregated pairwise debt over a set of expenses.
///
/// Built fresh on each [`aggregate`] call; it carries no lifecycle of its
/// own and is recomputed whenever the expense collection changes.
#[derive(Clone, Debug, Default)]
pub struct BalanceSheet {
    people: Vec<String>,
    balances: HashMap<String, Vec<(String, Money)>>,
}

impl BalanceSheet {
    /// Everyone appearing in the input, payers and participants alike, in
    /// first-appearance order.
    #[must_use]
    pub fn people(&self) -> &[String] {
        &self.people
    }

    /// What `debtor` owes, per creditor, in creditor first-appearance
    /// order. Empty when the debtor owes nothing.
    #[must_use]
    pub fn debts(&self, debtor: &str) -> &[(String, Money)] {
        self.balances.get(debtor).map_or(&[], Vec::as_slice)
    }

    /// Total `debtor` owes `creditor`, zero when no such entry exists.
    #[must_use]
    pub fn owed(&self, debtor: &str, creditor: &str) -> Money {
        self.debts(debtor)
            .iter()
            .find(|(name, _)| name == creditor)
            .map_or(Money::ZERO, |(_, amount)| *amount)
    }

    /// All `(debtor, creditor, amount)` entries in stable order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, Money)> {
        self.people.iter().flat_map(move |debtor| {
            self.debts(debtor)
                .iter()
                .map(move |(creditor, amount)| (debtor.as_str(), creditor.as_str(), *amount))
        })
    }

    /// Returns `true` if nobody owes anybody.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.values().all(Vec::is_empty)
    }

    fn note_person(&mut self, name: &str) {
        if !self.people.iter().any(|p| p == name) {
            self.people.push(name.to_string());
        }
    }

    fn add_debt(&mut self, debtor: &str, creditor: &str, amount: Money) {
        let debts = self.balances.entry(debtor.to_string()).or_default();
        match debts.iter_mut().find(|(name, _)| name == creditor) {
            Some((_, total)) => *total += amount,
            None => debts.push((creditor.to_string(), amount)),
        }
    }
}

/// Computes the balance sheet for the given expenses.
///
/// A participant who is also the payer of an expense contributes nothing to
/// the sheet for that expense: nobody owes themselves.
#[must_use]
pub fn aggregate(expenses: &[Expense]) -> BalanceSheet {
    let mut sheet = BalanceSheet::default();

    for expense in expenses {
        sheet.note_person(&expense.paid_by);
        for contribution in &expense.participants {
            sheet.note_person(&contribution.participant);
            if contribution.participant == expense.paid_by {
                continue;
            }
            sheet.add_debt(&contribution.participant, &expense.paid_by, contribution.amount);
        }
    }

    sheet
}

/// Union of every payer and participant across the expenses, in
/// first-appearance order.
#[must_use]
pub fn list_people(expenses: &[Expense]) -> Vec<String> {
    let mut people: Vec<String> = Vec::new();
    for expense in expenses {
        for name in std::iter::once(expense.paid_by.as_str())
            .chain(expense.participants.iter().map(|c| c.participant.as_str()))
        {
            if !people.iter().any(|p| p == name) {
                people.push(name.to_string());
            }
        }
    }
    people
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::Contribution;

    fn expense(title: &str, amount: f64, paid_by: &str, shares: &[(&str, f64)]) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            title: title.to_string(),
            amount: Money::new(amount),
            paid_by: paid_by.to_string(),
            created_at: Utc::now(),
            created_by: "alice".to_string(),
            participants: shares
                .iter()
                .map(|(name, share)| Contribution::new(*name, Money::new(*share)))
                .collect(),
        }
    }

    #[test]
    fn payer_is_excluded_from_their_own_expense() {
        let expenses = [expense(
            "Dinner",
            90.0,
            "Alice",
            &[("Alice", 30.0), ("Bob", 30.0), ("Carol", 30.0)],
        )];
        let sheet = aggregate(&expenses);

        assert_eq!(sheet.owed("Bob", "Alice"), Money::new(30.0));
        assert_eq!(sheet.owed("Carol", "Alice"), Money::new(30.0));
        assert!(sheet.debts("Alice").is_empty());
    }

    #[test]
    fn debts_accumulate_across_expenses() {
        let expenses = [
            expense("Dinner", 40.0, "Alice", &[("Alice", 20.0), ("Bob", 20.0)]),
            expense("Lunch", 10.0, "Alice", &[("Alice", 5.0), ("Bob", 5.0)]),
        ];
        let sheet = aggregate(&expenses);

        assert_eq!(sheet.owed("Bob", "Alice"), Money::new(25.0));
    }

    #[test]
    fn reciprocal_debts_are_not_netted() {
        let expenses = [
            expense("Dinner", 40.0, "Alice", &[("Alice", 20.0), ("Bob", 20.0)]),
            expense("Drinks", 30.0, "Bob", &[("Bob", 15.0), ("Alice", 15.0)]),
        ];
        let sheet = aggregate(&expenses);

        assert_eq!(sheet.owed("Bob", "Alice"), Money::new(20.0));
        assert_eq!(sheet.owed("Alice", "Bob"), Money::new(15.0));
    }

    #[test]
    fn aggregation_is_order_independent() {
        let a = expense("Dinner", 40.0, "Alice", &[("Alice", 20.0), ("Bob", 20.0)]);
        let b = expense("Drinks", 30.0, "Bob", &[("Bob", 15.0), ("Alice", 15.0)]);
        let c = expense("Taxi", 20.0, "Carol", &[("Alice", 10.0), ("Bob", 10.0)]);

        let forward = aggregate(&[a.clone(), b.clone(), c.clone()]);
        let reversed = aggregate(&[c, b, a]);

        for debtor in ["Alice", "Bob", "Carol"] {
            for creditor in ["Alice", "Bob", "Carol"] {
                assert_eq!(
                    forward.owed(debtor, creditor),
                    reversed.owed(debtor, creditor),
                    "{debtor} -> {creditor}"
                );
            }
        }
    }

    #[test]
    fn people_are_listed_in_first_appearance_order() {
        let expenses = [
            expense("Dinner", 40.0, "Carol", &[("Alice", 20.0), ("Bob", 20.0)]),
            expense("Lunch", 10.0, "Dave", &[("Carol", 5.0), ("Alice", 5.0)]),
        ];

        assert_eq!(list_people(&expenses), ["Carol", "Alice", "Bob", "Dave"]);
        assert_eq!(aggregate(&expenses).people(), ["Carol", "Alice", "Bob", "Dave"]);
    }

    #[test]
    fn payer_outside_participants_still_collects() {
        let expenses = [expense(
            "Gift",
            30.0,
            "Dave",
            &[("Alice", 15.0), ("Bob", 15.0)],
        )];
        let sheet = aggregate(&expenses);

        assert_eq!(sheet.owed("Alice", "Dave"), Money::new(15.0));
        assert_eq!(sheet.owed("Bob", "Dave"), Money::new(15.0));
        assert!(sheet.debts("Dave").is_empty());
    }

    #[test]
    fn empty_collection_yields_empty_sheet() {
        let sheet = aggregate(&[]);
        assert!(sheet.is_empty());
        assert!(sheet.people().is_empty());
    }

    #[test]
    fn iter_walks_entries_in_stable_order() {
        let expenses = [
            expense("Dinner", 40.0, "Alice", &[("Alice", 20.0), ("Bob", 20.0)]),
            expense("Drinks", 30.0, "Bob", &[("Bob", 15.0), ("Alice", 15.0)]),
        ];
        let sheet = aggregate(&expenses);

        let entries: Vec<(String, String, Money)> = sheet
            .iter()
            .map(|(d, c, m)| (d.to_string(), c.to_string(), m))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("Alice".to_string(), "Bob".to_string(), Money::new(15.0)),
                ("Bob".to_string(), "Alice".to_string(), Money::new(20.0)),
            ]
        );
    }
}
