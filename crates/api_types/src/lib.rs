use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod expense {
    use super::*;

    /// One participant's share of an expense.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ContributionEntry {
        pub participant: String,
        pub amount: f64,
    }

    /// Request body for creating or replacing an expense.
    ///
    /// The participants carry their final amounts: equal-vs-custom
    /// splitting is a client-side editing concern, the server only checks
    /// the invariants (sum matches total, at least two participants, no
    /// empty names).
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub title: String,
        pub amount: f64,
        pub paid_by: String,
        pub participants: Vec<ContributionEntry>,
        /// RFC3339 timestamp, including timezone offset (local user time).
        /// Defaults to now when absent.
        pub created_at: Option<DateTime<FixedOffset>>,
    }

    /// Request body for replacing an expense's editable fields.
    ///
    /// Deliberately has no `created_at`: the creation timestamp is fixed
    /// at creation and an update never moves the expense in the timeline.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub title: String,
        pub amount: f64,
        pub paid_by: String,
        pub participants: Vec<ContributionEntry>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseCreated {
        pub id: Uuid,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub title: String,
        pub amount: f64,
        pub paid_by: String,
        /// RFC3339 timestamp, including timezone offset.
        pub created_at: DateTime<FixedOffset>,
        pub participants: Vec<ContributionEntry>,
    }

    /// Expenses, newest first.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseListResponse {
        pub expenses: Vec<ExpenseView>,
    }
}

pub mod settlement {
    use super::*;

    /// One gross directional debt: `debtor` owes `creditor` `amount`.
    ///
    /// Reciprocal debts are reported as two independent entries; the server
    /// never nets them.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct DebtView {
        pub debtor: String,
        pub creditor: String,
        pub amount: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceSheetResponse {
        /// Everyone seen across the expenses, in first-appearance order.
        pub people: Vec<String>,
        pub debts: Vec<DebtView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Statistic {
        pub total_amount: f64,
        pub expense_count: usize,
    }
}

pub mod share {
    use super::*;

    /// Request body for building a share link payload.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShareNew {
        pub person: String,
        pub owed_to: String,
    }

    /// Opaque base64url payload to append to the share URL as `?data=`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShareLink {
        pub data: String,
    }

    /// Decoded share page content. Field names match the original share
    /// link wire format.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ShareSummaryView {
        pub person: String,
        pub owed_to: String,
        pub total_owed: f64,
        pub expenses: Vec<ShareExpenseView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ShareExpenseView {
        pub title: String,
        pub total_amount: f64,
        pub amount: f64,
        pub paid_by: String,
    }
}
