//! Share links.
//!
//! A share link carries a self-contained settlement summary for one
//! `(person, owed_to)` pair: the total owed plus a per-expense breakdown.
//! The payload is JSON with camelCase field names, base64url-encoded so it
//! survives a URL query parameter, and is decodable without authentication.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::{EngineError, Expense, Money, ResultEngine};

/// One expense's slice of a share summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareExpense {
    pub title: String,
    /// Full expense total, not just this person's share.
    pub total_amount: Money,
    /// This person's share.
    pub amount: Money,
    pub paid_by: String,
}

/// Everything the share page needs to render, with no store access.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareSummary {
    pub person: String,
    pub owed_to: String,
    pub total_owed: Money,
    pub expenses: Vec<ShareExpense>,
}

impl ShareSummary {
    /// Collects, from the given expenses, every share `person` owes
    /// `owed_to` (expenses paid by `owed_to` where `person` participates
    /// and is not the payer).
    #[must_use]
    pub fn build(expenses: &[Expense], person: &str, owed_to: &str) -> Self {
        let mut breakdown = Vec::new();
        let mut total_owed = Money::ZERO;

        for expense in expenses {
            if expense.paid_by != owed_to || person == owed_to {
                continue;
            }
            let Some(contribution) = expense
                .participants
                .iter()
                .find(|c| c.participant == person)
            else {
                continue;
            };

            total_owed += contribution.amount;
            breakdown.push(ShareExpense {
                title: expense.title.clone(),
                total_amount: expense.amount,
                amount: contribution.amount,
                paid_by: expense.paid_by.clone(),
            });
        }

        Self {
            person: person.to_string(),
            owed_to: owed_to.to_string(),
            total_owed,
            expenses: breakdown,
        }
    }

    /// Encodes the summary as base64url(JSON), ready to be put in a URL.
    pub fn encode(&self) -> ResultEngine<String> {
        let json = serde_json::to_vec(self)
            .map_err(|err| EngineError::InvalidShareData(err.to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// Decodes a payload produced by [`ShareSummary::encode`].
    pub fn decode(data: &str) -> ResultEngine<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(data)
            .map_err(|err| EngineError::InvalidShareData(err.to_string()))?;
        serde_json::from_slice(&bytes)
            .map_err(|err| EngineError::InvalidShareData(err.to_string()))
    }
}
