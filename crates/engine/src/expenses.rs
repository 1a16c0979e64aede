//! Expense primitives.
//!
//! An `Expense` is a single shared cost: a total amount paid by one person,
//! split into per-participant [`Contribution`]s that must sum back to the
//! total within [`SUM_EPSILON`].
//!
//! [`SUM_EPSILON`]: crate::money::SUM_EPSILON

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Contribution, EngineError, Money, ValidationError};

/// An expense is meaningless to split below this count.
pub const MIN_PARTICIPANTS: usize = 2;

/// A finalized, valid expense.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub title: String,
    pub amount: Money,
    pub paid_by: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub participants: Vec<Contribution>,
}

/// User-editable expense fields, as produced by a validated draft or an API
/// payload. This is the input to the create/update store ops.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpenseFields {
    pub title: String,
    pub amount: Money,
    pub paid_by: String,
    pub participants: Vec<Contribution>,
}

impl ExpenseFields {
    /// Checks every expense invariant, reporting the first violation with a
    /// specific kind.
    ///
    /// - `title`, `paid_by` and every participant name must be non-empty
    ///   (after trimming).
    /// - `amount` must be strictly positive.
    /// - no contribution amount may be negative (zero is allowed).
    /// - at least [`MIN_PARTICIPANTS`] participants.
    /// - contributions must sum to `amount` within
    ///   [`SUM_EPSILON`](crate::money::SUM_EPSILON).
    ///
    /// `paid_by` does not have to appear among the participants: the payer
    /// may or may not owe a share themselves.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if self.paid_by.trim().is_empty() {
            return Err(ValidationError::MissingField("paid by"));
        }
        if !self.amount.is_positive() {
            return Err(ValidationError::NonPositiveAmount);
        }
        if self.participants.len() < MIN_PARTICIPANTS {
            return Err(ValidationError::TooFewParticipants);
        }
        if self
            .participants
            .iter()
            .any(|c| c.participant.trim().is_empty())
        {
            return Err(ValidationError::MissingField("participant name"));
        }
        if self.participants.iter().any(|c| c.amount.is_negative()) {
            return Err(ValidationError::NegativeShare);
        }

        let sum: Money = self.participants.iter().map(|c| c.amount).sum();
        if !sum.approx_eq(self.amount) {
            return Err(ValidationError::SumMismatch {
                expected: self.amount.value(),
                actual: sum.value(),
            });
        }

        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub paid_by: String,
    pub created_at: DateTimeUtc,
    pub created_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::contributions::Entity")]
    Contributions,
}

impl Related<super::contributions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contributions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.to_string()),
            title: ActiveValue::Set(expense.title.clone()),
            amount: ActiveValue::Set(expense.amount.value()),
            paid_by: ActiveValue::Set(expense.paid_by.clone()),
            created_at: ActiveValue::Set(expense.created_at),
            created_by: ActiveValue::Set(expense.created_by.clone()),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    /// Lifts a row into the domain type. Contributions are loaded
    /// separately and start out empty here.
    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("expense not exists".to_string()))?,
            title: model.title,
            amount: Money::new(model.amount),
            paid_by: model.paid_by,
            created_at: model.created_at,
            created_by: model.created_by,
            participants: Vec::new(),
        })
    }
}
