//! A contribution is one participant's share of one expense.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::Money;

/// `(participant, amount)` pair inside an expense.
///
/// The participant identity is an opaque, case-sensitive, non-empty string;
/// the engine never interprets it beyond equality checks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub participant: String,
    pub amount: Money,
}

impl Contribution {
    #[must_use]
    pub fn new(participant: impl Into<String>, amount: Money) -> Self {
        Self {
            participant: participant.into(),
            amount,
        }
    }

    /// Empty row used while a draft is being filled in.
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contributions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub expense_id: String,
    pub participant: String,
    pub amount: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::expenses::Entity",
        from = "Column::ExpenseId",
        to = "super::expenses::Column::Id"
    )]
    Expenses,
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Contribution {
    fn from(model: Model) -> Self {
        Self {
            participant: model.participant,
            amount: Money::new(model.amount),
        }
    }
}

/// Builds the row for a contribution of the given expense. The `id` stays
/// unset so sqlite assigns the next rowid, which preserves insertion order.
pub(crate) fn active_model(expense_id: &str, contribution: &Contribution) -> ActiveModel {
    ActiveModel {
        id: ActiveValue::NotSet,
        expense_id: ActiveValue::Set(expense_id.to_string()),
        participant: ActiveValue::Set(contribution.participant.clone()),
        amount: ActiveValue::Set(contribution.amount.value()),
    }
}
