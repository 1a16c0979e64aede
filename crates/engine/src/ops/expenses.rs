//! Expense store operations.
//!
//! All writes run inside a single database transaction. In particular,
//! updating an expense replaces its contributions atomically (row update,
//! delete, re-insert in one transaction), so a failure mid-way can never
//! leave an expense with no contributions behind.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    Contribution, EngineError, Expense, ExpenseFields, ResultEngine, contributions, expenses,
};

use super::{Engine, with_tx};

impl Engine {
    /// Validates the fields and persists a new expense with its
    /// contributions, owned by `user_id`.
    pub async fn create_expense(
        &self,
        fields: ExpenseFields,
        user_id: &str,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Uuid> {
        fields.validate()?;

        let expense = Expense {
            id: Uuid::new_v4(),
            title: fields.title,
            amount: fields.amount,
            paid_by: fields.paid_by,
            created_at,
            created_by: user_id.to_string(),
            participants: fields.participants,
        };
        let expense_id = expense.id.to_string();

        with_tx!(self, |db_tx| {
            expenses::ActiveModel::from(&expense).insert(&db_tx).await?;
            for contribution in &expense.participants {
                contributions::active_model(&expense_id, contribution)
                    .insert(&db_tx)
                    .await?;
            }
            Ok::<(), EngineError>(())
        })?;

        Ok(expense.id)
    }

    /// Updates an expense's fields and replaces its contributions, all in
    /// one transaction.
    pub async fn update_expense(
        &self,
        id: Uuid,
        fields: ExpenseFields,
        user_id: &str,
    ) -> ResultEngine<()> {
        fields.validate()?;

        with_tx!(self, |db_tx| {
            let model = require_expense(&db_tx, id, user_id).await?;

            let expense_row = expenses::ActiveModel {
                id: ActiveValue::Set(model.id.clone()),
                title: ActiveValue::Set(fields.title.clone()),
                amount: ActiveValue::Set(fields.amount.value()),
                paid_by: ActiveValue::Set(fields.paid_by.clone()),
                ..Default::default()
            };
            expense_row.update(&db_tx).await?;

            contributions::Entity::delete_many()
                .filter(contributions::Column::ExpenseId.eq(model.id.clone()))
                .exec(&db_tx)
                .await?;
            for contribution in &fields.participants {
                contributions::active_model(&model.id, contribution)
                    .insert(&db_tx)
                    .await?;
            }

            Ok::<(), EngineError>(())
        })
    }

    /// Deletes an expense and its contributions.
    pub async fn delete_expense(&self, id: Uuid, user_id: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = require_expense(&db_tx, id, user_id).await?;

            contributions::Entity::delete_many()
                .filter(contributions::Column::ExpenseId.eq(model.id.clone()))
                .exec(&db_tx)
                .await?;
            expenses::Entity::delete_by_id(model.id).exec(&db_tx).await?;

            Ok::<(), EngineError>(())
        })
    }

    /// Lists `user_id`'s expenses, newest first, each with its
    /// contributions in insertion order.
    pub async fn list_expenses(&self, user_id: &str) -> ResultEngine<Vec<Expense>> {
        let rows: Vec<(expenses::Model, Vec<contributions::Model>)> = expenses::Entity::find()
            .filter(expenses::Column::CreatedBy.eq(user_id))
            .find_with_related(contributions::Entity)
            .order_by_desc(expenses::Column::CreatedAt)
            .order_by_asc(expenses::Column::Id)
            .order_by_asc(contributions::Column::Id)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for (model, contribution_models) in rows {
            let mut expense = Expense::try_from(model)?;
            expense.participants = contribution_models
                .into_iter()
                .map(Contribution::from)
                .collect();
            out.push(expense);
        }
        Ok(out)
    }
}

/// Loads an expense row, checking it belongs to `user_id`. Foreign
/// expenses are reported as missing, not as forbidden.
async fn require_expense<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    user_id: &str,
) -> ResultEngine<expenses::Model> {
    let model = expenses::Entity::find_by_id(id.to_string())
        .one(conn)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound("expense not exists".to_string()))?;
    if model.created_by != user_id {
        return Err(EngineError::KeyNotFound("expense not exists".to_string()));
    }
    Ok(model)
}
