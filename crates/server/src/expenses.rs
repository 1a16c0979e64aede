//! Expenses API endpoints

use api_types::expense::{
    ContributionEntry, ExpenseCreated, ExpenseListResponse, ExpenseNew, ExpenseUpdate, ExpenseView,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{FixedOffset, Utc};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};
use engine::{Contribution, Expense, ExpenseFields, Money};

fn map_fields(
    title: String,
    amount: f64,
    paid_by: String,
    participants: Vec<ContributionEntry>,
) -> ExpenseFields {
    ExpenseFields {
        title,
        amount: Money::new(amount),
        paid_by,
        participants: participants
            .into_iter()
            .map(|entry| Contribution::new(entry.participant, Money::new(entry.amount)))
            .collect(),
    }
}

fn map_view(expense: Expense, utc: FixedOffset) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        title: expense.title,
        amount: expense.amount.value(),
        paid_by: expense.paid_by,
        created_at: expense.created_at.with_timezone(&utc),
        participants: expense
            .participants
            .into_iter()
            .map(|contribution| ContributionEntry {
                participant: contribution.participant,
                amount: contribution.amount.value(),
            })
            .collect(),
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<ExpenseListResponse>, ServerError> {
    let expenses = state.engine.list_expenses(&user.username).await?;

    let utc = FixedOffset::east_opt(0)
        .ok_or_else(|| ServerError::Generic("invalid UTC offset".to_string()))?;
    let expenses = expenses
        .into_iter()
        .map(|expense| map_view(expense, utc))
        .collect();

    Ok(Json(ExpenseListResponse { expenses }))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseCreated>), ServerError> {
    let created_at = payload
        .created_at
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    let fields = map_fields(
        payload.title,
        payload.amount,
        payload.paid_by,
        payload.participants,
    );
    let id = state
        .engine
        .create_expense(fields, &user.username, created_at)
        .await?;

    Ok((StatusCode::CREATED, Json(ExpenseCreated { id })))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ExpenseUpdate>,
) -> Result<StatusCode, ServerError> {
    let fields = map_fields(
        payload.title,
        payload.amount,
        payload.paid_by,
        payload.participants,
    );
    state
        .engine
        .update_expense(id, fields, &user.username)
        .await?;

    Ok(StatusCode::OK)
}

pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_expense(id, &user.username).await?;

    Ok(StatusCode::NO_CONTENT)
}
