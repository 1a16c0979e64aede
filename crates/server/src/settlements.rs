//! Balance sheet and statistics API endpoints

use api_types::settlement::{BalanceSheetResponse, DebtView, Statistic};
use axum::{Extension, Json, extract::State};

use crate::{ServerError, server::ServerState, user};

/// Gross debts across the user's expenses. Reciprocal debts stay
/// separate entries, settling them is left to the people involved.
pub async fn balances(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<BalanceSheetResponse>, ServerError> {
    let sheet = state.engine.balance_sheet(&user.username).await?;

    let people = sheet.people().to_vec();
    let debts = sheet
        .iter()
        .map(|(debtor, creditor, amount)| DebtView {
            debtor: debtor.to_string(),
            creditor: creditor.to_string(),
            amount: amount.value(),
        })
        .collect();

    Ok(Json(BalanceSheetResponse { people, debts }))
}

pub async fn stats(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Statistic>, ServerError> {
    let (total, count) = state.engine.statistics(&user.username).await?;

    Ok(Json(Statistic {
        total_amount: total.value(),
        expense_count: count,
    }))
}
