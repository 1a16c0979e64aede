//! Share link API endpoints
//!
//! The summary itself travels inside the link: `POST /share` packs the
//! debtor's summary into an opaque `data` token and `GET /share?data=...`
//! unpacks it, so the view works without credentials and without the
//! server keeping any share state.

use api_types::share::{ShareExpenseView, ShareLink, ShareNew, ShareSummaryView};
use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{ServerError, server::ServerState, user};
use engine::ShareSummary;

#[derive(Debug, Deserialize)]
pub struct ShareQuery {
    data: String,
}

fn map_view(summary: ShareSummary) -> ShareSummaryView {
    ShareSummaryView {
        person: summary.person,
        owed_to: summary.owed_to,
        total_owed: summary.total_owed.value(),
        expenses: summary
            .expenses
            .into_iter()
            .map(|expense| ShareExpenseView {
                title: expense.title,
                total_amount: expense.total_amount.value(),
                amount: expense.amount.value(),
                paid_by: expense.paid_by,
            })
            .collect(),
    }
}

pub async fn link_new(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ShareNew>,
) -> Result<(StatusCode, Json<ShareLink>), ServerError> {
    if payload.person.is_empty() || payload.owed_to.is_empty() {
        return Err(ServerError::Generic(
            "person and owed_to are required".to_string(),
        ));
    }

    let summary = state
        .engine
        .share_summary(&payload.person, &payload.owed_to, &user.username)
        .await?;
    let data = summary.encode()?;

    Ok((StatusCode::CREATED, Json(ShareLink { data })))
}

pub async fn view(
    Query(query): Query<ShareQuery>,
) -> Result<Json<ShareSummaryView>, ServerError> {
    let summary = ShareSummary::decode(&query.data)?;

    Ok(Json(map_view(summary)))
}
