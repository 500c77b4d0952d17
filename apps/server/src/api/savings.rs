use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Extension, Json, Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use ajo_core::authorization::{self, ActorContext};
use ajo_core::savings::{Marking, NewMarking};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordMarkingBody {
    amount: Decimal,
    marked_date: NaiveDate,
    payment_reference: Option<String>,
}

async fn list_markings(
    Path(account_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<ActorContext>,
) -> ApiResult<Json<Vec<Marking>>> {
    let account = state.ledger_service.get_account(&account_id)?;
    if !authorization::can_view_account(&actor, &account) {
        return Err(ApiError::Forbidden(format!(
            "user {} cannot view savings account {}",
            actor.user_id, account.id
        )));
    }
    Ok(Json(state.ledger_service.list_markings(&account_id)?))
}

/// Contribution ingestion. The completion flip is applied right after the append.
async fn record_marking(
    Path(account_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<ActorContext>,
    Json(body): Json<RecordMarkingBody>,
) -> ApiResult<(StatusCode, Json<Marking>)> {
    let account = state.ledger_service.get_account(&account_id)?;
    if !authorization::can_record_marking(&actor, &account) {
        return Err(ApiError::Forbidden(format!(
            "user {} cannot record markings for business {}",
            actor.user_id, account.business_id
        )));
    }

    let marking = state
        .ledger_service
        .record_marking(NewMarking {
            savings_account_id: account_id.clone(),
            amount: body.amount,
            marked_date: body.marked_date,
            payment_reference: body.payment_reference,
        })
        .await?;

    let assessment = state.completion_service.refresh_account(&account).await?;
    if assessment.crossed_threshold {
        tracing::info!(account_id = %account_id, "Savings goal reached");
    }
    Ok((StatusCode::CREATED, Json(marking)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/savings/{id}/markings",
        post(record_marking).get(list_markings),
    )
}
