use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;

use ajo_core::authorization::ActorContext;
use ajo_core::payouts::{EligibleAccount, PayoutRequest};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitPayoutBody {
    savings_account_id: String,
    destination_account_id: String,
}

#[derive(Deserialize)]
struct RejectPayoutBody {
    #[serde(default)]
    reason: String,
}

async fn list_eligible(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<ActorContext>,
) -> ApiResult<Json<Vec<EligibleAccount>>> {
    let accounts = state.payout_service.list_eligible_accounts(&actor).await?;
    Ok(Json(accounts))
}

async fn submit_payout(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<ActorContext>,
    Json(body): Json<SubmitPayoutBody>,
) -> ApiResult<(StatusCode, Json<PayoutRequest>)> {
    let request = state
        .payout_service
        .submit_request(&actor, &body.savings_account_id, &body.destination_account_id)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

async fn get_payout(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<ActorContext>,
) -> ApiResult<Json<PayoutRequest>> {
    Ok(Json(state.payout_service.get_request(&actor, &id)?))
}

async fn cancel_payout(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<ActorContext>,
) -> ApiResult<Json<PayoutRequest>> {
    Ok(Json(state.payout_service.cancel_request(&actor, &id).await?))
}

async fn approve_payout(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<ActorContext>,
) -> ApiResult<Json<PayoutRequest>> {
    Ok(Json(state.payout_service.approve_request(&actor, &id).await?))
}

async fn reject_payout(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<ActorContext>,
    Json(body): Json<RejectPayoutBody>,
) -> ApiResult<Json<PayoutRequest>> {
    let request = state
        .payout_service
        .reject_request(&actor, &id, &body.reason)
        .await?;
    Ok(Json(request))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/payouts", post(submit_payout))
        .route("/payouts/eligible", get(list_eligible))
        .route("/payouts/{id}", get(get_payout))
        .route("/payouts/{id}/cancel", post(cancel_payout))
        .route("/payouts/{id}/approve", post(approve_payout))
        .route("/payouts/{id}/reject", post(reject_payout))
}
