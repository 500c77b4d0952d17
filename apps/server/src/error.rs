use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use ajo_core::errors::{Error as CoreError, ErrorKind};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    /// Machine-readable classification, e.g. `DUPLICATE_PENDING`.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
    message: String,
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::StateConflict | ErrorKind::Integrity => StatusCode::CONFLICT,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn code_for(err: &CoreError) -> Option<&'static str> {
    use ajo_core::commission::CommissionError;
    use ajo_core::payouts::PayoutError;
    use ajo_core::savings::LedgerError;

    let code = match err {
        CoreError::Payout(e) => match e {
            PayoutError::NotEligible(_) => "NOT_ELIGIBLE",
            PayoutError::DuplicatePending(_) => "DUPLICATE_PENDING",
            PayoutError::MissingRejectionReason => "MISSING_REJECTION_REASON",
            PayoutError::InvalidDestination(_) => "INVALID_DESTINATION",
            PayoutError::Forbidden(_) => "FORBIDDEN",
            PayoutError::InvalidTransition { .. } => "INVALID_TRANSITION",
            PayoutError::StaleAmount { .. } => "STALE_AMOUNT",
            PayoutError::NotFound(_) => "NOT_FOUND",
        },
        CoreError::Ledger(e) => match e {
            LedgerError::DuplicateReference { .. } => "DUPLICATE_REFERENCE",
            LedgerError::AlreadyDisbursed(_) => "ALREADY_DISBURSED",
            LedgerError::InvalidAmount(_) => "INVALID_AMOUNT",
            LedgerError::InvalidGoal(_) => "INVALID_GOAL",
            LedgerError::AccountArchived(_) => "ACCOUNT_ARCHIVED",
            LedgerError::NotOpenPlan(_) => "NOT_OPEN_PLAN",
            LedgerError::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            LedgerError::NotFound(_) => "NOT_FOUND",
        },
        CoreError::Commission(CommissionError::InvalidRate(_)) => "INVALID_RATE",
        CoreError::Commission(CommissionError::NegativeGross(_)) => "NEGATIVE_GROSS",
        _ => return None,
    };
    Some(code)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, msg) = match &self {
            ApiError::Core(e) => {
                let status = status_for(e.kind());
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    tracing::error!("Request failed: {}", e);
                }
                (status, code_for(e), e.to_string())
            }
            ApiError::Unauthorized(reason) => (StatusCode::UNAUTHORIZED, None, reason.clone()),
            ApiError::Forbidden(reason) => (StatusCode::FORBIDDEN, Some("FORBIDDEN"), reason.clone()),
            ApiError::Anyhow(e) => {
                tracing::error!("Request failed: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, None, self.to_string())
            }
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            error,
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
