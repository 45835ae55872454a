//! Request handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    Form,
};
use fluid_calc_core::{FieldErrors, FluidCalcCore, FluidCalcError, RawSubmission, Submission};

use crate::render::Page;
use crate::router::AppState;

/// Run a storage call off the async runtime.
async fn with_core<T, F>(state: &AppState, f: F) -> anyhow::Result<T>
where
    T: Send + 'static,
    F: FnOnce(FluidCalcCore) -> Result<T, FluidCalcError> + Send + 'static,
{
    let core = state.core.clone();
    Ok(tokio::task::spawn_blocking(move || f(core)).await??)
}

fn html(state: &AppState, status: StatusCode, page: &Page<'_>) -> Response {
    match state.templates.render(page) {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!("failed to render page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
        }
    }
}

fn failure(state: &AppState) -> Response {
    html(state, StatusCode::INTERNAL_SERVER_ERROR, &Page::Failure)
}

/// GET /
pub async fn show_form(State(state): State<AppState>) -> Response {
    html(
        &state,
        StatusCode::OK,
        &Page::Form {
            raw: &RawSubmission::default(),
            errors: &FieldErrors::default(),
        },
    )
}

/// POST /
pub async fn submit_form(
    State(state): State<AppState>,
    Form(raw): Form<RawSubmission>,
) -> Response {
    match with_core(&state, move |core| core.submit(&raw)).await {
        Ok(Submission::Accepted(view)) => html(&state, StatusCode::OK, &Page::Result(&view)),
        Ok(Submission::Rejected(rejected)) => {
            tracing::warn!("rejected submission: {}", rejected.errors);
            html(
                &state,
                StatusCode::UNPROCESSABLE_ENTITY,
                &Page::Form {
                    raw: &rejected.raw,
                    errors: &rejected.errors,
                },
            )
        }
        Err(e) => {
            tracing::error!("failed to store submission: {:#}", e);
            failure(&state)
        }
    }
}

/// GET /records/{id}
pub async fn show_record(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match with_core(&state, move |core| core.find_record(id)).await {
        Ok(Some(view)) => html(&state, StatusCode::OK, &Page::Result(&view)),
        Ok(None) => html(&state, StatusCode::NOT_FOUND, &Page::NotFound),
        Err(e) => {
            tracing::error!("failed to load record {}: {:#}", id, e);
            failure(&state)
        }
    }
}

/// GET /api/records
pub async fn list_records(State(state): State<AppState>) -> Response {
    match with_core(&state, |core| core.list_records()).await {
        Ok(records) => Json(records).into_response(),
        Err(e) => {
            tracing::error!("failed to list records: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": {"type": "internal_error", "message": "failed to list records"}
                })),
            )
                .into_response()
        }
    }
}
