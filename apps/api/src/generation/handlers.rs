//! Axum route handler for the Generation API.

use axum::{extract::State, Json};

use crate::generation::form::SubmittedValues;
use crate::generation::pipeline::{run_generation, GenerationResponse};
use crate::state::AppState;

/// POST /api/v1/generate
///
/// One form submission in, one `{values, logs, result|error}` envelope out.
/// Failures are part of the envelope, so the status is 200 either way.
pub async fn handle_generate(
    State(state): State<AppState>,
    values: SubmittedValues,
) -> Json<GenerationResponse> {
    Json(run_generation(&state, values.0).await)
}
