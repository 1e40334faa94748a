use axum::{
    Json,
    body::Bytes,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::modules::earnings::core::wage_config::{WageConfig, WageKind};
use crate::modules::earnings::use_cases::track_earnings::command::TrackerCommand;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct WageConfigBody {
    pub kind: WageKind,
    pub rate: Option<f64>,
    pub hours_per_week: Option<f64>,
}

#[derive(Deserialize, Default)]
pub struct DeleteSelectedBody {
    pub indices: Option<Vec<usize>>,
}

#[derive(Deserialize)]
pub struct EditNoteBody {
    pub note: String,
}

async fn dispatch(state: &AppState, command: TrackerCommand) -> Response {
    let handled = state.tracker.handle(command).await;
    Json(handled.view).into_response()
}

pub async fn get_state(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.tracker.view().await)
}

pub async fn set_wage_config(
    State(state): State<AppState>,
    body: Result<Json<WageConfigBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    match WageConfig::new(body.kind, body.rate, body.hours_per_week) {
        Ok(config) => dispatch(&state, TrackerCommand::SetWageConfig(config)).await,
        Err(error) => (StatusCode::UNPROCESSABLE_ENTITY, error.to_string()).into_response(),
    }
}

pub async fn toggle_running(State(state): State<AppState>) -> Response {
    dispatch(&state, TrackerCommand::ToggleRunning).await
}

pub async fn reset(State(state): State<AppState>) -> Response {
    dispatch(&state, TrackerCommand::Reset).await
}

/// An empty body deletes the current selection.
pub async fn delete_selected(State(state): State<AppState>, body: Bytes) -> Response {
    let body = if body.is_empty() {
        DeleteSelectedBody::default()
    } else {
        match serde_json::from_slice::<DeleteSelectedBody>(&body) {
            Ok(b) => b,
            Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
        }
    };
    dispatch(
        &state,
        TrackerCommand::DeleteSelected {
            indices: body.indices,
        },
    )
    .await
}

pub async fn toggle_row_selection(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Response {
    dispatch(&state, TrackerCommand::ToggleRowSelection { index }).await
}

pub async fn revert(State(state): State<AppState>, Path(entry_index): Path<usize>) -> Response {
    dispatch(&state, TrackerCommand::Revert { entry_index }).await
}

pub async fn edit_note(
    State(state): State<AppState>,
    Path(entry_index): Path<usize>,
    body: Result<Json<EditNoteBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    dispatch(
        &state,
        TrackerCommand::EditNote {
            entry_index,
            note: body.note,
        },
    )
    .await
}

pub async fn delete_change_history(State(state): State<AppState>) -> Response {
    dispatch(&state, TrackerCommand::DeleteChangeHistory).await
}

pub async fn undo(State(state): State<AppState>) -> Response {
    dispatch(&state, TrackerCommand::Undo).await
}
