use axum::{
    Extension, Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::modules::earnings::use_cases::export_history::inbound::http as export_http;
use crate::modules::earnings::use_cases::track_earnings::inbound::http as track_http;
use crate::shell::graphql::{self, graphiql};
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    let schema = graphql::schema(state.clone());
    Router::new()
        .route("/state", get(track_http::get_state))
        .route("/wage-config", put(track_http::set_wage_config))
        .route("/toggle-running", post(track_http::toggle_running))
        .route("/reset", post(track_http::reset))
        .route("/delete-selected", post(track_http::delete_selected))
        .route(
            "/rows/{index}/toggle-selection",
            post(track_http::toggle_row_selection),
        )
        .route("/change-history", delete(track_http::delete_change_history))
        .route("/change-history/{index}/revert", post(track_http::revert))
        .route("/change-history/{index}/note", put(track_http::edit_note))
        .route("/undo", post(track_http::undo))
        .route("/export.csv", get(export_http::handle))
        .route("/gql", get(graphiql).post(graphql::graphql))
        .layer(Extension(schema))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
