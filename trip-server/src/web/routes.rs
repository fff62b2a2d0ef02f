//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;
use tracing::warn;

use crate::codec;
use crate::domain::DestinationId;
use crate::history::SavedTrip;
use crate::itinerary::{DestinationPatch, SettingsPatch};
use crate::{calendar, places};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/itinerary", get(get_itinerary))
        .route("/api/itinerary/destinations", post(add_destination))
        .route(
            "/api/itinerary/destinations/:id",
            axum::routing::patch(patch_destination).delete(delete_destination),
        )
        .route("/api/itinerary/reorder", post(reorder))
        .route("/api/itinerary/autofill", post(autofill))
        .route("/api/itinerary/reset", post(reset))
        .route("/api/itinerary/settings", put(update_settings))
        .route("/api/share", get(share))
        .route("/api/load", post(load_from_query))
        .route("/api/export", get(export_document))
        .route("/api/import", post(import_document))
        .route("/api/calendar", get(calendar_export))
        .route("/api/history", get(history_list).post(history_save_new))
        .route("/api/history/save", post(history_save_over))
        .route("/api/history/:id/name", put(history_rename))
        .route("/api/history/:id", delete(history_delete))
        .route("/api/history/:id/load", post(history_load))
        .route("/api/history/seed", get(seed_export).post(seed_import))
        .route("/api/places/search", get(search_places))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The full itinerary view.
async fn get_itinerary(State(state): State<AppState>) -> Json<ItineraryView> {
    let session = state.session.lock().await;
    Json(ItineraryView::from_session(&session))
}

/// Add a destination at the end of the itinerary.
async fn add_destination(
    State(state): State<AppState>,
    Json(req): Json<AddDestinationRequest>,
) -> Json<ItineraryView> {
    let mut session = state.session.lock().await;
    session.add_destination(req.name);
    Json(ItineraryView::from_session(&session))
}

/// Update one destination's fields.
///
/// A syntactically valid id that matches no destination is a no-op (the
/// client may race with a delete); the current view is returned either way.
async fn patch_destination(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<DestinationPatch>,
) -> Result<Json<ItineraryView>, AppError> {
    let id = parse_destination_id(&id)?;
    let mut session = state.session.lock().await;
    session.patch_destination(id, &patch);
    Ok(Json(ItineraryView::from_session(&session)))
}

/// Delete one destination. No-op when the id matches nothing.
async fn delete_destination(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItineraryView>, AppError> {
    let id = parse_destination_id(&id)?;
    let mut session = state.session.lock().await;
    session.remove_destination(id);
    Ok(Json(ItineraryView::from_session(&session)))
}

fn parse_destination_id(raw: &str) -> Result<DestinationId, AppError> {
    DestinationId::parse(raw).ok_or_else(|| AppError::BadRequest {
        message: format!("Invalid destination id: {raw}"),
    })
}

/// Move a destination between positions. Out-of-range indices clamp.
async fn reorder(
    State(state): State<AppState>,
    Json(req): Json<ReorderRequest>,
) -> Json<ItineraryView> {
    let mut session = state.session.lock().await;
    session.move_destination(req.from, req.to);
    Json(ItineraryView::from_session(&session))
}

/// Redistribute the day budget evenly across destinations.
async fn autofill(State(state): State<AppState>) -> Json<ItineraryView> {
    let mut session = state.session.lock().await;
    session.autofill();
    Json(ItineraryView::from_session(&session))
}

/// Clear the session back to defaults.
async fn reset(State(state): State<AppState>) -> Json<ItineraryView> {
    let mut session = state.session.lock().await;
    session.reset();
    Json(ItineraryView::from_session(&session))
}

/// Update trip-level settings. Unparseable fields keep their previous
/// values; the response shows what actually took effect.
async fn update_settings(
    State(state): State<AppState>,
    Json(patch): Json<SettingsPatch>,
) -> Json<ItineraryView> {
    let mut session = state.session.lock().await;
    session.patch_settings(&patch);
    Json(ItineraryView::from_session(&session))
}

/// The current share token and query string.
async fn share(State(state): State<AppState>) -> Result<Json<ShareResponse>, AppError> {
    let session = state.session.lock().await;
    let state_snapshot = session.to_state();
    let token = session.share_token().map_err(AppError::from)?;
    let query = codec::share_query(&state_snapshot).map_err(AppError::from)?;
    Ok(Json(ShareResponse { token, query }))
}

/// Replace the session from a shared link's query string.
///
/// Decode failures are recoverable by design: the previous session stays
/// untouched and the response says `loaded: false` rather than 4xx.
async fn load_from_query(
    State(state): State<AppState>,
    Json(req): Json<LoadRequest>,
) -> Json<LoadResponse> {
    let Some(decoded) = codec::decode_query(&req.query) else {
        warn!("shared-link query did not decode, keeping current session");
        return Json(LoadResponse { loaded: false });
    };

    let mut session = state.session.lock().await;
    session.apply_state(decoded);
    Json(LoadResponse { loaded: true })
}

/// Download the session as a pretty-printed JSON document.
async fn export_document(State(state): State<AppState>) -> Result<Response, AppError> {
    let session = state.session.lock().await;
    let document = codec::to_document(&session.to_state()).map_err(AppError::from)?;
    let file_name = codec::document_file_name(session.settings.start_date);

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        document,
    )
        .into_response())
}

/// Replace the session from an exported document.
async fn import_document(
    State(state): State<AppState>,
    Json(req): Json<ImportRequest>,
) -> Json<LoadResponse> {
    let Some(decoded) = codec::from_document(&req.document) else {
        warn!("imported document did not decode, keeping current session");
        return Json(LoadResponse { loaded: false });
    };

    let mut session = state.session.lock().await;
    session.apply_state(decoded);
    Json(LoadResponse { loaded: true })
}

/// Download the itinerary as an iCalendar file.
async fn calendar_export(State(state): State<AppState>) -> Result<Response, AppError> {
    let session = state.session.lock().await;
    let ics = calendar::to_ics(&session.settings, session.itinerary.destinations()).map_err(
        |e| AppError::BadRequest {
            message: e.to_string(),
        },
    )?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "text/calendar; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"itinerary.ics\"".to_string(),
            ),
        ],
        ics,
    )
        .into_response())
}

/// The saved-trip list, most recent first, plus the active pointer.
async fn history_list(State(state): State<AppState>) -> Json<HistoryResponse> {
    let history = state.history.lock().await;
    Json(HistoryResponse {
        trips: history.list(),
        active_id: history.active_id(),
    })
}

/// Save the current session as a new history entry and make it active.
async fn history_save_new(
    State(state): State<AppState>,
    Json(req): Json<SaveRequest>,
) -> Result<Json<SavedTrip>, AppError> {
    let (name, token) = named_snapshot(&state, req.name).await?;
    let mut history = state.history.lock().await;
    Ok(Json(history.save_new(&name, &token)))
}

/// Overwrite the active history entry with the current session.
///
/// Degrades to save-new when there is no active entry.
async fn history_save_over(
    State(state): State<AppState>,
    Json(req): Json<SaveRequest>,
) -> Result<Json<SavedTrip>, AppError> {
    let (name, token) = named_snapshot(&state, req.name).await?;
    let mut history = state.history.lock().await;
    Ok(Json(history.save_over_active(&name, &token)))
}

/// Snapshot the session into a (name, token) pair for the history store.
/// A missing name falls back to one derived from the start date.
async fn named_snapshot(
    state: &AppState,
    name: Option<String>,
) -> Result<(String, String), AppError> {
    let session = state.session.lock().await;
    let token = session.share_token().map_err(AppError::from)?;
    let name = name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| format!("Trip {}", session.settings.start_date));
    Ok((name, token))
}

/// Rename a saved trip. No-op when the id matches nothing.
async fn history_rename(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RenameRequest>,
) -> Json<HistoryResponse> {
    let mut history = state.history.lock().await;
    history.rename(&id, &req.name);
    Json(HistoryResponse {
        trips: history.list(),
        active_id: history.active_id(),
    })
}

/// Delete a saved trip. No-op when the id matches nothing.
async fn history_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<HistoryResponse> {
    let mut history = state.history.lock().await;
    history.delete(&id);
    Json(HistoryResponse {
        trips: history.list(),
        active_id: history.active_id(),
    })
}

/// Load a saved trip into the session and mark it active.
///
/// An entry whose token no longer decodes reports `loaded: false`; the
/// current session is untouched.
async fn history_load(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LoadResponse>, AppError> {
    let mut history = state.history.lock().await;
    let token = history.load(&id).ok_or_else(|| AppError::NotFound {
        message: format!("No saved trip with id {id}"),
    })?;
    drop(history);

    // Seed-imported entries can predate the current token format, so try
    // every format, not just the one we write today.
    let Some(decoded) = codec::decode_any(&token) else {
        warn!(id = %id, "saved trip token did not decode");
        return Ok(Json(LoadResponse { loaded: false }));
    };

    let mut session = state.session.lock().await;
    session.apply_state(decoded);
    Ok(Json(LoadResponse { loaded: true }))
}

/// Export the whole history as a seed string.
async fn seed_export(State(state): State<AppState>) -> Result<Json<SeedResponse>, AppError> {
    let history = state.history.lock().await;
    let seed = history.export_seed().map_err(AppError::from)?;
    Ok(Json(SeedResponse { seed }))
}

/// Replace the whole history from a seed string.
async fn seed_import(
    State(state): State<AppState>,
    Json(req): Json<SeedImportRequest>,
) -> Result<Json<SeedImportResponse>, AppError> {
    let mut history = state.history.lock().await;
    let imported = history
        .import_seed(&req.seed)
        .map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;
    Ok(Json(SeedImportResponse { imported }))
}

/// Place-name suggestions for destination entry.
///
/// A superseded lookup (a newer keystroke arrived) returns an empty list
/// flagged `superseded` so the client can discard it silently.
async fn search_places(
    State(state): State<AppState>,
    Query(req): Query<PlaceSearchRequest>,
) -> Result<Json<PlaceSearchResponse>, AppError> {
    match state.suggestions.lookup(&req.q).await {
        Ok(Some(places)) => Ok(Json(PlaceSearchResponse {
            places: places.as_ref().clone(),
            superseded: false,
        })),
        Ok(None) => Ok(Json(PlaceSearchResponse {
            places: Vec::new(),
            superseded: true,
        })),
        Err(e) => Err(AppError::from(e)),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<codec::TokenError> for AppError {
    fn from(e: codec::TokenError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<places::PlaceError> for AppError {
    fn from(e: places::PlaceError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_maps_to_400() {
        let response = AppError::BadRequest {
            message: "nope".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::NotFound {
            message: "gone".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_maps_to_500() {
        let response = AppError::Internal {
            message: "boom".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn destination_id_parse_rejects_garbage() {
        assert!(parse_destination_id("not-a-uuid").is_err());
        let id = crate::domain::DestinationId::new();
        assert!(parse_destination_id(&id.to_string()).is_ok());
    }
}
