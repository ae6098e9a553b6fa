use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRequest, Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::{debug, info};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{HealthResponse, MessageResponse, Movie, MovieUpdate, NewMovie},
};

/// `Json` whose rejections render as `{"error": ...}` with a 400.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

pub async fn list_movies(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Movie>>> {
    let rows = state.store.list().await?;
    debug!(count = rows.len(), "listed movies");

    let movies = rows.into_iter().map(Movie::try_from).collect::<Result<Vec<_>, _>>()?;
    Ok(Json(movies))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    ApiJson(new): ApiJson<NewMovie>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    let row = state.store.create(new).await.map_err(AppError::bad_request)?;
    info!(id = %row.id, title = %row.title, "movie created");

    Ok((StatusCode::CREATED, Json(Movie::try_from(row)?)))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<MovieUpdate>, JsonRejection>,
) -> AppResult<Json<Movie>> {
    // A request without a JSON body only refreshes `updatedAt`.
    let update = match payload {
        Ok(Json(update)) => update,
        Err(JsonRejection::MissingJsonContentType(_)) => MovieUpdate::default(),
        Err(rejection) => return Err(rejection.into()),
    };

    let row = state
        .store
        .update(&id, update)
        .await
        .map_err(AppError::bad_request)?
        .ok_or(AppError::NotFound)?;
    info!(id = %row.id, watched = row.watched, "movie updated");

    Ok(Json(Movie::try_from(row)?))
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if !state.store.delete(&id).await? {
        return Err(AppError::NotFound);
    }
    info!(id = %id, "movie deleted");

    Ok(Json(MessageResponse { message: "Movie deleted successfully" }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "OK", timestamp: jiff::Timestamp::now() })
}
