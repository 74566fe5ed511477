use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::board::error::{BoardError, BoardResult};
use crate::board::types::*;
use crate::board::validation::{
    validate_create_canvas, validate_create_card, validate_update_canvas, validate_update_card,
};
use crate::shared::state::AppState;

pub fn canvas_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/canvases",
            get(list_canvases_handler).post(create_canvas_handler),
        )
        .route(
            "/canvases/:id",
            get(get_canvas_handler)
                .put(update_canvas_handler)
                .delete(delete_canvas_handler),
        )
}

pub fn card_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cards", get(list_cards_handler).post(create_card_handler))
        .route(
            "/cards/:id",
            get(get_card_handler)
                .put(update_card_handler)
                .delete(delete_card_handler),
        )
}

fn path_id(id: Result<Path<i32>, PathRejection>) -> BoardResult<i32> {
    id.map(|Path(id)| id).map_err(|_| {
        BoardError::Validation("Validation failed (numeric string is expected)".to_string())
    })
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> BoardResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| BoardError::Validation(rejection.body_text()))
}

async fn list_canvases_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Canvas>>, BoardError> {
    let canvases = state.canvases.list_all().await?;
    Ok(Json(canvases))
}

async fn get_canvas_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Canvas>, BoardError> {
    let canvas = state.canvases.get_by_id(path_id(id)?).await?;
    Ok(Json(canvas))
}

async fn create_canvas_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateCanvasRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Canvas>), BoardError> {
    let input = validate_create_canvas(json_body(payload)?)?;
    let canvas = state.canvases.create(input).await?;
    Ok((StatusCode::CREATED, Json(canvas)))
}

async fn update_canvas_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateCanvasRequest>, JsonRejection>,
) -> Result<Json<Canvas>, BoardError> {
    let id = path_id(id)?;
    let patch = validate_update_canvas(json_body(payload)?)?;
    let canvas = state.canvases.update(id, patch).await?;
    Ok(Json(canvas))
}

async fn delete_canvas_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, BoardError> {
    state.canvases.remove(path_id(id)?).await?;
    Ok(StatusCode::OK)
}

async fn list_cards_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CardListQuery>, QueryRejection>,
) -> Result<Json<Vec<Card>>, BoardError> {
    let Query(query) =
        query.map_err(|rejection| BoardError::Validation(rejection.body_text()))?;
    let filter = CardFilter {
        canvas_id: query.canvas_id,
    };
    let cards = state.cards.list_all(filter).await?;
    Ok(Json(cards))
}

async fn get_card_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Card>, BoardError> {
    let card = state.cards.get_by_id(path_id(id)?).await?;
    Ok(Json(card))
}

async fn create_card_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateCardRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Card>), BoardError> {
    let input = validate_create_card(json_body(payload)?)?;
    let card = state.cards.create(input).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

async fn update_card_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateCardRequest>, JsonRejection>,
) -> Result<Json<Card>, BoardError> {
    let id = path_id(id)?;
    let patch = validate_update_card(json_body(payload)?)?;
    let card = state.cards.update(id, patch).await?;
    Ok(Json(card))
}

async fn delete_card_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, BoardError> {
    state.cards.remove(path_id(id)?).await?;
    Ok(StatusCode::OK)
}
