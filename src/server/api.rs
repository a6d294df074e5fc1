use crate::charts::ChartDispatcher;
use crate::models::chart::{ ChartRequest, ChartResponse };
use crate::models::chat::ChatRequest;
use crate::relay::{ CompletionRelay, RelayResponse };
use axum::{
    body::Body,
    extract::State,
    http::{ header, StatusCode },
    response::{ IntoResponse, Response },
    routing::{ get, post },
    Json,
    Router,
};
use serde::Serialize;
use tower_http::cors::{ Any, CorsLayer };

#[derive(Clone)]
pub struct AppState {
    pub relay: CompletionRelay,
    pub dispatcher: ChartDispatcher,
}

impl AppState {
    pub fn new(relay: CompletionRelay) -> Self {
        Self { relay, dispatcher: ChartDispatcher::default() }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    model: String,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/api/charts", post(charts_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

async fn chat_handler(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Response {
    match state.relay.relay(req.messages).await {
        RelayResponse::Streaming(fragments) =>
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                    (header::CACHE_CONTROL, "no-cache"),
                ],
                Body::from_stream(fragments),
            ).into_response(),
        RelayResponse::Fallback(text) =>
            (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain")], text).into_response(),
    }
}

async fn charts_handler(
    State(state): State<AppState>,
    Json(req): Json<ChartRequest>
) -> Json<ChartResponse> {
    Json(ChartResponse { charts: state.dispatcher.dispatch(&req.query) })
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse { status: "ok", model: state.relay.model() })
}
