mod handlers;

use std::sync::Arc;

use axum::{
    extract::FromRef,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::{BookingPolicy, Settings};
use crate::db::Database;
use crate::pictures::PictureClient;

/// Shared handler state. Handlers extract the piece they need.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub policy: Arc<BookingPolicy>,
    pub pictures: PictureClient,
}

impl AppState {
    pub fn new(db: Database, settings: &Settings) -> Self {
        Self {
            db,
            policy: Arc::new(settings.policy.clone()),
            pictures: PictureClient::new(&settings.pictures),
        }
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Arc<BookingPolicy> {
    fn from_ref(state: &AppState) -> Self {
        state.policy.clone()
    }
}

impl FromRef<AppState> for PictureClient {
    fn from_ref(state: &AppState) -> Self {
        state.pictures.clone()
    }
}

pub fn create_router(state: AppState) -> Router {
    create_router_with_cors(state, None)
}

/// Build the router, restricting CORS to `origins` when given.
pub fn create_router_with_cors(state: AppState, origins: Option<&[String]>) -> Router {
    let api = Router::new()
        // Entry and summary views
        .route("/blackout-dates", get(handlers::list_blackout_dates))
        .route("/availability", get(handlers::get_availability))
        .route("/selection", post(handlers::confirm_selection))
        .route("/summary", get(handlers::get_summary))
        // Reservations
        .route("/reservations", get(handlers::list_reservations))
        .route("/reservations", post(handlers::create_reservation))
        .route(
            "/reservations/{id}",
            get(handlers::get_reservation).delete(handlers::delete_reservation),
        )
        // Gallery
        .route("/pictures", get(handlers::list_pictures))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(origins))
        .with_state(state)
}

fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let Some(origins) = origins else {
        return CorsLayer::permissive();
    };

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
