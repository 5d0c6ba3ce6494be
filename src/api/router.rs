//! API router.
//!
//! Returns a composable `Router` with all endpoints nested under `/api/`.
//! The service is single-user and binds loopback only, so there is no
//! auth middleware.

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::state::AppState;

/// Build the API router around shared application state.
pub fn api_router(state: Arc<AppState>) -> Router {
    let ctx = ApiContext::new(state);

    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/medications",
            get(endpoints::medications::list).post(endpoints::medications::save),
        )
        .route("/medications/:id", delete(endpoints::medications::remove))
        .route(
            "/appointments",
            get(endpoints::appointments::list).post(endpoints::appointments::save),
        )
        .route("/appointments/:id", delete(endpoints::appointments::remove))
        .route(
            "/vitals",
            get(endpoints::vitals::list).post(endpoints::vitals::add),
        )
        .route("/vitals/:id", delete(endpoints::vitals::remove))
        .route(
            "/emergency-contact",
            get(endpoints::emergency::current).put(endpoints::emergency::save),
        )
        .route(
            "/notifications/permission",
            get(endpoints::notifications::current).post(endpoints::notifications::update),
        )
        .route(
            "/notifications/request",
            post(endpoints::notifications::request),
        )
        .route("/chat/send", post(endpoints::chat::send))
        .route("/chat/messages", get(endpoints::chat::messages))
        .route("/chat/reset", post(endpoints::chat::reset))
        .with_state(ctx);

    Router::new().nest("/api", routes)
}
