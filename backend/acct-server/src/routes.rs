use crate::{AppState, api::accounts::accounts, health, request_gate};

use axum::{Router, middleware, routing::get, routing::post};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    // Require a verified bearer token
    let authenticated = Router::new()
        .route(
            "/change-email-password",
            post(accounts::change_email_password),
        )
        .route("/add-2fa", post(accounts::add_2fa))
        .route("/add-other-credential", post(accounts::add_other_credential))
        .route_layer(middleware::from_fn_with_state(state.clone(), request_gate));

    let api = Router::new()
        .route("/signup", post(accounts::sign_up))
        .route("/login", post(accounts::login))
        .route("/guest-login", post(accounts::guest_login))
        .route("/verify-credentials", post(accounts::verify_credentials))
        .route("/forgot-password", post(accounts::forgot_password))
        .route("/create-new-password", post(accounts::create_new_password))
        .merge(authenticated);

    Router::new()
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .nest("/api", api)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
