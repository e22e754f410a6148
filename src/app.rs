use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::auth::TokenService;
use crate::database::Storage;
use crate::handlers::{self, protected, public};
use crate::middleware::account_auth_middleware;

/// Shared per-request dependencies. Holds no mutable state of its own.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(store: Arc<dyn Storage>, tokens: TokenService) -> Self {
        Self { store, tokens }
    }
}

/// Full router: public routes, token-gated account routes, request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(public::health))
        .route(
            "/login",
            post(public::login).fallback(handlers::method_not_allowed),
        )
        .route(
            "/account",
            get(public::account_list)
                .post(public::account_create)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/transfer",
            post(public::transfer).fallback(handlers::method_not_allowed),
        )
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/account/:id",
            get(protected::account_get)
                .delete(protected::account_delete)
                .fallback(handlers::method_not_allowed),
        )
        .route_layer(middleware::from_fn_with_state(state, account_auth_middleware))
}
