//! HTTP routes for the trip service.
//!
//! Defines the Axum router and application state. Everything under
//! `/travelgroups` sits behind the token middleware; health and the auth
//! endpoints are public.

use crate::auth::TokenProvider;
use crate::config::Config;
use crate::handlers;
use crate::middleware::auth::{require_auth, AuthState};
use crate::repositories::Stores;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Maximum request body size; travelogue image uploads are the largest.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: Config,

    /// Repository handles.
    pub stores: Stores,

    /// Token issuance and validation.
    pub token_provider: Arc<TokenProvider>,
}

impl AppState {
    /// Assemble state from configuration, with fresh empty stores.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let token_provider = Arc::new(TokenProvider::new(&config));
        Self {
            config,
            stores: Stores::new(),
            token_provider,
        }
    }
}

/// Build the application routes.
///
/// Layer order (bottom-to-top execution):
/// 1. TimeoutLayer - 30 second request timeout (innermost)
/// 2. TraceLayer - request logging
/// 3. DefaultBodyLimit - upload size cap
pub fn build_routes(state: Arc<AppState>) -> Router {
    let auth_state = AuthState {
        token_provider: Arc::clone(&state.token_provider),
    };

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/v1/health", get(handlers::health_check))
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout));

    // Everything under /travelgroups requires a valid access token.
    let group_routes = Router::new()
        .route(
            "/travelgroups",
            post(handlers::groups::create_group).get(handlers::groups::list_groups),
        )
        .route(
            "/travelgroups/:id",
            get(handlers::groups::get_group)
                .patch(handlers::groups::update_group)
                .delete(handlers::groups::delete_group),
        )
        .route("/travelgroups/:id/admin", patch(handlers::groups::delegate_admin))
        .route("/travelgroups/:id/invites", post(handlers::groups::invite))
        .route(
            "/travelgroups/invites/:invite_id/accept",
            post(handlers::groups::accept_invite),
        )
        .route(
            "/travelgroups/:id/members/me",
            delete(handlers::groups::leave_group),
        )
        .route(
            "/travelgroups/locations/provinces",
            get(handlers::locations::list_provinces),
        )
        .route(
            "/travelgroups/locations/provinces/:province/cities",
            get(handlers::locations::list_cities),
        )
        .route(
            "/travelgroups/:id/location",
            put(handlers::locations::select_location),
        )
        .route(
            "/travelgroups/:id/location/random",
            post(handlers::locations::random_location),
        )
        .route("/travelgroups/:id/period", put(handlers::schedules::set_period))
        .route(
            "/travelgroups/:id/schedules",
            post(handlers::schedules::create_schedule).get(handlers::schedules::list_schedules),
        )
        .route(
            "/travelgroups/:id/schedules/:schedule_id",
            patch(handlers::schedules::update_schedule)
                .delete(handlers::schedules::delete_schedule),
        )
        .route(
            "/travelgroups/:id/travelogues",
            post(handlers::travelogues::create_travelogue)
                .get(handlers::travelogues::list_travelogues),
        )
        .route(
            "/travelgroups/:id/travelogues/:travelogue_id",
            patch(handlers::travelogues::update_travelogue),
        )
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth));

    public_routes
        .merge(group_routes)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}
