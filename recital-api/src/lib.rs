use axum::Router;
use tower_http::trace::TraceLayer;

pub mod about;
pub mod auth;
pub mod availability;
pub mod bookings;
pub mod content;
pub mod editor;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod settings;
pub mod state;
pub mod videos;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // Everything here requires a live admin session.
    let admin = Router::new()
        .merge(about::routes())
        .merge(availability::routes())
        .merge(settings::routes())
        .merge(videos::routes())
        .merge(bookings::admin_routes())
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::admin_auth_middleware,
        ));

    Router::new()
        .merge(auth::routes())
        .merge(admin)
        .merge(bookings::routes())
        .merge(editor::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
