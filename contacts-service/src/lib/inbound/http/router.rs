use std::sync::Arc;
use std::time::Duration as StdDuration;

use auth::JwtHandler;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use chrono::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_contact::create_contact;
use super::handlers::delete_contact::delete_contact;
use super::handlers::get_contact::get_contact;
use super::handlers::get_current_user::get_current_user;
use super::handlers::list_contacts::list_contacts;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_contact::update_contact;
use super::middleware::authenticate as auth_middleware;
use crate::domain::contact::service::ContactService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::contact::PostgresContactRepository;
use crate::outbound::repositories::user::PostgresUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PostgresUserRepository>>,
    pub contact_service: Arc<ContactService<PostgresContactRepository>>,
    pub token_codec: Arc<JwtHandler>,
    pub token_lifetime: Duration,
}

pub fn create_router(
    user_service: Arc<UserService<PostgresUserRepository>>,
    contact_service: Arc<ContactService<PostgresContactRepository>>,
    token_codec: Arc<JwtHandler>,
    token_lifetime: Duration,
) -> Router {
    let state = AppState {
        user_service,
        contact_service,
        token_codec,
        token_lifetime,
    };

    let public_routes = Router::new()
        .route("/register/", post(register))
        .route("/token/", post(login));

    let protected_routes = Router::new()
        .route("/users/me", get(get_current_user))
        .route("/contacts/", post(create_contact).get(list_contacts))
        .route(
            "/contacts/:contact_id",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: StdDuration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
