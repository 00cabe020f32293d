use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{elevated, protected, public};
use crate::middleware::admin_gate_middleware;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/api/auth/session", get(public::session_get))
        .merge(public_content_routes())
        // Protected
        .merge(protected_routes())
        // Elevated
        .merge(admin_routes(state.clone()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    user_id = tracing::field::Empty,
                )
            }),
        );

    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config.security));
    }

    router.with_state(state)
}

fn public_content_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/page-seo/public/:page_slug", get(public::seo_for_page))
        .route(
            "/admin/editable-content/public/key/:page_slug/:block_key",
            get(public::content_by_key),
        )
        .route(
            "/admin/editable-content/public/page/:page_slug",
            get(public::content_for_page),
        )
}

fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/whoami", get(protected::whoami_get))
        .route("/api/threads/:thread_id/access", get(protected::thread_access_get))
        .route("/api/threads/:thread_id/stream", get(protected::thread_stream_get))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    use elevated::{editable_content, page_seo, site_settings};

    Router::new()
        .route(
            "/admin/site-settings",
            get(site_settings::list).post(site_settings::create),
        )
        .route(
            "/admin/site-settings/:key",
            get(site_settings::show)
                .put(site_settings::update)
                .delete(site_settings::delete),
        )
        .route("/admin/page-seo", get(page_seo::list).post(page_seo::create))
        .route(
            "/admin/page-seo/:page_slug",
            get(page_seo::show)
                .put(page_seo::update)
                .delete(page_seo::delete),
        )
        .route(
            "/admin/editable-content",
            get(editable_content::list).post(editable_content::create),
        )
        .route(
            "/admin/editable-content/id/:id",
            get(editable_content::show_by_id)
                .put(editable_content::update_by_id)
                .delete(editable_content::delete_by_id),
        )
        .route(
            "/admin/editable-content/key/:page_slug/:block_key",
            get(editable_content::show_by_key)
                .put(editable_content::update_by_key)
                .delete(editable_content::delete_by_key),
        )
        .route_layer(middleware::from_fn_with_state(state, admin_gate_middleware))
}

/// Origins that fail to parse as header values are skipped; none left means any
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
