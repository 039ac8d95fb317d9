//! 路由装配：API 路由、请求追踪、安全头与 CORS。

use axum::extract::{Extension, connect_info::ConnectInfo};
use axum::http::Request;
use axum::routing::{get, post};
use axum::{Router, middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, info_span};

use crate::http::resolve_client_ip;
use crate::session::AccountSession;
use crate::{api, frontend, http, version};

pub fn build_router(session: Arc<AccountSession>, cors: Option<CorsLayer>) -> Router {
    let mut app = Router::new()
        .route("/", get(version::service_info))
        .route("/health", get(version::health_check))
        .route("/api/version", get(version::get_version_info))
        .route("/api/drive/qrcode", post(api::generate_qr))
        .route("/api/drive/qrcode/{uid}", get(api::check_qr_login))
        .route("/api/drive/login-cookie", post(api::login_cookie))
        .route("/api/drive/logout", post(api::logout))
        .route("/api/drive/status", get(api::session_status))
        .route("/api/drive/files", post(api::list_files))
        .route("/api/drive/search", post(api::search_files))
        .route("/api/drive/folders", post(api::create_folder))
        .fallback(frontend::serve_web_ui)
        .layer(middleware::from_fn(http::add_security_headers))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let connect_ip = request
                        .extensions()
                        .get::<ConnectInfo<SocketAddr>>()
                        .map(|ConnectInfo(addr)| addr.ip());
                    let client_ip = resolve_client_ip(request.headers(), connect_ip)
                        .map(|ip| ip.to_string())
                        .unwrap_or_else(|| "unknown".to_string());

                    info_span!(
                        env!("CARGO_CRATE_NAME"),
                        client_ip,
                        method = ?request.method(),
                        path = ?request.uri().path(),
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .layer(Extension(session));

    if let Some(cors_layer) = cors {
        app = app.layer(cors_layer);
    }
    app
}
