mod push;

use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    body::Body,
    extract::Extension,
    http::{header, HeaderValue, Request},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use tower::ServiceBuilder;
use tower_http::{trace::TraceLayer, ServiceBuilderExt};

use crate::{
    config::Config,
    error::{ErrorCode, ErrorCodeDetail},
    gateway::PushGateway,
    server_info::ServerInfo,
};

pub use self::push::push_hook;

impl IntoResponse for ErrorCode {
    fn into_response(self) -> Response {
        let details: ErrorCodeDetail = (&self).into();
        (details.status_code(), Json(details)).into_response()
    }
}

#[tracing::instrument]
async fn root() -> Json<ServerInfo> {
    Json(ServerInfo::new())
}

#[tracing::instrument(skip_all)]
pub async fn start_server(config: Config, gateway: PushGateway) -> color_eyre::Result<()> {
    let addr = SocketAddr::from_str(config.bind_ip())?;
    let app = build_http_router(gateway);
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

pub(crate) fn build_http_router(gateway: PushGateway) -> Router {
    // The hook path carries the token, so the request span only records the method.
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!("request", method = %request.method())
    });

    let middleware = ServiceBuilder::new()
        .layer(trace)
        .insert_response_header_if_not_present(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

    Router::new()
        .route("/", get(root))
        .route("/hook/push/:token", post(push_hook))
        .layer(middleware.into_inner())
        .layer(Extension(Arc::new(gateway)))
}
