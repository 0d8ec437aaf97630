use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, StatusCode},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::api::{docs, products};
use crate::config::Config;
use crate::error::AppError;
use crate::infrastructure::database::init_repository;
use crate::infrastructure::repository::ProductRepository;
use crate::middleware::request_logger::log_request;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub repository: Arc<dyn ProductRepository>,
}

impl AppState {
    pub fn new(config: Config, repository: Arc<dyn ProductRepository>) -> Self {
        Self { config, repository }
    }

    /// 连接存储; 在开始监听之前调用
    pub async fn from_config(config: Config) -> Result<Self, AppError> {
        let repository = init_repository(&config).await?;
        Ok(Self::new(config, repository))
    }
}

pub fn create_app(state: AppState) -> Router {
    let body_limit = state.config.http.body_limit_bytes;
    let app_state = Arc::new(state);

    let health_route = Router::new().route("/health", get(|| async { "OK" }));

    Router::new()
        .merge(products::routes())
        .merge(docs::routes())
        .merge(health_route)
        .fallback(handler_404)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn_with_state(body_limit, log_request))
        // 常用安全响应头
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_DNS_PREFETCH_CONTROL,
            HeaderValue::from_static("off"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn handler_404() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "nothing to see here")
}
