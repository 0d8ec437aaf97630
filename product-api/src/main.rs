use product_api::config::Config;
use product_api::error::AppError;
use product_api::logging::init_logging;
use product_api::server::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 加载环境变量
    dotenvy::dotenv().ok();

    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    init_logging(&config)?;

    tracing::info!(environment = %config.server.environment, "Starting product API");

    // 存储不可用时直接退出
    let addr = config.server_addr();
    let app_state = AppState::from_config(config).await?;

    let app = create_app(app_state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", &addr);
    tracing::info!("API: http://{}/products", &addr);
    tracing::info!("Docs: http://{}/api-docs/openapi.json", &addr);

    axum::serve(listener, app).await?;
    Ok(())
}
