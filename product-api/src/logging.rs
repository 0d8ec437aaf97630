use crate::config::Config;
use crate::error::AppError;
use tracing_subscriber::{
    fmt, prelude::*, registry, EnvFilter,
};

/// 初始化全局 tracing subscriber
///
/// RUST_LOG 优先, 否则使用配置中的级别。`logging.format = "json"` 输出结构化日志并带上当前 span,
/// 其他取值一律按 pretty 格式输出。
pub fn init_logging(config: &Config) -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info,sqlx=warn", config.logging.level)));

    let formatting_layer = match config.logging.format.as_str() {
        "json" => fmt::layer().json().with_current_span(true).boxed(),
        _ => fmt::layer().pretty().boxed(),
    };

    registry()
        .with(env_filter)
        .with(formatting_layer)
        .try_init()
        .map_err(|e| AppError::Internal(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_only_once() {
        let mut config = Config::default();
        config.logging.format = "json".to_string();

        init_logging(&config).unwrap();
        assert!(matches!(init_logging(&config), Err(AppError::Internal(_))));
    }
}
