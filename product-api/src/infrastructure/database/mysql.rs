use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

use crate::config::Config;
use crate::error::AppError;

pub async fn init_mysql(config: &Config) -> Result<MySqlPool, AppError> {
    tracing::info!(
        max_connections = config.database.max_connections,
        "Initializing MySQL connection pool"
    );

    let pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    if config.database.auto_migrate {
        init_schema(&pool).await?;
    }

    Ok(pool)
}

// 列名沿用旧表的驼峰命名, 已有数据可直接接入
pub async fn init_schema(pool: &MySqlPool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS product (
            id BIGINT AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            price DOUBLE NOT NULL,
            description TEXT NULL,
            createdAt DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
            updatedAt DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6) ON UPDATE CURRENT_TIMESTAMP(6)
        )
        "#,
    )
        .execute(pool)
        .await?;

    tracing::info!("Table `product` is ready");
    Ok(())
}
