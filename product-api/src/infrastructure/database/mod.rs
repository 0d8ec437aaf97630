pub mod mysql;

use std::sync::Arc;

use crate::config::{Config, StoreBackend};
use crate::error::AppError;
use crate::infrastructure::repository::{InMemoryProductRepository, MySqlProductRepository, ProductRepository};

/// 按配置创建存储, 失败时服务不应启动
pub async fn init_repository(config: &Config) -> Result<Arc<dyn ProductRepository>, AppError> {
    match config.database.backend {
        StoreBackend::Mysql => {
            let pool = mysql::init_mysql(config).await?;
            Ok(Arc::new(MySqlProductRepository::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory product store, data is lost on restart");
            Ok(Arc::new(InMemoryProductRepository::new()))
        }
    }
}
