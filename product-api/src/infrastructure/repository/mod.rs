//! 商品存储适配层
//!
//! 业务层只依赖 [`ProductRepository`], 具体实现由启动配置决定。

pub mod memory;
pub mod mysql;

use async_trait::async_trait;

use crate::domain::models::{NewProduct, Product};
use crate::error::AppError;

pub use memory::InMemoryProductRepository;
pub use mysql::MySqlProductRepository;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 全部商品, 按 id 升序
    async fn list_all(&self) -> Result<Vec<Product>, AppError>;

    /// 不存在时返回 `Ok(None)`, 不是错误
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError>;

    /// 分配 id 和时间戳后写入, 返回落库后的记录
    async fn insert(&self, new_product: NewProduct) -> Result<Product, AppError>;

    /// 覆盖已存在记录的可变字段并刷新 `updated_at`
    async fn save(&self, product: Product) -> Result<Product, AppError>;

    /// 删除并原样返回被删除的记录
    async fn remove(&self, product: Product) -> Result<Product, AppError>;
}
