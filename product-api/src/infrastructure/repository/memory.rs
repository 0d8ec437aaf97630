use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::ProductRepository;
use crate::domain::models::{NewProduct, Product};
use crate::error::AppError;

#[derive(Debug)]
struct Table {
    rows: BTreeMap<i64, Product>,
    next_id: i64,
}

/// 进程内商品表, 自增 id 从 1 开始
#[derive(Debug)]
pub struct InMemoryProductRepository {
    table: RwLock<Table>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(&self, new_product: NewProduct) -> Result<Product, AppError> {
        let mut table = self.table.write().await;

        let id = table.next_id;
        table.next_id += 1;

        let product = Product::new(id, new_product, Utc::now());
        table.rows.insert(id, product.clone());

        Ok(product)
    }

    async fn save(&self, mut product: Product) -> Result<Product, AppError> {
        let mut table = self.table.write().await;

        // 并发删除后再保存: 不复活记录, 按存储失败处理
        let stored = table
            .rows
            .get_mut(&product.id)
            .ok_or_else(|| AppError::StoreUnavailable(format!("product {} no longer exists", product.id)))?;

        product.updated_at = Utc::now();
        stored.name = product.name.clone();
        stored.price = product.price;
        stored.description = product.description.clone();
        stored.updated_at = product.updated_at;

        Ok(stored.clone())
    }

    async fn remove(&self, product: Product) -> Result<Product, AppError> {
        let mut table = self.table.write().await;
        table.rows.remove(&product.id);
        Ok(product)
    }
}
