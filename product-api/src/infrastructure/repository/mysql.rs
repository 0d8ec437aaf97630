use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use sqlx::MySqlPool;

use super::ProductRepository;
use crate::domain::models::{NewProduct, Product};
use crate::error::AppError;

const SELECT_COLUMNS: &str = "SELECT id, name, price, description, createdAt, updatedAt FROM product";

pub struct MySqlProductRepository {
    pool: MySqlPool,
}

impl MySqlProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// 列精度为微秒, 返回值与读回的记录保持一致
fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

#[async_trait]
impl ProductRepository for MySqlProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    async fn insert(&self, new_product: NewProduct) -> Result<Product, AppError> {
        let now = now_micros();

        let result = sqlx::query(
            r#"
            INSERT INTO product (name, price, description, createdAt, updatedAt)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
            .bind(&new_product.name)
            .bind(new_product.price)
            .bind(&new_product.description)
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_id() as i64;
        tracing::debug!(id, "product row inserted");

        Ok(Product::new(id, new_product, now))
    }

    async fn save(&self, mut product: Product) -> Result<Product, AppError> {
        product.updated_at = now_micros();

        let result = sqlx::query(
            r#"
            UPDATE product
            SET name = ?, price = ?, description = ?, updatedAt = ?
            WHERE id = ?
            "#,
        )
            .bind(&product.name)
            .bind(product.price)
            .bind(&product.description)
            .bind(product.updated_at)
            .bind(product.id)
            .execute(&self.pool)
            .await?;

        // updatedAt 每次都会变化, 0 行说明记录已被并发删除
        if result.rows_affected() == 0 {
            return Err(AppError::StoreUnavailable(format!(
                "product {} no longer exists",
                product.id
            )));
        }

        Ok(product)
    }

    async fn remove(&self, product: Product) -> Result<Product, AppError> {
        sqlx::query(r#"DELETE FROM product WHERE id = ?"#)
            .bind(product.id)
            .execute(&self.pool)
            .await?;

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_micros_fits_datetime6() {
        for _ in 0..100 {
            assert_eq!(now_micros().timestamp_subsec_nanos() % 1_000, 0);
        }
    }
}
