use std::sync::Arc;
use tracing::instrument;

use crate::domain::models::{CreateProductRequest, Product, UpdateProductRequest};
use crate::error::AppError;
use crate::infrastructure::repository::ProductRepository;

pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Product>, AppError> {
        let products = self.repository.list_all().await?;
        tracing::debug!("Fetched {} products", products.len());
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn get_one(&self, id: i64) -> Result<Option<Product>, AppError> {
        self.repository.find_by_id(id).await
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: CreateProductRequest) -> Result<Product, AppError> {
        let product = self.repository.insert(request.into()).await?;
        tracing::info!(id = product.id, "Product created");
        Ok(product)
    }

    /// 部分更新
    ///
    /// 只有"真值"会覆盖原字段: 空字符串和 0 等同于未传。
    /// 老客户端依赖这一行为, 不要改成显式置空。
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i64, request: UpdateProductRequest) -> Result<Option<Product>, AppError> {
        let Some(mut product) = self.repository.find_by_id(id).await? else {
            tracing::warn!("Product {} not found for update", id);
            return Ok(None);
        };

        merge_update(&mut product, request);

        let product = self.repository.save(product).await?;
        tracing::info!("Product {} updated", id);
        Ok(Some(product))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<Option<Product>, AppError> {
        let Some(product) = self.repository.find_by_id(id).await? else {
            tracing::warn!("Product {} not found for delete", id);
            return Ok(None);
        };

        let removed = self.repository.remove(product).await?;
        tracing::info!("Product {} removed", id);
        Ok(Some(removed))
    }
}

fn merge_update(product: &mut Product, request: UpdateProductRequest) {
    if let Some(name) = request.name.filter(|name| !name.is_empty()) {
        product.name = name;
    }

    if let Some(price) = request.price.filter(|price| *price != 0.0 && !price.is_nan()) {
        product.price = price;
    }

    if let Some(description) = request.description.filter(|description| !description.is_empty()) {
        product.description = Some(description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repository::{InMemoryProductRepository, MockProductRepository};

    fn service() -> ProductService {
        ProductService::new(Arc::new(InMemoryProductRepository::new()))
    }

    fn create_request(name: &str, price: f64) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            price,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_one() {
        let service = service();

        let created = service
            .create(CreateProductRequest {
                name: "Pen".to_string(),
                price: 2.0,
                description: Some("blue ink".to_string()),
            })
            .await
            .unwrap();

        let fetched = service.get_one(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Pen");
        assert_eq!(fetched.price, 2.0);
        assert_eq!(fetched.description.as_deref(), Some("blue ink"));
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_created_ids_are_unique() {
        let service = service();

        let a = service.create(create_request("A", 1.0)).await.unwrap();
        let b = service.create(create_request("B", 1.0)).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(service.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_one_absent() {
        assert!(service().get_one(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_ignores_falsy_values() {
        let service = service();
        let product = service.create(create_request("A", 10.0)).await.unwrap();

        let updated = service
            .update(product.id, UpdateProductRequest { price: Some(0.0), ..Default::default() })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.price, 10.0);

        let updated = service
            .update(product.id, UpdateProductRequest { name: Some(String::new()), ..Default::default() })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "A");

        let updated = service
            .update(product.id, UpdateProductRequest { description: Some(String::new()), ..Default::default() })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.description, None);
    }

    #[tokio::test]
    async fn test_update_merges_present_fields() {
        let service = service();
        let product = service.create(create_request("A", 10.0)).await.unwrap();

        let updated = service
            .update(
                product.id,
                UpdateProductRequest {
                    name: None,
                    price: Some(3.0),
                    description: Some("refill".to_string()),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "A");
        assert_eq!(updated.price, 3.0);
        assert_eq!(updated.description.as_deref(), Some("refill"));
        assert_eq!(updated.created_at, product.created_at);
    }

    #[tokio::test]
    async fn test_update_absent() {
        let result = service()
            .update(42, UpdateProductRequest { price: Some(1.0), ..Default::default() })
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let service = service();
        let product = service.create(create_request("A", 1.0)).await.unwrap();

        let removed = service.delete(product.id).await.unwrap();
        assert_eq!(removed, Some(product.clone()));

        assert!(service.delete(product.id).await.unwrap().is_none());
        assert!(service.get_one(product.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut repository = MockProductRepository::new();
        repository
            .expect_list_all()
            .times(1)
            .returning(|| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let service = ProductService::new(Arc::new(repository));
        let result = service.get_all().await;

        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_delete_absent_does_not_touch_remove() {
        let mut repository = MockProductRepository::new();
        repository.expect_find_by_id().withf(|id| *id == 7).times(1).returning(|_| Ok(None));
        repository.expect_remove().never();

        let service = ProductService::new(Arc::new(repository));
        assert!(service.delete(7).await.unwrap().is_none());
    }
}
