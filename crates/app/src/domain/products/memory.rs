//! In-memory products store.

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::RwLock;

use crate::domain::products::{
    ProductsService,
    data::{NewProduct, ProductUpdate},
    errors::ProductsServiceError,
    records::{ProductRecord, ProductUuid},
};

/// Products kept in process memory.
///
/// Keys are v7 UUIDs, so iterating the map yields products in creation order.
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryProductsService {
    products: Arc<RwLock<BTreeMap<ProductUuid, ProductRecord>>>,
}

impl MemoryProductsService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductsService for MemoryProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        self.products
            .read()
            .await
            .get(&product)
            .cloned()
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let uuid = ProductUuid::new();
        let record = ProductRecord::create(uuid, product, Timestamp::now());

        let mut products = self.products.write().await;

        if products.contains_key(&uuid) {
            return Err(ProductsServiceError::AlreadyExists);
        }

        products.insert(uuid, record.clone());

        Ok(record)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut products = self.products.write().await;

        let record = products
            .get_mut(&product)
            .ok_or(ProductsServiceError::NotFound)?;

        record.apply(update, Timestamp::now());

        Ok(record.clone())
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        self.products
            .write()
            .await
            .remove(&product)
            .map(|_removed| ())
            .ok_or(ProductsServiceError::NotFound)
    }
}
