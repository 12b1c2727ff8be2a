//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    #[tracing::instrument(name = "products.pg.get", skip_all, fields(product_uuid = %product))]
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_product(&mut tx, ProductUuid::new(), &product)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    #[tracing::instrument(
        name = "products.pg.update",
        skip_all,
        fields(product_uuid = %product)
    )]
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(name = "products.pg.delete", skip_all, fields(product_uuid = %product))]
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            tracing::debug!("no product row matched");

            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

/// Storage for product records.
///
/// Handlers only ever talk to this trait, so any backing store can be injected
/// through [`AppContext`](crate::context::AppContext).
#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products, oldest first.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product under a freshly assigned UUID.
    async fn create_product(&self, product: NewProduct)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Merges the fields present in `update` into the product with the given UUID.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Deletes a product with the given UUID.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn pen() -> NewProduct {
        NewProduct {
            name: "Pen".to_string(),
            price: Decimal::from(10),
            quantity: Decimal::from(5),
            image: "pen.png".to_string(),
        }
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the Postgres test container"]
    async fn create_product_assigns_uuid_and_stores_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx.products.create_product(pen()).await?;

        assert_eq!(product.name, "Pen");
        assert_eq!(product.price, Decimal::from(10));
        assert_eq!(product.quantity, Decimal::from(5));
        assert_eq!(product.image, "pen.png");

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the Postgres test container"]
    async fn get_product_returns_created_product() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(pen()).await?;
        let product = ctx.products.get_product(created.uuid).await?;

        assert_eq!(product, created);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the Postgres test container"]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the Postgres test container"]
    async fn list_products_returns_products_in_creation_order() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx.products.create_product(pen()).await?;
        let second = ctx
            .products
            .create_product(NewProduct {
                name: "Pencil".to_string(),
                ..pen()
            })
            .await?;

        let uuids: Vec<ProductUuid> = ctx
            .products
            .list_products()
            .await?
            .iter()
            .map(|p| p.uuid)
            .collect();

        assert_eq!(uuids, vec![first.uuid, second.uuid]);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the Postgres test container"]
    async fn list_products_empty_when_none_created() -> TestResult {
        let ctx = TestContext::new().await;

        let products = ctx.products.list_products().await?;

        assert!(products.is_empty());

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the Postgres test container"]
    async fn update_product_merges_present_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(pen()).await?;

        let updated = ctx
            .products
            .update_product(
                created.uuid,
                ProductUpdate {
                    price: Some(Decimal::from(12)),
                    image: Some("pen-blue.png".to_string()),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.uuid, created.uuid);
        assert_eq!(updated.name, "Pen");
        assert_eq!(updated.price, Decimal::from(12));
        assert_eq!(updated.quantity, Decimal::from(5));
        assert_eq!(updated.image, "pen-blue.png");
        assert_eq!(updated.created_at, created.created_at);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the Postgres test container"]
    async fn update_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(ProductUuid::new(), ProductUpdate::default())
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the Postgres test container"]
    async fn create_product_keeps_fractional_amounts() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .products
            .create_product(NewProduct {
                price: Decimal::new(999, 2),
                quantity: Decimal::new(25, 1),
                ..pen()
            })
            .await?;

        let fetched = ctx.products.get_product(created.uuid).await?;

        assert_eq!(fetched.price, Decimal::new(999, 2));
        assert_eq!(fetched.quantity, Decimal::new(25, 1));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the Postgres test container"]
    async fn delete_product_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(pen()).await?;

        ctx.products.delete_product(created.uuid).await?;

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(remaining, 0, "the row should be gone, not soft-deleted");

        let result = ctx.products.get_product(created.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the Postgres test container"]
    async fn delete_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.delete_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
