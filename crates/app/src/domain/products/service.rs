//! Products service.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;

use crate::{
    database::Db,
    domain::products::{
        errors::ProductsServiceError,
        models::{NewProduct, Product, ProductUuid},
        repository::PgProductsRepository,
    },
    pagination::{Page, PageRequest},
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
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn list_products(
        &self,
        page: PageRequest,
    ) -> Result<Page<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let (products, total) = self.repository.list_products(&mut tx, page).await?;

        tx.commit().await?;

        Ok(Page::new(page, products, total))
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        validate_new_product(&product)?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }
}

pub(crate) fn validate_new_product(product: &NewProduct) -> Result<(), ProductsServiceError> {
    if product.price < Decimal::ZERO {
        return Err(ProductsServiceError::InvalidArgument {
            field: "price",
            reason: "must not be negative",
        });
    }

    if i32::try_from(product.stock_quantity).is_err() {
        return Err(ProductsServiceError::InvalidArgument {
            field: "stock_quantity",
            reason: "is too large",
        });
    }

    Ok(())
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Retrieve one page of products.
    async fn list_products(&self, page: PageRequest)
    -> Result<Page<Product>, ProductsServiceError>;

    /// Creates a new product with the given UUID, price and opening stock.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;
}
