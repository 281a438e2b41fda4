//! In-memory products

use async_trait::async_trait;
use jiff::Timestamp;

use crate::{
    domain::products::{
        errors::ProductsServiceError,
        models::{NewProduct, Product, ProductUuid},
        service::{ProductsService, validate_new_product},
    },
    memory::InMemoryStore,
    pagination::{Page, PageRequest},
};

#[async_trait]
impl ProductsService for InMemoryStore {
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        self.tables()
            .await
            .products
            .iter()
            .find(|row| row.uuid == product)
            .cloned()
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn list_products(
        &self,
        page: PageRequest,
    ) -> Result<Page<Product>, ProductsServiceError> {
        let tables = self.tables().await;

        let offset = usize::try_from(page.offset())?;
        let limit = usize::try_from(page.limit())?;

        let items = tables
            .products
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok(Page::new(page, items, tables.products.len() as u64))
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        validate_new_product(&product)?;

        let mut tables = self.tables().await;

        if tables.products.iter().any(|row| row.uuid == product.uuid) {
            return Err(ProductsServiceError::AlreadyExists);
        }

        let now = Timestamp::now();

        let created = Product {
            uuid: product.uuid,
            price: product.price,
            stock_quantity: product.stock_quantity,
            created_at: now,
            updated_at: now,
        };

        tables.products.push(created.clone());

        Ok(created)
    }
}
