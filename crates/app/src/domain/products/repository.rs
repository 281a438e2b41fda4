//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::{
    database::{to_db_quantity, try_get_quantity},
    domain::products::models::{NewProduct, Product, ProductUuid},
    pagination::PageRequest,
};

const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: PageRequest,
    ) -> Result<(Vec<Product>, u64), sqlx::Error> {
        let limit = i64::try_from(page.limit()).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let offset =
            i64::try_from(page.offset()).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        let products = query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_PRODUCTS_SQL)
            .fetch_one(&mut **tx)
            .await?;

        let total = u64::try_from(total).map_err(|e| sqlx::Error::ColumnDecode {
            index: "total".to_string(),
            source: Box::new(e),
        })?;

        Ok((products, total))
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.price)
            .bind(to_db_quantity(product.stock_quantity, "stock_quantity")?)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            price: row.try_get::<Decimal, _>("price")?,
            stock_quantity: try_get_quantity(row, "stock_quantity")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
