//! Stock Repository

use sqlx::{Postgres, Row, Transaction, query, query_scalar};

use crate::{
    database::to_db_quantity,
    domain::{products::models::ProductUuid, stock::models::StockStatusCounts},
};

const READ_STOCK_SQL: &str = include_str!("sql/read_stock.sql");
const WRITE_STOCK_SQL: &str = include_str!("sql/write_stock.sql");
const TAKE_STOCK_SQL: &str = include_str!("sql/take_stock.sql");
const RETURN_STOCK_SQL: &str = include_str!("sql/return_stock.sql");
const TAKE_STOCK_CLAMPED_SQL: &str = include_str!("sql/take_stock_clamped.sql");
const COUNT_STOCK_STATUS_SQL: &str = include_str!("sql/count_stock_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStockRepository;

impl PgStockRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn read_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<u32>, sqlx::Error> {
        let stock: Option<i32> = query_scalar(READ_STOCK_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        stock.map(decode_stock).transpose()
    }

    pub(crate) async fn write_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        target: i32,
    ) -> Result<u32, sqlx::Error> {
        let stock: i32 = query_scalar(WRITE_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(target)
            .fetch_one(&mut **tx)
            .await?;

        decode_stock(stock)
    }

    /// Guarded decrement. `None` when the product is missing or short.
    pub(crate) async fn take_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Option<u32>, sqlx::Error> {
        let stock: Option<i32> = query_scalar(TAKE_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(to_db_quantity(quantity, "quantity")?)
            .fetch_optional(&mut **tx)
            .await?;

        stock.map(decode_stock).transpose()
    }

    pub(crate) async fn return_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u32, sqlx::Error> {
        let stock: i32 = query_scalar(RETURN_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(to_db_quantity(quantity, "quantity")?)
            .fetch_one(&mut **tx)
            .await?;

        decode_stock(stock)
    }

    pub(crate) async fn take_stock_clamped(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u32, sqlx::Error> {
        let stock: i32 = query_scalar(TAKE_STOCK_CLAMPED_SQL)
            .bind(product.into_uuid())
            .bind(to_db_quantity(quantity, "quantity")?)
            .fetch_one(&mut **tx)
            .await?;

        decode_stock(stock)
    }

    pub(crate) async fn count_by_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        low_threshold: u32,
    ) -> Result<StockStatusCounts, sqlx::Error> {
        let row = query(COUNT_STOCK_STATUS_SQL)
            .bind(to_db_quantity(low_threshold, "low_threshold")?)
            .fetch_one(&mut **tx)
            .await?;

        Ok(StockStatusCounts {
            total: decode_count(row.try_get("total")?, "total")?,
            in_stock: decode_count(row.try_get("in_stock")?, "in_stock")?,
            low_stock: decode_count(row.try_get("low_stock")?, "low_stock")?,
            out_of_stock: decode_count(row.try_get("out_of_stock")?, "out_of_stock")?,
        })
    }
}

fn decode_stock(value: i32) -> Result<u32, sqlx::Error> {
    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: "stock_quantity".to_string(),
        source: Box::new(e),
    })
}

fn decode_count(value: i64, col: &str) -> Result<u64, sqlx::Error> {
    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
