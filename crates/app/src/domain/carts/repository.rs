//! Cart Lines Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, query_as, postgres::PgRow};
use uuid::Uuid;

use crate::{
    database::{Db, to_db_quantity, try_get_quantity},
    domain::{
        carts::models::{CartLine, CartLineUuid, MergedLine, NewCartLine},
        customers::CustomerUuid,
        products::models::ProductUuid,
    },
};

const GET_CART_LINE_SQL: &str = include_str!("sql/get_cart_line.sql");
const LIST_CART_LINES_SQL: &str = include_str!("sql/list_cart_lines.sql");
const MERGE_CART_LINE_SQL: &str = include_str!("sql/merge_cart_line.sql");
const UPDATE_CART_LINE_QUANTITY_SQL: &str = include_str!("sql/update_cart_line_quantity.sql");
const DELETE_CART_LINE_SQL: &str = include_str!("sql/delete_cart_line.sql");
const DELETE_CART_LINES_SQL: &str = include_str!("sql/delete_cart_lines.sql");
const CLEAR_CART_LINES_SQL: &str = include_str!("sql/clear_cart_lines.sql");

/// Storage for cart lines. Each call is one committed step.
#[automock]
#[async_trait]
pub trait CartLinesRepository: Send + Sync {
    async fn get_line(&self, line: CartLineUuid) -> Result<Option<CartLine>, sqlx::Error>;

    async fn list_lines(&self, customer: CustomerUuid) -> Result<Vec<CartLine>, sqlx::Error>;

    /// Insert the line, or add its quantity to the line with the same
    /// customer, product, color and size.
    async fn merge_line(&self, line: NewCartLine) -> Result<MergedLine, sqlx::Error>;

    async fn update_quantity(
        &self,
        line: CartLineUuid,
        quantity: u32,
    ) -> Result<Option<CartLine>, sqlx::Error>;

    /// Delete one line, returning it if it existed.
    async fn delete_line(&self, line: CartLineUuid) -> Result<Option<CartLine>, sqlx::Error>;

    /// Delete the listed lines belonging to `customer`, returning those deleted.
    async fn delete_lines(
        &self,
        customer: CustomerUuid,
        lines: Vec<CartLineUuid>,
    ) -> Result<Vec<CartLine>, sqlx::Error>;

    /// Delete every line belonging to `customer`, returning those deleted.
    async fn clear_lines(&self, customer: CustomerUuid) -> Result<Vec<CartLine>, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgCartLinesRepository {
    db: Db,
}

impl PgCartLinesRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartLinesRepository for PgCartLinesRepository {
    async fn get_line(&self, line: CartLineUuid) -> Result<Option<CartLine>, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let line = query_as::<Postgres, CartLine>(GET_CART_LINE_SQL)
            .bind(line.into_uuid())
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(line)
    }

    async fn list_lines(&self, customer: CustomerUuid) -> Result<Vec<CartLine>, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let lines = query_as::<Postgres, CartLine>(LIST_CART_LINES_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(lines)
    }

    async fn merge_line(&self, line: NewCartLine) -> Result<MergedLine, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let stored = query_as::<Postgres, CartLine>(MERGE_CART_LINE_SQL)
            .bind(line.uuid.into_uuid())
            .bind(line.customer_uuid.into_uuid())
            .bind(line.product_uuid.into_uuid())
            .bind(to_db_quantity(line.quantity, "quantity")?)
            .bind(line.selected_color)
            .bind(line.selected_size)
            .bind(line.price_at_addition)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(MergedLine {
            merged: stored.uuid != line.uuid,
            line: stored,
        })
    }

    async fn update_quantity(
        &self,
        line: CartLineUuid,
        quantity: u32,
    ) -> Result<Option<CartLine>, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let line = query_as::<Postgres, CartLine>(UPDATE_CART_LINE_QUANTITY_SQL)
            .bind(line.into_uuid())
            .bind(to_db_quantity(quantity, "quantity")?)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(line)
    }

    async fn delete_line(&self, line: CartLineUuid) -> Result<Option<CartLine>, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let line = query_as::<Postgres, CartLine>(DELETE_CART_LINE_SQL)
            .bind(line.into_uuid())
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(line)
    }

    async fn delete_lines(
        &self,
        customer: CustomerUuid,
        lines: Vec<CartLineUuid>,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        let uuids: Vec<Uuid> = lines.into_iter().map(CartLineUuid::into_uuid).collect();

        let mut tx = self.db.begin().await?;

        let deleted = query_as::<Postgres, CartLine>(DELETE_CART_LINES_SQL)
            .bind(customer.into_uuid())
            .bind(uuids)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(deleted)
    }

    async fn clear_lines(&self, customer: CustomerUuid) -> Result<Vec<CartLine>, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let deleted = query_as::<Postgres, CartLine>(CLEAR_CART_LINES_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(deleted)
    }
}

impl<'r> FromRow<'r, PgRow> for CartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartLineUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_get_quantity(row, "quantity")?,
            selected_color: row.try_get("selected_color")?,
            selected_size: row.try_get("selected_size")?,
            price_at_addition: row.try_get::<Decimal, _>("price_at_addition")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
