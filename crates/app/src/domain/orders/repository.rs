//! Orders Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{Db, to_db_quantity, try_get_quantity},
    domain::{
        customers::{AddressUuid, CustomerUuid},
        orders::models::{
            NewOrder, NewOrderItem, Order, OrderItem, OrderItemUuid, OrderStatus, OrderUuid,
        },
        products::models::ProductUuid,
    },
};

const INSERT_ORDER_SQL: &str = include_str!("sql/insert_order.sql");
const INSERT_ORDER_ITEM_SQL: &str = include_str!("sql/insert_order_item.sql");
const DELETE_ORDER_SQL: &str = include_str!("sql/delete_order.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");

/// Storage for orders and their items. Each call is one committed step.
#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Insert the order row alone; the returned order has no items.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, sqlx::Error>;

    /// Insert all items for an order; either every item is stored or none is.
    async fn insert_items(
        &self,
        order: OrderUuid,
        items: Vec<NewOrderItem>,
    ) -> Result<Vec<OrderItem>, sqlx::Error>;

    /// Delete an order and its items, returning the number of orders removed.
    async fn delete_order(&self, order: OrderUuid) -> Result<u64, sqlx::Error>;

    async fn get_order(&self, order: OrderUuid) -> Result<Option<Order>, sqlx::Error>;

    /// A customer's orders, newest first, with their items.
    async fn list_orders(&self, customer: CustomerUuid) -> Result<Vec<Order>, sqlx::Error>;

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgOrdersRepository {
    db: Db,
}

impl PgOrdersRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

async fn attach_items(
    tx: &mut Transaction<'_, Postgres>,
    orders: &mut [Order],
) -> Result<(), sqlx::Error> {
    let uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid.into_uuid()).collect();

    let items = query_as::<Postgres, OrderItem>(GET_ORDER_ITEMS_SQL)
        .bind(uuids)
        .fetch_all(&mut **tx)
        .await?;

    for item in items {
        if let Some(order) = orders.iter_mut().find(|order| order.uuid == item.order_uuid) {
            order.items.push(item);
        }
    }

    Ok(())
}

#[async_trait]
impl OrdersRepository for PgOrdersRepository {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let created = query_as::<Postgres, Order>(INSERT_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.customer_uuid.into_uuid())
            .bind(order.address_uuid.into_uuid())
            .bind(order.total_amount)
            .bind(order.shipping_fee)
            .bind(order.payment_method)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn insert_items(
        &self,
        order: OrderUuid,
        items: Vec<NewOrderItem>,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        let mut tx = self.db.begin().await?;
        let mut created = Vec::with_capacity(items.len());

        for item in items {
            let row = query_as::<Postgres, OrderItem>(INSERT_ORDER_ITEM_SQL)
                .bind(item.uuid.into_uuid())
                .bind(order.into_uuid())
                .bind(item.product_uuid.into_uuid())
                .bind(to_db_quantity(item.quantity, "quantity")?)
                .bind(item.price)
                .bind(item.selected_color)
                .bind(item.selected_size)
                .fetch_one(&mut *tx)
                .await?;

            created.push(row);
        }

        tx.commit().await?;

        Ok(created)
    }

    async fn delete_order(&self, order: OrderUuid) -> Result<u64, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order.into_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(rows_affected)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Option<Order>, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let Some(found) = query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.commit().await?;

            return Ok(None);
        };

        let mut orders = [found];

        attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        let [found] = orders;

        Ok(Some(found))
    }

    async fn list_orders(&self, customer: CustomerUuid) -> Result<Vec<Order>, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let mut orders = query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut *tx)
            .await?;

        attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let Some(updated) = query_as::<Postgres, Order>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.commit().await?;

            return Ok(None);
        };

        let mut orders = [updated];

        attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        let [updated] = orders;

        Ok(Some(updated))
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            address_uuid: AddressUuid::from_uuid(row.try_get("address_uuid")?),
            total_amount: row.try_get::<Decimal, _>("total_amount")?,
            shipping_fee: row.try_get::<Decimal, _>("shipping_fee")?,
            status,
            payment_method: row.try_get("payment_method")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_get_quantity(row, "quantity")?,
            price: row.try_get::<Decimal, _>("price")?,
            selected_color: row.try_get("selected_color")?,
            selected_size: row.try_get("selected_size")?,
        })
    }
}
