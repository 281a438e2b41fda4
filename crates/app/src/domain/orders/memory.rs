//! In-memory orders

use async_trait::async_trait;
use jiff::Timestamp;

use crate::{
    domain::{
        customers::CustomerUuid,
        orders::{
            models::{NewOrder, NewOrderItem, Order, OrderItem, OrderStatus, OrderUuid},
            repository::OrdersRepository,
        },
    },
    memory::InMemoryStore,
};

#[async_trait]
impl OrdersRepository for InMemoryStore {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, sqlx::Error> {
        let mut tables = self.tables().await;
        let now = Timestamp::now();

        let created = Order {
            uuid: order.uuid,
            customer_uuid: order.customer_uuid,
            address_uuid: order.address_uuid,
            total_amount: order.total_amount,
            shipping_fee: order.shipping_fee,
            status: OrderStatus::Pending,
            payment_method: order.payment_method,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        tables.orders.push(created.clone());

        Ok(created)
    }

    async fn insert_items(
        &self,
        order: OrderUuid,
        items: Vec<NewOrderItem>,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        let mut tables = self.tables().await;

        let known_products = items.iter().all(|item| {
            tables
                .products
                .iter()
                .any(|product| product.uuid == item.product_uuid)
        });

        if !known_products {
            return Err(sqlx::Error::RowNotFound);
        }

        let target = tables
            .orders
            .iter_mut()
            .find(|row| row.uuid == order)
            .ok_or(sqlx::Error::RowNotFound)?;

        let created: Vec<OrderItem> = items
            .into_iter()
            .map(|item| OrderItem {
                uuid: item.uuid,
                order_uuid: order,
                product_uuid: item.product_uuid,
                quantity: item.quantity,
                price: item.price,
                selected_color: item.selected_color,
                selected_size: item.selected_size,
            })
            .collect();

        target.items.extend(created.iter().cloned());

        Ok(created)
    }

    async fn delete_order(&self, order: OrderUuid) -> Result<u64, sqlx::Error> {
        let mut tables = self.tables().await;
        let before = tables.orders.len();

        tables.orders.retain(|row| row.uuid != order);

        Ok((before - tables.orders.len()) as u64)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Option<Order>, sqlx::Error> {
        Ok(self
            .tables()
            .await
            .orders
            .iter()
            .find(|row| row.uuid == order)
            .cloned())
    }

    async fn list_orders(&self, customer: CustomerUuid) -> Result<Vec<Order>, sqlx::Error> {
        Ok(self
            .tables()
            .await
            .orders
            .iter()
            .rev()
            .filter(|row| row.customer_uuid == customer)
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, sqlx::Error> {
        let mut tables = self.tables().await;

        Ok(tables
            .orders
            .iter_mut()
            .find(|row| row.uuid == order)
            .map(|row| {
                row.status = status;
                row.updated_at = Timestamp::now();
                row.clone()
            }))
    }
}
