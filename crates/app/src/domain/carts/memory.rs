//! In-memory cart lines

use async_trait::async_trait;
use jiff::Timestamp;

use crate::{
    database::to_db_quantity,
    domain::{
        carts::{
            models::{CartLine, CartLineUuid, MergedLine, NewCartLine},
            repository::CartLinesRepository,
        },
        customers::CustomerUuid,
    },
    memory::InMemoryStore,
};

#[async_trait]
impl CartLinesRepository for InMemoryStore {
    async fn get_line(&self, line: CartLineUuid) -> Result<Option<CartLine>, sqlx::Error> {
        Ok(self
            .tables()
            .await
            .cart_lines
            .iter()
            .find(|row| row.uuid == line)
            .cloned())
    }

    async fn list_lines(&self, customer: CustomerUuid) -> Result<Vec<CartLine>, sqlx::Error> {
        Ok(self
            .tables()
            .await
            .cart_lines
            .iter()
            .filter(|row| row.customer_uuid == customer)
            .cloned()
            .collect())
    }

    async fn merge_line(&self, line: NewCartLine) -> Result<MergedLine, sqlx::Error> {
        let mut tables = self.tables().await;
        let now = Timestamp::now();

        if !tables.products.iter().any(|row| row.uuid == line.product_uuid) {
            return Err(sqlx::Error::RowNotFound);
        }

        to_db_quantity(line.quantity, "quantity")?;

        if let Some(existing) = tables
            .cart_lines
            .iter_mut()
            .find(|row| row.same_variant(&line))
        {
            // Same bound as the INTEGER column the merge adds into.
            let merged = existing
                .quantity
                .checked_add(line.quantity)
                .unwrap_or(u32::MAX);

            to_db_quantity(merged, "quantity")?;

            existing.quantity = merged;
            existing.updated_at = now;

            return Ok(MergedLine {
                line: existing.clone(),
                merged: true,
            });
        }

        let created = CartLine {
            uuid: line.uuid,
            customer_uuid: line.customer_uuid,
            product_uuid: line.product_uuid,
            quantity: line.quantity,
            selected_color: line.selected_color,
            selected_size: line.selected_size,
            price_at_addition: line.price_at_addition,
            created_at: now,
            updated_at: now,
        };

        tables.cart_lines.push(created.clone());

        Ok(MergedLine {
            line: created,
            merged: false,
        })
    }

    async fn update_quantity(
        &self,
        line: CartLineUuid,
        quantity: u32,
    ) -> Result<Option<CartLine>, sqlx::Error> {
        to_db_quantity(quantity, "quantity")?;

        let mut tables = self.tables().await;

        Ok(tables
            .cart_lines
            .iter_mut()
            .find(|row| row.uuid == line)
            .map(|row| {
                row.quantity = quantity;
                row.updated_at = Timestamp::now();
                row.clone()
            }))
    }

    async fn delete_line(&self, line: CartLineUuid) -> Result<Option<CartLine>, sqlx::Error> {
        let mut tables = self.tables().await;

        let position = tables.cart_lines.iter().position(|row| row.uuid == line);

        Ok(position.map(|index| tables.cart_lines.remove(index)))
    }

    async fn delete_lines(
        &self,
        customer: CustomerUuid,
        lines: Vec<CartLineUuid>,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        let mut tables = self.tables().await;

        let (deleted, kept): (Vec<_>, Vec<_>) = tables
            .cart_lines
            .drain(..)
            .partition(|row| row.customer_uuid == customer && lines.contains(&row.uuid));

        tables.cart_lines = kept;

        Ok(deleted)
    }

    async fn clear_lines(&self, customer: CustomerUuid) -> Result<Vec<CartLine>, sqlx::Error> {
        let mut tables = self.tables().await;

        let (deleted, kept): (Vec<_>, Vec<_>) = tables
            .cart_lines
            .drain(..)
            .partition(|row| row.customer_uuid == customer);

        tables.cart_lines = kept;

        Ok(deleted)
    }
}
