//! Carts service.
//!
//! Keeps a shopper's cart lines and the stock ledger in step. Every step is
//! committed on its own; when a later step fails the service undoes the
//! stock side with a compensating delta.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::domain::{
    carts::{
        errors::CartsServiceError,
        models::{AddCartLine, CartLine, CartLineUuid, MergedLine, NewCartLine},
        repository::CartLinesRepository,
    },
    customers::CustomerUuid,
    policies::ReservationPolicy,
    products::{ProductsService, models::ProductUuid},
    stock::{StockKeeper, StockLedgerError},
};

#[derive(Clone)]
pub struct LedgerCartsService {
    products: Arc<dyn ProductsService>,
    lines: Arc<dyn CartLinesRepository>,
    keeper: StockKeeper,
    reservation: ReservationPolicy,
}

impl std::fmt::Debug for LedgerCartsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerCartsService")
            .field("keeper", &self.keeper)
            .field("reservation", &self.reservation)
            .finish_non_exhaustive()
    }
}

impl LedgerCartsService {
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductsService>,
        lines: Arc<dyn CartLinesRepository>,
        keeper: StockKeeper,
        reservation: ReservationPolicy,
    ) -> Self {
        Self {
            products,
            lines,
            keeper,
            reservation,
        }
    }

    async fn owned_line(
        &self,
        customer: CustomerUuid,
        line: CartLineUuid,
    ) -> Result<CartLine, CartsServiceError> {
        self.lines
            .get_line(line)
            .await?
            .filter(|found| found.customer_uuid == customer)
            .ok_or(CartsServiceError::NotFound)
    }

    /// Undo a consumed delta after a later step failed.
    async fn compensate(&self, product: ProductUuid, delta: i64) {
        if let Err(compensation) = self.keeper.consume(product, -delta).await {
            error!(
                %product,
                delta,
                error = %compensation,
                "failed to restore stock after cart write failure"
            );
        }
    }
}

#[async_trait]
impl CartsService for LedgerCartsService {
    async fn get_line(
        &self,
        customer: CustomerUuid,
        line: CartLineUuid,
    ) -> Result<CartLine, CartsServiceError> {
        self.owned_line(customer, line).await
    }

    async fn list_lines(&self, customer: CustomerUuid) -> Result<Vec<CartLine>, CartsServiceError> {
        Ok(self.lines.list_lines(customer).await?)
    }

    async fn add_or_merge_line(&self, line: AddCartLine) -> Result<MergedLine, CartsServiceError> {
        validate_quantity(line.quantity)?;

        let product = self.products.get_product(line.product_uuid).await?;
        let price_at_addition = line.unit_price.unwrap_or(product.price);

        if price_at_addition < Decimal::ZERO {
            return Err(CartsServiceError::InvalidArgument {
                field: "unit_price",
                reason: "must not be negative",
            });
        }

        let new_line = NewCartLine {
            uuid: CartLineUuid::new(),
            customer_uuid: line.customer_uuid,
            product_uuid: line.product_uuid,
            quantity: line.quantity,
            selected_color: line.selected_color,
            selected_size: line.selected_size,
            price_at_addition,
        };

        let delta = i64::from(line.quantity);

        if self.reservation == ReservationPolicy::Symmetric {
            self.keeper
                .consume(line.product_uuid, delta)
                .await
                .inspect_err(|rejected| {
                    warn!(product = %line.product_uuid, delta, error = %rejected, "cart add rejected");
                })?;
        }

        match self.lines.merge_line(new_line).await {
            Ok(merged) => {
                info!(
                    customer = %line.customer_uuid,
                    line = %merged.line.uuid,
                    quantity = merged.line.quantity,
                    merged = merged.merged,
                    "cart line added"
                );

                Ok(merged)
            }
            Err(write_error) => {
                if self.reservation == ReservationPolicy::Symmetric {
                    self.compensate(line.product_uuid, delta).await;
                }

                Err(write_error.into())
            }
        }
    }

    async fn set_line_quantity(
        &self,
        customer: CustomerUuid,
        line: CartLineUuid,
        quantity: u32,
    ) -> Result<CartLine, CartsServiceError> {
        validate_quantity(quantity)?;

        let current = self.owned_line(customer, line).await?;
        let delta = i64::from(quantity) - i64::from(current.quantity);

        if delta == 0 {
            return Ok(current);
        }

        let stock = match self.keeper.consume(current.product_uuid, delta).await {
            Ok(stock) => stock,
            Err(StockLedgerError::OutOfStock { available }) => {
                warn!(
                    product = %current.product_uuid,
                    line = %line,
                    delta,
                    available,
                    "cart quantity change rejected"
                );

                return Err(CartsServiceError::OutOfStock { available });
            }
            Err(other) => return Err(other.into()),
        };

        match self.lines.update_quantity(line, quantity).await {
            Ok(Some(updated)) => {
                info!(
                    product = %current.product_uuid,
                    line = %line,
                    delta,
                    stock,
                    "cart line quantity changed"
                );

                Ok(updated)
            }
            Ok(None) => {
                self.compensate(current.product_uuid, delta).await;

                Err(CartsServiceError::NotFound)
            }
            Err(write_error) => {
                self.compensate(current.product_uuid, delta).await;

                Err(write_error.into())
            }
        }
    }

    async fn remove_line(
        &self,
        customer: CustomerUuid,
        line: CartLineUuid,
    ) -> Result<CartLine, CartsServiceError> {
        self.owned_line(customer, line).await?;

        let removed = self
            .lines
            .delete_line(line)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        if self.reservation == ReservationPolicy::Symmetric {
            let stock = self
                .keeper
                .add(removed.product_uuid, removed.quantity)
                .await
                .inspect_err(|restore| {
                    error!(
                        product = %removed.product_uuid,
                        quantity = removed.quantity,
                        error = %restore,
                        "cart line removed but its stock was not restored"
                    );
                })?;

            info!(product = %removed.product_uuid, stock, "reservation released");
        }

        info!(customer = %customer, line = %line, "cart line removed");

        Ok(removed)
    }
}

fn validate_quantity(quantity: u32) -> Result<(), CartsServiceError> {
    if quantity < 1 {
        return Err(CartsServiceError::InvalidArgument {
            field: "quantity",
            reason: "must be at least 1",
        });
    }

    Ok(())
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve one of the customer's cart lines.
    async fn get_line(
        &self,
        customer: CustomerUuid,
        line: CartLineUuid,
    ) -> Result<CartLine, CartsServiceError>;

    /// All of the customer's cart lines, oldest first.
    async fn list_lines(&self, customer: CustomerUuid) -> Result<Vec<CartLine>, CartsServiceError>;

    /// Add a product to the cart, merging into an existing line with the
    /// same color and size.
    async fn add_or_merge_line(&self, line: AddCartLine) -> Result<MergedLine, CartsServiceError>;

    /// Change a line's quantity, moving the difference through the ledger.
    async fn set_line_quantity(
        &self,
        customer: CustomerUuid,
        line: CartLineUuid,
        quantity: u32,
    ) -> Result<CartLine, CartsServiceError>;

    /// Delete a line, returning it.
    async fn remove_line(
        &self,
        customer: CustomerUuid,
        line: CartLineUuid,
    ) -> Result<CartLine, CartsServiceError>;
}
