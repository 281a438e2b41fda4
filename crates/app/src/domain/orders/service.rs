//! Orders service.
//!
//! Turns checkout lines into an order and its items. Stock was already moved
//! when the lines were added to or resized in the cart, so placing an order
//! never touches the ledger; only cart lines that are thrown away without
//! being ordered give their reservation back.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::domain::{
    carts::{
        models::{CartLine, CartLineUuid},
        repository::CartLinesRepository,
    },
    customers::{AddressUuid, CustomerUuid},
    orders::{
        currency::{MAX_MONEY, round_money},
        errors::OrdersServiceError,
        models::{
            CheckoutLine, CheckoutMode, NewOrder, NewOrderItem, Order, OrderItemUuid, OrderStatus,
            OrderUuid, PlaceOrder,
        },
        repository::OrdersRepository,
    },
    policies::{BuyNowCartPolicy, CartCheckoutPolicy, InventoryPolicies, ReservationPolicy},
    stock::StockKeeper,
};

#[derive(Clone)]
pub struct LedgerOrdersService {
    orders: Arc<dyn OrdersRepository>,
    lines: Arc<dyn CartLinesRepository>,
    keeper: StockKeeper,
    policies: InventoryPolicies,
}

impl std::fmt::Debug for LedgerOrdersService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerOrdersService")
            .field("keeper", &self.keeper)
            .field("policies", &self.policies)
            .finish_non_exhaustive()
    }
}

/// Order total in base currency: every line at its captured price plus the
/// shipping fee, rounded to cents. `None` when the sum overflows.
#[must_use]
pub fn order_total(lines: &[CheckoutLine], shipping_fee: Decimal) -> Option<Decimal> {
    lines
        .iter()
        .try_fold(shipping_fee, |total, line| {
            line.price_at_addition
                .checked_mul(Decimal::from(line.quantity))
                .and_then(|amount| total.checked_add(amount))
        })
        .map(round_money)
}

impl LedgerOrdersService {
    #[must_use]
    pub fn new(
        orders: Arc<dyn OrdersRepository>,
        lines: Arc<dyn CartLinesRepository>,
        keeper: StockKeeper,
        policies: InventoryPolicies,
    ) -> Self {
        Self {
            orders,
            lines,
            keeper,
            policies,
        }
    }

    /// Remove the cart lines the checkout policy says to remove.
    ///
    /// The order is already committed, so failures here are logged and
    /// swallowed rather than reported as a failed checkout.
    async fn clear_cart(&self, order: &Order, request: &PlaceOrder) {
        let ordered: Vec<CartLineUuid> = request
            .lines
            .iter()
            .filter_map(|line| line.line_uuid)
            .collect();

        let cleared = match (request.mode, self.policies.cart_checkout, self.policies.buy_now) {
            (CheckoutMode::Cart, CartCheckoutPolicy::KeepLines, _) => return,
            (CheckoutMode::Cart, CartCheckoutPolicy::ClearOrdered, _)
            | (CheckoutMode::BuyNow, _, BuyNowCartPolicy::ClearPurchased) => {
                self.lines
                    .delete_lines(request.customer_uuid, ordered.clone())
                    .await
            }
            (CheckoutMode::BuyNow, _, BuyNowCartPolicy::ClearAll) => {
                self.lines.clear_lines(request.customer_uuid).await
            }
        };

        let removed = match cleared {
            Ok(removed) => removed,
            Err(clear_error) => {
                error!(
                    order = %order.uuid,
                    customer = %request.customer_uuid,
                    error = %clear_error,
                    "order placed but the cart could not be cleared"
                );

                return;
            }
        };

        info!(order = %order.uuid, lines = removed.len(), "cart cleared after checkout");

        if self.policies.reservation == ReservationPolicy::Symmetric {
            self.release_unordered(&removed, &ordered).await;
        }
    }

    /// Give back the reservation held by lines that were discarded without
    /// being ordered.
    async fn release_unordered(&self, removed: &[CartLine], ordered: &[CartLineUuid]) {
        for line in removed.iter().filter(|line| !ordered.contains(&line.uuid)) {
            match self.keeper.add(line.product_uuid, line.quantity).await {
                Ok(stock) => info!(
                    product = %line.product_uuid,
                    quantity = line.quantity,
                    stock,
                    "reservation released by checkout"
                ),
                Err(release_error) => error!(
                    product = %line.product_uuid,
                    quantity = line.quantity,
                    error = %release_error,
                    "failed to release reservation of discarded cart line"
                ),
            }
        }
    }
}

/// Check a checkout request, returning the address and payment method it
/// must carry.
fn validate(request: &PlaceOrder) -> Result<(AddressUuid, String), OrdersServiceError> {
    if request.lines.is_empty() {
        return Err(OrdersServiceError::InvalidArgument {
            field: "lines",
            reason: "must not be empty",
        });
    }

    let Some(address_uuid) = request.address_uuid else {
        return Err(OrdersServiceError::InvalidArgument {
            field: "address_id",
            reason: "select an address and payment method",
        });
    };

    let Some(payment_method) = request
        .payment_method
        .as_deref()
        .map(str::trim)
        .filter(|method| !method.is_empty())
    else {
        return Err(OrdersServiceError::InvalidArgument {
            field: "payment_method",
            reason: "select an address and payment method",
        });
    };

    if request.lines.iter().any(|line| line.quantity < 1) {
        return Err(OrdersServiceError::InvalidArgument {
            field: "quantity",
            reason: "must be at least 1",
        });
    }

    if request
        .lines
        .iter()
        .any(|line| line.price_at_addition < Decimal::ZERO)
    {
        return Err(OrdersServiceError::InvalidArgument {
            field: "price",
            reason: "must not be negative",
        });
    }

    if request.shipping_fee < Decimal::ZERO {
        return Err(OrdersServiceError::InvalidArgument {
            field: "shipping_fee",
            reason: "must not be negative",
        });
    }

    if request.shipping_fee > MAX_MONEY {
        return Err(OrdersServiceError::InvalidArgument {
            field: "shipping_fee",
            reason: "exceeds the largest storable amount",
        });
    }

    Ok((address_uuid, payment_method.to_string()))
}

#[async_trait]
impl OrdersService for LedgerOrdersService {
    async fn place_order(&self, request: PlaceOrder) -> Result<Order, OrdersServiceError> {
        let (address_uuid, payment_method) = validate(&request)?;

        let total_amount = order_total(&request.lines, request.shipping_fee)
            .filter(|total| *total <= MAX_MONEY)
            .ok_or(OrdersServiceError::InvalidArgument {
                field: "total_amount",
                reason: "exceeds the largest storable amount",
            })?;

        let new_order = NewOrder {
            uuid: OrderUuid::new(),
            customer_uuid: request.customer_uuid,
            address_uuid,
            total_amount,
            shipping_fee: round_money(request.shipping_fee),
            payment_method,
        };

        let items: Vec<NewOrderItem> = request
            .lines
            .iter()
            .map(|line| NewOrderItem {
                uuid: OrderItemUuid::new(),
                product_uuid: line.product_uuid,
                quantity: line.quantity,
                price: line.price_at_addition,
                selected_color: line.selected_color.clone(),
                selected_size: line.selected_size.clone(),
            })
            .collect();

        let mut order = self.orders.insert_order(new_order).await?;

        match self.orders.insert_items(order.uuid, items).await {
            Ok(created) => order.items = created,
            Err(items_error) => {
                warn!(
                    order = %order.uuid,
                    error = %items_error,
                    "order items failed to save, removing order"
                );

                return match self.orders.delete_order(order.uuid).await {
                    Ok(_) => Err(items_error.into()),
                    Err(compensation) => {
                        error!(
                            order = %order.uuid,
                            items_error = %items_error,
                            error = %compensation,
                            "order left without items"
                        );

                        Err(OrdersServiceError::PartialCommit {
                            order: Box::new(order),
                        })
                    }
                };
            }
        }

        info!(
            order = %order.uuid,
            customer = %order.customer_uuid,
            total = %order.total_amount,
            items = order.items.len(),
            "order placed"
        );

        self.clear_cart(&order, &request).await;

        Ok(order)
    }

    async fn get_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        self.orders
            .get_order(order)
            .await?
            .filter(|found| found.customer_uuid == customer)
            .ok_or(OrdersServiceError::NotFound)
    }

    async fn list_orders(&self, customer: CustomerUuid) -> Result<Vec<Order>, OrdersServiceError> {
        Ok(self.orders.list_orders(customer).await?)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let updated = self
            .orders
            .update_status(order, status)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        info!(order = %order, %status, "order status changed");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Persist an order and its items from checkout lines.
    async fn place_order(&self, request: PlaceOrder) -> Result<Order, OrdersServiceError>;

    /// Retrieve one of the customer's orders.
    async fn get_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;

    /// The customer's orders, newest first.
    async fn list_orders(&self, customer: CustomerUuid) -> Result<Vec<Order>, OrdersServiceError>;

    /// Move an order to a new status. Cancelling does not restock.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;
}
