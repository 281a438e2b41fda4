//! Stock Keeper
//!
//! Routes stock deltas to the ledger according to the configured
//! [`ConsistencyMode`]. Callers describe the change they want; the keeper
//! decides whether that becomes a read followed by a write or a single
//! guarded update.

use std::sync::Arc;

use crate::domain::{
    policies::ConsistencyMode,
    products::models::ProductUuid,
    stock::{errors::StockLedgerError, ledger::StockLedger},
};

#[derive(Clone)]
pub struct StockKeeper {
    ledger: Arc<dyn StockLedger>,
    mode: ConsistencyMode,
}

impl std::fmt::Debug for StockKeeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockKeeper")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl StockKeeper {
    #[must_use]
    pub fn new(ledger: Arc<dyn StockLedger>, mode: ConsistencyMode) -> Self {
        Self { ledger, mode }
    }

    #[must_use]
    pub fn mode(&self) -> ConsistencyMode {
        self.mode
    }

    #[must_use]
    pub fn ledger(&self) -> &Arc<dyn StockLedger> {
        &self.ledger
    }

    /// Current stock.
    ///
    /// # Errors
    ///
    /// Returns [`StockLedgerError::NotFound`] for an unknown product.
    pub async fn read(&self, product: ProductUuid) -> Result<u32, StockLedgerError> {
        self.ledger.read_stock(product).await
    }

    /// Overwrite stock with an absolute value.
    ///
    /// # Errors
    ///
    /// Returns [`StockLedgerError::InvalidArgument`] for a negative target.
    pub async fn set(&self, product: ProductUuid, target: i64) -> Result<u32, StockLedgerError> {
        self.ledger.write_stock(product, target).await
    }

    /// Consume `delta` units; a negative delta gives units back.
    ///
    /// Stock never goes below zero. When the product cannot cover the delta
    /// the ledger is left untouched and the error carries what is available.
    ///
    /// # Errors
    ///
    /// Returns [`StockLedgerError::OutOfStock`] when stock is insufficient.
    pub async fn consume(&self, product: ProductUuid, delta: i64) -> Result<u32, StockLedgerError> {
        if delta == 0 {
            return self.read(product).await;
        }

        match self.mode {
            ConsistencyMode::LastWriterWins => {
                let stock = self.ledger.read_stock(product).await?;
                let target = i64::from(stock) - delta;

                if target < 0 {
                    return Err(StockLedgerError::OutOfStock { available: stock });
                }

                self.ledger.write_stock(product, target).await
            }
            ConsistencyMode::Atomic => {
                let quantity = narrow_delta(delta)?;

                if delta > 0 {
                    self.ledger.take_stock(product, quantity).await
                } else {
                    self.ledger.return_stock(product, quantity).await
                }
            }
        }
    }

    /// Give `quantity` units back to stock.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is missing or the result overflows.
    pub async fn add(&self, product: ProductUuid, quantity: u32) -> Result<u32, StockLedgerError> {
        match self.mode {
            ConsistencyMode::LastWriterWins => {
                let stock = self.ledger.read_stock(product).await?;

                self.ledger
                    .write_stock(product, i64::from(stock) + i64::from(quantity))
                    .await
            }
            ConsistencyMode::Atomic => self.ledger.return_stock(product, quantity).await,
        }
    }

    /// Remove `quantity` units, flooring at zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is missing.
    pub async fn subtract_clamped(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u32, StockLedgerError> {
        match self.mode {
            ConsistencyMode::LastWriterWins => {
                let stock = self.ledger.read_stock(product).await?;

                self.ledger
                    .write_stock(product, i64::from(stock.saturating_sub(quantity)))
                    .await
            }
            ConsistencyMode::Atomic => self.ledger.take_stock_clamped(product, quantity).await,
        }
    }
}

fn narrow_delta(delta: i64) -> Result<u32, StockLedgerError> {
    u32::try_from(delta.unsigned_abs()).map_err(|_overflow| StockLedgerError::InvalidArgument {
        field: "quantity",
        reason: "is too large",
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::BarrierLedger};

    use super::*;

    const MODES: [ConsistencyMode; 2] = [ConsistencyMode::LastWriterWins, ConsistencyMode::Atomic];

    #[tokio::test]
    async fn consume_decrements_and_returns_new_stock() -> TestResult {
        for mode in MODES {
            let ctx = TestContext::new();
            let product = ctx.create_product(dec!(1.00), 10).await?;
            let keeper = StockKeeper::new(ctx.ledger.clone(), mode);

            let stock = keeper.consume(product.uuid, 4).await?;

            assert_eq!(stock, 6, "mode {mode:?}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn consume_negative_delta_returns_stock() -> TestResult {
        for mode in MODES {
            let ctx = TestContext::new();
            let product = ctx.create_product(dec!(1.00), 2).await?;
            let keeper = StockKeeper::new(ctx.ledger.clone(), mode);

            let stock = keeper.consume(product.uuid, -3).await?;

            assert_eq!(stock, 5, "mode {mode:?}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn consume_beyond_stock_fails_without_writing() -> TestResult {
        for mode in MODES {
            let ctx = TestContext::new();
            let product = ctx.create_product(dec!(1.00), 3).await?;
            let keeper = StockKeeper::new(ctx.ledger.clone(), mode);

            let result = keeper.consume(product.uuid, 4).await;

            assert!(
                matches!(result, Err(StockLedgerError::OutOfStock { available: 3 })),
                "mode {mode:?}: expected OutOfStock(3), got {result:?}"
            );
            assert_eq!(keeper.read(product.uuid).await?, 3, "mode {mode:?}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn subtract_clamped_matches_max_zero_law() -> TestResult {
        for mode in MODES {
            for (start, amount) in [(5, 2), (2, 5), (0, 1), (7, 7)] {
                let ctx = TestContext::new();
                let product = ctx.create_product(dec!(1.00), start).await?;
                let keeper = StockKeeper::new(ctx.ledger.clone(), mode);

                let stock = keeper.subtract_clamped(product.uuid, amount).await?;

                assert_eq!(
                    stock,
                    start.saturating_sub(amount),
                    "mode {mode:?}: {start} - {amount}"
                );
            }
        }

        Ok(())
    }

    #[tokio::test]
    async fn add_increments_stock() -> TestResult {
        for mode in MODES {
            let ctx = TestContext::new();
            let product = ctx.create_product(dec!(1.00), 1).await?;
            let keeper = StockKeeper::new(ctx.ledger.clone(), mode);

            assert_eq!(keeper.add(product.uuid, 9).await?, 10, "mode {mode:?}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_consumes_lose_a_delta_under_last_writer_wins() -> TestResult {
        let ctx = TestContext::new();
        let product = ctx.create_product(dec!(1.00), 10).await?;
        let ledger = Arc::new(BarrierLedger::new(ctx.ledger.clone(), 2));
        let keeper = StockKeeper::new(ledger, ConsistencyMode::LastWriterWins);

        let (a, b) = tokio::join!(
            keeper.consume(product.uuid, 5),
            keeper.consume(product.uuid, 5)
        );

        a?;
        b?;

        assert_eq!(ctx.ledger.read_stock(product.uuid).await?, 5);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_consumes_are_both_applied_under_atomic() -> TestResult {
        let ctx = TestContext::new();
        let product = ctx.create_product(dec!(1.00), 10).await?;
        let ledger = Arc::new(BarrierLedger::new(ctx.ledger.clone(), 2));
        let keeper = StockKeeper::new(ledger, ConsistencyMode::Atomic);

        let (a, b) = tokio::join!(
            keeper.consume(product.uuid, 5),
            keeper.consume(product.uuid, 5)
        );

        a?;
        b?;

        assert_eq!(ctx.ledger.read_stock(product.uuid).await?, 0);

        Ok(())
    }
}
