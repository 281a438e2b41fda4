//! Policy Config

use clap::Args;

use crate::domain::policies::{
    BuyNowCartPolicy, CartCheckoutPolicy, ConsistencyMode, DEFAULT_LOW_STOCK_THRESHOLD,
    InventoryPolicies, ReservationPolicy,
};

/// Inventory policy settings, shared by every binary that wires services.
#[derive(Debug, Clone, Args)]
pub struct PolicyConfig {
    /// How stock deltas reach the ledger (last-writer-wins, atomic)
    #[arg(
        long,
        env = "STOCK_CONSISTENCY",
        value_enum,
        default_value_t = ConsistencyMode::LastWriterWins
    )]
    pub stock_consistency: ConsistencyMode,

    /// Which cart operations reserve stock (resize-only, symmetric)
    #[arg(
        long,
        env = "RESERVATION_POLICY",
        value_enum,
        default_value_t = ReservationPolicy::ResizeOnly
    )]
    pub reservation_policy: ReservationPolicy,

    /// What a buy-now checkout does to the rest of the cart (clear-all, clear-purchased)
    #[arg(
        long,
        env = "BUY_NOW_CART_POLICY",
        value_enum,
        default_value_t = BuyNowCartPolicy::ClearAll
    )]
    pub buy_now_cart_policy: BuyNowCartPolicy,

    /// What a full-cart checkout does to the ordered lines (keep-lines, clear-ordered)
    #[arg(
        long,
        env = "CART_CHECKOUT_POLICY",
        value_enum,
        default_value_t = CartCheckoutPolicy::KeepLines
    )]
    pub cart_checkout_policy: CartCheckoutPolicy,

    /// Highest stock count still reported as low stock
    #[arg(long, env = "LOW_STOCK_THRESHOLD", default_value_t = DEFAULT_LOW_STOCK_THRESHOLD)]
    pub low_stock_threshold: u32,
}

impl PolicyConfig {
    #[must_use]
    pub fn policies(&self) -> InventoryPolicies {
        InventoryPolicies {
            consistency: self.stock_consistency,
            reservation: self.reservation_policy,
            buy_now: self.buy_now_cart_policy,
            cart_checkout: self.cart_checkout_policy,
            low_stock_threshold: self.low_stock_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        policies: PolicyConfig,
    }

    #[test]
    fn defaults_match_historical_behaviour() {
        let harness = Harness::parse_from(["stockroom"]);

        assert_eq!(harness.policies.policies(), InventoryPolicies::default());
    }

    #[test]
    fn flags_select_hardened_policies() {
        let harness = Harness::parse_from([
            "stockroom",
            "--stock-consistency",
            "atomic",
            "--reservation-policy",
            "none",
            "--buy-now-cart-policy",
            "clear-purchased",
            "--cart-checkout-policy",
            "clear-ordered",
            "--low-stock-threshold",
            "2",
        ]);

        assert_eq!(
            harness.policies.policies(),
            InventoryPolicies {
                consistency: ConsistencyMode::Atomic,
                reservation: ReservationPolicy::ResizeOnly,
                buy_now: BuyNowCartPolicy::ClearPurchased,
                cart_checkout: CartCheckoutPolicy::ClearOrdered,
                low_stock_threshold: 2,
            }
        );
    }
}
