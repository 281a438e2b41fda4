//! Inventory Policies
//!
//! Named switches for the behaviours where the storefront has historically
//! been inconsistent. Defaults reproduce the historical behaviour.

use clap::ValueEnum;

/// How stock deltas reach the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ConsistencyMode {
    /// Read the current value, compute the target, write it back. Two
    /// concurrent writers can both read the same value and one delta is lost.
    #[default]
    #[value(name = "last-writer-wins")]
    LastWriterWins,

    /// Guarded increments and decrements executed by the store in one step.
    Atomic,
}

/// Which cart operations reserve stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReservationPolicy {
    /// Only quantity changes on an existing line touch stock. Adding a line
    /// and removing a line leave the ledger alone.
    #[default]
    #[value(name = "resize-only", alias = "none")]
    ResizeOnly,

    /// Adding consumes stock, resizing adjusts it, removing returns it.
    Symmetric,
}

/// What a buy-now checkout does to the rest of the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BuyNowCartPolicy {
    /// Empty the whole cart, including lines that were not purchased.
    #[default]
    ClearAll,

    /// Remove only the purchased line.
    ClearPurchased,
}

/// What a full-cart checkout does to the ordered lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CartCheckoutPolicy {
    /// Leave the cart untouched.
    #[default]
    KeepLines,

    /// Remove the lines that were ordered.
    ClearOrdered,
}

/// Default upper bound (inclusive) for "low stock".
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// All inventory policies in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryPolicies {
    pub consistency: ConsistencyMode,
    pub reservation: ReservationPolicy,
    pub buy_now: BuyNowCartPolicy,
    pub cart_checkout: CartCheckoutPolicy,
    pub low_stock_threshold: u32,
}

impl Default for InventoryPolicies {
    fn default() -> Self {
        Self {
            consistency: ConsistencyMode::default(),
            reservation: ReservationPolicy::default(),
            buy_now: BuyNowCartPolicy::default(),
            cart_checkout: CartCheckoutPolicy::default(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}
