//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module defines the core data types shared across the matching engine: orders, trades, and
// the side enum. An Order is immutable once admitted; matching never edits it in place except to
// reduce its own `quantity` (the one field the spec allows the matcher to shrink).
//
// | Section  | Description                                             |
// |----------|----------------------------------------------------------|
// | Side     | Buy or Sell.                                              |
// | Order    | A single admitted order: id, side, price, quantity, time. |
// | Trade    | A completed match between two orders.                     |
//--------------------------------------------------------------------------------------------------

use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Unique, run-scoped order identifier. Strict monotonicity is not required, only uniqueness.
pub type OrderId = u64;

/// The smallest price increment the book recognises.
pub const TICK: Decimal = dec!(0.01);

/// Rounds a price to the nearest tick (`TICK = 0.01`).
///
/// All prices that reach the book go through this so that map-key equality is exact — the
/// fixed-tick `Decimal` representation this crate uses never hits the floating-point equality
/// hazard a `double` price would.
pub fn round_to_tick(price: Decimal) -> Decimal {
    price.round_dp(2)
}

/// The side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an aggressor on this side must match against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// An order admitted into the system. Immutable except for `quantity`, which the matcher may
/// reduce as fills consume it; an order with `quantity == 0` is never resident in the book.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub price: Decimal,
    pub quantity: u64,
    pub timestamp: Instant,
}

impl Order {
    /// Builds an order, rounding `price` to the tick. `timestamp` is taken from the monotonic
    /// clock at admission, matching the steady-clock semantics the spec requires.
    pub fn new(id: OrderId, side: Side, price: Decimal, quantity: u64) -> Self {
        Self {
            id,
            side,
            price: round_to_tick(price),
            quantity,
            timestamp: Instant::now(),
        }
    }

    /// The zero-quantity, id-0 sentinel used to unblock a parked `OrderChannel::pop` during
    /// shutdown. The matcher recognises and discards it without it ever reaching the book.
    pub fn shutdown_sentinel() -> Self {
        Self {
            id: 0,
            side: Side::Buy,
            price: Decimal::ZERO,
            quantity: 0,
            timestamp: Instant::now(),
        }
    }

    pub fn is_shutdown_sentinel(&self) -> bool {
        self.id == 0 && self.quantity == 0
    }
}

/// A completed match between an aggressor and a resting order. `price` is always the resting
/// order's price — the passive side dictates price, never the aggressor.
#[derive(Debug, Clone)]
pub struct Trade {
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    pub price: Decimal,
    pub quantity: u64,
    pub timestamp: Instant,
}

impl Trade {
    pub fn new(buy_order_id: OrderId, sell_order_id: OrderId, price: Decimal, quantity: u64) -> Self {
        Self {
            buy_order_id,
            sell_order_id,
            price,
            quantity,
            timestamp: Instant::now(),
        }
    }
}

/// Equality ignores `timestamp`: two trades with identical economic content are equal regardless
/// of when each was constructed, which is what tests comparing expected vs. emitted trades need.
impl PartialEq for Trade {
    fn eq(&self, other: &Self) -> bool {
        self.buy_order_id == other.buy_order_id
            && self.sell_order_id == other.sell_order_id
            && self.price == other.price
            && self.quantity == other.quantity
    }
}
