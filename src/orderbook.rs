//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module implements a limit order book for a single trading instrument. It maintains bid and
// ask orders in price-time priority (FIFO) order behind a single mutex, per the crate's
// single-book-mutex locking discipline.
//
// | Component     | Description                                                        |
// |---------------|---------------------------------------------------------------------|
// | OrderBook     | Public, thread-safe book: add/peek/consume the best order per side.  |
// | PriceLevel    | Private: a FIFO queue of orders resident at one price.               |
// | LevelSnapshot | Public, lock-free snapshot (price + total resident quantity).        |
//--------------------------------------------------------------------------------------------------
// FUNCTIONS
//--------------------------------------------------------------------------------------------------
// | Name               | Description                                          | Return Type           |
// |--------------------|------------------------------------------------------|-----------------------|
// | new                | Creates an empty OrderBook                            | OrderBook             |
// | add_order          | Adds a resting order to the book                      | ()                    |
// | best_bid/best_ask  | Clones the current head order on a side               | Option<Order>         |
// | consume_best_bid    | Reduces/pops the best bid's head order by quantity   | Result<(), _>         |
// | consume_best_ask    | Reduces/pops the best ask's head order by quantity   | Result<(), _>         |
// | top_bids/top_asks   | Snapshot of the best `n` levels on a side            | Vec<LevelSnapshot>    |
//--------------------------------------------------------------------------------------------------

use std::collections::{BTreeMap, VecDeque};

use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::errors::OrderBookError;
use crate::types::{Order, Side};

/// A FIFO queue of orders resident at a single price.
#[derive(Debug, Clone)]
struct PriceLevel {
    orders: VecDeque<Order>,
    total_quantity: u64,
}

impl PriceLevel {
    fn new() -> Self {
        Self {
            orders: VecDeque::new(),
            total_quantity: 0,
        }
    }

    fn push(&mut self, order: Order) {
        self.total_quantity += order.quantity;
        self.orders.push_back(order);
    }
}

/// A lock-free snapshot of one price level, for observers that only need the shape of the book
/// (the console renderer) rather than the resident orders themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSnapshot {
    pub price: Decimal,
    pub total_quantity: u64,
}

struct OrderBookInner {
    bids: BTreeMap<Decimal, PriceLevel>,
    asks: BTreeMap<Decimal, PriceLevel>,
}

impl OrderBookInner {
    fn new() -> Self {
        Self {
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
        }
    }

    fn levels(&self, side: Side) -> &BTreeMap<Decimal, PriceLevel> {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn levels_mut(&mut self, side: Side) -> &mut BTreeMap<Decimal, PriceLevel> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Bids rank highest-price-first, asks lowest-price-first — the last key of an ascending
    /// `BTreeMap` is the highest, so bids read from the back and asks from the front.
    fn best_price(&self, side: Side) -> Option<Decimal> {
        match side {
            Side::Buy => self.bids.keys().next_back().copied(),
            Side::Sell => self.asks.keys().next().copied(),
        }
    }
}

/// A single-instrument limit order book. All operations lock the whole book for their duration;
/// the critical sections are short (map lookups and `VecDeque` push/pop), matching the crate's
/// "hold the book mutex briefly" discipline.
pub struct OrderBook {
    inner: Mutex<OrderBookInner>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(OrderBookInner::new()),
        }
    }

    /// Adds a resting order to the back of its price level's queue. A zero-quantity order is a
    /// no-op: it is never resident in the book.
    pub fn add_order(&self, order: Order) {
        if order.quantity == 0 {
            return;
        }
        let mut inner = self.inner.lock();
        inner
            .levels_mut(order.side)
            .entry(order.price)
            .or_insert_with(PriceLevel::new)
            .push(order);
    }

    /// Clones the current head order of the best bid level, if any.
    pub fn best_bid(&self) -> Option<Order> {
        self.best_order(Side::Buy)
    }

    /// Clones the current head order of the best ask level, if any.
    pub fn best_ask(&self) -> Option<Order> {
        self.best_order(Side::Sell)
    }

    fn best_order(&self, side: Side) -> Option<Order> {
        let inner = self.inner.lock();
        let price = inner.best_price(side)?;
        inner.levels(side).get(&price)?.orders.front().cloned()
    }

    /// Reduces the head order of the best bid level by `quantity`, popping it (and its price
    /// level, if now empty) when fully consumed.
    pub fn consume_best_bid(&self, quantity: u64) -> Result<(), OrderBookError> {
        self.consume_best(Side::Buy, quantity)
    }

    /// Reduces the head order of the best ask level by `quantity`, popping it (and its price
    /// level, if now empty) when fully consumed.
    pub fn consume_best_ask(&self, quantity: u64) -> Result<(), OrderBookError> {
        self.consume_best(Side::Sell, quantity)
    }

    fn consume_best(&self, side: Side, quantity: u64) -> Result<(), OrderBookError> {
        let mut inner = self.inner.lock();
        let price = inner.best_price(side).ok_or(OrderBookError::EmptySide(side))?;
        let levels = inner.levels_mut(side);
        let level = levels.get_mut(&price).expect("best_price came from this map");

        let available = {
            let head = level.orders.front_mut().ok_or(OrderBookError::EmptySide(side))?;
            if quantity > head.quantity {
                return Err(OrderBookError::InsufficientHeadQuantity {
                    requested: quantity,
                    available: head.quantity,
                });
            }
            head.quantity -= quantity;
            head.quantity
        };
        level.total_quantity -= quantity;

        if available == 0 {
            level.orders.pop_front();
        }
        if level.orders.is_empty() {
            levels.remove(&price);
        }
        Ok(())
    }

    /// The best `n` bid levels, highest price first.
    pub fn top_bids(&self, n: usize) -> Vec<LevelSnapshot> {
        self.top_levels(Side::Buy, n)
    }

    /// The best `n` ask levels, lowest price first.
    pub fn top_asks(&self, n: usize) -> Vec<LevelSnapshot> {
        self.top_levels(Side::Sell, n)
    }

    fn top_levels(&self, side: Side, n: usize) -> Vec<LevelSnapshot> {
        let inner = self.inner.lock();
        let levels = inner.levels(side);
        let iter = levels.iter().map(|(price, level)| LevelSnapshot {
            price: *price,
            total_quantity: level.total_quantity,
        });
        match side {
            Side::Buy => iter.rev().take(n).collect(),
            Side::Sell => iter.take(n).collect(),
        }
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
