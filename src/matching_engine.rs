//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module implements the core matching engine logic: crossing a single incoming order against
// the opposite side of the book, emitting trades in price-time priority, and resting any residual
// quantity. The engine itself is stateless beyond the book it owns and the last-trade slot.
//
// | Component       | Description                                                          |
// |-----------------|-----------------------------------------------------------------------|
// | MatchingEngine  | Owns an OrderBook and a last-trade slot; crosses orders against it.   |
//--------------------------------------------------------------------------------------------------
// FUNCTIONS
//--------------------------------------------------------------------------------------------------
// | Name           | Description                                            | Return Type        |
// |----------------|---------------------------------------------------------|--------------------|
// | process_order  | Crosses an order against the book, returns trades        | Vec<Trade>         |
// | last_trade     | The most recently emitted trade, if any                  | Option<Trade>      |
// | order_book     | The book this engine owns                                 | &OrderBook         |
//--------------------------------------------------------------------------------------------------

use parking_lot::Mutex;

use crate::orderbook::OrderBook;
use crate::types::{Order, Side, Trade};

/// Crosses incoming orders against a single-instrument [`OrderBook`] and tracks the most recent
/// trade. The engine is intended to be driven by exactly one matcher thread; its own locking
/// (the book's mutex, the `last_trade` mutex) exists to let producer/observer threads touch it
/// concurrently, not to make `process_order` itself safe to call from multiple threads at once.
pub struct MatchingEngine {
    book: OrderBook,
    last_trade: Mutex<Option<Trade>>,
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self {
            book: OrderBook::new(),
            last_trade: Mutex::new(None),
        }
    }

    /// Crosses `order` against the book, emitting trades in execution order and resting any
    /// residual quantity. A zero-quantity order (including the shutdown sentinel) is a no-op.
    pub fn process_order(&self, mut order: Order) -> Vec<Trade> {
        if order.quantity == 0 {
            return Vec::new();
        }

        let opposite = order.side.opposite();
        let mut trades = Vec::new();

        while order.quantity > 0 {
            let Some(passive) = self.best_of(opposite) else {
                break;
            };

            let crossable = match order.side {
                Side::Buy => order.price >= passive.price,
                Side::Sell => order.price <= passive.price,
            };
            if !crossable {
                break;
            }

            let match_qty = order.quantity.min(passive.quantity);
            let (buy_id, sell_id) = match order.side {
                Side::Buy => (order.id, passive.id),
                Side::Sell => (passive.id, order.id),
            };
            let trade = Trade::new(buy_id, sell_id, passive.price, match_qty);

            self.consume(opposite, match_qty)
                .expect("passive order just observed under the book lock must still be consumable");

            *self.last_trade.lock() = Some(trade.clone());
            trades.push(trade);
            order.quantity -= match_qty;
        }

        if order.quantity > 0 {
            self.book.add_order(order);
        }

        trades
    }

    fn best_of(&self, side: Side) -> Option<Order> {
        match side {
            Side::Buy => self.book.best_bid(),
            Side::Sell => self.book.best_ask(),
        }
    }

    fn consume(&self, side: Side, quantity: u64) -> Result<(), crate::errors::OrderBookError> {
        match side {
            Side::Buy => self.book.consume_best_bid(quantity),
            Side::Sell => self.book.consume_best_ask(quantity),
        }
    }

    /// A copy of the most recently emitted trade, if any have occurred yet.
    pub fn last_trade(&self) -> Option<Trade> {
        self.last_trade.lock().clone()
    }

    pub fn order_book(&self) -> &OrderBook {
        &self.book
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn order(id: u64, side: Side, price: rust_decimal::Decimal, quantity: u64) -> Order {
        Order::new(id, side, price, quantity)
    }

    /// Scenario A — full match, single level, exact quantities.
    #[test]
    fn scenario_a_full_match_exact_quantities() {
        let engine = MatchingEngine::new();
        assert!(engine.process_order(order(1, Side::Sell, dec!(100.00), 1000)).is_empty());

        let trades = engine.process_order(order(2, Side::Buy, dec!(100.00), 1000));
        assert_eq!(trades, vec![Trade::new(2, 1, dec!(100.00), 1000)]);
        assert!(engine.order_book().best_bid().is_none());
        assert!(engine.order_book().best_ask().is_none());
    }

    /// Scenario B — partial match, residual rests.
    #[test]
    fn scenario_b_partial_match_residual_rests() {
        let engine = MatchingEngine::new();
        engine.process_order(order(1, Side::Sell, dec!(100.00), 1000));

        let trades = engine.process_order(order(2, Side::Buy, dec!(100.00), 400));
        assert_eq!(trades, vec![Trade::new(2, 1, dec!(100.00), 400)]);

        let best_ask = engine.order_book().best_ask().unwrap();
        assert_eq!(best_ask.price, dec!(100.00));
        assert_eq!(best_ask.quantity, 600);
        assert!(engine.order_book().best_bid().is_none());
    }

    /// Scenario C — no cross.
    #[test]
    fn scenario_c_no_cross() {
        let engine = MatchingEngine::new();
        engine.process_order(order(1, Side::Sell, dec!(101.00), 1000));

        let trades = engine.process_order(order(2, Side::Buy, dec!(100.00), 500));
        assert!(trades.is_empty());

        let best_ask = engine.order_book().best_ask().unwrap();
        assert_eq!((best_ask.price, best_ask.quantity), (dec!(101.00), 1000));
        let best_bid = engine.order_book().best_bid().unwrap();
        assert_eq!((best_bid.price, best_bid.quantity), (dec!(100.00), 500));
    }

    /// Scenario D — multi-level sweep with partial last level.
    #[test]
    fn scenario_d_multi_level_sweep_partial_last_level() {
        let engine = MatchingEngine::new();
        engine.process_order(order(1, Side::Sell, dec!(100.00), 300));
        engine.process_order(order(2, Side::Sell, dec!(101.00), 400));
        engine.process_order(order(3, Side::Sell, dec!(102.00), 500));

        let trades = engine.process_order(order(4, Side::Buy, dec!(101.50), 800));
        assert_eq!(
            trades,
            vec![
                Trade::new(4, 1, dec!(100.00), 300),
                Trade::new(4, 2, dec!(101.00), 400),
            ]
        );

        let best_bid = engine.order_book().best_bid().unwrap();
        assert_eq!((best_bid.price, best_bid.quantity), (dec!(101.50), 100));
        let best_ask = engine.order_book().best_ask().unwrap();
        assert_eq!((best_ask.price, best_ask.quantity), (dec!(102.00), 500));
    }

    /// Scenario E — price-time priority within a level.
    #[test]
    fn scenario_e_price_time_priority_within_a_level() {
        let engine = MatchingEngine::new();
        engine.process_order(order(1, Side::Sell, dec!(100.00), 200));
        engine.process_order(order(2, Side::Sell, dec!(100.00), 300));

        let trades = engine.process_order(order(3, Side::Buy, dec!(100.00), 400));
        assert_eq!(
            trades,
            vec![
                Trade::new(3, 1, dec!(100.00), 200),
                Trade::new(3, 2, dec!(100.00), 200),
            ]
        );

        let best_ask = engine.order_book().best_ask().unwrap();
        assert_eq!((best_ask.price, best_ask.quantity), (dec!(100.00), 100));
    }

    /// Scenario F — aggressor crosses above best ask; trade executes at the passive price.
    #[test]
    fn scenario_f_trade_executes_at_passive_price() {
        let engine = MatchingEngine::new();
        engine.process_order(order(1, Side::Sell, dec!(100.00), 500));

        let trades = engine.process_order(order(2, Side::Buy, dec!(105.00), 500));
        assert_eq!(trades, vec![Trade::new(2, 1, dec!(100.00), 500)]);
    }

    #[test]
    fn zero_quantity_order_is_a_no_op() {
        let engine = MatchingEngine::new();
        engine.process_order(order(1, Side::Sell, dec!(100.00), 500));

        let trades = engine.process_order(order(2, Side::Buy, dec!(100.00), 0));
        assert!(trades.is_empty());
        assert!(engine.last_trade().is_none());
        assert_eq!(engine.order_book().best_ask().unwrap().quantity, 500);
    }

    #[test]
    fn shutdown_sentinel_is_a_no_op() {
        let engine = MatchingEngine::new();
        let trades = engine.process_order(Order::shutdown_sentinel());
        assert!(trades.is_empty());
        assert!(engine.order_book().best_bid().is_none());
        assert!(engine.order_book().best_ask().is_none());
    }

    #[test]
    fn exact_equality_crossing() {
        let engine = MatchingEngine::new();
        engine.process_order(order(1, Side::Sell, dec!(100.00), 100));
        let trades = engine.process_order(order(2, Side::Buy, dec!(100.00), 100));
        assert_eq!(trades.len(), 1);
    }

    #[test]
    fn last_trade_reflects_the_most_recent_match_only() {
        let engine = MatchingEngine::new();
        engine.process_order(order(1, Side::Sell, dec!(100.00), 100));
        engine.process_order(order(2, Side::Sell, dec!(101.00), 100));

        engine.process_order(order(3, Side::Buy, dec!(101.00), 200));
        assert_eq!(engine.last_trade(), Some(Trade::new(3, 2, dec!(101.00), 100)));
    }

    #[test]
    fn non_crossing_order_increases_opposite_side_top_of_book_quantity_only() {
        let engine = MatchingEngine::new();
        engine.process_order(order(1, Side::Sell, dec!(101.00), 1000));
        let ask_before = engine.order_book().best_ask();

        engine.process_order(order(2, Side::Buy, dec!(100.00), 500));

        assert_eq!(engine.order_book().best_ask(), ask_before);
        let best_bid = engine.order_book().best_bid().unwrap();
        assert_eq!(best_bid.quantity, 500);
    }
}
