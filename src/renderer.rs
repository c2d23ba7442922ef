//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// A periodic console observer: samples top-of-book depth, the last trade, and the ingest
// channel's backlog, and prints a snapshot to stdout. Pure observer thread — it never drives
// matching and never holds a lock across the print.
//--------------------------------------------------------------------------------------------------

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::channel::OrderChannel;
use crate::matching_engine::MatchingEngine;

const DEPTH_LEVELS: usize = 5;
const SAMPLE_INTERVAL: Duration = Duration::from_millis(500);

/// Prints a depth snapshot of `engine`'s book and `channel`'s backlog at a fixed cadence until
/// `stop` is observed.
pub struct ConsoleRenderer {
    engine: Arc<MatchingEngine>,
    channel: Arc<OrderChannel>,
    stop: Arc<AtomicBool>,
}

impl ConsoleRenderer {
    pub fn new(engine: Arc<MatchingEngine>, channel: Arc<OrderChannel>, stop: Arc<AtomicBool>) -> Self {
        Self { engine, channel, stop }
    }

    pub fn run(&self) {
        while !self.stop.load(Ordering::Relaxed) {
            self.render_once();
            std::thread::sleep(SAMPLE_INTERVAL);
        }
    }

    fn render_once(&self) {
        let bids = self.engine.order_book().top_bids(DEPTH_LEVELS);
        let asks = self.engine.order_book().top_asks(DEPTH_LEVELS);
        let last_trade = self.engine.last_trade();
        let backlog = self.channel.size();

        println!("----------------------------------------------------");
        println!("{:>12} | {:>10} || {:>10} | {:>12}", "bid qty", "bid px", "ask px", "ask qty");
        for i in 0..DEPTH_LEVELS {
            let bid = bids.get(i);
            let ask = asks.get(i);
            println!(
                "{:>12} | {:>10} || {:>10} | {:>12}",
                bid.map(|l| l.total_quantity.to_string()).unwrap_or_default(),
                bid.map(|l| l.price.to_string()).unwrap_or_default(),
                ask.map(|l| l.price.to_string()).unwrap_or_default(),
                ask.map(|l| l.total_quantity.to_string()).unwrap_or_default(),
            );
        }
        match last_trade {
            Some(trade) => println!(
                "last trade: {} @ {} (buy={}, sell={})",
                trade.quantity, trade.price, trade.buy_order_id, trade.sell_order_id
            ),
            None => println!("last trade: none"),
        }
        println!("pending orders: {}", backlog);
    }
}
