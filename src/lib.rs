// Expose the modules
pub mod channel;
pub mod config;
pub mod errors;
pub mod matching_engine;
pub mod orderbook;
pub mod producer;
pub mod renderer;
pub mod types;

// Re-export key types for easier usage
pub use channel::{OrderChannel, OrderProducerHandle};
pub use errors::{InputError, OrderBookError};
pub use matching_engine::MatchingEngine;
pub use orderbook::{LevelSnapshot, OrderBook};
pub use producer::{admit, OrderIdAllocator, RandomProducer, StdinProducer};
pub use types::{round_to_tick, Order, OrderId, Side, Trade, TICK};
