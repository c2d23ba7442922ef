//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// A FIFO handoff from one or more producer threads to the single matcher thread. Built on
// `crossbeam_channel::unbounded`, which already provides the multi-producer/single-consumer
// guarantees the matching core needs without a hand-rolled mutex and condition variable.
//--------------------------------------------------------------------------------------------------

use crossbeam_channel::{Receiver, Sender, TryRecvError};

use crate::types::Order;

/// Multi-producer, single-consumer queue of admitted orders.
pub struct OrderChannel {
    sender: Sender<Order>,
    receiver: Receiver<Order>,
}

impl OrderChannel {
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self { sender, receiver }
    }

    /// A handle producers can clone and move into their own threads.
    pub fn producer(&self) -> OrderProducerHandle {
        OrderProducerHandle {
            sender: self.sender.clone(),
        }
    }

    /// Enqueues an order. Never blocks beyond uncontended lock acquisition inside the channel.
    pub fn push(&self, order: Order) {
        // An unbounded channel's only send failure is a disconnected receiver, which cannot
        // happen here: the channel always holds its own receiver alive.
        self.sender.send(order).expect("receiver outlives every sender held by this channel");
    }

    /// Blocks until an order is available.
    pub fn pop(&self) -> Order {
        self.receiver.recv().expect("sender outlives the channel itself")
    }

    /// Returns immediately: `Some(order)` if one was queued, `None` if the channel is empty.
    pub fn try_pop(&self) -> Option<Order> {
        match self.receiver.try_recv() {
            Ok(order) => Some(order),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Best-effort length snapshot for telemetry; not to be relied on for correctness.
    pub fn size(&self) -> usize {
        self.receiver.len()
    }
}

impl Default for OrderChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// A cloneable producer-side handle, so each producer thread owns its own sender without sharing
/// the consumer-side API.
#[derive(Clone)]
pub struct OrderProducerHandle {
    sender: Sender<Order>,
}

impl OrderProducerHandle {
    pub fn push(&self, order: Order) {
        self.sender.send(order).expect("receiver outlives every sender held by this channel");
    }
}
