//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Entry point for the standalone matching engine host: wires an order source (random generator or
// stdin reader), the matching core, and a console renderer together on their own threads, and
// tears them down cleanly on SIGINT/SIGTERM.
//--------------------------------------------------------------------------------------------------
// Run with random order flow:  lob-engine --mode random
// Run reading orders from stdin: lob-engine --mode stdin
//--------------------------------------------------------------------------------------------------

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use tracing::{info, Level};

use lob_matching_engine::config::{Cli, Mode};
use lob_matching_engine::matching_engine::MatchingEngine;
use lob_matching_engine::producer::{OrderIdAllocator, RandomProducer, StdinProducer};
use lob_matching_engine::renderer::ConsoleRenderer;
use lob_matching_engine::types::Order;
use lob_matching_engine::OrderChannel;

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
    let cli = Cli::parse();

    let channel = Arc::new(OrderChannel::new());
    let engine = Arc::new(MatchingEngine::new());
    let stop = Arc::new(AtomicBool::new(false));
    let ids = Arc::new(OrderIdAllocator::new());

    let stop_for_signal = Arc::clone(&stop);
    let sentinel_handle = channel.producer();
    if let Err(err) = ctrlc::set_handler(move || {
        info!("shutdown signal received");
        stop_for_signal.store(true, Ordering::SeqCst);
        sentinel_handle.push(Order::shutdown_sentinel());
    }) {
        eprintln!("failed to install signal handler: {err}");
        std::process::exit(1);
    }

    let producer_thread = spawn_producer(&cli, &channel, &ids, &stop);

    let renderer_stop = Arc::clone(&stop);
    let renderer_engine = Arc::clone(&engine);
    let renderer_channel = Arc::clone(&channel);
    let renderer_thread = std::thread::spawn(move || {
        ConsoleRenderer::new(renderer_engine, renderer_channel, renderer_stop).run();
    });

    let matcher_channel = Arc::clone(&channel);
    let matcher_engine = Arc::clone(&engine);
    let matcher_thread = std::thread::spawn(move || {
        loop {
            let order = matcher_channel.pop();
            if order.is_shutdown_sentinel() {
                break;
            }
            let trades = matcher_engine.process_order(order);
            for trade in trades {
                info!(
                    buy = trade.buy_order_id,
                    sell = trade.sell_order_id,
                    price = %trade.price,
                    quantity = trade.quantity,
                    "trade executed"
                );
            }
        }
    });

    if let Some(thread) = producer_thread {
        let _ = thread.join();
    }
    let _ = matcher_thread.join();
    let _ = renderer_thread.join();
    info!("shutdown complete");
}

fn spawn_producer(
    cli: &Cli,
    channel: &Arc<OrderChannel>,
    ids: &Arc<OrderIdAllocator>,
    stop: &Arc<AtomicBool>,
) -> Option<std::thread::JoinHandle<()>> {
    let handle = channel.producer();
    let ids = Arc::clone(ids);
    match cli.mode {
        Mode::Random => {
            let stop = Arc::clone(stop);
            Some(std::thread::spawn(move || {
                RandomProducer::new(handle, ids, stop).run();
            }))
        }
        Mode::Stdin => {
            let stop = Arc::clone(stop);
            Some(std::thread::spawn(move || {
                StdinProducer::new(handle.clone(), ids).run(io::stdin().lock());
                stop.store(true, Ordering::SeqCst);
                handle.push(Order::shutdown_sentinel());
            }))
        }
    }
}
