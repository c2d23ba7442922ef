//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Command-line configuration for the host binary that wraps the matching core with an order
// source and a console renderer.
//--------------------------------------------------------------------------------------------------

use clap::{Parser, ValueEnum};

/// A standalone limit order book matching engine.
#[derive(Parser, Debug)]
#[command(name = "lob-engine", version, about, long_about = None)]
pub struct Cli {
    /// Where incoming orders come from.
    #[arg(long, value_enum, default_value_t = Mode::Random)]
    pub mode: Mode,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Generate uniformly random orders at a fixed cadence.
    Random,
    /// Read `<BUY|SELL> <price> <quantity>` lines from standard input.
    Stdin,
}
