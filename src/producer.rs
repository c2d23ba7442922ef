//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Order sources that validate and admit orders onto an OrderChannel. Neither producer is part of
// the matching core's contract — both are ordinary collaborators that assign `id`/`timestamp` at
// admission and push pre-validated orders, exactly as the matcher expects.
//
// | Component        | Description                                                         |
// |------------------|-----------------------------------------------------------------------|
// | RandomProducer   | Emits uniformly random orders at a fixed cadence.                     |
// | StdinProducer    | Parses `<BUY|SELL> <price> <quantity>` lines from standard input.     |
//--------------------------------------------------------------------------------------------------

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::channel::OrderProducerHandle;
use crate::errors::InputError;
use crate::types::{round_to_tick, Order, Side};

const RANDOM_PRICE_MIN: Decimal = dec!(95.00);
const RANDOM_PRICE_MAX: Decimal = dec!(105.00);
const RANDOM_QUANTITY_MIN: u64 = 100;
const RANDOM_QUANTITY_MAX: u64 = 10_000;
const RANDOM_INTER_ARRIVAL: Duration = Duration::from_millis(100);

/// Assigns globally unique, run-scoped order ids. Shared by every producer so ids never collide
/// regardless of how many producer threads are running.
#[derive(Default)]
pub struct OrderIdAllocator {
    next: AtomicU64,
}

impl OrderIdAllocator {
    pub fn new() -> Self {
        // id 0 is reserved for the shutdown sentinel.
        Self { next: AtomicU64::new(1) }
    }

    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

/// Validates externally supplied price/quantity before an `Order` is constructed. Orders that
/// fail validation never reach the channel.
pub fn admit(
    ids: &OrderIdAllocator,
    side: Side,
    price: Decimal,
    quantity: i64,
) -> Result<Order, InputError> {
    if price <= Decimal::ZERO {
        return Err(InputError::NonPositivePrice(price.to_string()));
    }
    if quantity < 0 {
        return Err(InputError::InvalidQuantity(quantity.to_string()));
    }
    Ok(Order::new(ids.next(), side, round_to_tick(price), quantity as u64))
}

/// Emits uniformly random orders at a fixed cadence until `stop` is observed.
pub struct RandomProducer {
    handle: OrderProducerHandle,
    ids: Arc<OrderIdAllocator>,
    stop: Arc<AtomicBool>,
}

impl RandomProducer {
    pub fn new(handle: OrderProducerHandle, ids: Arc<OrderIdAllocator>, stop: Arc<AtomicBool>) -> Self {
        Self { handle, ids, stop }
    }

    pub fn run(&self) {
        let mut rng = rand::thread_rng();
        while !self.stop.load(Ordering::Relaxed) {
            let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            let min = RANDOM_PRICE_MIN.to_f64().unwrap_or(95.0);
            let max = RANDOM_PRICE_MAX.to_f64().unwrap_or(105.0);
            let price = round_to_tick(Decimal::try_from(rng.gen_range(min..=max)).unwrap_or(RANDOM_PRICE_MIN));
            let quantity = rng.gen_range(RANDOM_QUANTITY_MIN..=RANDOM_QUANTITY_MAX);

            match admit(&self.ids, side, price, quantity as i64) {
                Ok(order) => self.handle.push(order),
                Err(err) => warn!(%err, "random producer generated an invalid order"),
            }
            std::thread::sleep(RANDOM_INTER_ARRIVAL);
        }
    }
}

/// Reads `<BUY|SELL|buy|sell> <price> <quantity>` lines from a reader (normally stdin) until
/// `quit`/`exit` or end of input. Malformed lines are reported and skipped, never terminating the
/// producer.
pub struct StdinProducer {
    handle: OrderProducerHandle,
    ids: Arc<OrderIdAllocator>,
}

impl StdinProducer {
    pub fn new(handle: OrderProducerHandle, ids: Arc<OrderIdAllocator>) -> Self {
        Self { handle, ids }
    }

    pub fn run<R: BufRead>(&self, reader: R) {
        for line in reader.lines() {
            let Ok(line) = line else { break };
            let trimmed = line.trim();
            if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
                break;
            }
            if trimmed.is_empty() {
                continue;
            }
            match parse_line(trimmed) {
                Ok((side, price, quantity)) => match admit(&self.ids, side, price, quantity) {
                    Ok(order) => self.handle.push(order),
                    Err(err) => warn!(%err, line = trimmed, "rejected order line"),
                },
                Err(err) => warn!(%err, line = trimmed, "could not parse order line"),
            }
        }
    }
}

fn parse_line(line: &str) -> Result<(Side, Decimal, i64), InputError> {
    let mut tokens = line.split_whitespace();
    let side_token = tokens
        .next()
        .ok_or_else(|| InputError::MalformedLine(line.to_string()))?;
    let side = match side_token.to_ascii_uppercase().as_str() {
        "BUY" => Side::Buy,
        "SELL" => Side::Sell,
        _ => return Err(InputError::UnknownSide(side_token.to_string())),
    };

    let price_token = tokens
        .next()
        .ok_or_else(|| InputError::MalformedLine(line.to_string()))?;
    let price: Decimal = price_token
        .parse()
        .map_err(|_| InputError::MalformedLine(line.to_string()))?;

    let quantity_token = tokens
        .next()
        .ok_or_else(|| InputError::MalformedLine(line.to_string()))?;
    let quantity: i64 = quantity_token
        .parse()
        .map_err(|_| InputError::InvalidQuantity(quantity_token.to_string()))?;

    if tokens.next().is_some() {
        return Err(InputError::MalformedLine(line.to_string()));
    }

    Ok((side, price, quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_line() {
        let (side, price, quantity) = parse_line("BUY 100.00 50").unwrap();
        assert_eq!(side, Side::Buy);
        assert_eq!(price, dec!(100.00));
        assert_eq!(quantity, 50);
    }

    #[test]
    fn side_token_is_case_insensitive() {
        let (side, _, _) = parse_line("sell 100.00 50").unwrap();
        assert_eq!(side, Side::Sell);
    }

    #[test]
    fn unknown_side_token_is_rejected() {
        assert_eq!(
            parse_line("HOLD 100.00 50"),
            Err(InputError::UnknownSide("HOLD".to_string()))
        );
    }

    #[test]
    fn missing_tokens_are_malformed() {
        assert!(matches!(parse_line("BUY 100.00"), Err(InputError::MalformedLine(_))));
    }

    #[test]
    fn trailing_tokens_are_malformed() {
        assert!(matches!(
            parse_line("BUY 100.00 50 extra"),
            Err(InputError::MalformedLine(_))
        ));
    }

    #[test]
    fn admit_rejects_non_positive_price() {
        let ids = OrderIdAllocator::new();
        assert!(matches!(
            admit(&ids, Side::Buy, dec!(0), 10),
            Err(InputError::NonPositivePrice(_))
        ));
    }

    #[test]
    fn admit_rejects_negative_quantity() {
        let ids = OrderIdAllocator::new();
        assert!(matches!(
            admit(&ids, Side::Buy, dec!(100.00), -1),
            Err(InputError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn admit_rounds_price_to_the_tick() {
        let ids = OrderIdAllocator::new();
        let order = admit(&ids, Side::Buy, dec!(100.006), 10).unwrap();
        assert_eq!(order.price, dec!(100.01));
    }

    #[test]
    fn id_allocator_never_repeats_and_skips_zero() {
        let ids = OrderIdAllocator::new();
        let first = ids.next();
        let second = ids.next();
        assert_ne!(first, 0);
        assert_ne!(first, second);
    }
}
