//! Example printing price, implied volatility and Greeks for a small option chain.
//!
//! This example shows how to:
//! 1. Load an engine configuration from JSON
//! 2. Solve Greeks exactly (autodiff) and quickly (closed form) for the same options
//! 3. Request second-order Greeks by index
//! 4. Handle an unsolvable observed price

use bs_greeks::prelude::*;
use tracing::{Level, error, info, warn};

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = match EngineConfig::from_json(r#"{"risk_free_rate": 0.0007, "quiet": true}"#) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    let spot = 100.0;
    let expiry = 30.0 / 365.25;
    let quotes = [("call", 95.0, 6.10), ("call", 100.0, 2.29), ("put", 100.0, 2.28), ("p", 105.0, 5.60)];

    for (kind, strike, price) in quotes {
        let option = match OptionContract::parse(kind, spot, strike, expiry) {
            Ok(option) => option.with_npv(price),
            Err(e) => {
                error!("Skipping quote: {}", e);
                continue;
            }
        };

        let mut exact = option.clone();
        let mut fast = option;
        if let Err(e) = solve_exact(&mut exact, true, &config) {
            error!("Exact solve failed for {} {}: {}", kind, strike, e);
            continue;
        }
        if let Err(e) = solve_fast(&mut fast, true, &config) {
            error!("Fast solve failed for {} {}: {}", kind, strike, e);
            continue;
        }

        info!(
            "{} K={} price={:.4} iv={:.4}",
            exact.kind,
            strike,
            price,
            exact.iv.unwrap_or_default()
        );
        if let Some(greeks) = exact.greeks {
            info!("  exact: {}", greeks);
        }
        if let Some(greeks) = fast.greeks {
            info!("  fast:  {}", greeks);
        }
    }

    let which: Result<Vec<_>, _> = [0, 1, 2, 3, 4].into_iter().map(SecondOrder::from_index).collect();
    match which {
        Ok(which) => {
            let values = price_second_greeks(
                OptionKind::Call,
                spot,
                100.0,
                expiry,
                0.2,
                config.risk_free_rate,
                &which,
            );
            for (greek, value) in which.iter().zip(values) {
                info!("{:?}: {:.8}", greek, value);
            }
        }
        Err(e) => error!("Invalid second-order request: {}", e),
    }

    let mut impossible = OptionContract::call(spot, 100.0, expiry).with_npv(150.0);
    match implied_volatility_auto(&mut impossible, 0.0, &config) {
        Ok(iv) if iv == 0.0 => warn!("Price 150 is unattainable, iv set to the 0.0 sentinel"),
        Ok(iv) => info!("Unexpected iv {}", iv),
        Err(e) => error!("Unexpected error: {}", e),
    }

    match serde_json::to_string_pretty(&config) {
        Ok(json) => info!("Configuration used:\n{}", json),
        Err(e) => error!("Failed to serialize configuration: {}", e),
    }
}
