mod fallback_tests;
mod greeks_tests;
mod implied_volatility_tests;
mod valuation_tests;
