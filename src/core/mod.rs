//! Core business logic abstractions

pub mod config;
pub mod convert;
pub mod error;
pub mod log;
pub mod price;
pub mod swap;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types for cleaner imports
pub use convert::{ConversionRequest, ConversionResult, ConversionService};
pub use error::ExchangeError;
pub use price::{PriceOracle, PriceQuote};
pub use swap::{SwapRequest, SwapResult, SwapService};
