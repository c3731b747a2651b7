//! Core types: occupant addresses, tracing setup

pub mod address;
pub mod tracing;

pub use address::{Address, AddressError};
pub use tracing::{init_tracing, TracingConfig, TracingError, TracingOutputFormat};
