//! Line item ledger: immutable records of one product and quantity.

pub mod entity;
pub mod error;

pub use error::*;
