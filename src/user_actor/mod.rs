//! User store documents and errors.

pub mod entity;
pub mod error;

pub use error::*;
