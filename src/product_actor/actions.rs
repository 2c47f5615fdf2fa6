use crate::domain::Product;

/// Custom actions for Product entities.
///
/// Stock only ever changes through these, never through a patch.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Overwrites the stock level with a value computed by the caller.
    SetStock(i64),
    /// Decrements stock by the given amount only if enough is available.
    ReserveStock(u32),
    /// Adds units back to stock.
    Restock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    SetStock(Product),
    ReserveStock(StockReservation),
    Restock(i64),
}

/// Outcome of a conditional stock decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockReservation {
    Reserved { remaining: i64 },
    Insufficient { available: i64 },
}
