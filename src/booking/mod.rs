//! Core seat-booking module
//!
//! This module contains the seat grid, pricing rules, and the booking engine
//! that allocates contiguous seat blocks for a venue's events.

pub mod engine;
pub mod error;
pub mod grid;
pub mod pricing;
pub mod types;
pub mod venue;

// Re-export main types for convenience
pub use engine::{BookingEngine, RowSource, ScriptedRows, MAX_TICKETS};
pub use error::{BookingError, BookingResult};
pub use grid::SeatGrid;
pub use pricing::{PriceQuote, PricingConfig};
pub use types::{
    BookingConfirmation, BookingRequest, EventId, Member, Price, RowRejection, SeatMap, SeatState,
    TicketCount, COLS, ROWS,
};
pub use venue::{Event, RevenueReport, Venue, DEFAULT_EVENTS};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        // Test that all main types are accessible
        let _venue = Venue::default();
        let _engine = BookingEngine::default();
        let _grid = SeatGrid::new();
        let _error = BookingError::InvalidTicketCount;
        let _quote = PricingConfig::default().quote(1);
    }
}
