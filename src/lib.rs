//! Single-Venue Seat Booking Engine
//!
//! An in-memory booking engine for a fixed set of events: contiguous-block
//! seat allocation, bulk-discount pricing, and per-event revenue reporting.
//!
//! # Features
//!
//! - **Contiguous Allocation**: First-fit search for a run of free seats within one row
//! - **All-or-Nothing Bookings**: A request books its full block or books nothing
//! - **Bulk Pricing**: Percentage discount once a request reaches the bulk threshold
//! - **Revenue Reporting**: Cumulative per-event sales under the same discount rule
//! - **Injectable Row Input**: Retry loop driven by a `RowSource`, deterministic in tests
//! - **Built-in Metrics**: Booking outcomes and latency on the `metrics` facade
//!
//! # Quick Start
//!
//! ```rust
//! use seatgrid_booking_engine::booking::engine::{BookingEngine, ScriptedRows};
//! use seatgrid_booking_engine::booking::types::{BookingRequest, Member};
//! use seatgrid_booking_engine::booking::venue::Venue;
//!
//! // Create a venue with the default events
//! let venue = Venue::default();
//! let engine = BookingEngine::default();
//!
//! // Book three seats on the first event, row 3 (0-based row 2)
//! let request = BookingRequest::new(0, Member::new(7, "Alex"), 3);
//! let mut rows = ScriptedRows::new([2]);
//! let confirmation = engine.book(&venue, &request, &mut rows)?;
//!
//! assert_eq!(confirmation.row, 2);
//! assert_eq!(confirmation.quote.net, 300);
//!
//! # Ok::<(), seatgrid_booking_engine::booking::error::BookingError>(())
//! ```
//!
//! # Architecture
//!
//! The engine uses a two-level ownership structure:
//!
//! 1. **Venue**: `Vec<RwLock<Event>>` — the ordered, fixed collection of events
//! 2. **SeatGrid**: within each event, a fixed `ROWS x COLS` occupancy matrix
//!
//! The write lock on an event is held for the span of each
//! `find_contiguous_free`/`book_range` pair, so a validated block can never be
//! taken by an interleaved mutation, and is released before the engine blocks
//! on the next row choice.

pub mod booking;
pub mod metrics;

// Re-export commonly used types
pub use booking::{
    engine::{BookingEngine, RowSource, ScriptedRows, MAX_TICKETS},
    error::{BookingError, BookingResult},
    grid::SeatGrid,
    pricing::{PriceQuote, PricingConfig},
    types::{BookingConfirmation, BookingRequest, EventId, Member, Price, SeatMap, SeatState},
    venue::{Event, RevenueReport, Venue},
};

pub use metrics::BookingMetrics;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::booking::types::{RowRejection, TicketCount};

    fn book(
        engine: &BookingEngine,
        venue: &Venue,
        tickets: TicketCount,
        rows: &[i64],
    ) -> BookingResult<BookingConfirmation> {
        let request = BookingRequest::new(0, Member::new(1001, "Robin Chase"), tickets);
        let mut source = ScriptedRows::new(rows.iter().copied());
        engine.book(venue, &request, &mut source)
    }

    #[test]
    fn test_full_booking_workflow() {
        let venue = Venue::default();
        let engine = BookingEngine::default();

        // Quote shown before seat selection, as the front end displays it
        let quote = engine.quote(5);
        assert_eq!((quote.gross, quote.discount, quote.net), (500, 50, 450));

        let confirmation = book(&engine, &venue, 5, &[2]).unwrap();
        assert_eq!(confirmation.row, 2);
        assert_eq!((confirmation.start_col, confirmation.end_col), (0, 4));
        assert_eq!(confirmation.quote.net, 450);

        let map = venue.snapshot(0).unwrap();
        assert_eq!(map.booked_seats(), 5);
        assert!(!map.seat(2, 0).is_free());
    }

    #[test]
    fn test_cumulative_revenue_differs_from_per_booking_totals() {
        let venue = Venue::default();
        let engine = BookingEngine::default();

        // Two 3-ticket bookings: neither is discounted on its own.
        let first = book(&engine, &venue, 3, &[0]).unwrap();
        let second = book(&engine, &venue, 3, &[1]).unwrap();
        assert_eq!(first.quote.net + second.quote.net, 600);

        // The admin report discounts the cumulative six tickets.
        let reports = venue.revenue_reports(engine.pricing());
        assert_eq!(reports[0].tickets_sold, 6);
        assert_eq!(reports[0].revenue, 540);
    }

    #[test]
    fn test_capacity_exhaustion_across_a_session() {
        let venue = Venue::default();
        let engine = BookingEngine::default();

        // Fill every row of the first event.
        for row in 0..5 {
            book(&engine, &venue, 5, &[row]).unwrap();
        }

        let result = book(&engine, &venue, 1, &[0]);
        assert_eq!(
            result,
            Err(BookingError::InsufficientCapacity {
                requested: 1,
                available: 0
            })
        );

        // Other events are untouched.
        assert_eq!(venue.snapshot(1).unwrap().booked_seats(), 0);
    }

    #[test]
    fn test_retries_surface_to_the_row_source() {
        let venue = Venue::default();
        let engine = BookingEngine::default();

        book(&engine, &venue, 5, &[0]).unwrap();

        let request = BookingRequest::new(0, Member::new(7, "Sam"), 2);
        let mut source = ScriptedRows::new([9, 0, 1]);
        let confirmation = engine.book(&venue, &request, &mut source).unwrap();

        assert_eq!(confirmation.row, 1);
        assert_eq!(
            source.rejections,
            vec![
                RowRejection::OutOfRange { given: 9 },
                RowRejection::NoContiguousRun {
                    row: 0,
                    seats_needed: 2
                },
            ]
        );
    }

    #[test]
    fn test_metrics_account_for_the_session() {
        let venue = Venue::default();
        let engine = BookingEngine::default();
        let metrics = engine.metrics();

        book(&engine, &venue, 5, &[0]).unwrap();
        book(&engine, &venue, 3, &[1]).unwrap();
        book(&engine, &venue, 0, &[2]).unwrap_err();

        assert_eq!(metrics.get_bookings_confirmed(), 2);
        assert_eq!(metrics.get_bookings_rejected(), 1);
        assert_eq!(metrics.get_seats_sold(), 8);
        assert_eq!(metrics.get_net_revenue(), 750);
        assert_eq!(metrics.get_discounts_granted(), 50);
        assert_eq!(metrics.get_latency_stats().samples, 3);
    }
}
