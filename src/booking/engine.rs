use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::booking::error::{BookingError, BookingResult};
use crate::booking::pricing::{PriceQuote, PricingConfig};
use crate::booking::types::{BookingConfirmation, BookingRequest, RowRejection, TicketCount, ROWS};
use crate::booking::venue::Venue;
use crate::metrics::BookingMetrics;

/// Most tickets a single request may book.
pub const MAX_TICKETS: TicketCount = 5;

/// Supplies candidate rows for a booking attempt.
///
/// The engine never reads input itself; the interactive front end backs this
/// with stdin, tests and benchmarks with scripted sequences, which keeps the
/// retry loop deterministic.
pub trait RowSource {
    /// Next candidate row, 0-based. `None` means the caller gave up.
    fn next_row(&mut self) -> Option<i64>;

    /// Called when a candidate row is refused, before the next prompt.
    fn on_rejection(&mut self, rejection: &RowRejection) {
        let _ = rejection;
    }
}

/// Fixed sequence of rows, for tests and benchmarks. Records every rejection
/// it is notified of.
pub struct ScriptedRows {
    rows: std::vec::IntoIter<i64>,
    pub rejections: Vec<RowRejection>,
}

impl ScriptedRows {
    pub fn new(rows: impl IntoIterator<Item = i64>) -> Self {
        Self {
            rows: rows.into_iter().collect::<Vec<_>>().into_iter(),
            rejections: Vec::new(),
        }
    }
}

impl RowSource for ScriptedRows {
    fn next_row(&mut self) -> Option<i64> {
        self.rows.next()
    }

    fn on_rejection(&mut self, rejection: &RowRejection) {
        self.rejections.push(*rejection);
    }
}

/// Turns booking requests into seat reservations plus priced confirmations.
///
/// A request either books its full contiguous block in one row or books
/// nothing; there is no partial booking and no automatic row fallback.
pub struct BookingEngine {
    pricing: PricingConfig,
    max_tickets: TicketCount,
    metrics: Arc<BookingMetrics>,
}

impl BookingEngine {
    pub fn new(pricing: PricingConfig) -> Self {
        Self {
            pricing,
            max_tickets: MAX_TICKETS,
            metrics: Arc::new(BookingMetrics::new()),
        }
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    pub fn metrics(&self) -> Arc<BookingMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Price a request before any seat is chosen.
    pub fn quote(&self, tickets: TicketCount) -> PriceQuote {
        self.pricing.quote(tickets)
    }

    /// Book a contiguous block for `request` against one of `venue`'s events.
    ///
    /// Candidate rows come from `rows`, one attempt per requested ticket;
    /// out-of-range rows are reported and re-prompted without consuming the
    /// budget. An exhausted budget (or a source that gives up) leaves the
    /// grid untouched.
    pub fn book(
        &self,
        venue: &Venue,
        request: &BookingRequest,
        rows: &mut dyn RowSource,
    ) -> BookingResult<BookingConfirmation> {
        let outcome = self.metrics.time_book(|| self.book_inner(venue, request, rows));

        match &outcome {
            Ok(confirmation) => self.metrics.record_confirmed(
                confirmation.tickets,
                confirmation.quote.net,
                confirmation.quote.discount,
            ),
            Err(_) => self.metrics.record_rejected(),
        }

        outcome
    }

    fn book_inner(
        &self,
        venue: &Venue,
        request: &BookingRequest,
        rows: &mut dyn RowSource,
    ) -> BookingResult<BookingConfirmation> {
        debug!("processing booking request: {:?}", request);

        if request.tickets == 0 {
            return Err(BookingError::InvalidTicketCount);
        }

        if request.tickets > self.max_tickets {
            return Err(BookingError::TooManyTickets {
                requested: request.tickets,
                max: self.max_tickets,
            });
        }

        let event = venue.event(request.event_id).ok_or(BookingError::UnknownEvent {
            event_id: request.event_id,
        })?;

        // Whole-grid capacity check, once, before any row is tried.
        let available = event.read().grid.available_seats();
        if available < request.tickets as usize {
            return Err(BookingError::InsufficientCapacity {
                requested: request.tickets,
                available,
            });
        }

        let quote = self.pricing.quote(request.tickets);

        // One attempt per requested ticket. Out-of-range rows re-prompt
        // without touching the budget; a row without a contiguous run costs
        // one attempt.
        let mut attempts_left = request.tickets;
        while attempts_left > 0 {
            let Some(candidate) = rows.next_row() else {
                debug!("row source gave up with {} attempts left", attempts_left);
                break;
            };

            if candidate < 0 || candidate >= ROWS as i64 {
                let rejection = RowRejection::OutOfRange { given: candidate };
                warn!("rejected row choice: {}", rejection);
                rows.on_rejection(&rejection);
                continue;
            }
            let row = candidate as usize;

            // The find/book pair must see no interleaved mutation; hold the
            // event's write lock for the span of both.
            let mut event_guard = event.write();
            if let Some(start_col) = event_guard.grid.find_contiguous_free(row, request.tickets) {
                event_guard.grid.book_range(row, start_col, request.tickets);
                event_guard.record_sale(request.tickets);
                drop(event_guard);

                let confirmation = BookingConfirmation {
                    receipt_id: Uuid::new_v4(),
                    event_id: request.event_id,
                    member: request.member.clone(),
                    row,
                    start_col,
                    end_col: start_col + request.tickets as usize - 1,
                    tickets: request.tickets,
                    quote,
                    booked_at: Utc::now(),
                };

                info!(
                    "booked {} seats at row {}, columns {}-{} for member {} (net {})",
                    confirmation.tickets,
                    confirmation.row + 1,
                    confirmation.start_col + 1,
                    confirmation.end_col + 1,
                    confirmation.member.id,
                    confirmation.quote.net
                );
                return Ok(confirmation);
            }
            drop(event_guard);

            let rejection = RowRejection::NoContiguousRun {
                row,
                seats_needed: request.tickets,
            };
            debug!("booking attempt refused: {}", rejection);
            rows.on_rejection(&rejection);
            self.metrics.record_row_retry();
            attempts_left -= 1;
        }

        Err(BookingError::AttemptsExhausted {
            attempts: request.tickets,
        })
    }
}

impl Default for BookingEngine {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}
