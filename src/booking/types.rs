use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::booking::pricing::PriceQuote;

/// Number of seat rows in every event's grid.
pub const ROWS: usize = 5;
/// Number of seats per row.
pub const COLS: usize = 5;

pub type EventId = usize;
pub type Price = u64; // Whole currency units (no sub-unit precision)
pub type TicketCount = u32;

/// Occupancy state of a single seat. Once booked, a seat never goes back to
/// free; there is no cancellation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatState {
    Free,
    Booked,
}

impl SeatState {
    pub fn is_free(&self) -> bool {
        matches!(self, SeatState::Free)
    }
}

impl fmt::Display for SeatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeatState::Free => write!(f, "O"),
            SeatState::Booked => write!(f, "X"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: u64,
    pub name: String,
}

impl Member {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// One booking attempt. Lives only for the duration of the call into the
/// engine; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub event_id: EventId,
    pub member: Member,
    pub tickets: TicketCount,
}

impl BookingRequest {
    pub fn new(event_id: EventId, member: Member, tickets: TicketCount) -> Self {
        Self {
            event_id,
            member,
            tickets,
        }
    }
}

/// Successful outcome of a booking: the seat block that was reserved and the
/// price that applied to it. Consumed by the caller for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub receipt_id: Uuid,
    pub event_id: EventId,
    pub member: Member,
    pub row: usize,
    pub start_col: usize,
    /// Inclusive end column of the booked block.
    pub end_col: usize,
    pub tickets: TicketCount,
    pub quote: PriceQuote,
    pub booked_at: DateTime<Utc>,
}

impl BookingConfirmation {
    pub fn seat_count(&self) -> usize {
        self.end_col - self.start_col + 1
    }
}

/// Recoverable reasons a chosen row was refused. These are reported back to
/// the row source so it can re-prompt; they are not terminal errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowRejection {
    /// The chosen row is outside the grid. Does not consume a retry attempt.
    OutOfRange { given: i64 },
    /// The row exists but holds no run of `seats_needed` consecutive free
    /// seats. Consumes one retry attempt.
    NoContiguousRun { row: usize, seats_needed: TicketCount },
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowRejection::OutOfRange { given } => write!(
                f,
                "row {} is out of range (valid rows are 1 to {})",
                given + 1,
                ROWS
            ),
            RowRejection::NoContiguousRun { row, seats_needed } => write!(
                f,
                "row {} has no {} consecutive free seats",
                row + 1,
                seats_needed
            ),
        }
    }
}

/// Read-only copy of an event's seat grid, for display and reporting. Never
/// aliases the live grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatMap {
    pub seats: [[SeatState; COLS]; ROWS],
    pub taken_at: DateTime<Utc>,
}

impl SeatMap {
    pub fn seat(&self, row: usize, col: usize) -> SeatState {
        self.seats[row][col]
    }

    pub fn booked_seats(&self) -> usize {
        self.seats
            .iter()
            .flatten()
            .filter(|seat| !seat.is_free())
            .count()
    }
}

impl fmt::Display for SeatMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.seats {
            for (col, seat) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "[{}]", seat)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
