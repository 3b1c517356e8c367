use serde::{Deserialize, Serialize};
use std::fmt;

use crate::booking::types::{EventId, TicketCount};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingError {
    /// Zero tickets requested
    InvalidTicketCount,

    /// Request exceeds the per-booking ticket cap
    TooManyTickets {
        requested: TicketCount,
        max: TicketCount,
    },

    /// Fewer free seats remain in the whole grid than requested
    InsufficientCapacity {
        requested: TicketCount,
        available: usize,
    },

    /// Event id not present in the venue
    UnknownEvent { event_id: EventId },

    /// Retry budget exhausted (or the row source gave up) with no seats booked
    AttemptsExhausted { attempts: TicketCount },
}

impl fmt::Display for BookingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingError::InvalidTicketCount => write!(f, "ticket count must be at least 1"),
            BookingError::TooManyTickets { requested, max } => write!(
                f,
                "cannot book {} tickets in one request (maximum is {})",
                requested, max
            ),
            BookingError::InsufficientCapacity {
                requested,
                available,
            } => write!(
                f,
                "only {} seats remain, {} requested",
                available, requested
            ),
            BookingError::UnknownEvent { event_id } => {
                write!(f, "no event with id {}", event_id)
            }
            BookingError::AttemptsExhausted { attempts } => write!(
                f,
                "no seats booked after {} row attempts",
                attempts
            ),
        }
    }
}

impl std::error::Error for BookingError {}

/// Result type for booking operations
pub type BookingResult<T> = Result<T, BookingError>;
