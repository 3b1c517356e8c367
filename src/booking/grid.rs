use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::booking::types::{SeatMap, SeatState, TicketCount, COLS, ROWS};

/// Fixed-size occupancy grid for one event's seating.
///
/// Rows and columns are 0-based. Out-of-range indices are a caller contract
/// violation and panic, as with any slice access; callers validate
/// user-supplied rows before reaching this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatGrid {
    seats: [[SeatState; COLS]; ROWS],
}

impl SeatGrid {
    pub fn new() -> Self {
        Self {
            seats: [[SeatState::Free; COLS]; ROWS],
        }
    }

    /// Whether the seat at (row, col) is free.
    pub fn is_free(&self, row: usize, col: usize) -> bool {
        self.seats[row][col].is_free()
    }

    /// First-fit scan of one row: the start column of the lowest-indexed run
    /// of `count` consecutive free seats, or `None` if the row has no such
    /// run. Never searches other rows.
    pub fn find_contiguous_free(&self, row: usize, count: TicketCount) -> Option<usize> {
        debug_assert!(count > 0);
        let needed = count as usize;
        let mut run = 0;
        for col in 0..COLS {
            if self.seats[row][col].is_free() {
                run += 1;
                if run == needed {
                    return Some(col + 1 - needed);
                }
            } else {
                run = 0;
            }
        }
        None
    }

    /// Marks `[start_col, start_col + count)` in `row` as booked.
    ///
    /// The range must have been validated free by `find_contiguous_free` with
    /// no interleaved mutation; the engine holds the event's write lock across
    /// the pair.
    pub fn book_range(&mut self, row: usize, start_col: usize, count: TicketCount) {
        for col in start_col..start_col + count as usize {
            debug_assert!(self.is_free(row, col), "seat ({}, {}) already booked", row, col);
            self.seats[row][col] = SeatState::Booked;
        }
    }

    /// Free seats across the whole grid.
    pub fn available_seats(&self) -> usize {
        self.seats
            .iter()
            .flatten()
            .filter(|seat| seat.is_free())
            .count()
    }

    /// Booked seats across the whole grid.
    pub fn booked_seats(&self) -> usize {
        ROWS * COLS - self.available_seats()
    }

    /// Read-only copy for display and reporting.
    pub fn snapshot(&self) -> SeatMap {
        SeatMap {
            seats: self.seats,
            taken_at: Utc::now(),
        }
    }
}

impl Default for SeatGrid {
    fn default() -> Self {
        Self::new()
    }
}
