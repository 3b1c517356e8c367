use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::booking::grid::SeatGrid;
use crate::booking::pricing::PricingConfig;
use crate::booking::types::{EventId, Price, SeatMap, TicketCount};

/// Names of the events every venue starts with.
pub const DEFAULT_EVENTS: [&str; 3] = ["Concert", "Sport Games", "Theatre"];

/// One bookable event: a name, its seat grid, and the cumulative sales
/// counter. The grid is owned exclusively; events are never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub grid: SeatGrid,
    pub tickets_sold: u64,
}

impl Event {
    pub fn new(id: EventId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            grid: SeatGrid::new(),
            tickets_sold: 0,
        }
    }

    pub fn record_sale(&mut self, tickets: TicketCount) {
        self.tickets_sold += u64::from(tickets);
    }
}

/// Process-wide booking state: the ordered collection of events, constructed
/// once at startup and passed by reference into the engine.
///
/// Each event sits behind its own lock; the engine takes the write lock for
/// the span of a find/book pair so the pair sees no interleaved mutation.
#[derive(Debug)]
pub struct Venue {
    events: Vec<RwLock<Event>>,
}

impl Venue {
    pub fn new(names: &[&str]) -> Self {
        info!("creating venue with {} events", names.len());

        Self {
            events: names
                .iter()
                .enumerate()
                .map(|(id, name)| RwLock::new(Event::new(id, *name)))
                .collect(),
        }
    }

    pub fn event(&self, id: EventId) -> Option<&RwLock<Event>> {
        self.events.get(id)
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn event_name(&self, id: EventId) -> Option<String> {
        self.events.get(id).map(|event| event.read().name.clone())
    }

    /// Seat-map copy for one event.
    pub fn snapshot(&self, id: EventId) -> Option<SeatMap> {
        self.events.get(id).map(|event| event.read().grid.snapshot())
    }

    /// Admin revenue view: cumulative sold count and revenue per event, in
    /// event order. The bulk discount re-applies to the cumulative total
    /// (see [`PricingConfig::revenue`]).
    pub fn revenue_reports(&self, pricing: &PricingConfig) -> Vec<RevenueReport> {
        self.events
            .iter()
            .map(|event| {
                let event = event.read();
                RevenueReport {
                    event_id: event.id,
                    event_name: event.name.clone(),
                    tickets_sold: event.tickets_sold,
                    revenue: pricing.revenue(event.tickets_sold),
                }
            })
            .collect()
    }
}

impl Default for Venue {
    fn default() -> Self {
        Self::new(&DEFAULT_EVENTS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueReport {
    pub event_id: EventId,
    pub event_name: String,
    pub tickets_sold: u64,
    pub revenue: Price,
}
