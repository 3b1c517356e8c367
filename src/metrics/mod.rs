use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Metrics collector for booking operations
#[derive(Debug)]
pub struct BookingMetrics {
    // Latency tracking
    book_latency: LatencyTracker,

    // Outcome counters
    bookings_confirmed: AtomicU64,
    bookings_rejected: AtomicU64,
    row_retries: AtomicU64,

    // Sales tracking
    seats_sold: AtomicU64,
    net_revenue: AtomicU64,
    discounts_granted: AtomicU64,
}

impl BookingMetrics {
    pub fn new() -> Self {
        // Register metric descriptions
        describe_counter!("booking_requests_total", "Total booking requests processed");
        describe_counter!("booking_seats_sold_total", "Total seats sold");
        describe_counter!(
            "booking_row_retries_total",
            "Row choices refused during booking"
        );
        describe_histogram!(
            "booking_operation_duration_seconds",
            "Duration of booking operations"
        );
        describe_gauge!("booking_net_revenue", "Net revenue across all bookings");

        Self {
            book_latency: LatencyTracker::new("book"),
            bookings_confirmed: AtomicU64::new(0),
            bookings_rejected: AtomicU64::new(0),
            row_retries: AtomicU64::new(0),
            seats_sold: AtomicU64::new(0),
            net_revenue: AtomicU64::new(0),
            discounts_granted: AtomicU64::new(0),
        }
    }

    /// Time a book operation
    pub fn time_book<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        self.book_latency.time(f)
    }

    // Counter methods
    pub fn record_confirmed(&self, seats: u32, net: u64, discount: u64) {
        self.bookings_confirmed.fetch_add(1, Ordering::Relaxed);
        self.seats_sold.fetch_add(u64::from(seats), Ordering::Relaxed);
        self.net_revenue.fetch_add(net, Ordering::Relaxed);
        self.discounts_granted.fetch_add(discount, Ordering::Relaxed);

        counter!("booking_requests_total", "outcome" => "confirmed").increment(1);
        counter!("booking_seats_sold_total").increment(u64::from(seats));
        gauge!("booking_net_revenue").set(self.net_revenue.load(Ordering::Relaxed) as f64);
    }

    pub fn record_rejected(&self) {
        self.bookings_rejected.fetch_add(1, Ordering::Relaxed);
        counter!("booking_requests_total", "outcome" => "rejected").increment(1);
    }

    pub fn record_row_retry(&self) {
        self.row_retries.fetch_add(1, Ordering::Relaxed);
        counter!("booking_row_retries_total").increment(1);
    }

    // Getters for current values
    pub fn get_bookings_confirmed(&self) -> u64 {
        self.bookings_confirmed.load(Ordering::Relaxed)
    }

    pub fn get_bookings_rejected(&self) -> u64 {
        self.bookings_rejected.load(Ordering::Relaxed)
    }

    pub fn get_row_retries(&self) -> u64 {
        self.row_retries.load(Ordering::Relaxed)
    }

    pub fn get_seats_sold(&self) -> u64 {
        self.seats_sold.load(Ordering::Relaxed)
    }

    pub fn get_net_revenue(&self) -> u64 {
        self.net_revenue.load(Ordering::Relaxed)
    }

    pub fn get_discounts_granted(&self) -> u64 {
        self.discounts_granted.load(Ordering::Relaxed)
    }

    pub fn get_latency_stats(&self) -> OperationLatencyStats {
        self.book_latency.get_stats()
    }
}

impl Default for BookingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Latency tracker for individual operations
#[derive(Debug)]
struct LatencyTracker {
    operation: String,
    samples: AtomicU64,
    total_nanos: AtomicU64,
    min_nanos: AtomicU64,
    max_nanos: AtomicU64,
}

impl LatencyTracker {
    fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            samples: AtomicU64::new(0),
            total_nanos: AtomicU64::new(0),
            min_nanos: AtomicU64::new(u64::MAX),
            max_nanos: AtomicU64::new(0),
        }
    }

    fn time<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        let duration = start.elapsed();

        self.record_latency(duration);
        result
    }

    fn record_latency(&self, duration: Duration) {
        let nanos = duration.as_nanos() as u64;

        self.samples.fetch_add(1, Ordering::Relaxed);
        self.total_nanos.fetch_add(nanos, Ordering::Relaxed);

        // Update min (with CAS loop)
        let mut current_min = self.min_nanos.load(Ordering::Relaxed);
        while nanos < current_min {
            match self.min_nanos.compare_exchange_weak(
                current_min,
                nanos,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(new_min) => current_min = new_min,
            }
        }

        // Update max (with CAS loop)
        let mut current_max = self.max_nanos.load(Ordering::Relaxed);
        while nanos > current_max {
            match self.max_nanos.compare_exchange_weak(
                current_max,
                nanos,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(new_max) => current_max = new_max,
            }
        }

        // Record in metrics system
        histogram!(
            "booking_operation_duration_seconds",
            "operation" => self.operation.clone()
        )
        .record(duration.as_secs_f64());
    }

    fn get_stats(&self) -> OperationLatencyStats {
        let samples = self.samples.load(Ordering::Relaxed);
        let total = self.total_nanos.load(Ordering::Relaxed);
        let min = self.min_nanos.load(Ordering::Relaxed);
        let max = self.max_nanos.load(Ordering::Relaxed);

        let avg = if samples > 0 { total / samples } else { 0 };

        OperationLatencyStats {
            operation: self.operation.clone(),
            samples,
            avg_nanos: avg,
            min_nanos: if min == u64::MAX { 0 } else { min },
            max_nanos: max,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OperationLatencyStats {
    pub operation: String,
    pub samples: u64,
    pub avg_nanos: u64,
    pub min_nanos: u64,
    pub max_nanos: u64,
}

impl OperationLatencyStats {
    pub fn avg_micros(&self) -> f64 {
        self.avg_nanos as f64 / 1_000.0
    }

    pub fn min_micros(&self) -> f64 {
        self.min_nanos as f64 / 1_000.0
    }

    pub fn max_micros(&self) -> f64 {
        self.max_nanos as f64 / 1_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_metrics_are_zero() {
        let metrics = BookingMetrics::new();
        assert_eq!(metrics.get_bookings_confirmed(), 0);
        assert_eq!(metrics.get_bookings_rejected(), 0);
        assert_eq!(metrics.get_row_retries(), 0);
        assert_eq!(metrics.get_seats_sold(), 0);
        assert_eq!(metrics.get_net_revenue(), 0);

        let stats = metrics.get_latency_stats();
        assert_eq!(stats.samples, 0);
        assert_eq!(stats.min_nanos, 0);
    }

    #[test]
    fn test_counters_accumulate() {
        let metrics = BookingMetrics::new();

        metrics.record_confirmed(5, 450, 50);
        metrics.record_confirmed(3, 300, 0);
        metrics.record_rejected();
        metrics.record_row_retry();
        metrics.record_row_retry();

        assert_eq!(metrics.get_bookings_confirmed(), 2);
        assert_eq!(metrics.get_bookings_rejected(), 1);
        assert_eq!(metrics.get_row_retries(), 2);
        assert_eq!(metrics.get_seats_sold(), 8);
        assert_eq!(metrics.get_net_revenue(), 750);
        assert_eq!(metrics.get_discounts_granted(), 50);
    }

    #[test]
    fn test_latency_tracking_records_samples() {
        let metrics = BookingMetrics::new();

        let value = metrics.time_book(|| 42);
        assert_eq!(value, 42);

        let stats = metrics.get_latency_stats();
        assert_eq!(stats.operation, "book");
        assert_eq!(stats.samples, 1);
        assert!(stats.max_nanos >= stats.min_nanos);
    }
}
