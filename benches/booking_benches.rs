//! Criterion benchmarks for the booking hot paths: the contiguous-run scan,
//! request quoting, and the full book operation.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use seatgrid_booking_engine::booking::engine::{BookingEngine, ScriptedRows};
use seatgrid_booking_engine::booking::grid::SeatGrid;
use seatgrid_booking_engine::booking::pricing::PricingConfig;
use seatgrid_booking_engine::booking::types::{BookingRequest, Member};
use seatgrid_booking_engine::booking::venue::Venue;

fn bench_find_contiguous_free(c: &mut Criterion) {
    // Fragmented row: the scan has to restart its run twice before failing.
    let mut grid = SeatGrid::new();
    grid.book_range(2, 1, 1);
    grid.book_range(2, 3, 1);

    c.bench_function("find_contiguous_free_miss", |b| {
        b.iter(|| black_box(&grid).find_contiguous_free(black_box(2), black_box(2)))
    });

    let fresh = SeatGrid::new();
    c.bench_function("find_contiguous_free_hit", |b| {
        b.iter(|| black_box(&fresh).find_contiguous_free(black_box(2), black_box(5)))
    });
}

fn bench_quote(c: &mut Criterion) {
    let pricing = PricingConfig::default();

    c.bench_function("quote_bulk", |b| b.iter(|| pricing.quote(black_box(5))));
}

fn bench_book(c: &mut Criterion) {
    let engine = BookingEngine::default();
    let request = BookingRequest::new(0, Member::new(42, "Bench Member"), 5);

    // A booking consumes seats, so each iteration gets a fresh venue.
    c.bench_function("book_full_row", |b| {
        b.iter_batched(
            Venue::default,
            |venue| {
                let mut rows = ScriptedRows::new([0]);
                engine.book(&venue, &request, &mut rows).unwrap()
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_find_contiguous_free,
    bench_quote,
    bench_book
);
criterion_main!(benches);
