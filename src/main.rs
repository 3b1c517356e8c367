//! Interactive console front end for the seat booking engine.
//!
//! Thin glue only: menus, login, and rendering. Every booking and pricing
//! decision happens in the library.

use std::io::{self, BufRead, Write};

use seatgrid_booking_engine::booking::engine::{BookingEngine, RowSource, MAX_TICKETS};
use seatgrid_booking_engine::booking::types::{BookingRequest, Member, RowRejection, ROWS};
use seatgrid_booking_engine::booking::venue::Venue;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .init();

    let venue = Venue::default();
    let engine = BookingEngine::default();

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        println!("\nWelcome to the Event Ticket Booking System");
        println!("1. Login as Member");
        println!("2. Login as Admin");
        println!("3. Exit");

        let Some(line) = read_line(&mut input, "Enter your choice: ")? else {
            break;
        };
        match parse_number::<u32>(&line) {
            Some(1) => member_session(&mut input, &venue, &engine)?,
            Some(2) => admin_session(&mut input, &venue, &engine)?,
            Some(3) => break,
            _ => println!("Invalid choice, please try again."),
        }
    }

    let metrics = engine.metrics();
    println!(
        "\nSession summary: {} bookings confirmed, {} rejected, {} seats sold.",
        metrics.get_bookings_confirmed(),
        metrics.get_bookings_rejected(),
        metrics.get_seats_sold()
    );
    println!("Exiting the system. Thank you!");
    Ok(())
}

fn member_session(
    input: &mut impl BufRead,
    venue: &Venue,
    engine: &BookingEngine,
) -> io::Result<()> {
    let Some(id_line) = read_line(input, "\nEnter your member ID: ")? else {
        return Ok(());
    };
    let Some(member_id) = parse_number::<u64>(&id_line) else {
        println!("Invalid member ID.");
        return Ok(());
    };

    let Some(name) = read_line(input, "Enter your name: ")? else {
        return Ok(());
    };
    if name.is_empty() {
        println!("A name is required.");
        return Ok(());
    }

    println!("\nSelect an event to book tickets:");
    for id in 0..venue.event_count() {
        if let Some(event_name) = venue.event_name(id) {
            println!("{}. {}", id + 1, event_name);
        }
    }
    let Some(choice_line) = read_line(input, "Enter your choice: ")? else {
        return Ok(());
    };
    let event_id = match parse_number::<usize>(&choice_line) {
        Some(choice) if (1..=venue.event_count()).contains(&choice) => choice - 1,
        _ => {
            println!("Invalid event choice. Please try again.");
            return Ok(());
        }
    };

    let event_name = venue.event_name(event_id).unwrap_or_default();
    println!(
        "\nTicket Price for {}: ${}",
        event_name,
        engine.pricing().ticket_price
    );
    if let Some(map) = venue.snapshot(event_id) {
        println!("\nCurrent Seating Arrangement:\n{}", map);
    }

    let Some(count_line) = read_line(input, "Enter the number of tickets you want to book: ")?
    else {
        return Ok(());
    };
    let Some(tickets) = parse_number::<u32>(&count_line) else {
        println!("Invalid ticket count.");
        return Ok(());
    };

    // Show the cost up front, the way the booking desk quotes before seats
    // are picked. The engine re-validates either way.
    if (1..=MAX_TICKETS).contains(&tickets) {
        let quote = engine.quote(tickets);
        println!(
            "\nTotal cost for {} tickets before discount: ${}",
            tickets, quote.gross
        );
        if quote.discount > 0 {
            println!(
                "You are eligible for a bulk discount! Discount amount: ${}",
                quote.discount
            );
        }
    }

    let request = BookingRequest::new(event_id, Member::new(member_id, name), tickets);
    let mut rows = ConsoleRows { input };

    match engine.book(venue, &request, &mut rows) {
        Ok(confirmation) => {
            println!("\nBooking Successful!");
            println!("Receipt: {}", confirmation.receipt_id);
            println!("Member ID: {}", confirmation.member.id);
            println!("Member Name: {}", confirmation.member.name);
            println!(
                "{} consecutive seats booked at Row {}, from Column {} to {}.",
                confirmation.tickets,
                confirmation.row + 1,
                confirmation.start_col + 1,
                confirmation.end_col + 1
            );
            println!(
                "Total amount to pay after discount: ${}",
                confirmation.quote.net
            );
        }
        Err(error) => println!("\nBooking failed: {}.", error),
    }

    if let Some(map) = venue.snapshot(event_id) {
        println!("\nUpdated Seating Arrangement:\n{}", map);
    }
    Ok(())
}

fn admin_session(
    input: &mut impl BufRead,
    venue: &Venue,
    engine: &BookingEngine,
) -> io::Result<()> {
    let Ok(expected) = std::env::var("ADMIN_PASSWORD") else {
        println!("Admin access is not configured (set ADMIN_PASSWORD).");
        return Ok(());
    };

    let Some(entered) = read_line(input, "\nEnter admin password: ")? else {
        return Ok(());
    };
    if !constant_time_eq::constant_time_eq(entered.as_bytes(), expected.as_bytes()) {
        println!("Invalid password. Returning to main menu.");
        return Ok(());
    }
    println!("\nAdmin login successful!");

    loop {
        println!("\nAdmin Menu:");
        println!("1. Check Seats Status");
        println!("2. Check Revenue and Sales");
        println!("3. Exit");

        let Some(line) = read_line(input, "Enter your choice: ")? else {
            return Ok(());
        };
        match parse_number::<u32>(&line) {
            Some(1) => {
                for id in 0..venue.event_count() {
                    if let (Some(name), Some(map)) = (venue.event_name(id), venue.snapshot(id)) {
                        println!("\nEvent: {}\n{}", name, map);
                    }
                }
            }
            Some(2) => {
                for report in venue.revenue_reports(engine.pricing()) {
                    println!("\nEvent: {}", report.event_name);
                    println!("Tickets Sold: {}", report.tickets_sold);
                    println!("Revenue: ${}", report.revenue);
                }
            }
            Some(3) => return Ok(()),
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

/// Row choices read interactively, one prompt per attempt. Non-numeric input
/// re-prompts; end of input ends the booking attempt.
struct ConsoleRows<'a, R: BufRead> {
    input: &'a mut R,
}

impl<R: BufRead> RowSource for ConsoleRows<'_, R> {
    fn next_row(&mut self) -> Option<i64> {
        loop {
            let prompt = format!("Enter the row number (1 to {}): ", ROWS);
            let line = read_line(self.input, &prompt).ok()??;
            match parse_number::<i64>(&line) {
                Some(row) => return Some(row - 1),
                None => println!("Please enter a number."),
            }
        }
    }

    fn on_rejection(&mut self, rejection: &RowRejection) {
        println!("Sorry, {}. Please try another row.", rejection);
    }
}

fn read_line(input: &mut impl BufRead, prompt: &str) -> io::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None); // EOF
    }
    Ok(Some(line.trim().to_string()))
}

fn parse_number<T: std::str::FromStr>(line: &str) -> Option<T> {
    line.trim().parse().ok()
}
