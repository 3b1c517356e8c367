use serde::{Deserialize, Serialize};

use crate::booking::types::{Price, TicketCount};

/// Default price of a single seat, in whole currency units.
pub const TICKET_PRICE: Price = 100;
/// Ticket count at which a sale qualifies for the bulk discount.
pub const BULK_BOOKING_THRESHOLD: TicketCount = 5;
/// Percentage taken off the gross for bulk sales.
pub const DISCOUNT_PERCENTAGE: u64 = 10;

/// Pricing knobs, kept apart from allocation logic so they can change without
/// touching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub ticket_price: Price,
    pub bulk_threshold: TicketCount,
    pub discount_percent: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            ticket_price: TICKET_PRICE,
            bulk_threshold: BULK_BOOKING_THRESHOLD,
            discount_percent: DISCOUNT_PERCENTAGE,
        }
    }
}

/// Gross, discount, and net for one request, computed before any seat is
/// chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub gross: Price,
    pub discount: Price,
    pub net: Price,
}

impl PricingConfig {
    /// Price a single request. Discount arithmetic truncates toward zero.
    pub fn quote(&self, tickets: TicketCount) -> PriceQuote {
        let gross = Price::from(tickets) * self.ticket_price;
        let discount = if tickets >= self.bulk_threshold {
            gross * self.discount_percent / 100
        } else {
            0
        };
        PriceQuote {
            gross,
            discount,
            net: gross - discount,
        }
    }

    /// Revenue for a cumulative sold count.
    ///
    /// The bulk discount re-applies to the whole total once `tickets_sold`
    /// crosses the threshold, so this can differ from summing individually
    /// discounted bookings. Preserved behavior of the reporting rule, not a
    /// rounding bug.
    pub fn revenue(&self, tickets_sold: u64) -> Price {
        let gross = tickets_sold * self.ticket_price;
        if tickets_sold >= u64::from(self.bulk_threshold) {
            gross - gross * self.discount_percent / 100
        } else {
            gross
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_below_threshold_has_no_discount() {
        let pricing = PricingConfig::default();

        for tickets in [1, 4] {
            let quote = pricing.quote(tickets);
            assert_eq!(quote.gross, u64::from(tickets) * 100);
            assert_eq!(quote.discount, 0);
            assert_eq!(quote.net, quote.gross);
        }
    }

    #[test]
    fn test_quote_at_threshold_discounts_ten_percent() {
        let quote = PricingConfig::default().quote(5);
        assert_eq!(quote.gross, 500);
        assert_eq!(quote.discount, 50);
        assert_eq!(quote.net, 450);
    }

    #[test]
    fn test_discount_truncates_toward_zero() {
        let pricing = PricingConfig {
            ticket_price: 33,
            ..PricingConfig::default()
        };

        // 5 x 33 = 165 gross; 10% is 16.5, truncated to 16
        let quote = pricing.quote(5);
        assert_eq!(quote.gross, 165);
        assert_eq!(quote.discount, 16);
        assert_eq!(quote.net, 149);
    }

    #[test]
    fn test_revenue_below_threshold() {
        let pricing = PricingConfig::default();
        assert_eq!(pricing.revenue(0), 0);
        assert_eq!(pricing.revenue(3), 300);
        assert_eq!(pricing.revenue(4), 400);
    }

    #[test]
    fn test_revenue_reapplies_discount_to_cumulative_total() {
        let pricing = PricingConfig::default();

        // Two separate 3-ticket sales carry no per-transaction discount
        // (3 < threshold), but the cumulative report discounts the total.
        let per_transaction_net = pricing.quote(3).net + pricing.quote(3).net;
        assert_eq!(per_transaction_net, 600);
        assert_eq!(pricing.revenue(6), 540);
    }
}
