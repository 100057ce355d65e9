//! Booking-date resolution
//!
//! Every journal line books on the contract ledger's fixed monthly cutoff
//! day (company rule: the 27th, clamped to short months). A period normally
//! books in its own month; a late approval or late payment pulls the
//! booking forward into the reference month's cutoff instead.
//!
//! This resolver is the single source of truth for booking-date placement:
//! accrual generation passes the approval date as the reference, payment
//! allocation passes the payment date.

use chrono::NaiveDate;
use core_kernel::temporal::{clamped_day_in_month, month_start};
use serde::{Deserialize, Serialize};

/// Default company booking day-of-month
pub const DEFAULT_BOOKING_DAY: u32 = 27;

/// Resolves nominal period months to concrete ledger booking dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDateResolver {
    booking_day: u32,
}

impl Default for BookingDateResolver {
    fn default() -> Self {
        Self::new(DEFAULT_BOOKING_DAY)
    }
}

impl BookingDateResolver {
    /// Creates a resolver with a custom booking day (normally 27)
    pub fn new(booking_day: u32) -> Self {
        Self { booking_day }
    }

    /// The configured booking day-of-month
    pub fn booking_day(&self) -> u32 {
        self.booking_day
    }

    /// Cutoff date within the given month: the booking day clamped to the
    /// month's last day
    pub fn cutoff(&self, month: NaiveDate) -> NaiveDate {
        clamped_day_in_month(month, self.booking_day)
    }

    /// Resolves a period's booking date against a reference date
    ///
    /// - No reference: the period books at its own month's cutoff.
    /// - Period month strictly before the reference month: the booking
    ///   shifts forward to the reference month's cutoff (late approval or
    ///   late payment pulls the cost into the processing month).
    /// - Otherwise: the period's own cutoff.
    pub fn resolve(&self, period_month: NaiveDate, reference: Option<NaiveDate>) -> NaiveDate {
        let period_cutoff = self.cutoff(period_month);
        let Some(reference) = reference else {
            return period_cutoff;
        };

        if month_start(period_month) < month_start(reference) {
            self.cutoff(reference)
        } else {
            period_cutoff
        }
    }
}
