//! Fixed-rate mortgage amortization.
//!
//! [`loan`] derives the level monthly payment, [`schedule`] walks the loan
//! down to a zero balance one payment at a time, and [`export`] writes the
//! result as CSV.

pub mod error;
pub mod export;
pub mod loan;
pub mod schedule;

pub use error::{LoanError, LoanResult};
pub use loan::{compute_payment, LoanTerms};
pub use schedule::{generate_schedule, Amortization, LoanSummary, ScheduleEntry};
