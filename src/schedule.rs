use crate::error::{LoanError, LoanResult};
use crate::loan::{check_principal, compute_payment, LoanTerms};
use log::{debug, trace, warn};
use std::fmt;

/// Smallest residue, in currency units, that is treated as paid off.
pub const BALANCE_EPSILON: f64 = 1e-5;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ScheduleEntry {
    pub period: u32,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub balance: f64,
}

impl fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pmt number {}, payment ${:.2}, interest paid ${:.2}, principal paid ${:.2}, ending balance ${:.2}",
            self.period, self.payment, self.interest, self.principal, self.balance
        )
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LoanSummary {
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
}

/// A loan together with its level payment and full payment schedule.
#[derive(PartialEq, Debug)]
pub struct Amortization {
    terms: LoanTerms,
    pmt_amount: f64,
    scheduled_pmts: Vec<ScheduleEntry>,
}

impl Amortization {
    pub fn new(terms: LoanTerms) -> LoanResult<Self> {
        let pmt_amount = compute_payment(terms.principal, terms.annual_rate, terms.term_years)?;
        let scheduled_pmts = generate_schedule(
            terms.principal,
            terms.periodic_rate(),
            terms.pmt_count(),
            pmt_amount,
        )?;
        Ok(Self {
            terms,
            pmt_amount,
            scheduled_pmts,
        })
    }

    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    pub fn pmt_amount(&self) -> f64 {
        self.pmt_amount
    }

    pub fn pmt_count(&self) -> usize {
        self.scheduled_pmts.len()
    }

    pub fn schedule(&self) -> &[ScheduleEntry] {
        &self.scheduled_pmts
    }

    /// Entry for a 1-based payment number.
    pub fn pmt_detail(&self, pmt_number: usize) -> Option<&ScheduleEntry> {
        self.scheduled_pmts.get(pmt_number.checked_sub(1)?)
    }

    pub fn pmt_info(&self, pmt_number: usize) -> String {
        match self.pmt_detail(pmt_number) {
            Some(pmt) => pmt.to_string(),
            None => "No payment information.".to_string(),
        }
    }

    pub fn summary(&self) -> LoanSummary {
        let total_paid = self.pmt_amount * self.pmt_count() as f64;
        LoanSummary {
            monthly_payment: self.pmt_amount,
            total_paid,
            total_interest: total_paid - self.terms.principal,
        }
    }

    pub fn show_amortization(&self) {
        for pmt in &self.scheduled_pmts {
            println!("{}", pmt);
        }
    }
}

/// Floating-point residue tolerated in the final balance of a schedule.
///
/// Rounding error in the payment and in each balance update is compounded by
/// the interest still to accrue, so the bound grows with `(1 + r)^n`. It never
/// drops under [`BALANCE_EPSILON`] and never exceeds one payment.
pub fn balance_tolerance(
    principal: f64,
    periodic_rate: f64,
    num_periods: u32,
    payment: f64,
) -> f64 {
    let growth = (f64::from(num_periods) * periodic_rate.ln_1p()).exp();
    let drift = f64::EPSILON * principal.abs() * f64::from(num_periods) * growth;
    drift.min(payment).max(BALANCE_EPSILON)
}

/// Payment-by-payment breakdown of a level-payment loan.
///
/// Each period charges `balance * periodic_rate` in interest and applies the
/// rest of `payment` to principal. After the last payment any residue within
/// [`balance_tolerance`], positive or negative, is reported as exactly zero.
///
/// `payment` is taken as given. If it does not retire `principal` in exactly
/// `num_periods` payments, either because a balance is left after the last
/// one or because the loan is paid off before then, the schedule is rejected
/// with [`LoanError::InconsistentInputs`].
pub fn generate_schedule(
    principal: f64,
    periodic_rate: f64,
    num_periods: u32,
    payment: f64,
) -> LoanResult<Vec<ScheduleEntry>> {
    check_principal(principal)?;
    if !periodic_rate.is_finite() || periodic_rate < 0. {
        return Err(LoanError::invalid(
            "periodic_rate",
            format!("must be zero or positive, got {}", periodic_rate),
        ));
    }
    if num_periods == 0 {
        return Err(LoanError::invalid("num_periods", "must be at least 1"));
    }
    if !payment.is_finite() || payment <= 0. {
        return Err(LoanError::invalid(
            "payment",
            format!("must be a positive amount, got {}", payment),
        ));
    }

    let tolerance = balance_tolerance(principal, periodic_rate, num_periods, payment);
    let mut sched_pmt = Vec::with_capacity(num_periods as usize);
    let mut balance = principal;

    for period in 1..=num_periods {
        let interest = balance * periodic_rate;
        let principal_paid = payment - interest;
        balance -= principal_paid;
        trace!(
            "pmt # {}, interest {}, principal {}, end bal {}",
            period,
            interest,
            principal_paid,
            balance
        );

        // paid off with payments still due, or overshot on the last one
        let paid_early = period < num_periods && balance <= 0.;
        if paid_early || balance < -tolerance {
            warn!(
                "payment {} overpays the loan at pmt # {} of {}",
                payment, period, num_periods
            );
            return Err(LoanError::InconsistentInputs {
                period,
                residual: balance,
                tolerance,
            });
        }
        if period == num_periods && balance < tolerance {
            balance = 0.;
        }

        sched_pmt.push(ScheduleEntry {
            period,
            payment,
            interest,
            principal: principal_paid,
            balance,
        });
    }

    if balance != 0. {
        warn!(
            "payment {} leaves {} outstanding after {} payments",
            payment, balance, num_periods
        );
        return Err(LoanError::InconsistentInputs {
            period: num_periods,
            residual: balance,
            tolerance,
        });
    }

    debug!(
        "generated {} payments for principal {}",
        sched_pmt.len(),
        principal
    );
    Ok(sched_pmt)
}
