use crate::error::{LoanError, LoanResult};
use log::debug;

/// Payments are made monthly; the annual rate is split evenly across them.
pub const PAYMENTS_PER_YEAR: u32 = 12;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LoanTerms {
    pub principal: f64,
    pub annual_rate: f64,
    pub term_years: u32,
}

impl LoanTerms {
    /// Validated loan terms. `annual_rate` is a percentage, so `5.0` means 5%.
    pub fn new(principal: f64, annual_rate: f64, term_years: u32) -> LoanResult<Self> {
        check_principal(principal)?;
        check_annual_rate(annual_rate)?;
        get_pmt_count(term_years)?;
        Ok(Self {
            principal,
            annual_rate,
            term_years,
        })
    }

    pub fn periodic_rate(&self) -> f64 {
        get_periodic_rate(self.annual_rate)
    }

    pub fn pmt_count(&self) -> u32 {
        // validated in new(); a hand-built struct with an absurd term saturates
        self.term_years.saturating_mul(PAYMENTS_PER_YEAR)
    }
}

/// Level monthly payment that retires `principal` over `term_years`.
///
/// With a monthly rate `r > 0` and `n` payments this is the annuity payment
/// `principal * r / (1 - (1 + r)^-n)`. At `r == 0` that expression is 0/0,
/// so the loan is repaid straight-line instead: `principal / n`.
pub fn compute_payment(principal: f64, annual_rate: f64, term_years: u32) -> LoanResult<f64> {
    check_principal(principal)?;
    check_annual_rate(annual_rate)?;
    let pmt_count = get_pmt_count(term_years)?;
    let rate = get_periodic_rate(annual_rate);

    let payment = if rate > 0. {
        // (1 + r)^-n - 1 computed through ln_1p/exp_m1 keeps precision for
        // tiny rates and does not overflow for long terms at high rates
        let growth = f64::from(pmt_count) * rate.ln_1p();
        principal * rate / -(-growth).exp_m1()
    } else {
        principal / f64::from(pmt_count)
    };
    if !payment.is_finite() {
        return Err(LoanError::invalid(
            "principal",
            format!(
                "{} at {}% over {} years overflows the payment",
                principal, annual_rate, term_years
            ),
        ));
    }

    debug!(
        "payment {} for principal {}, rate {}%, {} payments",
        payment, principal, annual_rate, pmt_count
    );
    Ok(payment)
}

pub(crate) fn get_periodic_rate(annual_rate: f64) -> f64 {
    (annual_rate / 100.) / f64::from(PAYMENTS_PER_YEAR)
}

fn get_pmt_count(term_years: u32) -> LoanResult<u32> {
    if term_years == 0 {
        return Err(LoanError::invalid("term_years", "must be at least 1"));
    }
    term_years
        .checked_mul(PAYMENTS_PER_YEAR)
        .ok_or_else(|| LoanError::invalid("term_years", format!("{} is too long", term_years)))
}

pub(crate) fn check_principal(principal: f64) -> LoanResult<()> {
    if !principal.is_finite() || principal <= 0. {
        return Err(LoanError::invalid(
            "principal",
            format!("must be a positive amount, got {}", principal),
        ));
    }
    Ok(())
}

fn check_annual_rate(annual_rate: f64) -> LoanResult<()> {
    if !annual_rate.is_finite() || annual_rate < 0. {
        return Err(LoanError::invalid(
            "annual_rate",
            format!("must be zero or positive, got {}", annual_rate),
        ));
    }
    Ok(())
}
