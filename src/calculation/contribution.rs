//! ESI contribution arithmetic.
//!
//! Two computation paths exist side by side. [`compute_contribution`] works
//! from a gross wage and the configured rates. [`derive_from_deduction`]
//! works from a recorded employee deduction and the fixed multipliers used
//! by every report and aggregate.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::ContributionBreakdown;

/// Employer contribution per unit of employee deduction.
///
/// Fixed; it is not derived from the configurable rates.
pub const EMPLOYER_MULTIPLIER: Decimal = Decimal::from_parts(433, 0, 0, false, 2);

/// Total contribution per unit of employee deduction.
pub const TOTAL_MULTIPLIER: Decimal = Decimal::from_parts(533, 0, 0, false, 2);

/// Rounds a monetary amount to 2 decimal places, halves away from zero.
///
/// # Example
///
/// ```
/// use esi_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("0.065").unwrap()), Decimal::from_str("0.07").unwrap());
/// assert_eq!(round_currency(Decimal::from_str("0.015").unwrap()), Decimal::from_str("0.02").unwrap());
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the contribution due on a gross wage.
///
/// Each share is `wage × rate / 100`, rounded to 2 decimal places on its
/// own. The total is the sum of the rounded shares, so it can differ by a
/// cent from rounding `wage × (employee + employer rate) / 100`.
///
/// # Arguments
///
/// * `gross_wage` - The gross wage for the period
/// * `employee_rate` - Employee rate in percent (e.g., 0.75)
/// * `employer_rate` - Employer rate in percent (e.g., 3.25)
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] when a share does not fit in a
/// `Decimal`.
///
/// # Examples
///
/// ```
/// use esi_engine::calculation::compute_contribution;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let result = compute_contribution(dec("10000"), dec("0.75"), dec("3.25")).unwrap();
///
/// assert_eq!(result.employee, dec("75.00"));
/// assert_eq!(result.employer, dec("325.00"));
/// assert_eq!(result.total, dec("400.00"));
/// ```
pub fn compute_contribution(
    gross_wage: Decimal,
    employee_rate: Decimal,
    employer_rate: Decimal,
) -> EngineResult<ContributionBreakdown> {
    let employee = percent_share(gross_wage, employee_rate, "employee")?;
    let employer = percent_share(gross_wage, employer_rate, "employer")?;
    let total = employee
        .checked_add(employer)
        .ok_or_else(|| overflow("total", gross_wage))?;

    Ok(ContributionBreakdown {
        employee,
        employer,
        total,
    })
}

/// `wage × rate / 100`, rounded to the cent.
fn percent_share(gross_wage: Decimal, rate: Decimal, share: &str) -> EngineResult<Decimal> {
    gross_wage
        .checked_mul(rate)
        .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
        .map(round_currency)
        .ok_or_else(|| overflow(share, gross_wage))
}

fn overflow(share: &str, gross_wage: Decimal) -> EngineError {
    EngineError::CalculationError {
        message: format!(
            "{} contribution on gross wage {} is out of range",
            share, gross_wage
        ),
    }
}

/// Derives employer and total contribution from a recorded deduction.
///
/// The deduction's sign is ignored. No rounding is applied.
///
/// # Example
///
/// ```
/// use esi_engine::calculation::derive_from_deduction;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let result = derive_from_deduction(dec("-100"));
///
/// assert_eq!(result.employee, dec("100"));
/// assert_eq!(result.employer, dec("433"));
/// assert_eq!(result.total, dec("533"));
/// ```
pub fn derive_from_deduction(deduction: Decimal) -> ContributionBreakdown {
    let employee = deduction.abs();
    ContributionBreakdown {
        employee,
        employer: employee * EMPLOYER_MULTIPLIER,
        total: employee * TOTAL_MULTIPLIER,
    }
}

/// Returns true when a gross wage is covered by the scheme.
///
/// Coverage is inclusive: a wage exactly at the threshold is eligible.
///
/// # Example
///
/// ```
/// use esi_engine::calculation::is_eligible;
/// use rust_decimal::Decimal;
///
/// let threshold = Decimal::from(21000);
/// assert!(is_eligible(Decimal::from(21000), threshold));
/// assert!(!is_eligible(Decimal::from(21001), threshold));
/// ```
pub fn is_eligible(gross_wage: Decimal, threshold: Decimal) -> bool {
    gross_wage <= threshold
}
