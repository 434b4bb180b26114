//! Ad-hoc contribution assessment for a single gross wage.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::ContributionSettings;
use crate::error::EngineResult;
use crate::models::{AuditStep, CalculationResult};

use super::contribution::{compute_contribution, is_eligible};

/// Checks a gross wage against the threshold and computes the contribution due.
///
/// The result always carries an eligibility step. An eligible wage adds a
/// contribution step and a breakdown; an ineligible one has neither.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::CalculationError`] when the
/// contribution on an eligible wage overflows.
///
/// # Example
///
/// ```
/// use esi_engine::calculation::assess_wage;
/// use esi_engine::config::ContributionSettings;
/// use rust_decimal::Decimal;
///
/// let result = assess_wage(Decimal::from(10000), &ContributionSettings::default()).unwrap();
/// assert!(result.eligible);
/// assert_eq!(result.audit_steps.len(), 2);
/// assert_eq!(result.contribution.unwrap().total, Decimal::from(400));
/// ```
pub fn assess_wage(
    gross_wage: Decimal,
    settings: &ContributionSettings,
) -> EngineResult<CalculationResult> {
    let threshold = settings.esi_threshold;
    let eligible = is_eligible(gross_wage, threshold);

    let mut audit_steps = vec![AuditStep {
        step_number: 1,
        rule_id: "esi_eligibility".to_string(),
        rule_name: "ESI Eligibility".to_string(),
        input: serde_json::json!({
            "gross_wage": gross_wage.normalize().to_string(),
            "esi_threshold": threshold.normalize().to_string()
        }),
        output: serde_json::json!({ "eligible": eligible }),
        reasoning: if eligible {
            format!(
                "Gross wage {} is within the threshold of {}",
                gross_wage.normalize(),
                threshold.normalize()
            )
        } else {
            format!(
                "Gross wage {} exceeds the threshold of {}; no contribution due",
                gross_wage.normalize(),
                threshold.normalize()
            )
        },
    }];

    let contribution = if eligible {
        let breakdown = compute_contribution(
            gross_wage,
            settings.employee_esi_rate,
            settings.employer_esi_rate,
        )?;
        audit_steps.push(AuditStep {
            step_number: 2,
            rule_id: "esi_contribution".to_string(),
            rule_name: "ESI Contribution".to_string(),
            input: serde_json::json!({
                "gross_wage": gross_wage.normalize().to_string(),
                "employee_rate": settings.employee_esi_rate.normalize().to_string(),
                "employer_rate": settings.employer_esi_rate.normalize().to_string()
            }),
            output: serde_json::json!({
                "employee": breakdown.employee.to_string(),
                "employer": breakdown.employer.to_string(),
                "total": breakdown.total.to_string()
            }),
            reasoning: format!(
                "{} x {}% = {}; {} x {}% = {}",
                gross_wage.normalize(),
                settings.employee_esi_rate.normalize(),
                breakdown.employee,
                gross_wage.normalize(),
                settings.employer_esi_rate.normalize(),
                breakdown.employer
            ),
        });
        Some(breakdown)
    } else {
        None
    };

    Ok(CalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        gross_wage,
        eligible,
        contribution,
        audit_steps,
    })
}
