//! Eligibility checks: policy-active date and condition waiting periods

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use core_kernel::CoreError;
use domain_policy::PolicyTerms;

use crate::claim::ClaimRecord;
use crate::reason::{ReasonCode, Reasons};

pub const NOTE_POLICY_ACTIVE_FROM: &str = "policy_active_from";
pub const NOTE_JOIN_DATE: &str = "join_date";
pub const NOTE_WAITING_PERIOD_PREFIX: &str = "waiting_period_until";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EligibilityOutcome {
    pub ok: bool,
    pub flags: Reasons,
    pub notes: BTreeMap<String, String>,
}

pub struct EligibilityChecker;

impl EligibilityChecker {
    /// Runs the eligibility rules; internal failures become a flag, never an error
    pub fn check(claim: &ClaimRecord, policy: &PolicyTerms) -> EligibilityOutcome {
        let mut outcome = EligibilityOutcome::default();

        if let Err(e) = Self::evaluate(claim, policy, &mut outcome) {
            tracing::warn!(error = %e, "Eligibility check failed, flagging claim");
            outcome.flags.insert(ReasonCode::EligibilityCheckError);
        }

        outcome.ok = outcome.flags.is_empty();
        outcome
    }

    fn evaluate(
        claim: &ClaimRecord,
        policy: &PolicyTerms,
        outcome: &mut EligibilityOutcome,
    ) -> Result<(), CoreError> {
        let treatment_date = claim.treatment_date.as_ref().and_then(|d| d.normalize());
        let Some(treatment_date) = treatment_date else {
            tracing::debug!("No usable treatment date, skipping date-based eligibility");
            return Ok(());
        };

        if let Some(effective) = policy.effective_date {
            if treatment_date < effective {
                outcome.flags.insert(ReasonCode::PolicyInactive);
                outcome
                    .notes
                    .insert(NOTE_POLICY_ACTIVE_FROM.to_string(), format_date(effective));
            }
        }

        let conditions = policy.waiting_periods_for(claim.diagnosis_text());
        if conditions.is_empty() {
            return Ok(());
        }

        let Some(join_date) = Self::join_date(claim, policy) else {
            outcome
                .notes
                .insert(NOTE_JOIN_DATE.to_string(), "unknown".to_string());
            return Ok(());
        };

        for wp in conditions {
            let eligible_from = join_date
                .checked_add_days(Days::new(u64::from(wp.days)))
                .ok_or_else(|| {
                    CoreError::invalid_date(format!("{} + {} days", join_date, wp.days))
                })?;

            if treatment_date < eligible_from {
                outcome.flags.insert(ReasonCode::WaitingPeriod);
                outcome.notes.insert(
                    format!("{}.{}", NOTE_WAITING_PERIOD_PREFIX, wp.condition),
                    format_date(eligible_from),
                );
            }
        }

        Ok(())
    }

    /// Member join date, falling back to the policy baseline
    fn join_date(claim: &ClaimRecord, policy: &PolicyTerms) -> Option<NaiveDate> {
        claim
            .member
            .as_ref()
            .and_then(|m| m.join_date.as_ref())
            .and_then(|d| d.normalize())
            .or(policy.default_join_date)
            .or(policy.effective_date)
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
