//! Adjudication ledger
//!
//! The ordered list of monetary adjustments explaining how the claimed total
//! became the approved amount. The first entry is always the claimed total
//! and the last is always the final approved amount.

use serde::{Deserialize, Serialize};

use core_kernel::Money;

pub const CLAIMED_LABEL: &str = "Claimed Total";
pub const FINAL_LABEL: &str = "Final Approved Amount";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Claimed,
    Exclusion,
    SubLimit,
    PerClaimLimit,
    NetworkDiscount,
    Copay,
    ClaimedTotalCap,
    Approved,
}

impl EntryKind {
    /// Deductions that reduce the payout without making the claim partial
    pub fn is_benefit_adjustment(&self) -> bool {
        matches!(self, EntryKind::Copay | EntryKind::NetworkDiscount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub label: String,
    pub amount: Money,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    /// Starts a ledger with the claimed total
    pub fn opened_with(claimed: Money) -> Self {
        Self {
            entries: vec![LedgerEntry {
                label: CLAIMED_LABEL.to_string(),
                amount: claimed,
                kind: EntryKind::Claimed,
            }],
        }
    }

    /// Records a deduction; the amount is stored negated
    pub fn deduct(&mut self, label: impl Into<String>, amount: Money, kind: EntryKind) {
        self.entries.push(LedgerEntry {
            label: label.into(),
            amount: -amount,
            kind,
        });
    }

    /// Appends the final approved amount
    pub fn close(&mut self, approved: Money) {
        self.entries.push(LedgerEntry {
            label: FINAL_LABEL.to_string(),
            amount: approved,
            kind: EntryKind::Approved,
        });
    }

    /// Forces the final entry to zero for outcomes that pay nothing
    pub fn zero_final(&mut self) {
        if let Some(last) = self.entries.last_mut().filter(|e| e.kind == EntryKind::Approved) {
            last.amount = Money::zero();
        }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn final_amount(&self) -> Option<Money> {
        self.entries
            .last()
            .filter(|e| e.kind == EntryKind::Approved)
            .map(|e| e.amount)
    }

    /// Deductions between the claimed total and the final entry
    pub fn deductions(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries
            .iter()
            .filter(|e| !matches!(e.kind, EntryKind::Claimed | EntryKind::Approved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ledger_shape() {
        let mut ledger = Ledger::opened_with(Money::new(dec!(1500)));
        ledger.deduct("Copay (10%)", Money::new(dec!(150)), EntryKind::Copay);
        ledger.close(Money::new(dec!(1350)));

        let entries = ledger.entries();
        assert_eq!(entries.first().unwrap().kind, EntryKind::Claimed);
        assert_eq!(entries[1].amount.amount(), dec!(-150));
        assert_eq!(ledger.final_amount(), Some(Money::new(dec!(1350))));
        assert_eq!(ledger.deductions().count(), 1);
    }

    #[test]
    fn test_zero_final_only_touches_approved_entry() {
        let mut ledger = Ledger::opened_with(Money::new(dec!(1500)));
        ledger.zero_final();
        assert_eq!(ledger.entries()[0].amount.amount(), dec!(1500));

        ledger.close(Money::new(dec!(1500)));
        ledger.zero_final();
        assert_eq!(ledger.final_amount(), Some(Money::zero()));
    }
}
