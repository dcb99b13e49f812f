// 📒 Movement Ledger - append-only record of signed account movements
//
// Each movement carries its own timestamp, so amount and date always grow
// together: the alignment invariant is structural, not conventional.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// MOVEMENT
// ============================================================================

/// A single signed monetary movement recorded against an account.
///
/// Positive amounts are deposits; zero and negative amounts are withdrawals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementKind {
    Deposit,
    Withdrawal,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Deposit => "deposit",
            MovementKind::Withdrawal => "withdrawal",
        }
    }
}

impl Movement {
    pub fn new(amount: f64, timestamp: DateTime<Utc>) -> Self {
        Movement { amount, timestamp }
    }

    /// Deposit iff the amount is strictly positive.
    pub fn kind(&self) -> MovementKind {
        if self.amount > 0.0 {
            MovementKind::Deposit
        } else {
            MovementKind::Withdrawal
        }
    }

    pub fn is_deposit(&self) -> bool {
        self.kind() == MovementKind::Deposit
    }

    pub fn is_withdrawal(&self) -> bool {
        self.kind() == MovementKind::Withdrawal
    }
}

// ============================================================================
// LEDGER
// ============================================================================

/// Ordered collection of an account's movements.
///
/// Append-only: entries are never deleted or reordered during the process
/// lifetime. Sorting for display goes through `sorted_view`, which leaves
/// the stored order untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    entries: Vec<Movement>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger {
            entries: Vec::new(),
        }
    }

    /// Record one movement. Existing entries are untouched.
    pub fn append(&mut self, amount: f64, timestamp: DateTime<Utc>) {
        self.entries.push(Movement::new(amount, timestamp));
    }

    pub fn entries(&self) -> &[Movement] {
        &self.entries
    }

    pub fn amounts(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|movement| movement.amount)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Movement> {
        self.entries.last()
    }

    /// Display view with amounts sorted ascending.
    ///
    /// Only the amount column is reordered: row N keeps the timestamp of
    /// the N-th stored entry, so the date column stays in place when the
    /// sort toggle is on.
    pub fn sorted_view(&self) -> Vec<Movement> {
        let mut amounts: Vec<f64> = self.amounts().collect();
        amounts.sort_by(f64::total_cmp);

        amounts
            .into_iter()
            .zip(self.entries.iter())
            .map(|(amount, original)| Movement::new(amount, original.timestamp))
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stamp(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 7, day, 12, 0, 0).unwrap()
    }

    fn create_test_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.append(200.0, stamp(1));
        ledger.append(-400.0, stamp(2));
        ledger.append(3000.0, stamp(3));
        ledger
    }

    #[test]
    fn test_append_grows_by_one() {
        let mut ledger = Ledger::new();
        assert!(ledger.is_empty());

        ledger.append(200.0, stamp(1));
        assert_eq!(ledger.len(), 1);

        ledger.append(-50.0, stamp(2));
        assert_eq!(ledger.len(), 2);

        let last = ledger.last().unwrap();
        assert_eq!(last.amount, -50.0);
        assert_eq!(last.timestamp, stamp(2));
    }

    #[test]
    fn test_append_preserves_existing_entries() {
        let mut ledger = create_test_ledger();
        let before: Vec<Movement> = ledger.entries().to_vec();

        ledger.append(99.0, stamp(4));

        assert_eq!(&ledger.entries()[..3], &before[..]);
    }

    #[test]
    fn test_movement_kind() {
        assert_eq!(Movement::new(200.0, stamp(1)).kind(), MovementKind::Deposit);
        assert_eq!(
            Movement::new(-130.0, stamp(1)).kind(),
            MovementKind::Withdrawal
        );
        // Zero counts as a withdrawal
        assert_eq!(
            Movement::new(0.0, stamp(1)).kind(),
            MovementKind::Withdrawal
        );
    }

    #[test]
    fn test_movement_kind_as_str() {
        assert_eq!(MovementKind::Deposit.as_str(), "deposit");
        assert_eq!(MovementKind::Withdrawal.as_str(), "withdrawal");
    }

    #[test]
    fn test_sorted_view_orders_amounts_ascending() {
        let ledger = create_test_ledger();
        let view = ledger.sorted_view();

        let amounts: Vec<f64> = view.iter().map(|m| m.amount).collect();
        assert_eq!(amounts, vec![-400.0, 200.0, 3000.0]);
    }

    #[test]
    fn test_sorted_view_keeps_timestamps_in_place() {
        let ledger = create_test_ledger();
        let view = ledger.sorted_view();

        // Timestamps stay in stored order even though amounts moved
        assert_eq!(view[0].timestamp, stamp(1));
        assert_eq!(view[1].timestamp, stamp(2));
        assert_eq!(view[2].timestamp, stamp(3));
    }

    #[test]
    fn test_sorted_view_does_not_mutate_ledger() {
        let ledger = create_test_ledger();
        let before: Vec<Movement> = ledger.entries().to_vec();

        let _ = ledger.sorted_view();

        assert_eq!(ledger.entries(), &before[..]);
    }

    #[test]
    fn test_sorted_view_empty_ledger() {
        let ledger = Ledger::new();
        assert!(ledger.sorted_view().is_empty());
    }
}
