// 📊 Derived Value Calculator - pure reductions over a ledger snapshot
//
// Every reduction is seeded with zero: an account with no deposits (or no
// withdrawals) reports 0 instead of an undefined sum over an empty set.

use crate::account::Account;
use crate::ledger::Ledger;
use serde::{Deserialize, Serialize};

/// Arithmetic sum of all movements.
pub fn balance(ledger: &Ledger) -> f64 {
    ledger.amounts().sum()
}

/// Sum of strictly positive movements.
pub fn total_deposits(ledger: &Ledger) -> f64 {
    ledger.amounts().filter(|amount| *amount > 0.0).sum()
}

/// Sum of strictly negative movements, reported as a positive magnitude.
pub fn total_withdrawals(ledger: &Ledger) -> f64 {
    ledger
        .amounts()
        .filter(|amount| *amount < 0.0)
        .sum::<f64>()
        .abs()
}

/// Interest earned across qualifying deposits.
///
/// Interest is computed per deposit, not on the total: each deposit
/// contributes `deposit * rate / 100`, and a per-deposit term below 1 (in
/// the account's currency unit) is discarded entirely, not rounded.
pub fn qualifying_interest(ledger: &Ledger, interest_rate: f64) -> f64 {
    ledger
        .amounts()
        .filter(|amount| *amount > 0.0)
        .map(|deposit| deposit * interest_rate / 100.0)
        .filter(|term| *term >= 1.0)
        .sum()
}

// ============================================================================
// ACCOUNT SUMMARY
// ============================================================================

/// All derived figures for one account, computed in a single pass set.
/// Withdrawals are carried as a positive magnitude, ready for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub balance: f64,
    pub deposits_in: f64,
    pub withdrawals_out: f64,
    pub interest: f64,
}

impl AccountSummary {
    pub fn from_ledger(ledger: &Ledger, interest_rate: f64) -> Self {
        AccountSummary {
            balance: balance(ledger),
            deposits_in: total_deposits(ledger),
            withdrawals_out: total_withdrawals(ledger),
            interest: qualifying_interest(ledger, interest_rate),
        }
    }

    pub fn for_account(account: &Account) -> Self {
        Self::from_ledger(&account.ledger, account.interest_rate)
    }
}

// ============================================================================
// TESTS
// ============================================================================
